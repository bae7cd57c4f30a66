//! Domain models for Spendwise

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Row id of a registered user
pub type UserId = i64;

/// A registered user (never carries the credential hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash, for login checks only
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Shopping,
        Self::Bills,
        Self::Health,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Chart color for this category
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF6B6B",
            Self::Transport => "#4ECDC4",
            Self::Entertainment => "#45B7D1",
            Self::Shopping => "#96CEB4",
            Self::Bills => "#FFEAA7",
            Self::Health => "#DDA0DD",
            Self::Other => "#98D8C8",
        }
    }

    /// Chart color for a stored category label.
    ///
    /// Labels are matched exactly; anything else gets the `Other` color.
    pub fn color_for(label: &str) -> &'static str {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == label)
            .unwrap_or(&Self::Other)
            .color()
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "health" => Ok(Self::Health),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense as stored
///
/// `category` is the stored label. Rows written through [`NewExpense`] always
/// hold a [`Category`] name, but older rows may carry other labels and those
/// keep their own bucket in reports. `date` is `None` when the stored value is
/// missing or cannot be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub owner_id: UserId,
    /// Users the cost is shared among (unique, may be empty)
    #[serde(default)]
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// New expense for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub participants: Vec<UserId>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidData("description is required".to_string()));
        }
        validate_amount(self.amount)
    }

    /// Participant list as it is persisted for `owner`.
    ///
    /// Duplicates are dropped and the owner is always included; with no
    /// participants given the owner becomes the only one.
    pub fn participants_for(&self, owner: UserId) -> Vec<UserId> {
        let mut out: Vec<UserId> = Vec::with_capacity(self.participants.len() + 1);
        for id in self.participants.iter().copied().chain(std::iter::once(owner)) {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }
}

/// Partial update of an expense; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(desc) = &self.description {
            if desc.trim().is_empty() {
                return Err(Error::InvalidData("description cannot be blank".to_string()));
            }
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

/// Largest accepted expense amount
pub const MAX_AMOUNT: f64 = 1e12;

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::InvalidData(format!(
            "amount must not exceed {}",
            MAX_AMOUNT
        )));
    }
    Ok(())
}
