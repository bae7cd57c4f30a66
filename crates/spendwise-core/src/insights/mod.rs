//! Templated spending insights
//!
//! Three fixed statements derived from an [`AggregateView`]:
//!
//! - **Top Spending Category** - the category with the largest total
//! - **Spending Trend** - the latest month compared to the one before it
//! - **Average Expense** - average share per record
//!
//! Insights are plain arithmetic over the current aggregates. Nothing is
//! learned or persisted between calls.

mod format;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateView;

pub use format::{format_currency, CURRENCY_SYMBOL};

/// Which template produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    TopCategory,
    SpendingTrend,
    AverageExpense,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::TopCategory => "top_category",
            InsightKind::SpendingTrend => "spending_trend",
            InsightKind::AverageExpense => "average_expense",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::TopCategory => "Top Spending Category",
            InsightKind::SpendingTrend => "Spending Trend",
            InsightKind::AverageExpense => "Average Expense",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_category" => Ok(InsightKind::TopCategory),
            "spending_trend" => Ok(InsightKind::SpendingTrend),
            "average_expense" => Ok(InsightKind::AverageExpense),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Direction of the two most recent monthly buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Latest month is strictly higher than the month before
    Increased,
    /// Latest month is equal or lower
    StableOrDecreasing,
    /// Fewer than two months of data
    NotEnoughHistory,
}

impl Trend {
    pub fn of(view: &AggregateView) -> Self {
        match view.monthly_series.as_slice() {
            [.., previous, latest] if latest.amount > previous.amount => Trend::Increased,
            [.., _, _] => Trend::StableOrDecreasing,
            _ => Trend::NotEnoughHistory,
        }
    }
}

/// A generated insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub body: String,
}

impl Insight {
    fn new(kind: InsightKind, body: String) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            body,
        }
    }
}

/// Generate the three insights, in fixed order
pub fn generate(view: &AggregateView) -> Vec<Insight> {
    vec![top_category(view), spending_trend(view), average_expense(view)]
}

fn top_category(view: &AggregateView) -> Insight {
    let body = match view.top_category() {
        Some(top) => format!(
            "You spend most on {} ({}). Consider setting a monthly budget for this category.",
            top.category,
            format_currency(top.amount)
        ),
        None => "No spending recorded yet.".to_string(),
    };
    Insight::new(InsightKind::TopCategory, body)
}

fn spending_trend(view: &AggregateView) -> Insight {
    let body = match Trend::of(view) {
        Trend::Increased => {
            "Your spending increased this month. Try to identify areas where you can cut back."
        }
        // A single month reads as stable
        Trend::StableOrDecreasing | Trend::NotEnoughHistory => {
            "Good news! Your spending is stable or decreasing compared to last month."
        }
    };
    Insight::new(InsightKind::SpendingTrend, body.to_string())
}

fn average_expense(view: &AggregateView) -> Insight {
    Insight::new(
        InsightKind::AverageExpense,
        format!(
            "Your average expense is {}. Consider tracking smaller expenses to get a complete picture.",
            format_currency(view.average_share)
        ),
    )
}
