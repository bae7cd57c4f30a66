//! Expense handlers
//!
//! Every response carries the caller's share of each expense.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{parse_json, AppError, AppState, AuthUser, MessageResponse};
use spendwise_core::aggregate::ExpenseWithShare;
use spendwise_core::db::ExpenseFilter;
use spendwise_core::models::{Category, ExpenseUpdate, NewExpense, UserId};

/// Request body for creating an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    #[serde(alias = "title")]
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// `YYYY-MM-DD`, or a timestamp whose first ten characters are one
    pub date: Option<String>,
    #[serde(default)]
    pub participants: Vec<UserId>,
}

/// Query parameters for listing expenses
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    /// Search text (matches description or category, case-insensitive)
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Request body for a partial expense update
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category, AppError> {
    raw.parse().map_err(|e: String| AppError::bad_request(&e))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(&format!("Invalid date: {}", raw)))
}

/// GET /api/expenses - Expenses the caller owns or shares
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Query(params): Query<ListExpensesQuery>,
) -> Result<Json<Vec<ExpenseWithShare>>, AppError> {
    let filter = ExpenseFilter::new()
        .search(params.q.as_deref())
        .category(params.category.as_deref().map(parse_category).transpose()?);
    let expenses = state.db.search_visible(user.id, &filter)?;

    Ok(Json(
        expenses
            .into_iter()
            .map(|e| ExpenseWithShare::new(e, user.id))
            .collect(),
    ))
}

/// POST /api/expenses - Record an expense paid by the caller
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<ExpenseWithShare>), AppError> {
    let req: CreateExpenseRequest = parse_json(&body)?;

    let new_expense = NewExpense {
        description: req.description,
        amount: req.amount,
        category: parse_category(&req.category)?,
        date: req.date.as_deref().map(parse_date).transpose()?,
        participants: req.participants,
    };

    let expense = state.db.create_expense(user.id, &new_expense)?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseWithShare::new(expense, user.id)),
    ))
}

/// PUT /api/expenses/:id - Update an expense (owner only)
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<ExpenseWithShare>, AppError> {
    let req: UpdateExpenseRequest = parse_json(&body)?;

    let update = ExpenseUpdate {
        description: req.description,
        amount: req.amount,
        category: req.category.as_deref().map(parse_category).transpose()?,
        date: req.date.as_deref().map(parse_date).transpose()?,
    };

    let expense = state.db.update_expense(id, user.id, &update)?;

    Ok(Json(ExpenseWithShare::new(expense, user.id)))
}

/// DELETE /api/expenses/:id - Permanently delete an expense (owner only)
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.db.delete_expense(id, user.id)?;

    Ok(Json(MessageResponse {
        message: "Expense deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_timestamps() {
        assert_eq!(
            parse_date("2025-03-04T10:00:00.000Z").ok(),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
        assert_eq!(
            parse_date("2025-03-04").ok(),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_category_case_insensitive() {
        assert_eq!(parse_category("food").ok(), Some(Category::Food));
        assert!(parse_category("Groceries").is_err());
    }
}
