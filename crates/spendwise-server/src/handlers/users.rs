//! Profile handler

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{AppError, AppState, AuthUser};
use spendwise_core::aggregate::{self, ExpenseWithShare};
use spendwise_core::models::User;
use spendwise_core::share::with_shares;

/// Number of expenses listed on the profile
const PROFILE_TOP_EXPENSES: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: User,
    pub expense_count: usize,
    pub total_share: f64,
    /// Largest shares first
    pub top_expenses: Vec<ExpenseWithShare>,
}

/// GET /api/users/me - Profile with the caller's biggest expenses
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let expenses = state.db.find_visible(user.id)?;
    let total_share: f64 = with_shares(&expenses, user.id)
        .iter()
        .map(|(_, s)| s)
        .sum();
    let top_expenses = aggregate::top_expenses(&expenses, user.id, PROFILE_TOP_EXPENSES);

    Ok(Json(ProfileResponse {
        expense_count: expenses.len(),
        total_share,
        top_expenses,
        user,
    }))
}
