//! Dashboard handler

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{AppError, AppState, AuthUser};
use spendwise_core::aggregate::{self, AggregateView, ExpenseWithShare};

/// Number of recent expenses shown on the dashboard
const RECENT_EXPENSES: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: AggregateView,
    pub recent_expenses: Vec<ExpenseWithShare>,
}

/// GET /api/dashboard - Totals, monthly trend and category breakdown
///
/// Recomputed from the caller's visible expenses on every request.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let expenses = state.db.find_visible(user.id)?;
    let today = chrono::Local::now().date_naive();

    Ok(Json(DashboardResponse {
        summary: AggregateView::build(&expenses, user.id, today),
        recent_expenses: aggregate::recent(&expenses, user.id, RECENT_EXPENSES),
    }))
}
