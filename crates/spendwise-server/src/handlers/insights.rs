//! Insight handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{AppError, AppState, AuthUser};
use spendwise_core::aggregate::AggregateView;
use spendwise_core::insights::{self, Insight};

/// GET /api/expenses/insights - The three spending insights for the caller
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let expenses = state.db.find_visible(user.id)?;
    let view = AggregateView::build(&expenses, user.id, chrono::Local::now().date_naive());

    Ok(Json(insights::generate(&view)))
}
