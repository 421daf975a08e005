//! Dashboard summary handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use crate::{get_user_id, AppError, AppState};
use hearth_core::budget::{first_day_of_month, last_day_of_month};

/// Dashboard summary for the current month
#[derive(Serialize)]
pub struct DashboardResponse {
    pub transactions: i64,
    pub bills: i64,
    pub loans: i64,
    pub has_budget_plan: bool,
    /// Expense spend in the current calendar month
    pub month_expense_total: f64,
}

/// GET /api/dashboard - Record counts and current-month spend
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, AppError> {
    let user_id = get_user_id(&headers);

    let today = chrono::Local::now().date_naive();
    let from = first_day_of_month(today);
    let to = last_day_of_month(today);

    Ok(Json(DashboardResponse {
        transactions: state.db.count_transactions(&user_id)?,
        bills: state.db.count_bills(&user_id)?,
        loans: state.db.count_loans(&user_id)?,
        has_budget_plan: state.db.get_budget_plan(&user_id)?.is_some(),
        month_expense_total: state.db.expense_total_between(&user_id, from, to)?,
    }))
}
