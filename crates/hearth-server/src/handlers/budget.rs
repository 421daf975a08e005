//! Budget plan and analysis handlers

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use crate::{get_user_id, AppError, AppState, SuccessResponse};
use hearth_core::budget::{AllocationPlan, BudgetReport, BudgetService};
use hearth_core::models::UserBudgetPlan;

/// GET /api/budget/plans - List the five fixture allocation plans
///
/// Public: the catalog is constant data and carries nothing user-specific.
pub async fn list_allocation_plans() -> Json<Vec<AllocationPlan>> {
    Json(AllocationPlan::all())
}

/// Request body for selecting a plan
#[derive(Debug, Deserialize)]
pub struct SelectPlanRequest {
    pub plan_id: String,
    pub monthly_income: f64,
}

/// POST /api/budget/plan - Select (or replace) the user's budget plan
pub async fn select_budget_plan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SelectPlanRequest>,
) -> Result<Json<UserBudgetPlan>, AppError> {
    let user_id = get_user_id(&headers);

    let plan = BudgetService::new(&state.db)
        .select_plan(&user_id, &body.plan_id, body.monthly_income)
        .map_err(AppError::from_core)?;

    Ok(Json(plan))
}

/// GET /api/budget/plan - The user's selected plan
pub async fn get_budget_plan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserBudgetPlan>, AppError> {
    let user_id = get_user_id(&headers);

    let plan = BudgetService::new(&state.db)
        .plan(&user_id)
        .map_err(AppError::from_core)?;

    Ok(Json(plan))
}

/// DELETE /api/budget/plan - Delete the user's plan
pub async fn delete_budget_plan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);

    BudgetService::new(&state.db)
        .delete_plan(&user_id)
        .map_err(AppError::from_core)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/budget/analysis - Run the monthly budget analysis
///
/// The analysis month comes from the server's local clock at request time.
pub async fn get_budget_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BudgetReport>, AppError> {
    let user_id = get_user_id(&headers);
    let today = chrono::Local::now().date_naive();

    let report = BudgetService::new(&state.db)
        .analyze(&user_id, today)
        .map_err(AppError::from_core)?;

    Ok(Json(report))
}
