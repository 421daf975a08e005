//! Scheduled bill handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{get_user_id, AppError, AppState, SuccessResponse};
use hearth_core::models::{NewScheduledBill, ScheduledBill};

fn validate_bill(bill: &NewScheduledBill) -> Result<(), AppError> {
    if bill.name.trim().is_empty() {
        return Err(AppError::bad_request("Bill name must not be empty"));
    }
    if bill.amount < 0.0 {
        return Err(AppError::bad_request("Bill amount must not be negative"));
    }
    if !(1..=31).contains(&bill.due_day) {
        return Err(AppError::bad_request("Due day must be between 1 and 31"));
    }
    Ok(())
}

/// Look up a bill and check it belongs to the acting user
fn owned_bill(state: &AppState, id: i64, user_id: &str) -> Result<ScheduledBill, AppError> {
    state
        .db
        .get_bill(id)?
        .filter(|bill| bill.user_id == user_id)
        .ok_or_else(|| AppError::not_found(&format!("Bill {} not found", id)))
}

/// GET /api/bills - List the user's scheduled bills
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ScheduledBill>>, AppError> {
    let user_id = get_user_id(&headers);
    let bills = state.db.list_bills(&user_id)?;
    Ok(Json(bills))
}

/// POST /api/bills - Create a scheduled bill
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewScheduledBill>,
) -> Result<Json<ScheduledBill>, AppError> {
    let user_id = get_user_id(&headers);
    validate_bill(&body)?;

    let id = state.db.insert_bill(&user_id, &body)?;
    let bill = state
        .db
        .get_bill(id)?
        .ok_or_else(|| AppError::internal("Bill vanished after insert"))?;

    Ok(Json(bill))
}

/// GET /api/bills/:id - Fetch one scheduled bill
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ScheduledBill>, AppError> {
    let user_id = get_user_id(&headers);
    let bill = owned_bill(&state, id, &user_id)?;
    Ok(Json(bill))
}

/// DELETE /api/bills/:id - Delete a scheduled bill
pub async fn delete_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);
    owned_bill(&state, id, &user_id)?;

    state.db.delete_bill(id)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/bills/:id/activate - Resume including the bill in analysis
pub async fn activate_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);
    owned_bill(&state, id, &user_id)?;

    state.db.set_bill_active(id, true)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/bills/:id/deactivate - Exclude the bill from analysis
pub async fn deactivate_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);
    owned_bill(&state, id, &user_id)?;

    state.db.set_bill_active(id, false)?;

    Ok(Json(SuccessResponse { success: true }))
}
