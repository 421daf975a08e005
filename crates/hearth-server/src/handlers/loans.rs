//! Loan handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{get_user_id, AppError, AppState, SuccessResponse};
use hearth_core::models::{Loan, NewLoan};

fn validate_loan(loan: &NewLoan) -> Result<(), AppError> {
    if loan.name.trim().is_empty() {
        return Err(AppError::bad_request("Loan name must not be empty"));
    }
    if loan.principal < 0.0 {
        return Err(AppError::bad_request("Principal must not be negative"));
    }
    if loan.emi_amount < 0.0 {
        return Err(AppError::bad_request("EMI amount must not be negative"));
    }
    if !(1..=31).contains(&loan.due_day) {
        return Err(AppError::bad_request("Due day must be between 1 and 31"));
    }
    Ok(())
}

/// Look up a loan and check it belongs to the acting user
fn owned_loan(state: &AppState, id: i64, user_id: &str) -> Result<Loan, AppError> {
    state
        .db
        .get_loan(id)?
        .filter(|loan| loan.user_id == user_id)
        .ok_or_else(|| AppError::not_found(&format!("Loan {} not found", id)))
}

/// GET /api/loans - List the user's loans
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Loan>>, AppError> {
    let user_id = get_user_id(&headers);
    let loans = state.db.list_loans(&user_id)?;
    Ok(Json(loans))
}

/// POST /api/loans - Record a loan
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewLoan>,
) -> Result<Json<Loan>, AppError> {
    let user_id = get_user_id(&headers);
    validate_loan(&body)?;

    let id = state.db.insert_loan(&user_id, &body)?;
    let loan = state
        .db
        .get_loan(id)?
        .ok_or_else(|| AppError::internal("Loan vanished after insert"))?;

    Ok(Json(loan))
}

/// GET /api/loans/:id - Fetch one loan
pub async fn get_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Loan>, AppError> {
    let user_id = get_user_id(&headers);
    let loan = owned_loan(&state, id, &user_id)?;
    Ok(Json(loan))
}

/// DELETE /api/loans/:id - Delete a loan
pub async fn delete_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);
    owned_loan(&state, id, &user_id)?;

    state.db.delete_loan(id)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/loans/:id/close - Mark a loan fully repaid
///
/// Closed loans stop contributing their EMI to budget analysis.
pub async fn close_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);
    owned_loan(&state, id, &user_id)?;

    state.db.close_loan(id)?;

    Ok(Json(SuccessResponse { success: true }))
}
