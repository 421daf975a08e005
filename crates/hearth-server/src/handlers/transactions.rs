//! Transaction and statement import handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{get_user_id, AppError, AppState, SuccessResponse, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use hearth_core::models::{NewTransaction, Transaction};

/// Query params for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub limit: Option<i64>,
}

/// GET /api/transactions - List the user's transactions, most recent first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTransactionsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let user_id = get_user_id(&headers);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);

    let transactions = state.db.list_transactions(&user_id, limit)?;

    Ok(Json(transactions))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    let user_id = get_user_id(&headers);

    if body.description.trim().is_empty() {
        return Err(AppError::bad_request("Description must not be empty"));
    }

    let id = state.db.insert_transaction(&user_id, &body)?;
    let transaction = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::internal("Transaction vanished after insert"))?;

    Ok(Json(transaction))
}

/// GET /api/transactions/:id - Fetch one transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Transaction>, AppError> {
    let user_id = get_user_id(&headers);

    let transaction = state
        .db
        .get_transaction(id)?
        .filter(|tx| tx.user_id == user_id)
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = get_user_id(&headers);

    // Verify the record exists and belongs to the acting user
    state
        .db
        .get_transaction(id)?
        .filter(|tx| tx.user_id == user_id)
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    state.db.delete_transaction(id)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Response for a statement import
#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub skipped: usize,
}

/// POST /api/import - Import a CSV statement body
///
/// Body is raw CSV text: date,description,category,expense_type,kind,amount
pub async fn import_statement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let user_id = get_user_id(&headers);

    if body.trim().is_empty() {
        return Err(AppError::bad_request("Empty statement body"));
    }

    let summary = hearth_core::import::import_statement(&state.db, &user_id, body.as_bytes())
        .map_err(AppError::from_core)?;

    Ok(Json(ImportResponse {
        imported: summary.imported,
        skipped: summary.skipped,
    }))
}
