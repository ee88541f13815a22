//! History handlers: read recent predictions and clear the ledger

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use casaval_core::{round2, HistoryEntry};

use crate::AppState;

/// How many entries the history endpoint returns.
const RECENT_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub total_predictions: usize,
    pub predictions: Vec<HistoryEntry>,
    /// Mean recorded price; 0 when the ledger is empty.
    pub average_price: f64,
}

/// GET /api/history - total count, last 10 entries, average price
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        success: true,
        total_predictions: state.history.len(),
        predictions: state.history.recent(RECENT_LIMIT),
        average_price: state.history.average_price().map(round2).unwrap_or(0.0),
    })
}

#[derive(Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/clear-history - full, irreversible reset
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<ClearHistoryResponse> {
    let dropped = state.history.len();
    state.history.clear();
    info!(dropped, "Prediction history cleared");

    Json(ClearHistoryResponse {
        success: true,
        message: "History cleared".to_string(),
    })
}
