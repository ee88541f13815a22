//! Export handlers: history CSV and single-prediction PDF

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
};
use chrono::Utc;
use tracing::info;

use casaval_core::{history_csv, prediction_pdf, PdfReport};

use crate::{AppError, AppState};

/// GET /api/export - download the full history as a CSV attachment
pub async fn export_history(
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, AppError> {
    let entries = state.history.snapshot();
    if entries.is_empty() {
        return Err(AppError::bad_request("No predictions to export"));
    }

    let engine = state.engine()?;
    let csv = history_csv(&entries, engine.schema())?;
    info!("Exported {} predictions to CSV", entries.len());

    let filename = format!(
        "house_predictions_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// POST /api/export-pdf - render a valuation report from a caller payload
pub async fn export_pdf(body: String) -> Result<Response<Body>, AppError> {
    let report: PdfReport = serde_json::from_str(&body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;

    let bytes = prediction_pdf(&report)?;
    info!(size = bytes.len(), "Rendered prediction PDF");

    let filename = format!(
        "house_prediction_{}.pdf",
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal(&e.to_string()))
}
