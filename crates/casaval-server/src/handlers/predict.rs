//! Prediction handlers: single predict and batch predict
//!
//! Bodies are read as strings and parsed explicitly so malformed JSON comes
//! back as a 400 envelope instead of a framework rejection.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use casaval_core::{
    generate_insights, round2, round4, run_batch, BatchOutcome, HistoryEntry, RawInput,
};

use crate::{AppError, AppState};

/// One ranked importance on the wire.
#[derive(Serialize)]
pub struct TopFeature {
    pub name: String,
    pub importance: f64,
}

/// Response for a single prediction.
#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    /// Dollar price, rounded to cents.
    pub prediction: f64,
    /// Raw model output (median house value in $100k units), 4dp.
    pub median_house_value: f64,
    pub top_features: Vec<TopFeature>,
    pub timestamp: String,
    pub insights: Vec<String>,
}

/// POST /api/predict - run the full pipeline for one record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PredictResponse>, AppError> {
    let engine = state.engine()?;
    let raw = parse_record(&body)?;

    let prediction = engine.predict(&raw)?;
    let price = round2(prediction.price);
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    state.history.append(HistoryEntry {
        timestamp: timestamp.clone(),
        input: raw.clone(),
        prediction: price,
        price_value: prediction.value,
    });

    let insights = generate_insights(engine.schema(), &raw, price);
    let top_features = engine
        .schema()
        .top_features(3)
        .into_iter()
        .map(|f| TopFeature {
            name: f.name.clone(),
            importance: round4(f.importance),
        })
        .collect();

    info!("Prediction: ${:.2}", price);

    Ok(Json(PredictResponse {
        success: true,
        prediction: price,
        median_house_value: round4(prediction.value),
        top_features,
        timestamp,
        insights,
    }))
}

/// Parse a request body as a raw input record.
fn parse_record(body: &str) -> Result<RawInput, AppError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::bad_request("Request body must be a JSON object"))
}

/// Request body for batch predictions.
#[derive(Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub houses: Vec<RawInput>,
}

/// Response for a batch prediction.
#[derive(Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub total: usize,
    pub results: Vec<BatchOutcome>,
}

/// POST /api/batch-predict - run the pipeline per item, isolating failures
pub async fn batch_predict(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<BatchResponse>, AppError> {
    let engine = state.engine()?;
    let request: BatchRequest = serde_json::from_str(&body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;

    let results = run_batch(engine, &request.houses)?;
    let failed = results
        .iter()
        .filter(|r| r.status == casaval_core::BatchStatus::Failed)
        .count();
    info!(total = results.len(), failed, "Batch prediction complete");

    Ok(Json(BatchResponse {
        success: true,
        total: results.len(),
        results,
    }))
}
