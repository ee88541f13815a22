//! Model info and health handlers
//!
//! Both stay queryable while the engine is in the unavailable state: health
//! always answers 200, model-info answers a clean 503 envelope.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{AppError, AppState};

/// Training dataset label reported by the info endpoint.
const DATASET: &str = "California Housing";

#[derive(Serialize)]
pub struct ModelInfoResponse {
    pub model: String,
    pub features: Vec<String>,
    pub feature_importance: serde_json::Map<String, Value>,
    pub dataset: String,
    pub total_predictions_made: usize,
}

/// GET /api/model-info - model label, schema, importances, served count
pub async fn model_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelInfoResponse>, AppError> {
    let engine = state.engine()?;
    let schema = engine.schema();

    let feature_importance = schema
        .fields()
        .iter()
        .map(|f| (f.name.clone(), Value::from(f.importance)))
        .collect();

    Ok(Json(ModelInfoResponse {
        model: engine.model_label().to_string(),
        features: schema.names().iter().map(|s| s.to_string()).collect(),
        feature_importance,
        dataset: DATASET.to_string(),
        total_predictions_made: state.history.len(),
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub total_predictions: usize,
}

/// GET /api/health - liveness plus model availability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.engine.is_some(),
        total_predictions: state.history.len(),
    })
}
