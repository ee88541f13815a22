//! Batch predict orchestrator
//!
//! Runs the single-prediction pipeline once per item with per-item failure
//! isolation. Batch items do not touch the history ledger and do not get
//! insights.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::features::RawInput;
use crate::inference::InferenceEngine;
use crate::round2;

/// Whole-batch size cap. Protects the process from unbounded request bodies.
pub const MAX_BATCH_SIZE: usize = 100;

/// Outcome for one batch item, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// 1-based position of the item in the request.
    pub house_id: usize,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Success,
    Failed,
}

/// Run the pipeline over `inputs`.
///
/// Rejects the whole batch when empty or larger than [`MAX_BATCH_SIZE`].
/// Individual item failures are recorded inline and never abort the batch.
pub fn run_batch(engine: &InferenceEngine, inputs: &[RawInput]) -> Result<Vec<BatchOutcome>> {
    if inputs.is_empty() {
        return Err(Error::InvalidInput("no houses provided".to_string()));
    }
    if inputs.len() > MAX_BATCH_SIZE {
        return Err(Error::InvalidInput(format!(
            "maximum {} houses per request",
            MAX_BATCH_SIZE
        )));
    }

    let outcomes = inputs
        .iter()
        .enumerate()
        .map(|(idx, raw)| match engine.predict(raw) {
            Ok(prediction) => BatchOutcome {
                house_id: idx + 1,
                status: BatchStatus::Success,
                prediction: Some(round2(prediction.price)),
                error: None,
            },
            Err(e) => BatchOutcome {
                house_id: idx + 1,
                status: BatchStatus::Failed,
                prediction: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    Ok(outcomes)
}
