//! casaval Core Library
//!
//! Shared functionality for the casaval housing valuation service:
//! - Feature schema and loosely-typed input coercion
//! - Standard scaler and random forest inference behind a narrow seam
//! - Fixed-threshold insight generation
//! - In-memory prediction history ledger
//! - Batch prediction with per-item failure isolation
//! - CSV and PDF export producers

pub mod batch;
pub mod error;
pub mod features;
pub mod history;
pub mod inference;
pub mod insights;
pub mod report;
pub mod scaler;
pub mod schema;

pub use batch::{run_batch, BatchOutcome, BatchStatus, MAX_BATCH_SIZE};
pub use error::{Error, Result};
pub use features::{build_feature_vector, RawInput};
pub use history::{HistoryEntry, HistoryLedger};
pub use inference::{InferenceEngine, Prediction, Regressor, PRICE_MULTIPLIER};
pub use insights::generate_insights;
pub use report::{history_csv, prediction_pdf, FeatureWeight, PdfReport};
pub use scaler::StandardScaler;
pub use schema::{FeatureField, FeatureSchema};

#[cfg(any(test, feature = "test-utils"))]
pub use inference::StubRegressor;

/// Round to cents. Prices on the wire and in history carry two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to four decimals (raw model values and importances on the wire).
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
