//! Inference engine: fitted scaler + regressor behind a narrow seam
//!
//! The engine wraps the three offline-produced artifacts (feature schema,
//! standard scaler, random forest) and exposes one operation:
//! `predict(raw) -> Prediction`. The regressor sits behind a trait so the
//! pipeline is testable without real artifacts.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use crate::error::{Error, Result};
use crate::features::{build_feature_vector, RawInput};
use crate::scaler::StandardScaler;
use crate::schema::FeatureSchema;

/// Raw model output is in units of $100k (the training target); this turns it
/// into a dollar price.
pub const PRICE_MULTIPLIER: f64 = 100_000.0;

/// One model output: the raw regression value and the dollar price.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prediction {
    /// Raw regressor output (median house value in $100k units).
    pub value: f64,
    /// `value * PRICE_MULTIPLIER`, the human-scale dollar price.
    pub price: f64,
}

/// The regressor seam: a fitted model that maps a scaled feature vector to a
/// single scalar.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Human-readable model label for the info endpoint.
    fn label(&self) -> &str;
}

/// The real regressor: a smartcore random forest deserialized from the
/// `model.json` artifact.
pub struct ForestRegressor {
    model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl ForestRegressor {
    /// Load the forest artifact from `model.json` in the artifact directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let file = File::open(dir.join("model.json"))?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self { model })
    }

    pub fn from_model(
        model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    ) -> Self {
        Self { model }
    }
}

impl Regressor for ForestRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        let matrix = DenseMatrix::from_2d_vec(&vec![features.to_vec()])
            .map_err(|e| Error::Inference(format!("matrix creation failed: {}", e)))?;
        let predictions = self
            .model
            .predict(&matrix)
            .map_err(|e| Error::Inference(format!("prediction failed: {}", e)))?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| Error::Inference("no prediction returned".to_string()))
    }

    fn label(&self) -> &str {
        "Random Forest Regressor"
    }
}

/// Deterministic test double: an affine function of the feature sum.
#[cfg(any(test, feature = "test-utils"))]
pub struct StubRegressor {
    base: f64,
    weight: f64,
}

#[cfg(any(test, feature = "test-utils"))]
impl StubRegressor {
    /// Always predicts `value`, regardless of input.
    pub fn constant(value: f64) -> Self {
        Self { base: value, weight: 0.0 }
    }

    /// Predicts `base + weight * sum(features)` so distinct inputs produce
    /// distinct outputs.
    pub fn linear(base: f64, weight: f64) -> Self {
        Self { base, weight }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Regressor for StubRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        Ok(self.base + self.weight * features.iter().sum::<f64>())
    }

    fn label(&self) -> &str {
        "Stub Regressor"
    }
}

/// Fitted scaler + regressor pair, tagged with the schema both were fitted
/// against.
pub struct InferenceEngine {
    schema: FeatureSchema,
    scaler: StandardScaler,
    regressor: Box<dyn Regressor>,
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("schema", &self.schema)
            .field("scaler", &self.scaler)
            .field("regressor", &self.regressor.label())
            .finish()
    }
}

impl InferenceEngine {
    /// Assemble an engine from parts. The schema and scaler widths must
    /// agree; a mismatch means the artifacts come from different training
    /// runs.
    pub fn new(
        schema: FeatureSchema,
        scaler: StandardScaler,
        regressor: Box<dyn Regressor>,
    ) -> Result<Self> {
        if schema.width() != scaler.width() {
            return Err(Error::Inference(format!(
                "schema width {} does not match scaler width {}",
                schema.width(),
                scaler.width()
            )));
        }
        Ok(Self { schema, scaler, regressor })
    }

    /// Load all three artifacts from the artifact directory. Called once at
    /// process start, before the server accepts requests.
    pub fn load(dir: &Path) -> Result<Self> {
        let schema = FeatureSchema::load(dir)?;
        let scaler = StandardScaler::load(dir)?;
        let regressor = ForestRegressor::load(dir)?;
        let engine = Self::new(schema, scaler, Box::new(regressor))?;
        info!(
            features = engine.schema.width(),
            model = engine.model_label(),
            "Loaded model artifacts from {}",
            dir.display()
        );
        Ok(engine)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model_label(&self) -> &str {
        self.regressor.label()
    }

    /// Run the full pipeline for one record: build vector, scale, predict.
    pub fn predict(&self, raw: &RawInput) -> Result<Prediction> {
        let vector = build_feature_vector(raw, &self.schema)?;
        let scaled = self.scaler.transform(&vector)?;
        let value = self.regressor.predict(&scaled)?;
        Ok(Prediction {
            value,
            price: value * PRICE_MULTIPLIER,
        })
    }
}
