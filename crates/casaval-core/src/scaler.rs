//! Standard scaler artifact: the deterministic linear transform fitted on
//! training data
//!
//! `scaler.json` carries the per-column mean and scale vectors. The transform
//! must see vectors in the same column order the scaler was fitted with; the
//! width check below is the guard against a schema/scaler artifact mismatch.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Load the scaler artifact from `scaler.json` in the artifact directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let file = File::open(dir.join("scaler.json"))?;
        let scaler: StandardScaler = serde_json::from_reader(BufReader::new(file))?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(Error::Inference(format!(
                "scaler artifact is inconsistent: {} means vs {} scales",
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        Ok(scaler)
    }

    /// An identity scaler of the given width (mean 0, scale 1).
    pub fn identity(width: usize) -> Self {
        Self {
            mean: vec![0.0; width],
            scale: vec![1.0; width],
        }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Apply `(x - mean) / scale` elementwise.
    pub fn transform(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.mean.len() {
            return Err(Error::Inference(format!(
                "feature vector width {} does not match scaler width {}",
                vector.len(),
                self.mean.len()
            )));
        }
        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
