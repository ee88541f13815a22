//! Feature schema: the ordered, named inputs the model was trained on
//!
//! The order in `features.json` is the training-time column order. Inference
//! must build vectors in exactly this order; nothing else in the system may
//! reorder it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One named model input with its static importance weight.
///
/// Importances are produced by the offline trainer (they do not vary per
/// request) and sum to roughly 1.0 across the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureField {
    pub name: String,
    pub importance: f64,
}

/// The fixed, ordered feature list loaded from the `features.json` artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    fields: Vec<FeatureField>,
}

impl FeatureSchema {
    pub fn new(fields: Vec<FeatureField>) -> Self {
        Self { fields }
    }

    /// Load the schema artifact from `features.json` in the artifact directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let file = File::open(dir.join("features.json"))?;
        let schema: FeatureSchema = serde_json::from_reader(BufReader::new(file))?;
        Ok(schema)
    }

    /// Number of model inputs (the width of every feature vector).
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FeatureField] {
        &self.fields
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// The single highest-weighted field. `None` only on an empty schema.
    pub fn top_feature(&self) -> Option<&FeatureField> {
        self.fields
            .iter()
            .max_by(|a, b| a.importance.total_cmp(&b.importance))
    }

    /// The `n` highest-weighted fields, descending by importance.
    pub fn top_features(&self, n: usize) -> Vec<&FeatureField> {
        let mut ranked: Vec<&FeatureField> = self.fields.iter().collect();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked.truncate(n);
        ranked
    }
}

/// Human-readable column label for a schema field name.
///
/// Unknown fields fall back to the raw name so a retrained model with extra
/// columns still exports cleanly.
pub fn display_label(name: &str) -> &str {
    match name {
        "MedInc" => "Median Income",
        "HouseAge" => "House Age",
        "AveRooms" => "Average Rooms",
        "AveBedrms" => "Average Bedrooms",
        "Population" => "Population",
        "AveOccup" => "Average Occupancy",
        "Latitude" => "Latitude",
        "Longitude" => "Longitude",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn california() -> FeatureSchema {
        FeatureSchema::new(vec![
            FeatureField { name: "MedInc".into(), importance: 0.52 },
            FeatureField { name: "HouseAge".into(), importance: 0.05 },
            FeatureField { name: "AveRooms".into(), importance: 0.11 },
            FeatureField { name: "AveBedrms".into(), importance: 0.03 },
            FeatureField { name: "Population".into(), importance: 0.03 },
            FeatureField { name: "AveOccup".into(), importance: 0.14 },
            FeatureField { name: "Latitude".into(), importance: 0.06 },
            FeatureField { name: "Longitude".into(), importance: 0.06 },
        ])
    }

    #[test]
    fn test_width_and_order() {
        let schema = california();
        assert_eq!(schema.width(), 8);
        assert_eq!(schema.names()[0], "MedInc");
        assert_eq!(schema.names()[7], "Longitude");
    }

    #[test]
    fn test_top_features_ranked() {
        let schema = california();
        let top = schema.top_features(3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "MedInc");
        assert_eq!(top[1].name, "AveOccup");
        assert_eq!(top[2].name, "AveRooms");
    }

    #[test]
    fn test_top_feature_empty_schema() {
        let schema = FeatureSchema::new(vec![]);
        assert!(schema.top_feature().is_none());
    }

    #[test]
    fn test_display_label_fallback() {
        assert_eq!(display_label("MedInc"), "Median Income");
        assert_eq!(display_label("SomethingNew"), "SomethingNew");
    }

    #[test]
    fn test_schema_json_roundtrip() {
        let schema = california();
        let json = serde_json::to_string(&schema).unwrap();
        // Transparent representation: a bare array of fields
        assert!(json.starts_with('['));
        let parsed: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.width(), 8);
        assert_eq!(parsed.names(), schema.names());
    }
}
