//! CSV export of the prediction history
//!
//! One row per history entry in insertion order. Column order is fixed:
//! timestamp, one column per schema field, predicted price.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::history::HistoryEntry;
use crate::schema::{display_label, FeatureSchema};

/// Render the full history as CSV. Errors with [`Error::Empty`] when there is
/// nothing to export.
pub fn history_csv(entries: &[HistoryEntry], schema: &FeatureSchema) -> Result<String> {
    if entries.is_empty() {
        return Err(Error::Empty("no predictions to export".to_string()));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Timestamp".to_string()];
    header.extend(schema.fields().iter().map(|f| display_label(&f.name).to_string()));
    header.push("Predicted Price".to_string());
    writer.write_record(&header)?;

    for entry in entries {
        let mut row = vec![entry.timestamp.clone()];
        for field in schema.fields() {
            row.push(render_cell(entry.input.get(&field.name)));
        }
        row.push(format!("{:.2}", entry.prediction));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Inference(format!("csv writer flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Inference(format!("csv is not utf-8: {}", e)))
}

/// Render a raw input value as it was provided; missing fields become empty
/// cells.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
