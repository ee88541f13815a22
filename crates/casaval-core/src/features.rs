//! Feature vector builder: loosely-typed input record -> ordered numeric vector
//!
//! Callers submit a JSON object keyed by feature name. Values may be JSON
//! numbers or numeric strings; absent fields default to 0.0. The output order
//! is the schema order, which is the training-time column order.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::FeatureSchema;

/// A caller-supplied input record. Keys are feature names, values untyped.
pub type RawInput = serde_json::Map<String, Value>;

/// Coerce a single JSON value to f64.
///
/// Numbers and parseable strings coerce; everything else (bool, null, arrays,
/// objects, non-numeric strings) is rejected. No range validation is applied.
pub fn coerce_field(name: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            Error::InvalidInput(format!("field '{}' is out of numeric range", name))
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            Error::InvalidInput(format!("field '{}' is not numeric: '{}'", name, s))
        }),
        other => Err(Error::InvalidInput(format!(
            "field '{}' has unsupported type: {}",
            name,
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the ordered feature vector for `raw` against `schema`.
///
/// Fields absent from the record default to 0.0; uncoercible values fail the
/// whole record with `Error::InvalidInput`.
pub fn build_feature_vector(raw: &RawInput, schema: &FeatureSchema) -> Result<Vec<f64>> {
    let mut vector = Vec::with_capacity(schema.width());
    for field in schema.fields() {
        let value = match raw.get(&field.name) {
            Some(v) => coerce_field(&field.name, v)?,
            None => 0.0,
        };
        vector.push(value);
    }
    Ok(vector)
}

/// Read one field leniently: missing or uncoercible values become 0.0.
///
/// Used by the insight rules, which never fail a request the model accepted.
pub fn field_or_zero(raw: &RawInput, name: &str) -> f64 {
    raw.get(name)
        .and_then(|v| coerce_field(name, v).ok())
        .unwrap_or(0.0)
}
