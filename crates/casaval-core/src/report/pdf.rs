//! PDF valuation report for a single prediction
//!
//! Pure presentation from a caller-supplied payload; nothing here reads the
//! ledger or recomputes a prediction. Uses the PDF built-in Helvetica fonts,
//! so no font assets ship with the binary.

use chrono::Utc;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Deserialize;

use crate::error::Result;
use crate::features::RawInput;
use crate::schema::display_label;

/// Caller-supplied report payload. Every field defaults so a sparse payload
/// renders a sparse report instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfReport {
    #[serde(default)]
    pub prediction: f64,
    #[serde(default)]
    pub input: RawInput,
    #[serde(default)]
    pub top_features: Vec<FeatureWeight>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureWeight {
    pub name: String,
    pub importance: f64,
}

/// Render the report as PDF bytes (US letter).
pub fn prediction_pdf(report: &PdfReport) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new("Housing Valuation Report", Mm(215.9), Mm(279.4), "report");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    let left = 20.0;
    let value_col = 110.0;
    let mut y = 260.0;

    layer.use_text("Housing Valuation Report", 24.0, Mm(left), Mm(y), &bold);
    y -= 8.0;
    layer.use_text(
        "AI-powered real estate valuation",
        11.0,
        Mm(left),
        Mm(y),
        &regular,
    );
    y -= 16.0;

    layer.use_text("Predicted Price", 14.0, Mm(left), Mm(y), &bold);
    y -= 9.0;
    layer.use_text(format_dollars(report.prediction), 18.0, Mm(left), Mm(y), &bold);
    y -= 16.0;

    layer.use_text("Property Details", 14.0, Mm(left), Mm(y), &bold);
    y -= 9.0;
    for (name, value) in &report.input {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        layer.use_text(display_label(name), 10.0, Mm(left), Mm(y), &regular);
        layer.use_text(rendered, 10.0, Mm(value_col), Mm(y), &regular);
        y -= 6.0;
    }
    y -= 10.0;

    layer.use_text("Top Influencing Features", 14.0, Mm(left), Mm(y), &bold);
    y -= 9.0;
    for feature in &report.top_features {
        layer.use_text(display_label(&feature.name), 10.0, Mm(left), Mm(y), &regular);
        layer.use_text(
            format!("{:.1}%", feature.importance * 100.0),
            10.0,
            Mm(value_col),
            Mm(y),
            &regular,
        );
        y -= 6.0;
    }
    y -= 12.0;

    layer.use_text(
        format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S")),
        9.0,
        Mm(left),
        Mm(y),
        &regular,
    );

    Ok(doc.save_to_bytes()?)
}

/// Whole-dollar formatting with thousands separators, e.g. `$452,601`.
fn format_dollars(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
