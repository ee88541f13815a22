//! Export producers: CSV history export and the PDF valuation report

mod csv;
mod pdf;

pub use csv::history_csv;
pub use pdf::{prediction_pdf, FeatureWeight, PdfReport};
