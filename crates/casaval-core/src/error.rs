//! Error types for casaval

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("No data: {0}")]
    Empty(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
