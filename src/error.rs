//! Error types for the fixture statistics CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FixtureError>;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date: {value} (expected YYYY-MM-DD or DD/MM/YYYY)")]
    InvalidDate { value: String },

    #[error("Invalid side: {value} (expected home or away)")]
    InvalidSide { value: String },

    #[error("Failed to parse fixture ID: {0}")]
    InvalidFixtureId(#[from] std::num::ParseIntError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Archive has fewer than three columns; cannot locate date/home/away")]
    NoArchiveSchema,

    #[error("Manifest error: {0:#}")]
    Manifest(#[from] anyhow::Error),
}
