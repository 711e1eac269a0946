// File: src/error.rs
//! Error types for the graph source generator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GsgError {
    /// A resource the run cannot start without (the abbreviation table) is absent.
    #[error("missing required resource: {}", path.display())]
    MissingResource { path: PathBuf },

    /// Bytes handed in as text could not be decoded. Scoped to one value.
    #[error("input cannot be encoded: {value}")]
    Encoding { value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl GsgError {
    /// True for errors after which no partial run is possible.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GsgError::MissingResource { .. } | GsgError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, GsgError>;
