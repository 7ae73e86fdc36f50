//! Error types for data loading.

use sectorlens_traits::SectorLensError;
use thiserror::Error;

/// Errors that can occur while loading or validating a dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// A DataFrame operation failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A required column is absent from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A row violates the record shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<StoreError> for SectorLensError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingColumn(column) => Self::MissingColumn(column),
            StoreError::InvalidData(msg) => Self::InvalidData(msg),
            other => Self::DataFetch(other.to_string()),
        }
    }
}
