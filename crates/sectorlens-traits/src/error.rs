//! Error types for sectorlens.
//!
//! The ratio engine itself never fails: sparse or empty inputs degrade to
//! "no value". Errors only arise at the edges, when records are ingested or a
//! request names a company the store does not hold.

use thiserror::Error;

/// The main error type for sectorlens operations.
#[derive(Debug, Error)]
pub enum SectorLensError {
    /// A record violates the documented shape (non-numeric or non-finite field).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required column is missing from tabular input.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The requested company is not covered by the data store.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// The data-access collaborator failed.
    #[error("Data fetch error: {0}")]
    DataFetch(String),
}

/// A specialized Result type for sectorlens operations.
pub type Result<T> = std::result::Result<T, SectorLensError>;
