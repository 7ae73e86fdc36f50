#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sectorlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core definitions for the sectorlens peer-comparison engine.
//!
//! This crate provides the record types fetched from the data store, the
//! null-aware arithmetic every derived figure goes through, and the narrow
//! [`DataSource`] interface behind which all I/O lives.

/// The version of the sectorlens-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, SectorLensError};
pub use source::{CompanyFilter, DataSource, StockFilter};
pub use types::{Company, Date, FinancialStatement, MetricSnapshot, PriceSnapshot, StockId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
