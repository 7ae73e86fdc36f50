#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sectorlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # sectorlens
//!
//! Fundamental-ratio comparison of one company against its sector and the
//! whole market.
//!
//! sectorlens is an umbrella crate that re-exports all sectorlens sub-crates
//! for convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sectorlens::prelude::*;
//! use sectorlens::store::MemoryStore;
//!
//! # fn main() -> sectorlens::Result<()> {
//! let store = MemoryStore::load("data/market.json")?;
//! let analyzer = CompanyAnalyzer::new(store, AnalysisConfig::default());
//!
//! let report = analyzer.analyze("AAPL")?;
//! for row in &report.comparison {
//!     println!(
//!         "{:<20} {:?} {:?} {:?}",
//!         row.title, row.value, row.sector_baseline, row.market_baseline
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Records, the [`DataSource`] trait and null-safe arithmetic
//! - [`ratios`] - Per-company ratios and peer-group means
//! - [`compare`] - Baselines, the comparison table and the analysis report
//! - [`store`] - In-memory source, JSON/CSV ingestion and price caching
//!
//! ## Null handling
//!
//! Every figure is an `Option<f64>`. A ratio with a missing or zero
//! denominator is `None`, and a mean skips `None` samples. The engine never
//! produces `NaN` or infinities.

/// Version information for the sectorlens crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Records, errors and the data-access trait.
///
/// - [`DataSource`] - Read access to the backing store
/// - [`Company`], [`FinancialStatement`], [`MetricSnapshot`], [`PriceSnapshot`]
/// - [`stats`](sectorlens_traits::stats) - `ratio`, `difference`, `mean`
pub mod traits {
    pub use sectorlens_traits::*;
}

pub use sectorlens_traits::DataSource;
pub use sectorlens_traits::{Result, SectorLensError};
pub use sectorlens_traits::{
    Company, Date, FinancialStatement, MetricSnapshot, PriceSnapshot, StockId,
};

// ============================================================================
// Ratio Engine
// ============================================================================

/// Per-company derived ratios and peer-group means.
///
/// ## Derived ratios
///
/// ```text
/// gross_profit   = total_revenue - cost_of_revenue
/// net_income     = gross_profit - other_expenses
/// quick_ratio    = (current_assets - inventory) / current_liabilities
/// ```
///
/// Peer means average each member's own ratio, so firms are equally weighted
/// regardless of size.
pub mod ratios {
    pub use sectorlens_ratios::*;
}

// ============================================================================
// Comparison
// ============================================================================

/// Sector and market baselines and the twelve-row comparison table.
pub mod compare {
    pub use sectorlens_compare::*;
}

pub use sectorlens_compare::{AnalysisConfig, AnalysisReport, CompanyAnalyzer, ComparisonRow};

// ============================================================================
// Data Access
// ============================================================================

/// In-memory data source and price cache.
///
/// ## Example
///
/// ```ignore
/// use std::time::Duration;
/// use sectorlens::store::{CacheConfig, CachedSource, MemoryStore};
///
/// let store = MemoryStore::load("data/")?;
/// let cached = CachedSource::new(store, CacheConfig { price_ttl: Duration::from_secs(60) });
/// ```
pub mod store {
    pub use sectorlens_store::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sectorlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{AnalysisConfig, AnalysisReport, CompanyAnalyzer, ComparisonRow};
    pub use crate::{Company, DataSource, FinancialStatement, MetricSnapshot, PriceSnapshot};
    pub use crate::{Result, SectorLensError};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_store_error_converts() {
        let err: SectorLensError = store::StoreError::InvalidData("bad".into()).into();
        assert!(matches!(err, SectorLensError::InvalidData(_)));
    }

    #[test]
    fn test_end_to_end() {
        let json = r#"{
            "companies": [
                {"stock_id": "A", "sector": "Tech", "shares_outstanding": 10},
                {"stock_id": "B", "sector": "Tech"}
            ],
            "financials": [
                {"stock_id": "A", "current_assets": 200, "current_liabilities": 100},
                {"stock_id": "B", "current_assets": 400, "current_liabilities": 100}
            ],
            "stock_metrics": [
                {"stock_id": "A", "date": "2024-01-05", "eps": 2.0},
                {"stock_id": "B", "date": "2024-01-05", "eps": 4.0}
            ],
            "stock_prices": [
                {"stock_id": "A", "share_price": 40.0, "date": "2024-01-05"},
                {"stock_id": "B", "share_price": 40.0, "date": "2024-01-05"}
            ]
        }"#;
        let dataset = store::Dataset::from_json_str(json).unwrap();
        let source = store::MemoryStore::from_dataset(dataset).unwrap();
        let analyzer = CompanyAnalyzer::new(source, AnalysisConfig::default());

        let report = analyzer.analyze("A").unwrap();
        assert_eq!(report.latest_price, Some(40.0));
        assert_eq!(report.market_cap, Some(400.0));
        assert_eq!(report.comparison.len(), 12);

        let current = report
            .comparison
            .iter()
            .find(|r| r.key == compare::MetricKey::CurrentRatio)
            .unwrap();
        assert_eq!(current.value, Some(2.0));
        assert_eq!(current.sector_baseline, Some(3.0));

        let pe = report
            .comparison
            .iter()
            .find(|r| r.key == compare::MetricKey::PriceEarnings)
            .unwrap();
        assert_eq!(pe.value, Some(20.0));
        assert_eq!(pe.sector_baseline, Some(15.0));
    }
}
