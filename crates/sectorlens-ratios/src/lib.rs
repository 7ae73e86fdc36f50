//! Financial ratio engine for sectorlens.
//!
//! This crate turns raw statement and metric rows into derived figures:
//! - [`ratios`]: per-company ratios from one financial statement
//! - [`metrics`]: peer-group means of reported market metrics
//! - [`financials`]: peer-group means of statement-derived ratios
//! - [`pe`]: latest-per-stock projections and the cross-sectional P/E
//!
//! Every function is pure and infallible. Missing inputs, zero denominators
//! and empty peer groups all surface as `None`.
//!
//! # Example
//!
//! ```
//! use sectorlens_ratios::compute_ratios;
//! use sectorlens_traits::FinancialStatement;
//!
//! let statement = FinancialStatement {
//!     total_revenue: Some(1000.0),
//!     cost_of_revenue: Some(600.0),
//!     ..FinancialStatement::new("ACME")
//! };
//!
//! let derived = compute_ratios(Some(&statement));
//! assert_eq!(derived.gross_margin, Some(0.4));
//! assert_eq!(derived.current_ratio, None);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod financials;
pub mod metrics;
pub mod pe;
pub mod ratios;

// Re-export key types
pub use financials::{FinancialBaseline, aggregate_financials};
pub use metrics::{MetricBaseline, aggregate_metrics};
pub use pe::{
    EpsMap, PriceMap, average_pe, latest_eps, latest_prices, latest_snapshot, latest_statement,
};
pub use ratios::{DerivedRatios, compute_ratios};
