//! Peer comparison for sectorlens.
//!
//! This crate pairs one company's figures with the baselines of its sector
//! and of the whole market, producing the fixed twelve-row comparison table
//! the dashboard renders.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sectorlens_compare::{PeerBaseline, compose_comparison};
//! use sectorlens_ratios::compute_ratios;
//!
//! let derived = compute_ratios(None);
//! let empty = PeerBaseline::empty();
//!
//! let rows = compose_comparison(None, &derived, None, &empty, &empty);
//! assert_eq!(rows.len(), 12);
//! ```

mod analysis;
mod baseline;
mod catalog;
mod composer;
mod screener;

// Re-export main types
pub use analysis::{AnalysisConfig, AnalysisReport, CompanyAnalyzer};
pub use baseline::PeerBaseline;
pub use catalog::{MetricCategory, MetricInfo, MetricKey, available_metrics};
pub use composer::{ComparisonRow, compose_comparison};
pub use screener::{ReferenceDates, StockSummary, summarize_stocks};
