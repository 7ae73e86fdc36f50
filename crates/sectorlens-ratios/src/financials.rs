//! Peer-group means of statement-derived ratios.
//!
//! Each member's ratio is derived on its own statement first and only then
//! averaged, so every company counts as one equally weighted sample. Summing
//! raw totals across the group before dividing would instead weight firms by
//! scale. Members whose ratio is `None` drop out of that ratio's mean.

use sectorlens_traits::FinancialStatement;
use sectorlens_traits::stats::mean;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ratios::{DerivedRatios, compute_ratios};

/// Arithmetic-mean baseline of derived ratios over a peer group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialBaseline {
    /// Mean asset turnover.
    pub asset_turnover: Option<f64>,
    /// Mean current ratio.
    pub current_ratio: Option<f64>,
    /// Mean quick ratio.
    pub quick_ratio: Option<f64>,
    /// Mean interest coverage.
    pub interest_coverage: Option<f64>,
    /// Mean gross margin.
    pub gross_margin: Option<f64>,
    /// Mean net margin.
    pub net_margin: Option<f64>,
}

impl FinancialBaseline {
    /// Baseline of an empty or absent group.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            asset_turnover: None,
            current_ratio: None,
            quick_ratio: None,
            interest_coverage: None,
            gross_margin: None,
            net_margin: None,
        }
    }
}

/// Average each derived ratio across the statements.
#[must_use]
pub fn aggregate_financials(statements: Option<&[FinancialStatement]>) -> FinancialBaseline {
    let Some(statements) = statements else {
        return FinancialBaseline::empty();
    };

    let derived: Vec<DerivedRatios> = statements.iter().map(|s| compute_ratios(Some(s))).collect();
    debug!(samples = derived.len(), "aggregating financial statements");

    let field = |get: fn(&DerivedRatios) -> Option<f64>| mean(derived.iter().map(get));

    FinancialBaseline {
        asset_turnover: field(|r| r.asset_turnover),
        current_ratio: field(|r| r.current_ratio),
        quick_ratio: field(|r| r.quick_ratio),
        interest_coverage: field(|r| r.interest_coverage),
        gross_margin: field(|r| r.gross_margin),
        net_margin: field(|r| r.net_margin),
    }
}
