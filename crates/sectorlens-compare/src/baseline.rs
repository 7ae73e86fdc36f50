//! Comparison baselines for one peer group.

use sectorlens_ratios::{
    EpsMap, FinancialBaseline, MetricBaseline, PriceMap, aggregate_financials, aggregate_metrics,
    average_pe,
};
use sectorlens_traits::{FinancialStatement, MetricSnapshot};
use serde::{Deserialize, Serialize};

/// Everything a sector or the market contributes to the comparison table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerBaseline {
    /// Means of the reported market metrics.
    pub metrics: MetricBaseline,
    /// Means of the statement-derived ratios.
    pub financials: FinancialBaseline,
    /// Cross-sectional mean P/E.
    pub pe: Option<f64>,
}

impl PeerBaseline {
    /// Baseline of a group with no members.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            metrics: MetricBaseline::empty(),
            financials: FinancialBaseline::empty(),
            pe: None,
        }
    }

    /// Build a group's baseline from its fully fetched rows.
    ///
    /// `prices` and `eps` are latest-per-stock maps restricted to the group.
    #[must_use]
    pub fn from_group(
        statements: &[FinancialStatement],
        snapshots: &[MetricSnapshot],
        prices: &PriceMap,
        eps: &EpsMap,
    ) -> Self {
        Self {
            metrics: aggregate_metrics(Some(snapshots)),
            financials: aggregate_financials(Some(statements)),
            pe: average_pe(prices, eps),
        }
    }
}
