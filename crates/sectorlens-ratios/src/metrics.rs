//! Peer-group means of reported market metrics.

use sectorlens_traits::MetricSnapshot;
use sectorlens_traits::stats::mean;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Arithmetic-mean baseline of [`MetricSnapshot`] fields over a peer group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBaseline {
    /// Mean return on equity.
    pub return_on_equity: Option<f64>,
    /// Mean return on assets.
    pub return_on_assets: Option<f64>,
    /// Mean payout ratio.
    pub payout_ratio: Option<f64>,
    /// Mean earnings per share.
    pub eps: Option<f64>,
    /// Mean trailing annual dividend rate.
    pub dividend_yield: Option<f64>,
}

impl MetricBaseline {
    /// Baseline of an empty or absent group.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            return_on_equity: None,
            return_on_assets: None,
            payout_ratio: None,
            eps: None,
            dividend_yield: None,
        }
    }
}

/// Average each metric across the snapshots.
///
/// Each field is averaged independently over the snapshots where it is
/// present and a number; a field with no usable samples is `None`. An absent
/// collection behaves like an empty one.
#[must_use]
pub fn aggregate_metrics(snapshots: Option<&[MetricSnapshot]>) -> MetricBaseline {
    let Some(snapshots) = snapshots else {
        return MetricBaseline::empty();
    };
    debug!(samples = snapshots.len(), "aggregating metric snapshots");

    let field = |get: fn(&MetricSnapshot) -> Option<f64>| mean(snapshots.iter().map(get));

    MetricBaseline {
        return_on_equity: field(|m| m.return_on_equity),
        return_on_assets: field(|m| m.return_on_assets),
        payout_ratio: field(|m| m.payout_ratio),
        eps: field(|m| m.eps),
        dividend_yield: field(|m| m.trailing_annual_dividend_rate),
    }
}
