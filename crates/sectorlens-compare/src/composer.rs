//! Assembly of the company vs. sector vs. market comparison table.

use sectorlens_ratios::DerivedRatios;
use sectorlens_traits::MetricSnapshot;
use sectorlens_traits::stats::ratio;
use serde::Serialize;

use crate::baseline::PeerBaseline;
use crate::catalog::MetricKey;

/// One line of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Display title.
    pub title: &'static str,
    /// Stable metric key.
    pub key: MetricKey,
    /// The company's own value.
    pub value: Option<f64>,
    /// Sector baseline.
    pub sector_baseline: Option<f64>,
    /// Market baseline.
    pub market_baseline: Option<f64>,
    /// Whether the figures are fractions shown as percentages.
    pub is_percentage: bool,
}

impl ComparisonRow {
    fn new(key: MetricKey, value: Option<f64>, sector: Option<f64>, market: Option<f64>) -> Self {
        Self {
            title: key.title(),
            key,
            value,
            sector_baseline: sector,
            market_baseline: market,
            is_percentage: key.is_percentage(),
        }
    }
}

/// Pick a metric out of a peer baseline.
fn baseline_value(baseline: &PeerBaseline, key: MetricKey) -> Option<f64> {
    let m = &baseline.metrics;
    let f = &baseline.financials;
    match key {
        MetricKey::ReturnOnEquity => m.return_on_equity,
        MetricKey::ReturnOnAssets => m.return_on_assets,
        MetricKey::PayoutRatio => m.payout_ratio,
        MetricKey::Eps => m.eps,
        MetricKey::AssetTurnover => f.asset_turnover,
        MetricKey::GrossMargin => f.gross_margin,
        MetricKey::NetMargin => f.net_margin,
        MetricKey::DividendYield => m.dividend_yield,
        MetricKey::PriceEarnings => baseline.pe,
        MetricKey::CurrentRatio => f.current_ratio,
        MetricKey::QuickRatio => f.quick_ratio,
        MetricKey::InterestCoverage => f.interest_coverage,
    }
}

/// Build the comparison table for one company.
///
/// Always returns one row per [`MetricKey::ALL`] entry, in that order. Any
/// missing upstream figure shows up as `None` in its cell; rows are never
/// dropped. The company's P/E is `price / eps` with the usual zero and null
/// guards.
#[must_use]
pub fn compose_comparison(
    company: Option<&MetricSnapshot>,
    derived: &DerivedRatios,
    price: Option<f64>,
    sector: &PeerBaseline,
    market: &PeerBaseline,
) -> Vec<ComparisonRow> {
    let metric = |get: fn(&MetricSnapshot) -> Option<f64>| company.and_then(get);
    let pe = ratio(price, metric(|m| m.eps));

    MetricKey::ALL
        .into_iter()
        .map(|key| {
            let value = match key {
                MetricKey::ReturnOnEquity => metric(|m| m.return_on_equity),
                MetricKey::ReturnOnAssets => metric(|m| m.return_on_assets),
                MetricKey::PayoutRatio => metric(|m| m.payout_ratio),
                MetricKey::Eps => metric(|m| m.eps),
                MetricKey::AssetTurnover => derived.asset_turnover,
                MetricKey::GrossMargin => derived.gross_margin,
                MetricKey::NetMargin => derived.net_margin,
                MetricKey::DividendYield => metric(|m| m.trailing_annual_dividend_rate),
                MetricKey::PriceEarnings => pe,
                MetricKey::CurrentRatio => derived.current_ratio,
                MetricKey::QuickRatio => derived.quick_ratio,
                MetricKey::InterestCoverage => derived.interest_coverage,
            };
            ComparisonRow::new(
                key,
                value,
                baseline_value(sector, key),
                baseline_value(market, key),
            )
        })
        .collect()
}
