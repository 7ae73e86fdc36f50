//! Catalog of the metrics shown in the comparison table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metric classification, used to group rows for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Returns on capital and margins.
    Profitability,
    /// How hard assets are worked.
    Efficiency,
    /// Short-term solvency and debt service.
    Liquidity,
    /// Price relative to earnings.
    Valuation,
    /// Per-share figures and distributions.
    Shareholder,
}

impl MetricCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Profitability => "Returns on capital and profit margins",
            Self::Efficiency => "Asset utilisation",
            Self::Liquidity => "Short-term solvency and interest cover",
            Self::Valuation => "Market price relative to earnings",
            Self::Shareholder => "Per-share earnings and distributions",
        }
    }
}

/// A row of the comparison table.
///
/// Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Return on equity.
    #[serde(rename = "roe")]
    ReturnOnEquity,
    /// Return on assets.
    #[serde(rename = "roa")]
    ReturnOnAssets,
    /// Dividend payout ratio.
    #[serde(rename = "payout")]
    PayoutRatio,
    /// Earnings per share.
    Eps,
    /// Revenue / total assets.
    AssetTurnover,
    /// Gross profit / revenue.
    GrossMargin,
    /// Net income / revenue.
    NetMargin,
    /// Trailing annual dividend rate.
    #[serde(rename = "div_yield")]
    DividendYield,
    /// Price / EPS.
    #[serde(rename = "pe")]
    PriceEarnings,
    /// Current assets / current liabilities.
    CurrentRatio,
    /// Liquid current assets / current liabilities.
    QuickRatio,
    /// EBIT / interest expenses.
    InterestCoverage,
}

impl MetricKey {
    /// Every metric, in display order.
    pub const ALL: [Self; 12] = [
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::PayoutRatio,
        Self::Eps,
        Self::AssetTurnover,
        Self::GrossMargin,
        Self::NetMargin,
        Self::DividendYield,
        Self::PriceEarnings,
        Self::CurrentRatio,
        Self::QuickRatio,
        Self::InterestCoverage,
    ];

    /// Stable key used by the presentation layer.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReturnOnEquity => "roe",
            Self::ReturnOnAssets => "roa",
            Self::PayoutRatio => "payout",
            Self::Eps => "eps",
            Self::AssetTurnover => "asset_turnover",
            Self::GrossMargin => "gross_margin",
            Self::NetMargin => "net_margin",
            Self::DividendYield => "div_yield",
            Self::PriceEarnings => "pe",
            Self::CurrentRatio => "current_ratio",
            Self::QuickRatio => "quick_ratio",
            Self::InterestCoverage => "interest_coverage",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ReturnOnEquity => "Return on Equity",
            Self::ReturnOnAssets => "Return on Assets",
            Self::PayoutRatio => "Payout Ratio",
            Self::Eps => "EPS",
            Self::AssetTurnover => "Asset Turnover",
            Self::GrossMargin => "Gross Margin",
            Self::NetMargin => "Net Profit Margin",
            Self::DividendYield => "Dividend Yield",
            Self::PriceEarnings => "P/E Ratio",
            Self::CurrentRatio => "Current Ratio",
            Self::QuickRatio => "Quick Ratio",
            Self::InterestCoverage => "Interest Coverage",
        }
    }

    /// Whether values are fractions to be shown as percentages.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        matches!(
            self,
            Self::ReturnOnEquity
                | Self::ReturnOnAssets
                | Self::PayoutRatio
                | Self::GrossMargin
                | Self::NetMargin
                | Self::DividendYield
        )
    }

    /// Category of the metric.
    #[must_use]
    pub const fn category(&self) -> MetricCategory {
        match self {
            Self::ReturnOnEquity | Self::ReturnOnAssets | Self::GrossMargin | Self::NetMargin => {
                MetricCategory::Profitability
            }
            Self::AssetTurnover => MetricCategory::Efficiency,
            Self::CurrentRatio | Self::QuickRatio | Self::InterestCoverage => {
                MetricCategory::Liquidity
            }
            Self::PriceEarnings => MetricCategory::Valuation,
            Self::PayoutRatio | Self::Eps | Self::DividendYield => MetricCategory::Shareholder,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == needle)
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// Metric key
    pub key: MetricKey,

    /// Category classification
    pub category: MetricCategory,

    /// How the metric is derived
    pub description: &'static str,

    /// Whether it comes from the financial statement rather than the metrics feed
    pub from_statement: bool,
}

/// Get information about every metric in the table.
#[must_use]
pub fn available_metrics() -> Vec<MetricInfo> {
    MetricKey::ALL
        .into_iter()
        .map(|key| {
            let (description, from_statement) = match key {
                MetricKey::ReturnOnEquity => ("Net income relative to shareholder equity", false),
                MetricKey::ReturnOnAssets => ("Net income relative to total assets", false),
                MetricKey::PayoutRatio => ("Share of earnings paid as dividends", false),
                MetricKey::Eps => ("Earnings per share", false),
                MetricKey::AssetTurnover => ("Total revenue / total assets", true),
                MetricKey::GrossMargin => ("(Revenue - cost of revenue) / revenue", true),
                MetricKey::NetMargin => ("(Gross profit - other expenses) / revenue", true),
                MetricKey::DividendYield => ("Trailing annual dividend rate", false),
                MetricKey::PriceEarnings => ("Latest share price / EPS", false),
                MetricKey::CurrentRatio => ("Current assets / current liabilities", true),
                MetricKey::QuickRatio => ("(Current assets - inventory) / current liabilities", true),
                MetricKey::InterestCoverage => ("EBIT / interest expenses", true),
            };
            MetricInfo {
                key,
                category: key.category(),
                description,
                from_statement,
            }
        })
        .collect()
}
