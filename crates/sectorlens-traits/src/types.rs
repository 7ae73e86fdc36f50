//! Records consumed by the ratio engine.
//!
//! These mirror the rows of the backing store (`stocks`, `financials`,
//! `stock_metrics`, `stock_prices`). They are fetched once per request and
//! never mutated by the engine.

use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A stock identifier as used by the data store.
pub type StockId = String;

/// Descriptive profile of a covered company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Store identifier.
    pub stock_id: StockId,
    /// Exchange ticker.
    #[serde(default)]
    pub ticker: String,
    /// Display name.
    #[serde(default)]
    pub company_name: String,
    /// Sector used to form the sector peer group.
    pub sector: String,
    /// Shares outstanding, when reported.
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
}

/// One company's financial statement for one reporting period.
///
/// Every figure may be missing upstream; present figures are finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    /// Owning company.
    pub stock_id: StockId,
    /// End of the reporting period, if known.
    #[serde(default)]
    pub period: Option<Date>,
    /// Total revenue.
    #[serde(default)]
    pub total_revenue: Option<f64>,
    /// Cost of revenue (COGS).
    #[serde(default)]
    pub cost_of_revenue: Option<f64>,
    /// All remaining expenses below gross profit.
    #[serde(default)]
    pub other_expenses: Option<f64>,
    /// Total assets.
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Current assets.
    #[serde(default)]
    pub current_assets: Option<f64>,
    /// Current liabilities.
    #[serde(default)]
    pub current_liabilities: Option<f64>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Option<f64>,
    /// Earnings before interest and taxes.
    #[serde(default)]
    pub ebit: Option<f64>,
    /// Interest expenses.
    #[serde(default)]
    pub interest_expenses: Option<f64>,
}

impl FinancialStatement {
    /// Column names carrying the numeric statement figures, in field order.
    pub const NUMERIC_FIELDS: [&'static str; 9] = [
        "total_revenue",
        "cost_of_revenue",
        "other_expenses",
        "total_assets",
        "current_assets",
        "current_liabilities",
        "inventory",
        "ebit",
        "interest_expenses",
    ];

    /// Create an empty statement for a company.
    #[must_use]
    pub fn new(stock_id: impl Into<StockId>) -> Self {
        Self {
            stock_id: stock_id.into(),
            ..Default::default()
        }
    }

    /// Iterate `(name, value)` over the numeric figures.
    pub fn numeric_fields(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        Self::NUMERIC_FIELDS.into_iter().zip([
            self.total_revenue,
            self.cost_of_revenue,
            self.other_expenses,
            self.total_assets,
            self.current_assets,
            self.current_liabilities,
            self.inventory,
            self.ebit,
            self.interest_expenses,
        ])
    }
}

/// One company's reported market metrics for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Owning company.
    pub stock_id: StockId,
    /// Snapshot date, if known.
    #[serde(default)]
    pub date: Option<Date>,
    /// Return on equity.
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    /// Return on assets.
    #[serde(default)]
    pub return_on_assets: Option<f64>,
    /// Dividend payout ratio.
    #[serde(default)]
    pub payout_ratio: Option<f64>,
    /// Earnings per share.
    #[serde(default)]
    pub eps: Option<f64>,
    /// Trailing annual dividend rate, shown as dividend yield.
    #[serde(default)]
    pub trailing_annual_dividend_rate: Option<f64>,
}

impl MetricSnapshot {
    /// Column names carrying the numeric metrics, in field order.
    pub const NUMERIC_FIELDS: [&'static str; 5] = [
        "return_on_equity",
        "return_on_assets",
        "payout_ratio",
        "eps",
        "trailing_annual_dividend_rate",
    ];

    /// Create an empty snapshot for a company.
    #[must_use]
    pub fn new(stock_id: impl Into<StockId>) -> Self {
        Self {
            stock_id: stock_id.into(),
            ..Default::default()
        }
    }

    /// Iterate `(name, value)` over the numeric metrics.
    pub fn numeric_fields(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        Self::NUMERIC_FIELDS.into_iter().zip([
            self.return_on_equity,
            self.return_on_assets,
            self.payout_ratio,
            self.eps,
            self.trailing_annual_dividend_rate,
        ])
    }
}

/// A dated share price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Owning company.
    pub stock_id: StockId,
    /// Share price.
    pub share_price: f64,
    /// Observation date.
    pub date: Date,
}

impl PriceSnapshot {
    /// Create a price observation.
    #[must_use]
    pub fn new(stock_id: impl Into<StockId>, share_price: f64, date: Date) -> Self {
        Self {
            stock_id: stock_id.into(),
            share_price,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_deserialize_sparse() {
        let json = r#"{"stock_id":"ACME","total_revenue":1000.0,"ebit":null}"#;
        let statement: FinancialStatement = serde_json::from_str(json).unwrap();
        assert_eq!(statement.stock_id, "ACME");
        assert_eq!(statement.total_revenue, Some(1000.0));
        assert_eq!(statement.ebit, None);
        assert_eq!(statement.inventory, None);
        assert_eq!(statement.period, None);
    }

    #[test]
    fn test_statement_rejects_non_numeric() {
        let json = r#"{"stock_id":"ACME","total_revenue":"lots"}"#;
        assert!(serde_json::from_str::<FinancialStatement>(json).is_err());
    }

    #[test]
    fn test_numeric_fields_order() {
        let statement = FinancialStatement {
            total_revenue: Some(1.0),
            interest_expenses: Some(9.0),
            ..FinancialStatement::new("X")
        };
        let fields: Vec<_> = statement.numeric_fields().collect();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], ("total_revenue", Some(1.0)));
        assert_eq!(fields[8], ("interest_expenses", Some(9.0)));
    }

    #[test]
    fn test_snapshot_date_parse() {
        let json = r#"{"stock_id":"ACME","date":"2024-03-31","eps":2.5}"#;
        let snapshot: MetricSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.date, Date::from_ymd_opt(2024, 3, 31));
        assert_eq!(snapshot.eps, Some(2.5));
    }

    #[test]
    fn test_company_optional_fields() {
        let json = r#"{"stock_id":"1","sector":"Energy"}"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.sector, "Energy");
        assert!(company.ticker.is_empty());
        assert_eq!(company.shares_outstanding, None);
    }
}
