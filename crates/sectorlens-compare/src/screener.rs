//! Stock list with each company's latest figures and reference-date prices.

use std::collections::BTreeMap;

use chrono::{Datelike, Months};
use sectorlens_ratios::{latest_prices, latest_snapshot, latest_statement};
use sectorlens_traits::stats::{difference, product, ratio};
use sectorlens_traits::{
    Company, CompanyFilter, DataSource, Date, FinancialStatement, MetricSnapshot, PriceSnapshot,
    Result, StockFilter,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dates the screener reads prices at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDates {
    /// Prices after this date are ignored.
    pub as_of: Date,
    /// Same day one month earlier, clamped to the month's last day.
    pub one_month_ago: Date,
    /// First day of the month one year earlier.
    pub one_year_ago: Date,
}

impl ReferenceDates {
    /// Reference dates relative to `as_of`.
    #[must_use]
    pub fn from_as_of(as_of: Date) -> Self {
        let one_month_ago = as_of.checked_sub_months(Months::new(1)).unwrap_or(as_of);
        let one_year_ago = as_of
            .checked_sub_months(Months::new(12))
            .and_then(|d| d.with_day(1))
            .unwrap_or(as_of);
        Self {
            as_of,
            one_month_ago,
            one_year_ago,
        }
    }
}

/// One line of the stock list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    /// Company profile.
    pub company: Company,
    /// Newest price on or before the as-of date.
    pub latest_price: Option<f64>,
    /// Latest price x shares outstanding.
    pub market_cap: Option<f64>,
    /// Newest financial statement.
    pub latest_statement: Option<FinancialStatement>,
    /// Newest metric snapshot.
    pub latest_metrics: Option<MetricSnapshot>,
    /// Price on or before the one-month reference date.
    pub one_month_ago_price: Option<f64>,
    /// Price on or before the one-year reference date.
    pub one_year_ago_price: Option<f64>,
}

impl StockSummary {
    /// Fractional price change over the last month.
    #[must_use]
    pub fn one_month_change(&self) -> Option<f64> {
        change(self.latest_price, self.one_month_ago_price)
    }

    /// Fractional price change since the one-year reference date.
    #[must_use]
    pub fn one_year_change(&self) -> Option<f64> {
        change(self.latest_price, self.one_year_ago_price)
    }
}

fn change(latest: Option<f64>, reference: Option<f64>) -> Option<f64> {
    ratio(difference(latest, reference), reference)
}

/// Newest finite price dated on or before `date`.
fn price_on_or_before(rows: &[&PriceSnapshot], date: Date) -> Option<f64> {
    rows.iter()
        .filter(|p| p.date <= date && p.share_price.is_finite())
        .reduce(|best, p| if p.date > best.date { p } else { best })
        .map(|p| p.share_price)
}

/// Summarize every company in the directory as of a date.
///
/// Statements and metric snapshots are the newest on file; prices are bounded
/// by `as_of`. A company with no rows still gets a line with empty figures.
///
/// # Errors
///
/// Returns the source's error if a fetch fails.
pub fn summarize_stocks<S>(source: &S, as_of: Date) -> Result<Vec<StockSummary>>
where
    S: DataSource + ?Sized,
{
    let dates = ReferenceDates::from_as_of(as_of);
    let companies = source.companies(&CompanyFilter::All)?;
    let statements = source.statements(&StockFilter::All)?;
    let snapshots = source.metric_snapshots(&StockFilter::All)?;
    let prices: Vec<PriceSnapshot> = source
        .price_snapshots(&StockFilter::All)?
        .into_iter()
        .filter(|p| p.date <= as_of)
        .collect();

    let latest = latest_prices(&prices);
    let mut history: BTreeMap<&str, Vec<&PriceSnapshot>> = BTreeMap::new();
    for price in &prices {
        history.entry(price.stock_id.as_str()).or_default().push(price);
    }
    let price_at = |id: &str, date: Date| {
        history
            .get(id)
            .and_then(|rows| price_on_or_before(rows, date))
    };

    debug!(
        companies = companies.len(),
        priced = latest.len(),
        %as_of,
        "summarizing stocks"
    );

    Ok(companies
        .into_iter()
        .map(|company| {
            let id = company.stock_id.as_str();
            let latest_price = latest.get(id).copied();
            let market_cap = product(latest_price, company.shares_outstanding);
            let latest_statement = latest_statement(&statements, id).cloned();
            let latest_metrics = latest_snapshot(&snapshots, id).cloned();
            let one_month_ago_price = price_at(id, dates.one_month_ago);
            let one_year_ago_price = price_at(id, dates.one_year_ago);

            StockSummary {
                company,
                latest_price,
                market_cap,
                latest_statement,
                latest_metrics,
                one_month_ago_price,
                one_year_ago_price,
            }
        })
        .collect())
}
