//! Request-level orchestration: fetch a company and its peer groups, then
//! run the engine over the fetched rows.

use std::collections::{BTreeMap, BTreeSet};

use sectorlens_ratios::{
    DerivedRatios, EpsMap, PriceMap, compute_ratios, latest_eps, latest_prices, latest_snapshot,
    latest_statement,
};
use sectorlens_traits::stats::product;
use sectorlens_traits::{
    Company, CompanyFilter, DataSource, Date, FinancialStatement, MetricSnapshot, PriceSnapshot,
    Result, SectorLensError, StockFilter, StockId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::baseline::PeerBaseline;
use crate::composer::{ComparisonRow, compose_comparison};
use crate::screener::{StockSummary, summarize_stocks};

/// Configuration for company analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of recent price observations kept in the report (default: 7)
    pub price_history_len: usize,

    /// Average only each peer's newest snapshot and statement (default: false)
    pub latest_only: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            price_history_len: 7,
            latest_only: false,
        }
    }
}

/// Everything the dashboard shows for one company.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Company profile.
    pub company: Company,
    /// Newest share price.
    pub latest_price: Option<f64>,
    /// Latest price x shares outstanding.
    pub market_cap: Option<f64>,
    /// Ratios derived from the company's newest statement.
    pub derived: DerivedRatios,
    /// The company's newest metric snapshot.
    pub metrics: Option<MetricSnapshot>,
    /// Company vs. sector vs. market table.
    pub comparison: Vec<ComparisonRow>,
    /// Recent prices, newest first.
    pub price_history: Vec<PriceSnapshot>,
    /// Number of companies in the sector group.
    pub sector_size: usize,
    /// Number of companies in the market group.
    pub market_size: usize,
}

/// Rows fetched for one peer group.
#[derive(Debug, Default)]
struct GroupRows {
    ids: BTreeSet<StockId>,
    statements: Vec<FinancialStatement>,
    snapshots: Vec<MetricSnapshot>,
    prices: PriceMap,
    eps: EpsMap,
}

impl GroupRows {
    fn baseline(&self) -> PeerBaseline {
        PeerBaseline::from_group(&self.statements, &self.snapshots, &self.prices, &self.eps)
    }

    /// Restrict market-wide rows to a subset of stock ids.
    fn subset(&self, ids: BTreeSet<StockId>) -> Self {
        let keep = |id: &str| ids.contains(id);
        let statements = self
            .statements
            .iter()
            .filter(|s| keep(s.stock_id.as_str()))
            .cloned()
            .collect();
        let snapshots = self
            .snapshots
            .iter()
            .filter(|s| keep(s.stock_id.as_str()))
            .cloned()
            .collect();
        let prices = self
            .prices
            .iter()
            .filter(|(id, _)| keep(id.as_str()))
            .map(|(id, price)| (id.clone(), *price))
            .collect();
        let eps = self
            .eps
            .iter()
            .filter(|(id, _)| keep(id.as_str()))
            .map(|(id, eps)| (id.clone(), *eps))
            .collect();

        Self {
            ids,
            statements,
            snapshots,
            prices,
            eps,
        }
    }
}

/// Builds [`AnalysisReport`]s from a [`DataSource`].
///
/// The market group is every covered company; the sector group is every
/// company sharing the subject's sector. Both are fully fetched before any
/// averaging starts.
#[derive(Debug)]
pub struct CompanyAnalyzer<S> {
    source: S,
    config: AnalysisConfig,
}

impl<S: DataSource> CompanyAnalyzer<S> {
    /// Create an analyzer over a data source.
    pub const fn new(source: S, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Get the underlying data source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Analyze one company against its sector and the market.
    ///
    /// # Errors
    ///
    /// Returns [`SectorLensError::CompanyNotFound`] for an unknown id, or
    /// the source's error if a fetch fails. Sparse data never errors.
    pub fn analyze(&self, stock_id: &str) -> Result<AnalysisReport> {
        let Some(company) = self.source.company(stock_id)? else {
            warn!(stock_id, "company not covered");
            return Err(SectorLensError::CompanyNotFound(stock_id.to_string()));
        };

        let own = StockFilter::one(stock_id);
        let statements = self.source.statements(&own)?;
        let snapshots = self.source.metric_snapshots(&own)?;
        let mut price_history = self.source.price_snapshots(&own)?;
        price_history.sort_by(|a, b| b.date.cmp(&a.date));
        let latest_price = price_history
            .iter()
            .map(|p| p.share_price)
            .find(|p| p.is_finite());
        price_history.truncate(self.config.price_history_len);

        let metrics = latest_snapshot(&snapshots, stock_id).cloned();
        let derived = compute_ratios(latest_statement(&statements, stock_id));
        let market_cap = product(latest_price, company.shares_outstanding);

        let market = self.market_rows()?;
        let sector = market.subset(self.sector_ids(&company.sector)?);
        debug!(
            stock_id,
            sector = %company.sector,
            sector_size = sector.ids.len(),
            market_size = market.ids.len(),
            "peer groups fetched"
        );

        let comparison = compose_comparison(
            metrics.as_ref(),
            &derived,
            latest_price,
            &sector.baseline(),
            &market.baseline(),
        );
        info!(stock_id, rows = comparison.len(), "analysis complete");

        Ok(AnalysisReport {
            company,
            latest_price,
            market_cap,
            derived,
            metrics,
            comparison,
            price_history,
            sector_size: sector.ids.len(),
            market_size: market.ids.len(),
        })
    }

    /// Baseline for every company in a sector.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a fetch fails.
    pub fn sector_baseline(&self, sector: &str) -> Result<PeerBaseline> {
        let market = self.market_rows()?;
        Ok(market.subset(self.sector_ids(sector)?).baseline())
    }

    /// Baselines for every sector in the directory, keyed by sector name.
    ///
    /// The market rows are fetched once and restricted per sector.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a fetch fails.
    pub fn sector_baselines(&self) -> Result<BTreeMap<String, PeerBaseline>> {
        let market = self.market_rows()?;

        let mut members: BTreeMap<String, BTreeSet<StockId>> = BTreeMap::new();
        for company in self.source.companies(&CompanyFilter::All)? {
            members
                .entry(company.sector)
                .or_default()
                .insert(company.stock_id);
        }
        debug!(sectors = members.len(), "sector baselines");

        Ok(members
            .into_iter()
            .map(|(sector, ids)| (sector, market.subset(ids).baseline()))
            .collect())
    }

    /// List every company with its latest figures as of a date.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a fetch fails.
    pub fn stock_summaries(&self, as_of: Date) -> Result<Vec<StockSummary>> {
        let summaries = summarize_stocks(&self.source, as_of)?;
        info!(stocks = summaries.len(), %as_of, "stock list ready");
        Ok(summaries)
    }

    /// Baseline for the whole covered market.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a fetch fails.
    pub fn market_baseline(&self) -> Result<PeerBaseline> {
        Ok(self.market_rows()?.baseline())
    }

    fn sector_ids(&self, sector: &str) -> Result<BTreeSet<StockId>> {
        Ok(self
            .source
            .companies(&CompanyFilter::Sector(sector.to_string()))?
            .into_iter()
            .map(|c| c.stock_id)
            .collect())
    }

    fn market_rows(&self) -> Result<GroupRows> {
        let ids: BTreeSet<StockId> = self
            .source
            .companies(&CompanyFilter::All)?
            .into_iter()
            .map(|c| c.stock_id)
            .collect();

        let statements = self.source.statements(&StockFilter::All)?;
        let snapshots = self.source.metric_snapshots(&StockFilter::All)?;
        let prices = latest_prices(&self.source.price_snapshots(&StockFilter::All)?);
        let eps = latest_eps(&snapshots);

        let mut rows = GroupRows {
            ids: BTreeSet::new(),
            statements,
            snapshots,
            prices,
            eps,
        };
        if self.config.latest_only {
            let reporting: BTreeSet<StockId> = rows
                .statements
                .iter()
                .map(|s| s.stock_id.clone())
                .chain(rows.snapshots.iter().map(|s| s.stock_id.clone()))
                .collect();
            rows.statements = reporting
                .iter()
                .filter_map(|id| latest_statement(&rows.statements, id).cloned())
                .collect();
            rows.snapshots = reporting
                .iter()
                .filter_map(|id| latest_snapshot(&rows.snapshots, id).cloned())
                .collect();
        }
        Ok(rows.subset(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::catalog::MetricKey;

    #[derive(Debug, Default)]
    struct Fixture {
        companies: Vec<Company>,
        statements: Vec<FinancialStatement>,
        snapshots: Vec<MetricSnapshot>,
        prices: Vec<PriceSnapshot>,
    }

    impl DataSource for Fixture {
        fn company(&self, id: &str) -> Result<Option<Company>> {
            Ok(self.companies.iter().find(|c| c.stock_id == id).cloned())
        }

        fn companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
            Ok(self.companies.iter().filter(|c| filter.matches(c)).cloned().collect())
        }

        fn statements(&self, filter: &StockFilter) -> Result<Vec<FinancialStatement>> {
            Ok(self.statements.iter().filter(|s| filter.matches(&s.stock_id)).cloned().collect())
        }

        fn metric_snapshots(&self, filter: &StockFilter) -> Result<Vec<MetricSnapshot>> {
            Ok(self.snapshots.iter().filter(|s| filter.matches(&s.stock_id)).cloned().collect())
        }

        fn price_snapshots(&self, filter: &StockFilter) -> Result<Vec<PriceSnapshot>> {
            Ok(self.prices.iter().filter(|p| filter.matches(&p.stock_id)).cloned().collect())
        }
    }

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn company(id: &str, sector: &str, shares: Option<f64>) -> Company {
        Company {
            stock_id: id.to_string(),
            ticker: id.to_string(),
            company_name: format!("{id} plc"),
            sector: sector.to_string(),
            shares_outstanding: shares,
        }
    }

    fn liquidity(id: &str, assets: f64, liabilities: f64) -> FinancialStatement {
        FinancialStatement {
            current_assets: Some(assets),
            current_liabilities: Some(liabilities),
            ..FinancialStatement::new(id)
        }
    }

    fn metrics(id: &str, d: u32, roe: f64, eps: f64) -> MetricSnapshot {
        MetricSnapshot {
            date: Some(day(d)),
            return_on_equity: Some(roe),
            eps: Some(eps),
            ..MetricSnapshot::new(id)
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            companies: vec![
                company("A", "Energy", Some(1_000.0)),
                company("B", "Energy", None),
                company("C", "Tech", Some(50.0)),
            ],
            statements: vec![
                liquidity("A", 200.0, 100.0),
                liquidity("B", 400.0, 100.0),
                liquidity("C", 900.0, 100.0),
            ],
            snapshots: vec![
                metrics("A", 1, 0.10, 2.0),
                metrics("A", 2, 0.20, 5.0),
                metrics("B", 1, 0.30, 4.0),
                metrics("C", 1, 0.60, 1.0),
            ],
            prices: (1..=9)
                .map(|d| PriceSnapshot::new("A", 90.0 + f64::from(d), day(d)))
                .chain([
                    PriceSnapshot::new("B", 40.0, day(3)),
                    PriceSnapshot::new("C", 30.0, day(3)),
                ])
                .collect(),
        }
    }

    fn row(report: &AnalysisReport, key: MetricKey) -> ComparisonRow {
        *report.comparison.iter().find(|r| r.key == key).unwrap()
    }

    #[test]
    fn test_unknown_company() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());
        let err = analyzer.analyze("ZZZ").unwrap_err();
        assert!(matches!(err, SectorLensError::CompanyNotFound(ref id) if id == "ZZZ"));
    }

    #[test]
    fn test_report_basics() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());
        let report = analyzer.analyze("A").unwrap();

        assert_eq!(report.latest_price, Some(99.0));
        assert_relative_eq!(report.market_cap.unwrap(), 99_000.0);
        assert_eq!(report.price_history.len(), 7);
        assert_eq!(report.price_history[0].date, day(9));
        assert_eq!(report.metrics.as_ref().unwrap().eps, Some(5.0));
        assert_eq!(report.sector_size, 2);
        assert_eq!(report.market_size, 3);
        assert_eq!(report.comparison.len(), 12);
    }

    #[test]
    fn test_report_baselines() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());
        let report = analyzer.analyze("A").unwrap();

        let current = row(&report, MetricKey::CurrentRatio);
        assert_relative_eq!(current.value.unwrap(), 2.0);
        assert_relative_eq!(current.sector_baseline.unwrap(), 3.0);
        assert_relative_eq!(current.market_baseline.unwrap(), 5.0);

        // All snapshots count by default: (0.1 + 0.2 + 0.3) / 3
        let roe = row(&report, MetricKey::ReturnOnEquity);
        assert_relative_eq!(roe.value.unwrap(), 0.2);
        assert_relative_eq!(roe.sector_baseline.unwrap(), 0.2, epsilon = 1e-12);

        // Sector P/E: A 99/5, B 40/4
        let pe = row(&report, MetricKey::PriceEarnings);
        assert_relative_eq!(pe.value.unwrap(), 19.8, epsilon = 1e-12);
        assert_relative_eq!(pe.sector_baseline.unwrap(), (19.8 + 10.0) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            pe.market_baseline.unwrap(),
            (19.8 + 10.0 + 30.0) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_latest_only_policy() {
        let config = AnalysisConfig {
            latest_only: true,
            ..Default::default()
        };
        let analyzer = CompanyAnalyzer::new(fixture(), config);
        let report = analyzer.analyze("A").unwrap();

        // Only A's newest snapshot (0.2) and B (0.3) remain.
        let roe = row(&report, MetricKey::ReturnOnEquity);
        assert_relative_eq!(roe.sector_baseline.unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_company_without_rows() {
        let mut data = fixture();
        data.companies.push(company("D", "Utilities", Some(10.0)));
        let analyzer = CompanyAnalyzer::new(data, AnalysisConfig::default());
        let report = analyzer.analyze("D").unwrap();

        assert_eq!(report.latest_price, None);
        assert_eq!(report.market_cap, None);
        assert!(report.derived.is_empty());
        assert_eq!(report.sector_size, 1);
        assert!(
            report
                .comparison
                .iter()
                .all(|r| r.value.is_none() && r.sector_baseline.is_none())
        );
        assert!(report.comparison.iter().any(|r| r.market_baseline.is_some()));
    }

    #[test]
    fn test_sector_and_market_baseline() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());

        let tech = analyzer.sector_baseline("Tech").unwrap();
        assert_relative_eq!(tech.pe.unwrap(), 30.0);
        assert_relative_eq!(tech.financials.current_ratio.unwrap(), 9.0);

        let none = analyzer.sector_baseline("Shipping").unwrap();
        assert_eq!(none, PeerBaseline::empty());

        let market = analyzer.market_baseline().unwrap();
        assert_relative_eq!(market.financials.current_ratio.unwrap(), 5.0);
    }

    #[test]
    fn test_stock_summaries() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());
        let summaries = analyzer.stock_summaries(day(5)).unwrap();

        assert_eq!(summaries.len(), 3);
        let a = &summaries[0];
        assert_eq!(a.latest_price, Some(95.0));
        assert_relative_eq!(a.market_cap.unwrap(), 95_000.0);
        assert_eq!(a.latest_metrics.as_ref().unwrap().eps, Some(5.0));
        assert_eq!(summaries[2].latest_price, Some(30.0));
    }

    #[test]
    fn test_sector_baselines_match_single_lookups() {
        let analyzer = CompanyAnalyzer::new(fixture(), AnalysisConfig::default());
        let all = analyzer.sector_baselines().unwrap();

        let sectors: Vec<_> = all.keys().map(String::as_str).collect();
        assert_eq!(sectors, ["Energy", "Tech"]);
        for (sector, baseline) in &all {
            assert_eq!(*baseline, analyzer.sector_baseline(sector).unwrap());
        }
        assert_relative_eq!(all["Energy"].financials.current_ratio.unwrap(), 3.0);
    }
}
