//! In-memory data source.

use std::path::Path;

use sectorlens_traits::{
    Company, CompanyFilter, DataSource, FinancialStatement, MetricSnapshot, PriceSnapshot,
    Result as EngineResult, StockFilter,
};

use crate::Result;
use crate::dataset::Dataset;

/// A [`DataSource`] backed by validated in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Dataset,
}

impl MemoryStore {
    /// Wrap a dataset after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset violates a row invariant.
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        dataset.validate()?;
        Ok(Self { dataset })
    }

    /// Load a JSON file or a directory of CSV tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            dataset: Dataset::load(path)?,
        })
    }

    /// The underlying tables.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl DataSource for MemoryStore {
    fn company(&self, stock_id: &str) -> EngineResult<Option<Company>> {
        Ok(self
            .dataset
            .companies
            .iter()
            .find(|c| c.stock_id == stock_id)
            .cloned())
    }

    fn companies(&self, filter: &CompanyFilter) -> EngineResult<Vec<Company>> {
        Ok(self
            .dataset
            .companies
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    fn statements(&self, filter: &StockFilter) -> EngineResult<Vec<FinancialStatement>> {
        Ok(self
            .dataset
            .financials
            .iter()
            .filter(|s| filter.matches(&s.stock_id))
            .cloned()
            .collect())
    }

    fn metric_snapshots(&self, filter: &StockFilter) -> EngineResult<Vec<MetricSnapshot>> {
        Ok(self
            .dataset
            .stock_metrics
            .iter()
            .filter(|s| filter.matches(&s.stock_id))
            .cloned()
            .collect())
    }

    fn price_snapshots(&self, filter: &StockFilter) -> EngineResult<Vec<PriceSnapshot>> {
        Ok(self
            .dataset
            .stock_prices
            .iter()
            .filter(|p| filter.matches(&p.stock_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectorlens_traits::Date;

    fn store() -> MemoryStore {
        let company = |id: &str, sector: &str| Company {
            stock_id: id.to_string(),
            ticker: id.to_string(),
            company_name: format!("{id} Corp"),
            sector: sector.to_string(),
            shares_outstanding: None,
        };
        let day = Date::from_ymd_opt(2024, 1, 5).unwrap();
        let dataset = Dataset {
            companies: vec![company("A", "Tech"), company("B", "Tech"), company("C", "Energy")],
            financials: vec![FinancialStatement::new("A"), FinancialStatement::new("C")],
            stock_metrics: vec![MetricSnapshot::new("B")],
            stock_prices: vec![
                PriceSnapshot::new("A", 10.0, day),
                PriceSnapshot::new("B", 20.0, day),
            ],
        };
        MemoryStore::from_dataset(dataset).unwrap()
    }

    #[test]
    fn test_company_lookup() {
        let store = store();
        assert_eq!(store.company("B").unwrap().unwrap().company_name, "B Corp");
        assert!(store.company("Z").unwrap().is_none());
    }

    #[test]
    fn test_company_filter() {
        let store = store();
        assert_eq!(store.companies(&CompanyFilter::All).unwrap().len(), 3);

        let tech = store
            .companies(&CompanyFilter::Sector("Tech".into()))
            .unwrap();
        let ids: Vec<_> = tech.iter().map(|c| c.stock_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn test_stock_filter() {
        let store = store();
        let filter = StockFilter::ids(["A", "B"]);

        assert_eq!(store.statements(&filter).unwrap().len(), 1);
        assert_eq!(store.metric_snapshots(&filter).unwrap().len(), 1);
        assert_eq!(store.price_snapshots(&filter).unwrap().len(), 2);
        assert_eq!(store.statements(&StockFilter::All).unwrap().len(), 2);
    }

    #[test]
    fn test_load_csv_leading_zero_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("companies.csv"),
            "stock_id,ticker,sector\n0101,0101,Tech\n0202,0202,Tech\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("stock_prices.csv"),
            "stock_id,share_price,date\n0101,12.5,2024-01-05\n",
        )
        .unwrap();

        let store = MemoryStore::load(dir.path()).unwrap();
        let company = store.company("0101").unwrap().unwrap();
        assert_eq!(company.ticker, "0101");
        assert!(store.company("101").unwrap().is_none());

        let prices = store.price_snapshots(&StockFilter::one("0101")).unwrap();
        assert_eq!(prices.len(), 1);
    }

    #[test]
    fn test_invalid_dataset_rejected() {
        let mut dataset = Dataset::default();
        dataset.stock_metrics.push(MetricSnapshot {
            eps: Some(f64::NAN),
            ..MetricSnapshot::new("A")
        });
        assert!(MemoryStore::from_dataset(dataset).is_err());
    }
}
