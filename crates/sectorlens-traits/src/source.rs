//! The data-access collaborator.
//!
//! The engine performs no I/O. Everything it consumes is fetched up front
//! through a [`DataSource`], which exposes fetch-by-id and fetch-by-filter
//! lookups over the store's tables.

use std::collections::BTreeSet;

use crate::{Company, FinancialStatement, MetricSnapshot, PriceSnapshot, Result, StockId};

/// Selects companies by profile attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompanyFilter {
    /// Every covered company.
    All,
    /// Companies in the named sector.
    Sector(String),
}

impl CompanyFilter {
    /// Whether a company passes this filter.
    #[must_use]
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            Self::All => true,
            Self::Sector(sector) => company.sector == *sector,
        }
    }
}

/// Selects per-stock rows by stock identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StockFilter {
    /// Rows for every stock.
    All,
    /// Rows for the listed stocks only.
    Ids(BTreeSet<StockId>),
}

impl StockFilter {
    /// Filter for a single stock.
    #[must_use]
    pub fn one(id: impl Into<StockId>) -> Self {
        Self::Ids(BTreeSet::from([id.into()]))
    }

    /// Filter for a set of stocks.
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StockId>,
    {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }

    /// Whether a stock identifier passes this filter.
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.contains(id),
        }
    }
}

/// Read access to the backing store.
///
/// Implementations must be thread-safe so that independent requests can
/// share one source. Missing rows are not errors: an unknown id yields
/// `Ok(None)` or an empty vector.
pub trait DataSource: Send + Sync {
    /// Fetch one company's profile by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn company(&self, id: &str) -> Result<Option<Company>>;

    /// Fetch company profiles matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>>;

    /// Fetch financial statements for the selected stocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn statements(&self, filter: &StockFilter) -> Result<Vec<FinancialStatement>>;

    /// Fetch metric snapshots for the selected stocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn metric_snapshots(&self, filter: &StockFilter) -> Result<Vec<MetricSnapshot>>;

    /// Fetch price snapshots for the selected stocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn price_snapshots(&self, filter: &StockFilter) -> Result<Vec<PriceSnapshot>>;
}
