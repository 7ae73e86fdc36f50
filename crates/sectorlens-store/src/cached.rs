//! A data source wrapper that memoises price feeds.

use sectorlens_traits::{
    Company, CompanyFilter, DataSource, FinancialStatement, MetricSnapshot, PriceSnapshot, Result,
    StockFilter,
};
use tracing::debug;

use crate::cache::{CacheConfig, TtlCache};

/// Wraps a [`DataSource`] and caches `price_snapshots` per filter.
///
/// Statements, metrics and profiles change rarely and are passed through.
/// Prices are the frequently polled table, so repeated requests within the
/// configured lifetime reuse the previous fetch.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    prices: TtlCache<StockFilter, Vec<PriceSnapshot>>,
}

impl<S: DataSource> CachedSource<S> {
    /// Wrap `inner` with the given cache lifetimes.
    #[must_use]
    pub fn new(inner: S, config: CacheConfig) -> Self {
        debug!(price_ttl_secs = config.price_ttl.as_secs(), "price cache enabled");
        Self {
            inner,
            prices: TtlCache::new(config.price_ttl),
        }
    }

    /// The wrapped source.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The price cache.
    #[must_use]
    pub const fn price_cache(&self) -> &TtlCache<StockFilter, Vec<PriceSnapshot>> {
        &self.prices
    }
}

impl<S: DataSource> DataSource for CachedSource<S> {
    fn company(&self, id: &str) -> Result<Option<Company>> {
        self.inner.company(id)
    }

    fn companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
        self.inner.companies(filter)
    }

    fn statements(&self, filter: &StockFilter) -> Result<Vec<FinancialStatement>> {
        self.inner.statements(filter)
    }

    fn metric_snapshots(&self, filter: &StockFilter) -> Result<Vec<MetricSnapshot>> {
        self.inner.metric_snapshots(filter)
    }

    fn price_snapshots(&self, filter: &StockFilter) -> Result<Vec<PriceSnapshot>> {
        self.prices
            .get_or_refresh(filter.clone(), || self.inner.price_snapshots(filter))
    }
}
