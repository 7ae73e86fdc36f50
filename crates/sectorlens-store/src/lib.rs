//! Data access for sectorlens.
//!
//! The ratio engine never performs I/O. This crate provides the collaborator
//! that does: an in-memory [`MemoryStore`] implementing
//! [`DataSource`](sectorlens_traits::DataSource), loaders that validate raw
//! JSON or CSV rows at the boundary, and a TTL cache for price feeds.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use sectorlens_store::{CacheConfig, CachedSource, MemoryStore};
//!
//! let store = MemoryStore::load("data/market.json")?;
//! let source = CachedSource::new(store, CacheConfig { price_ttl: Duration::from_secs(60) });
//! ```
//!
//! # Dataset layout
//!
//! A JSON dataset is one object with `companies`, `financials`,
//! `stock_metrics` and `stock_prices` arrays. A CSV dataset is a directory
//! holding `companies.csv`, `financials.csv`, `stock_metrics.csv` and
//! `stock_prices.csv`; missing files are treated as empty tables.

mod cache;
mod cached;
mod dataset;
mod error;
mod frame;
mod memory;

pub use cache::{CacheConfig, DEFAULT_PRICE_TTL, TtlCache};
pub use cached::CachedSource;
pub use dataset::Dataset;
pub use error::StoreError;
pub use frame::{
    companies_from_frame, metrics_from_frame, prices_from_frame, read_csv, statements_from_frame,
};
pub use memory::MemoryStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
