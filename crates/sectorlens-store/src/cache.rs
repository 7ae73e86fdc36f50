//! Time-bounded memoisation.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default lifetime of cached price feeds.
pub const DEFAULT_PRICE_TTL: Duration = Duration::from_secs(300);

/// Cache lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a fetched price feed stays fresh.
    pub price_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            price_ttl: DEFAULT_PRICE_TTL,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    cached_at: Instant,
}

/// A concurrent map whose entries expire after a fixed lifetime.
///
/// Expired entries are replaced lazily on the next lookup. A zero TTL
/// disables caching.
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache with the given entry lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh cached value for `key`, or compute and store a new one.
    ///
    /// A failed refresh leaves any stale entry in place and is not cached.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `refresh`.
    pub fn get_or_refresh<E, F>(&self, key: K, refresh: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(entry) = self.entries.get(&key)
            && entry.cached_at.elapsed() < self.ttl
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(age_ms = entry.cached_at.elapsed().as_millis(), "cache hit");
            return Ok(entry.value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("cache miss");
        let value = refresh()?;
        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                cached_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Drop one entry.
    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that ran the refresh closure.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok::<_, String>(vec![1.0, 2.0])
        };

        assert_eq!(cache.get_or_refresh("k", fetch).unwrap(), vec![1.0, 2.0]);
        assert_eq!(cache.get_or_refresh("k", fetch).unwrap(), vec![1.0, 2.0]);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_always_refreshes() {
        let cache = TtlCache::new(Duration::ZERO);
        let calls = Cell::new(0);
        for _ in 0..3 {
            cache
                .get_or_refresh(1u32, || {
                    calls.set(calls.get() + 1);
                    Ok::<_, String>(calls.get())
                })
                .unwrap();
        }
        assert_eq!(calls.get(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_error_not_cached() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(3600));

        let err = cache.get_or_refresh("k", || Err("down".to_string()));
        assert_eq!(err, Err("down".to_string()));
        assert!(cache.is_empty());

        assert_eq!(cache.get_or_refresh("k", || Ok::<_, String>(7)), Ok(7));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        cache.get_or_refresh("a", || Ok::<_, String>(1)).unwrap();
        cache.get_or_refresh("b", || Ok::<_, String>(2)).unwrap();

        cache.invalidate(&"a");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_or_refresh("a", || Ok::<_, String>(10)), Ok(10));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_default_config() {
        assert_eq!(CacheConfig::default().price_ttl, Duration::from_secs(300));
    }
}
