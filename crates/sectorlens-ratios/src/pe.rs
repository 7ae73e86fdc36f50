//! Latest-per-stock projections and the cross-sectional P/E.
//!
//! Prices and EPS come from different tables with different histories, so
//! each is first projected to one value per stock and the two maps are then
//! joined on stock id.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use sectorlens_traits::stats::{mean, ratio};
use sectorlens_traits::{FinancialStatement, MetricSnapshot, PriceSnapshot, StockId};
use tracing::debug;

/// Latest share price per stock.
pub type PriceMap = BTreeMap<StockId, f64>;

/// Latest usable earnings per share per stock.
pub type EpsMap = BTreeMap<StockId, f64>;

/// Mean price-to-earnings ratio across stocks present in both maps.
///
/// Stocks missing from either map, or whose EPS is zero, are skipped. Returns
/// `None` when no stock qualifies.
///
/// # Examples
///
/// ```
/// use sectorlens_ratios::{EpsMap, PriceMap, average_pe};
///
/// let prices = PriceMap::from([("A".to_string(), 100.0), ("B".to_string(), 50.0)]);
/// let eps = EpsMap::from([("A".to_string(), 10.0)]);
///
/// assert_eq!(average_pe(&prices, &eps), Some(10.0));
/// ```
#[must_use]
pub fn average_pe(prices: &PriceMap, eps: &EpsMap) -> Option<f64> {
    let ratios: Vec<Option<f64>> = prices
        .iter()
        .filter_map(|(id, price)| {
            let eps = eps.get(id).copied()?;
            ratio(Some(*price), Some(eps))
        })
        .map(Some)
        .collect();

    debug!(
        prices = prices.len(),
        eps = eps.len(),
        qualified = ratios.len(),
        "cross-sectional p/e"
    );
    mean(ratios)
}

/// Project price history to the newest finite price per stock.
///
/// When a stock has several observations on its newest date, the first one
/// encountered wins.
#[must_use]
pub fn latest_prices(snapshots: &[PriceSnapshot]) -> PriceMap {
    let mut newest: BTreeMap<StockId, &PriceSnapshot> = BTreeMap::new();

    for snapshot in snapshots.iter().filter(|s| s.share_price.is_finite()) {
        match newest.entry(snapshot.stock_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
            }
            Entry::Occupied(mut slot) => {
                if snapshot.date > slot.get().date {
                    slot.insert(snapshot);
                }
            }
        }
    }

    newest
        .into_iter()
        .map(|(id, snapshot)| (id, snapshot.share_price))
        .collect()
}

/// Project metric history to the newest usable EPS per stock.
///
/// Snapshots whose EPS is missing, zero or non-finite are passed over, so a
/// stock whose newest snapshot lacks EPS falls back to an older one.
#[must_use]
pub fn latest_eps(snapshots: &[MetricSnapshot]) -> EpsMap {
    let mut newest: BTreeMap<StockId, &MetricSnapshot> = BTreeMap::new();

    let usable = snapshots
        .iter()
        .filter(|s| s.eps.is_some_and(|eps| eps != 0.0 && eps.is_finite()));

    for snapshot in usable {
        match newest.entry(snapshot.stock_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
            }
            Entry::Occupied(mut slot) => {
                if snapshot.date > slot.get().date {
                    slot.insert(snapshot);
                }
            }
        }
    }

    newest
        .into_iter()
        .filter_map(|(id, snapshot)| snapshot.eps.map(|eps| (id, eps)))
        .collect()
}

/// The newest metric snapshot for one stock, if any.
///
/// Undated snapshots sort before dated ones.
#[must_use]
pub fn latest_snapshot<'a>(
    snapshots: &'a [MetricSnapshot],
    stock_id: &str,
) -> Option<&'a MetricSnapshot> {
    snapshots
        .iter()
        .filter(|s| s.stock_id == stock_id)
        .reduce(|best, s| if s.date > best.date { s } else { best })
}

/// The newest financial statement for one stock, if any.
///
/// Undated statements sort before dated ones.
#[must_use]
pub fn latest_statement<'a>(
    statements: &'a [FinancialStatement],
    stock_id: &str,
) -> Option<&'a FinancialStatement> {
    statements
        .iter()
        .filter(|s| s.stock_id == stock_id)
        .reduce(|best, s| if s.period > best.period { s } else { best })
}
