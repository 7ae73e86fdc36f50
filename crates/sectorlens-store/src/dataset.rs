//! Raw dataset loading.

use std::fs;
use std::path::Path;

use sectorlens_traits::{Company, FinancialStatement, MetricSnapshot, PriceSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Result;
use crate::error::StoreError;
use crate::frame::{
    companies_from_frame, metrics_from_frame, prices_from_frame, read_csv, statements_from_frame,
};

/// The four tables the engine reads, as plain rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Company directory.
    #[serde(alias = "stocks")]
    pub companies: Vec<Company>,
    /// Financial statements, any number per stock.
    pub financials: Vec<FinancialStatement>,
    /// Per-stock metric snapshots.
    pub stock_metrics: Vec<MetricSnapshot>,
    /// Share price observations.
    pub stock_prices: Vec<PriceSnapshot>,
}

impl Dataset {
    /// Parse a dataset from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the record shapes or
    /// fails [`Dataset::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset from a JSON file or a directory of CSV tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read or any row is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = if path.is_dir() {
            Self::from_csv_dir(path)?
        } else {
            Self::from_json_str(&fs::read_to_string(path)?)?
        };

        info!(
            path = %path.display(),
            companies = dataset.companies.len(),
            financials = dataset.financials.len(),
            stock_metrics = dataset.stock_metrics.len(),
            stock_prices = dataset.stock_prices.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from a directory of CSV files.
    ///
    /// Reads `companies.csv`, `financials.csv`, `stock_metrics.csv` and
    /// `stock_prices.csv`. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    pub fn from_csv_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let table = |name: &str| {
            let path = dir.join(name);
            if path.exists() {
                read_csv(&path).map(Some)
            } else {
                debug!(path = %path.display(), "table file absent");
                Ok(None)
            }
        };

        let mut dataset = Self::default();
        if let Some(df) = table("companies.csv")? {
            dataset.companies = companies_from_frame(&df)?;
        }
        if let Some(df) = table("financials.csv")? {
            dataset.financials = statements_from_frame(&df)?;
        }
        if let Some(df) = table("stock_metrics.csv")? {
            dataset.stock_metrics = metrics_from_frame(&df)?;
        }
        if let Some(df) = table("stock_prices.csv")? {
            dataset.stock_prices = prices_from_frame(&df)?;
        }

        dataset.validate()?;
        Ok(dataset)
    }

    /// Check row-level invariants.
    ///
    /// Stock ids must be non-empty, company ids unique, and every numeric
    /// field finite when present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidData`] naming the first offending row.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for company in &self.companies {
            require_id("companies", &company.stock_id)?;
            if !seen.insert(company.stock_id.as_str()) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate company '{}'",
                    company.stock_id
                )));
            }
            require_finite(
                "companies",
                &company.stock_id,
                "shares_outstanding",
                company.shares_outstanding,
            )?;
        }

        for statement in &self.financials {
            require_id("financials", &statement.stock_id)?;
            for (field, value) in statement.numeric_fields() {
                require_finite("financials", &statement.stock_id, field, value)?;
            }
        }

        for snapshot in &self.stock_metrics {
            require_id("stock_metrics", &snapshot.stock_id)?;
            for (field, value) in snapshot.numeric_fields() {
                require_finite("stock_metrics", &snapshot.stock_id, field, value)?;
            }
        }

        for price in &self.stock_prices {
            require_id("stock_prices", &price.stock_id)?;
            require_finite(
                "stock_prices",
                &price.stock_id,
                "share_price",
                Some(price.share_price),
            )?;
        }

        Ok(())
    }
}

fn require_id(table: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(StoreError::InvalidData(format!("{table}: empty stock id")));
    }
    Ok(())
}

fn require_finite(table: &str, id: &str, field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(StoreError::InvalidData(format!(
            "{table}: {field} for '{id}' is not finite"
        ))),
        _ => Ok(()),
    }
}
