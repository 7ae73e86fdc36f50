//! DataFrame to record conversion.
//!
//! Tables arrive as polars frames, usually read from CSV. Each column is cast
//! strictly to the record's type, so a value that does not parse is an error
//! instead of a silent null. Empty cells become `None`.

use std::path::Path;

use polars::prelude::*;
use sectorlens_traits::{Company, Date, FinancialStatement, MetricSnapshot, PriceSnapshot};

use crate::Result;
use crate::error::StoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a CSV file with a header row.
///
/// Every column is read as text and typed later by the record converters, so
/// identifiers such as `0101` keep their leading zeros.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| StoreError::MissingColumn(name.to_string()))
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|e| StoreError::InvalidData(format!("column '{name}' is not numeric: {e}")))?;

    let values: Vec<Option<f64>> = series.f64()?.into_iter().collect();
    if let Some(row) = values.iter().position(|v| v.is_some_and(|v| !v.is_finite())) {
        return Err(StoreError::InvalidData(format!(
            "column '{name}' row {row} is not finite"
        )));
    }
    Ok(values)
}

fn optional_float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if df.column(name).is_ok() {
        float_values(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .strict_cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

fn optional_string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.column(name).is_ok() {
        string_values(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

fn ids(df: &DataFrame) -> Result<Vec<String>> {
    string_values(df, "stock_id")?
        .into_iter()
        .enumerate()
        .map(|(row, id)| match id {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(StoreError::InvalidData(format!("row {row} has no stock_id"))),
        })
        .collect()
}

fn parse_date(name: &str, row: usize, raw: &str) -> Result<Date> {
    Date::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        StoreError::InvalidData(format!("column '{name}' row {row}: bad date '{raw}': {e}"))
    })
}

fn optional_dates(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>> {
    optional_string_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, raw)| raw.map(|raw| parse_date(name, row, &raw)).transpose())
        .collect()
}

/// Convert a `companies` frame.
///
/// Requires `stock_id` and `sector`; `ticker`, `company_name` and
/// `shares_outstanding` are optional.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed value.
pub fn companies_from_frame(df: &DataFrame) -> Result<Vec<Company>> {
    let ids = ids(df)?;
    let sectors = string_values(df, "sector")?;
    let tickers = optional_string_values(df, "ticker")?;
    let names = optional_string_values(df, "company_name")?;
    let shares = optional_float_values(df, "shares_outstanding")?;

    ids.into_iter()
        .enumerate()
        .map(|(row, stock_id)| {
            let sector = sectors[row].clone().ok_or_else(|| {
                StoreError::InvalidData(format!("company '{stock_id}' has no sector"))
            })?;
            Ok(Company {
                ticker: tickers[row].clone().unwrap_or_default(),
                company_name: names[row].clone().unwrap_or_default(),
                sector,
                shares_outstanding: shares[row],
                stock_id,
            })
        })
        .collect()
}

/// Convert a `financials` frame.
///
/// Every statement field is a required column; `period` is optional.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed value.
pub fn statements_from_frame(df: &DataFrame) -> Result<Vec<FinancialStatement>> {
    let ids = ids(df)?;
    let periods = optional_dates(df, "period")?;
    let columns = FinancialStatement::NUMERIC_FIELDS
        .iter()
        .map(|name| float_values(df, name))
        .collect::<Result<Vec<_>>>()?;
    let value = |field: usize, row: usize| columns[field][row];

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(row, stock_id)| FinancialStatement {
            stock_id,
            period: periods[row],
            total_revenue: value(0, row),
            cost_of_revenue: value(1, row),
            other_expenses: value(2, row),
            total_assets: value(3, row),
            current_assets: value(4, row),
            current_liabilities: value(5, row),
            inventory: value(6, row),
            ebit: value(7, row),
            interest_expenses: value(8, row),
        })
        .collect())
}

/// Convert a `stock_metrics` frame.
///
/// Every metric is a required column; `date` is optional.
///
/// # Errors
///
/// Returns an error on a missing required column or a malformed value.
pub fn metrics_from_frame(df: &DataFrame) -> Result<Vec<MetricSnapshot>> {
    let ids = ids(df)?;
    let dates = optional_dates(df, "date")?;
    let columns = MetricSnapshot::NUMERIC_FIELDS
        .iter()
        .map(|name| float_values(df, name))
        .collect::<Result<Vec<_>>>()?;
    let value = |field: usize, row: usize| columns[field][row];

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(row, stock_id)| MetricSnapshot {
            stock_id,
            date: dates[row],
            return_on_equity: value(0, row),
            return_on_assets: value(1, row),
            payout_ratio: value(2, row),
            eps: value(3, row),
            trailing_annual_dividend_rate: value(4, row),
        })
        .collect())
}

/// Convert a `stock_prices` frame.
///
/// Requires `stock_id`, `share_price` and `date`, all non-null.
///
/// # Errors
///
/// Returns an error on a missing column, a null cell or a malformed value.
pub fn prices_from_frame(df: &DataFrame) -> Result<Vec<PriceSnapshot>> {
    let ids = ids(df)?;
    let prices = float_values(df, "share_price")?;
    let dates = string_values(df, "date")?;

    ids.into_iter()
        .enumerate()
        .map(|(row, stock_id)| {
            let price = prices[row].ok_or_else(|| {
                StoreError::InvalidData(format!("price row {row} for '{stock_id}' is empty"))
            })?;
            let raw = dates[row].as_deref().ok_or_else(|| {
                StoreError::InvalidData(format!("price row {row} for '{stock_id}' has no date"))
            })?;
            Ok(PriceSnapshot::new(stock_id, price, parse_date("date", row, raw)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements_frame() -> DataFrame {
        df!(
            "stock_id" => &["A", "B"],
            "period" => &[Some("2023-12-31"), None],
            "total_revenue" => &[Some(1000.0), None],
            "cost_of_revenue" => &[Some(600.0), None],
            "other_expenses" => &[Some(100.0), None],
            "total_assets" => &[Some(2000.0), Some(10.0)],
            "current_assets" => &[500i64, 7],
            "current_liabilities" => &[250i64, 0],
            "inventory" => &[Some(100.0), None],
            "ebit" => &[Some(300.0), None],
            "interest_expenses" => &[Some(50.0), None]
        )
        .unwrap()
    }

    #[test]
    fn test_statements_from_frame() {
        let statements = statements_from_frame(&statements_frame()).unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].stock_id, "A");
        assert_eq!(statements[0].period, Date::from_ymd_opt(2023, 12, 31));
        assert_eq!(statements[0].current_assets, Some(500.0));
        assert_eq!(statements[1].total_revenue, None);
        assert_eq!(statements[1].period, None);
    }

    #[test]
    fn test_missing_column() {
        let df = statements_frame().drop("ebit").unwrap();
        assert!(matches!(
            statements_from_frame(&df),
            Err(StoreError::MissingColumn(ref c)) if c == "ebit"
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let df = df!(
            "stock_id" => &["A"],
            "date" => &["2024-01-05"],
            "return_on_equity" => &["high"],
            "return_on_assets" => &[0.1],
            "payout_ratio" => &[0.2],
            "eps" => &[3.0],
            "trailing_annual_dividend_rate" => &[0.01]
        )
        .unwrap();
        assert!(matches!(metrics_from_frame(&df), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_metrics_from_frame() {
        let df = df!(
            "stock_id" => &["A", "A"],
            "date" => &["2024-01-05", "2024-01-06"],
            "return_on_equity" => &[Some(0.2), None],
            "return_on_assets" => &[0.1, 0.1],
            "payout_ratio" => &[0.3, 0.3],
            "eps" => &[Some(5.0), Some(5.5)],
            "trailing_annual_dividend_rate" => &[None::<f64>, None]
        )
        .unwrap();
        let snapshots = metrics_from_frame(&df).unwrap();

        assert_eq!(snapshots[1].date, Date::from_ymd_opt(2024, 1, 6));
        assert_eq!(snapshots[1].return_on_equity, None);
        assert_eq!(snapshots[0].trailing_annual_dividend_rate, None);
    }

    #[test]
    fn test_prices_require_date() {
        let df = df!(
            "stock_id" => &["A", "B"],
            "share_price" => &[10.0, 20.0],
            "date" => &[Some("2024-01-05"), None]
        )
        .unwrap();
        assert!(matches!(prices_from_frame(&df), Err(StoreError::InvalidData(_))));

        let bad = df!(
            "stock_id" => &["A"],
            "share_price" => &[10.0],
            "date" => &["05/01/2024"]
        )
        .unwrap();
        let err = prices_from_frame(&bad).unwrap_err();
        assert!(err.to_string().contains("bad date"));
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let df = df!(
            "stock_id" => &["A"],
            "share_price" => &[f64::NAN],
            "date" => &["2024-01-05"]
        )
        .unwrap();
        assert!(matches!(prices_from_frame(&df), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_companies_optional_columns() {
        let df = df!(
            "stock_id" => &[1i64, 2],
            "sector" => &["Tech", "Energy"]
        )
        .unwrap();
        let companies = companies_from_frame(&df).unwrap();

        assert_eq!(companies[0].stock_id, "1");
        assert_eq!(companies[1].sector, "Energy");
        assert!(companies[0].ticker.is_empty());
        assert_eq!(companies[0].shares_outstanding, None);
    }

    #[test]
    fn test_null_id_rejected() {
        let df = df!(
            "stock_id" => &[Some("A"), None],
            "sector" => &["Tech", "Tech"]
        )
        .unwrap();
        assert!(matches!(companies_from_frame(&df), Err(StoreError::InvalidData(_))));
    }
}
