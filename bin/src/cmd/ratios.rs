//! Derived ratio command implementation.

use anyhow::Result;
use sectorlens_ratios::{compute_ratios, latest_statement};
use sectorlens_traits::{DataSource, SectorLensError, StockFilter};

use super::format_value;
use crate::Analyzer;

/// Print the ratios derived from a company's newest statement.
pub(crate) fn show_ratios(analyzer: &Analyzer, stock_id: &str) -> Result<()> {
    let source = analyzer.source();
    let company = source
        .company(stock_id)?
        .ok_or_else(|| SectorLensError::CompanyNotFound(stock_id.to_string()))?;

    let statements = source.statements(&StockFilter::one(stock_id))?;
    let statement = latest_statement(&statements, stock_id);
    let ratios = compute_ratios(statement);

    println!("\n{} ({})", company.stock_id, company.sector);
    match statement.and_then(|s| s.period) {
        Some(period) => println!("Statement period: {period}"),
        None if statement.is_some() => println!("Statement period: undated"),
        None => println!("No financial statement on file"),
    }
    println!("{}", "-".repeat(40));

    let rows = [
        ("Gross profit", ratios.gross_profit, false),
        ("Net income", ratios.net_income, false),
        ("Gross margin", ratios.gross_margin, true),
        ("Net profit margin", ratios.net_margin, true),
        ("Asset turnover", ratios.asset_turnover, false),
        ("Current ratio", ratios.current_ratio, false),
        ("Quick ratio", ratios.quick_ratio, false),
        ("Interest coverage", ratios.interest_coverage, false),
    ];
    for (label, value, is_percentage) in rows {
        println!("  {label:<20} {:>14}", format_value(value, is_percentage));
    }
    println!();

    Ok(())
}
