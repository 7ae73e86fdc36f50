//! Company comparison command implementation.

use anyhow::Result;
use sectorlens_compare::AnalysisReport;
use tracing::info;

use super::format_value;
use crate::{Analyzer, Format};

/// Print the comparison table for one company.
pub(crate) fn compare_company(analyzer: &Analyzer, stock_id: &str, format: Format) -> Result<()> {
    let report = analyzer.analyze(stock_id)?;
    info!(
        stock_id,
        price_fetches = analyzer.source().price_cache().misses(),
        "comparison ready"
    );

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let company = &report.company;
    let name = if company.company_name.is_empty() {
        company.stock_id.as_str()
    } else {
        company.company_name.as_str()
    };

    println!("\n{name} ({})", company.ticker);
    println!("{}", "=".repeat(72));
    println!("Sector:       {}", company.sector);
    println!("Price:        {}", format_value(report.latest_price, false));
    println!("Market cap:   {}", format_value(report.market_cap, false));
    println!(
        "Peers:        {} in sector, {} in market",
        report.sector_size, report.market_size
    );
    println!();

    println!(
        "{:<22} {:>14} {:>14} {:>14}",
        "Metric", "Company", "Sector", "Market"
    );
    println!("{}", "-".repeat(72));
    for row in &report.comparison {
        println!(
            "{:<22} {:>14} {:>14} {:>14}",
            row.title,
            format_value(row.value, row.is_percentage),
            format_value(row.sector_baseline, row.is_percentage),
            format_value(row.market_baseline, row.is_percentage),
        );
    }

    if !report.price_history.is_empty() {
        println!("\nRecent prices:");
        for price in &report.price_history {
            println!("  {}  {:>12.2}", price.date, price.share_price);
        }
    }
    println!();
}
