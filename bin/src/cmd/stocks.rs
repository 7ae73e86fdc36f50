//! Stock list command implementation.

use anyhow::Result;
use sectorlens_compare::StockSummary;
use sectorlens_traits::Date;

use super::format_value;
use crate::{Analyzer, Format};

/// Print every stock with its latest figures.
pub(crate) fn list_stocks(analyzer: &Analyzer, as_of: Date, format: Format) -> Result<()> {
    let summaries = analyzer.stock_summaries(as_of)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        Format::Text => print_table(&summaries, as_of),
    }
    Ok(())
}

fn print_table(summaries: &[StockSummary], as_of: Date) {
    println!("\nStocks as of {as_of}");
    println!("{}", "=".repeat(96));
    println!(
        "{:<10} {:<24} {:<16} {:>10} {:>9} {:>9} {:>8} {:>8}",
        "Ticker", "Company", "Sector", "Price", "1M", "1Y", "EPS", "ROE"
    );
    println!("{}", "-".repeat(96));

    for summary in summaries {
        let company = &summary.company;
        let metrics = summary.latest_metrics.as_ref();
        println!(
            "{:<10} {:<24} {:<16} {:>10} {:>9} {:>9} {:>8} {:>8}",
            truncate(&company.ticker, 10),
            truncate(&company.company_name, 24),
            truncate(&company.sector, 16),
            format_value(summary.latest_price, false),
            format_value(summary.one_month_change(), true),
            format_value(summary.one_year_change(), true),
            format_value(metrics.and_then(|m| m.eps), false),
            format_value(metrics.and_then(|m| m.return_on_equity), true),
        );
    }
    println!();
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('~');
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("ACME", 10), "ACME");
        assert_eq!(truncate("Very Long Company Name", 8), "Very Lo~");
    }
}
