//! Sector listing command implementation.

use std::collections::BTreeMap;

use anyhow::Result;
use sectorlens_traits::{CompanyFilter, DataSource};

use super::format_value;
use crate::Analyzer;

/// List every sector with its member count and mean P/E.
pub(crate) fn list_sectors(analyzer: &Analyzer) -> Result<()> {
    let companies = analyzer.source().companies(&CompanyFilter::All)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for company in &companies {
        *counts.entry(company.sector.as_str()).or_default() += 1;
    }
    let baselines = analyzer.sector_baselines()?;

    println!("\n{:<28} {:>8} {:>12}", "Sector", "Members", "Sector P/E");
    println!("{}", "-".repeat(50));
    for (sector, members) in &counts {
        let pe = baselines.get(*sector).and_then(|b| b.pe);
        println!("{sector:<28} {members:>8} {:>12}", format_value(pe, false));
    }

    let market = analyzer.market_baseline()?;
    println!("{}", "-".repeat(50));
    println!(
        "{:<28} {:>8} {:>12}\n",
        "Market",
        companies.len(),
        format_value(market.pe, false)
    );

    Ok(())
}
