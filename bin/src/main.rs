//! sectorlens CLI binary.
//!
//! Compares a company's fundamental ratios against its sector and the whole
//! market.

mod cmd;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use sectorlens_compare::{AnalysisConfig, CompanyAnalyzer};
use sectorlens_store::{CacheConfig, CachedSource, MemoryStore};
use tracing_subscriber::EnvFilter;

/// Analyzer over the configured dataset.
pub(crate) type Analyzer = CompanyAnalyzer<CachedSource<MemoryStore>>;

#[derive(Parser)]
#[command(name = "sectorlens")]
#[command(about = "Company vs. sector vs. market ratio comparison", long_about = None)]
#[command(version)]
struct Cli {
    /// Dataset: a JSON file or a directory of CSV tables
    #[arg(short, long, env = "SECTORLENS_DATA", global = true, default_value = "data")]
    data: PathBuf,

    /// Lifetime of cached price feeds in seconds
    #[arg(long, env = "SECTORLENS_PRICE_TTL_SECS", global = true, default_value = "300")]
    price_ttl_secs: u64,

    /// Number of recent prices to include in a report
    #[arg(long, global = true, default_value = "7")]
    history: usize,

    /// Use only each peer's newest statement and metric snapshot
    #[arg(long, global = true)]
    latest_only: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Aligned table
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a company against its sector and the market
    Compare {
        /// Stock identifier
        stock_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show a company's statement-derived ratios
    Ratios {
        /// Stock identifier
        stock_id: String,
    },

    /// List sectors with member counts and sector P/E
    Sectors,

    /// List every stock with its latest price and one-month/one-year change
    Stocks {
        /// Read prices as of this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// List the metrics in the comparison table
    Metrics,
}

fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Human-readable logs by default, JSON when `RUST_LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Metrics) {
        cmd::metrics::list_metrics();
        return Ok(());
    }

    let store = MemoryStore::load(&cli.data)
        .with_context(|| format!("failed to load dataset from {}", cli.data.display()))?;
    let cache = CacheConfig {
        price_ttl: Duration::from_secs(cli.price_ttl_secs),
    };
    let config = AnalysisConfig {
        price_history_len: cli.history,
        latest_only: cli.latest_only,
    };
    let analyzer = CompanyAnalyzer::new(CachedSource::new(store, cache), config);

    match cli.command {
        Commands::Compare { stock_id, format } => {
            cmd::compare::compare_company(&analyzer, &stock_id, format)?;
        }
        Commands::Ratios { stock_id } => {
            cmd::ratios::show_ratios(&analyzer, &stock_id)?;
        }
        Commands::Sectors => {
            cmd::sectors::list_sectors(&analyzer)?;
        }
        Commands::Stocks { as_of, format } => {
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            cmd::stocks::list_stocks(&analyzer, as_of, format)?;
        }
        Commands::Metrics => {}
    }

    Ok(())
}
