//! Meanline CLI — fetch quotes and run backtests.
//!
//! Commands:
//! - `fetch` — download daily bars from Sohu and write them as JSON
//! - `run` — backtest the lot-based mean-line strategy and print the
//!   per-day equity narrative

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use meanline_core::data::{validate_bars, BarProvider, SohuProvider};
use meanline_core::domain::DailyBar;
use meanline_core::engine::run_backtest;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meanline", about = "Lot-based mean-line backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily bars from Sohu and write them as JSON.
    Fetch {
        /// Stock code (e.g. 600000).
        code: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: String,

        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run a backtest and print the per-day narrative.
    Run {
        /// Stock code. Not needed with --input.
        code: Option<String>,

        /// Initial capital.
        #[arg(long, default_value = "1000000")]
        capital: Decimal,

        /// Start date (YYYY-MM-DD). Required when fetching.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Required when fetching.
        #[arg(long)]
        end: Option<String>,

        /// Read bars from a JSON file (as written by `fetch --out`)
        /// instead of fetching.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Also print each day's order narrative.
        #[arg(long, default_value_t = false)]
        trades: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            code,
            start,
            end,
            out,
        } => run_fetch(&code, &start, &end, out),
        Commands::Run {
            code,
            capital,
            start,
            end,
            input,
            trades,
        } => run_backtest_cmd(code, capital, start, end, input, trades),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date: {s}"))
}

fn run_fetch(code: &str, start: &str, end: &str, out: Option<PathBuf>) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let provider = SohuProvider::new();
    let bars = provider.fetch(code, start, end)?;
    validate_bars(&bars)?;

    let json = serde_json::to_string_pretty(&bars)?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {} bars to {}", bars.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_backtest_cmd(
    code: Option<String>,
    capital: Decimal,
    start: Option<String>,
    end: Option<String>,
    input: Option<PathBuf>,
    trades: bool,
) -> Result<()> {
    let bars: Vec<DailyBar> = match input {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            let Some(code) = code else {
                bail!("either a stock code or --input is required");
            };
            let (Some(start), Some(end)) = (start, end) else {
                bail!("--start and --end are required when fetching");
            };
            let provider = SohuProvider::new();
            provider.fetch(&code, parse_date(&start)?, parse_date(&end)?)?
        }
    };
    validate_bars(&bars)?;

    let snapshots = run_backtest(capital, &bars)?;
    for snap in &snapshots {
        println!("{snap}");
        if trades {
            for line in &snap.trade_log {
                println!("    {line}");
            }
        }
    }

    let last = snapshots.last().expect("a run produces at least 31 snapshots");
    println!();
    println!("final equity: {} ({}%)", last.total_asset_value(), last.return_pct());
    if let Some(excess) = last.return_vs_buy_hold() {
        println!("vs buy-and-hold: {excess}%");
    }
    Ok(())
}
