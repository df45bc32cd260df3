//! Command-line front end for the DarvaX scanner
//!
//! # Usage
//!
//! ```bash
//! # Point at the backend (default http://localhost:8000)
//! export DARVAX_API_BASE="http://localhost:8000"
//!
//! darvax scan RELIANCE TCS HDFCBANK
//! darvax analyze RELIANCE.NS weekly.png
//! darvax            # interactive shell
//! ```

mod commands;
mod repl;
mod report;
mod table;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use darvax_client::{ChartFile, ClientConfig, Dashboard, ModalState};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "darvax")]
#[command(about = "Scan tickers for DarvaX signals and analyze charts", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides DARVAX_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request timeout in seconds (overrides DARVAX_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print HTML fragments instead of terminal tables
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan tickers given as arguments, from a file, or from stdin (one per line)
    Scan {
        tickers: Vec<String>,

        /// File with one ticker per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Upload a chart image for one ticker and print the analysis
    Analyze { ticker: String, image: PathBuf },
    /// Replay the setup for a ticker over past years
    Backtest {
        ticker: String,

        #[arg(short, long, default_value_t = 5)]
        years: u32,
    },
    /// Check that the backend is running
    Health,
    /// Interactive shell (default)
    Repl,
}

fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut builder = ClientConfig::builder().with_env();
    if let Some(base) = &cli.api_base {
        builder = builder.api_base(base.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

fn read_ticker_input(tickers: Vec<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read tickers from {}", path.display()));
    }
    if !tickers.is_empty() {
        return Ok(tickers.join("\n"));
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read tickers from stdin")?;
    Ok(input)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    darvax_utils::init_tracing_with_default("warn,darvax_client=info");

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    info!("Using backend {}", config.api_base);

    let mut dashboard = Dashboard::connect(config)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Scan { tickers, file } => {
            let input = read_ticker_input(tickers, file)?;
            if dashboard.scan.run_scan(&input).await.is_err() {
                let alert = dashboard
                    .scan
                    .take_alert()
                    .unwrap_or_else(|| "Scan failed".to_string());
                bail!(alert);
            }
            println!("{}", report::scan_output(&dashboard.scan, cli.html));
        }
        Commands::Analyze { ticker, image } => {
            let analysis = &mut dashboard.analysis;
            analysis.open(ticker.clone());
            analysis.file_selected(Some(ChartFile::from_path(image)));
            analysis.submit().await;

            let output = report::modal_output(analysis.state(), &ticker, cli.html).unwrap_or_default();
            if matches!(analysis.state(), ModalState::Failed { .. }) {
                bail!(output);
            }
            println!("{output}");
        }
        Commands::Backtest { ticker, years } => {
            let report = dashboard.backtest(&ticker, years).await?;
            println!("{}", report::backtest_output(&report));
        }
        Commands::Health => {
            let status = dashboard.health().await?;
            println!("{}", status.status);
        }
        Commands::Repl => {
            repl::Repl::new(dashboard, cli.html).run().await?;
        }
    }

    Ok(())
}
