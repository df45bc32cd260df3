//! Interactive scanner shell

use crate::commands::{AnalyzeTarget, Command};
use crate::report::{backtest_output, modal_output, scan_output};
use darvax_client::{ChartFile, Dashboard};
use std::io::{self, BufRead, Write};
use tracing::debug;

const PROMPT: &str = "darvax> ";

/// What the shell should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Exit,
}

pub struct Repl {
    dashboard: Dashboard,
    html: bool,
}

impl Repl {
    pub fn new(dashboard: Dashboard, html: bool) -> Self {
        Self { dashboard, html }
    }

    fn print_banner(&self) {
        println!(
            r"
╔══════════════════════════════════════════════════════════════╗
║                    DarvaX Signal Scanner                     ║
║                                                              ║
║  Type tickers to scan, e.g.  RELIANCE TCS HDFCBANK           ║
║  /analyze <row> <chart.png>  - analyze a chart               ║
║  /help                       - all commands                  ║
╚══════════════════════════════════════════════════════════════╝
"
        );
        println!("Backend: {}\n", self.dashboard.config().api_base);
    }

    /// Read commands from stdin until `/exit` or EOF
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("{PROMPT}");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    continue;
                }
            }

            if input.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&input) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{e}. Type /help for commands.\n");
                    continue;
                }
            };

            match self.execute(command).await {
                Reply::Print(text) => println!("{text}\n"),
                Reply::Exit => {
                    println!("Goodbye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Execute a parsed command
    pub async fn execute(&mut self, command: Command) -> Reply {
        debug!(?command, "Executing");

        match command {
            Command::Scan { input } => {
                let scan = &mut self.dashboard.scan;
                if scan.run_scan(&input).await.is_err() {
                    let alert = scan.take_alert().unwrap_or_else(|| "Scan failed".to_string());
                    return Reply::Print(alert);
                }
                Reply::Print(scan_output(scan, self.html))
            }
            Command::Rows => Reply::Print(scan_output(&self.dashboard.scan, self.html)),
            Command::Analyze { target, image } => {
                let ticker = match target {
                    AnalyzeTarget::Row(row) => match self.dashboard.analyze_row(row - 1) {
                        Some(ticker) => ticker,
                        None => return Reply::Print(format!("No row {row} in the last scan.")),
                    },
                    AnalyzeTarget::Ticker(ticker) => {
                        self.dashboard.analysis.open(ticker.clone());
                        ticker
                    }
                };

                let analysis = &mut self.dashboard.analysis;
                analysis.file_selected(Some(ChartFile::from_path(image)));
                analysis.submit().await;

                Reply::Print(
                    modal_output(analysis.state(), &ticker, self.html).unwrap_or_default(),
                )
            }
            Command::Close => {
                self.dashboard.analysis.close();
                Reply::Print("Analysis panel closed.".to_string())
            }
            Command::Backtest { ticker, years } => {
                match self.dashboard.backtest(&ticker, years).await {
                    Ok(report) => Reply::Print(backtest_output(&report)),
                    Err(e) => Reply::Print(format!("Backtest request failed: {e}")),
                }
            }
            Command::Health => match self.dashboard.health().await {
                Ok(status) => Reply::Print(status.status),
                Err(e) => Reply::Print(format!("Backend unreachable: {e}")),
            },
            Command::Help => Reply::Print(Command::help_text().to_string()),
            Command::Exit => Reply::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use darvax_client::models::{BacktestReport, BacktestRequest, HealthStatus};
    use darvax_client::{
        AnalysisRequest, AnalysisResponse, ClientConfig, DarvaxError, ModalState, Priority,
        SignalApi, Signal,
    };
    use std::path::PathBuf;
    use std::sync::Arc;

    struct FakeBackend;

    fn signal(ticker: &str, distance_pct: f64) -> Signal {
        Signal {
            ticker: ticker.to_string(),
            passed: true,
            pattern: "DARVAS".to_string(),
            close: 100.0,
            trigger: 101.0,
            stop_loss: 99.0,
            volume_status: "CONTRACTION".to_string(),
            distance_pct,
            priority: Priority::Tight,
            ath_pct: None,
            blue_sky: None,
        }
    }

    #[async_trait]
    impl SignalApi for FakeBackend {
        async fn scan(&self, tickers: &[String]) -> darvax_client::Result<Vec<Signal>> {
            if tickers.iter().any(|t| t == "DOWN") {
                return Err(DarvaxError::ScanFailed("backend down".to_string()));
            }
            Ok(vec![signal("BBB.NS", 3.0), signal("AAA.NS", 1.0)])
        }

        async fn analyze_chart(
            &self,
            request: &AnalysisRequest,
        ) -> darvax_client::Result<AnalysisResponse> {
            Ok(AnalysisResponse::ok(format!("## {}\n**Tight** base", request.ticker)))
        }

        async fn backtest(&self, request: &BacktestRequest) -> darvax_client::Result<BacktestReport> {
            Ok(BacktestReport {
                ticker: request.ticker.clone(),
                error: None,
                trades: vec![],
                stats: Default::default(),
            })
        }

        async fn health(&self) -> darvax_client::Result<HealthStatus> {
            Ok(HealthStatus {
                status: "DarvaX API running".to_string(),
            })
        }
    }

    fn repl() -> Repl {
        Repl::new(Dashboard::new(Arc::new(FakeBackend), ClientConfig::default()), false)
    }

    #[tokio::test]
    async fn test_scan_then_analyze_row() {
        let mut repl = repl();

        let reply = repl.execute(Command::parse("AAA BBB").unwrap()).await;
        let Reply::Print(table) = reply else {
            panic!("Expected output");
        };
        assert!(table.find("AAA.NS").unwrap() < table.find("BBB.NS").unwrap());

        let reply = repl
            .execute(Command::Analyze {
                target: AnalyzeTarget::Row(1),
                image: PathBuf::from("/nonexistent/chart.png"),
            })
            .await;
        assert_eq!(
            reply,
            Reply::Print("[AAA.NS] Failed to read chart image.".to_string())
        );
        assert!(matches!(
            repl.dashboard.analysis.state(),
            ModalState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_analyze_missing_row() {
        let mut repl = repl();
        let reply = repl
            .execute(Command::Analyze {
                target: AnalyzeTarget::Row(3),
                image: PathBuf::from("c.png"),
            })
            .await;
        assert_eq!(reply, Reply::Print("No row 3 in the last scan.".to_string()));
        assert!(!repl.dashboard.analysis.is_open());
    }

    #[tokio::test]
    async fn test_failed_scan_prints_alert() {
        let mut repl = repl();
        let reply = repl.execute(Command::parse("DOWN").unwrap()).await;
        assert_eq!(
            reply,
            Reply::Print(
                "Failed to scan. Make sure the backend is running on http://localhost:8000"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_misc_commands() {
        let mut repl = repl();
        assert_eq!(
            repl.execute(Command::Health).await,
            Reply::Print("DarvaX API running".to_string())
        );
        assert_eq!(
            repl.execute(Command::Backtest {
                ticker: "SBIN".to_string(),
                years: 2
            })
            .await,
            Reply::Print("SBIN: no setups triggered in the period.".to_string())
        );
        assert_eq!(repl.execute(Command::Exit).await, Reply::Exit);
    }
}
