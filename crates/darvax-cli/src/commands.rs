//! Command parsing for the interactive scanner shell

use std::path::PathBuf;
use thiserror::Error;

/// Why a line could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid number of years: {0}")]
    InvalidYears(String),

    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// Which signal the analyze command targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeTarget {
    /// 1-based row of the last result table
    Row(usize),
    Ticker(String),
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan tickers, one per line
    Scan { input: String },
    /// Open the analysis modal and submit a chart
    Analyze { target: AnalyzeTarget, image: PathBuf },
    /// Close the analysis modal
    Close,
    /// Show the last result table again
    Rows,
    /// Backtest a ticker
    Backtest { ticker: String, years: u32 },
    /// Check the backend is up
    Health,
    Help,
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Bare text is a scan of the whitespace-separated tickers.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Scan {
                input: input.split_whitespace().collect::<Vec<_>>().join("\n"),
            });
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(CommandError::Empty);
        };

        match cmd.to_lowercase().as_str() {
            "scan" | "s" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument("tickers for scan command"));
                }
                Ok(Command::Scan {
                    input: args.join("\n"),
                })
            }
            "analyze" | "a" => {
                let target = args
                    .first()
                    .ok_or(CommandError::MissingArgument("row number or ticker"))?;
                let image = args
                    .get(1)
                    .ok_or(CommandError::MissingArgument("chart image path"))?;

                let target = match target.parse::<usize>() {
                    Ok(row) if row > 0 => AnalyzeTarget::Row(row),
                    _ => AnalyzeTarget::Ticker(target.to_uppercase()),
                };

                Ok(Command::Analyze {
                    target,
                    image: PathBuf::from(*image),
                })
            }
            "close" | "c" => Ok(Command::Close),
            "rows" | "list" | "r" => Ok(Command::Rows),
            "backtest" | "bt" => {
                let ticker = args
                    .first()
                    .ok_or(CommandError::MissingArgument("ticker for backtest command"))?;
                let years = match args.get(1) {
                    Some(raw) => raw
                        .parse::<u32>()
                        .ok()
                        .filter(|y| *y > 0)
                        .ok_or_else(|| CommandError::InvalidYears((*raw).to_string()))?,
                    None => 5,
                };
                Ok(Command::Backtest {
                    ticker: ticker.to_uppercase(),
                    years,
                })
            }
            "health" | "ping" => Ok(Command::Health),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
DarvaX Scanner Commands
=======================

  /scan <t1> <t2> ...        Scan tickers (bare text works too)
  /rows                      Show the last result table
  /analyze <row|ticker> <img> Upload a chart image for analysis
  /close                     Close the analysis panel
  /backtest <ticker> [years] Replay the setup over past years (default 5)
  /health                    Check the backend
  /help                      Show help
  /exit                      Exit

Aliases: /s = /scan  /a = /analyze  /bt = /backtest  /q = /exit
"
    }
}
