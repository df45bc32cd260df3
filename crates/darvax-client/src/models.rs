//! Wire types exchanged with the scanner backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency classification of a signal, tightest first
///
/// Unknown values are kept verbatim so a newer backend never breaks rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Sniper,
    Tight,
    Standard,
    Wide,
    Other(String),
}

impl Priority {
    /// Wire label, e.g. `SNIPER`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sniper => "SNIPER",
            Self::Tight => "TIGHT",
            Self::Standard => "STANDARD",
            Self::Wide => "WIDE",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SNIPER" => Self::Sniper,
            "TIGHT" => Self::Tight,
            "STANDARD" => Self::Standard,
            "WIDE" => Self::Wide,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proximity of the close to the all-time high
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlueSky {
    BlueSky,
    NearAth,
    Resist,
    Other(String),
}

impl BlueSky {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BlueSky => "BLUE_SKY",
            Self::NearAth => "NEAR_ATH",
            Self::Resist => "RESIST",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for BlueSky {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BLUE_SKY" => Self::BlueSky,
            "NEAR_ATH" => Self::NearAth,
            "RESIST" => Self::Resist,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for BlueSky {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<BlueSky> for String {
    fn from(value: BlueSky) -> Self {
        value.as_str().to_string()
    }
}

/// One scan hit describing a ticker's current setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Ticker, possibly carrying an exchange suffix (`.NS`, `.BO`)
    pub ticker: String,
    /// Whether the ticker passed every scan gate
    #[serde(default = "default_passed")]
    pub passed: bool,
    /// Pattern name reported by the scanner
    #[serde(default)]
    pub pattern: String,
    /// Last close
    pub close: f64,
    /// Breakout trigger price
    pub trigger: f64,
    /// Protective stop
    pub stop_loss: f64,
    /// Volume context token, e.g. `CONTRACTION`
    #[serde(default)]
    pub volume_status: String,
    /// Signed distance from close to trigger, in percent
    pub distance_pct: f64,
    pub priority: Priority,
    /// Close as a percentage of the all-time high
    #[serde(default)]
    pub ath_pct: Option<f64>,
    #[serde(default)]
    pub blue_sky: Option<BlueSky>,
}

fn default_passed() -> bool {
    true
}

/// Sort signals tightest first
///
/// Stable, so signals with equal distance keep the order the backend sent.
/// `-0.0` and `0.0` count as equal.
pub fn sort_by_distance(signals: &mut [Signal]) {
    signals.sort_by(|a, b| (a.distance_pct + 0.0).total_cmp(&(b.distance_pct + 0.0)));
}

/// Body of `POST /api/scan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub tickers: Vec<String>,
}

/// Body of `POST /api/analyze-chart`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    /// Base64 payload without the `data:...;base64,` prefix
    pub image_base64: String,
}

/// Response of `POST /api/analyze-chart`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default)]
    pub ticker: Option<String>,
    /// Markdown-like report when `success` is true
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn ok(analysis: impl Into<String>) -> Self {
        Self {
            success: true,
            ticker: None,
            analysis: Some(analysis.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            ticker: None,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

/// Body of `POST /api/backtest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub ticker: String,
    #[serde(default = "default_years")]
    pub years: u32,
}

fn default_years() -> u32 {
    5
}

impl BacktestRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            years: default_years(),
        }
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }
}

/// A single historical setup replayed by the backtester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestTrade {
    pub setup_date: NaiveDate,
    pub trigger: f64,
    pub stop_loss: f64,
    pub target: f64,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    /// `WIN`, `LOSS`, `LOSS_WHIPSAW`, `CARRY` or `NO_TRIGGER`
    pub status: String,
    pub pnl_pct: f64,
}

/// Aggregate backtest statistics. Only `total_trades` is present when no trade fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestStats {
    #[serde(default)]
    pub total_trades: u32,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub carries: Option<u32>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub total_return: Option<f64>,
    #[serde(default)]
    pub avg_win: Option<f64>,
    #[serde(default)]
    pub avg_loss: Option<f64>,
    #[serde(default)]
    pub expected_value: Option<f64>,
}

/// Response of `POST /api/backtest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Missing when the backtest failed before resolving the ticker
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub trades: Vec<BacktestTrade>,
    #[serde(default)]
    pub stats: BacktestStats,
}

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
