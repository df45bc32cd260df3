//! Backend collaborators
//!
//! The scanner backend is reached through the [`SignalApi`] trait so the
//! controllers can be driven by the HTTP client or by a test double.

pub mod http;

pub use http::HttpSignalApi;

use crate::error::Result;
use crate::models::{AnalysisRequest, AnalysisResponse, BacktestReport, BacktestRequest, HealthStatus, Signal};
use async_trait::async_trait;

/// Operations offered by the scanner backend
///
/// Every call issues exactly one request. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignalApi: Send + Sync {
    /// Scan the tickers and return the signals that passed, in backend order
    async fn scan(&self, tickers: &[String]) -> Result<Vec<Signal>>;

    /// Ask for a textual analysis of a chart image
    ///
    /// A well-formed `success: false` answer is returned as `Ok`.
    async fn analyze_chart(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;

    /// Replay the setup over past years
    async fn backtest(&self, request: &BacktestRequest) -> Result<BacktestReport>;

    /// Liveness probe
    async fn health(&self) -> Result<HealthStatus>;
}
