//! Scanner page: scan panel plus analysis modal over one backend

use crate::analysis::AnalysisController;
use crate::api::{HttpSignalApi, SignalApi};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{BacktestReport, BacktestRequest, HealthStatus};
use crate::scan::ScanController;
use std::sync::Arc;

/// Both workflows wired to a shared collaborator
pub struct Dashboard {
    api: Arc<dyn SignalApi>,
    config: ClientConfig,
    pub scan: ScanController,
    pub analysis: AnalysisController,
}

impl Dashboard {
    pub fn new(api: Arc<dyn SignalApi>, config: ClientConfig) -> Self {
        Self {
            scan: ScanController::new(Arc::clone(&api), config.clone()),
            analysis: AnalysisController::new(Arc::clone(&api)),
            api,
            config,
        }
    }

    /// Dashboard talking to the configured HTTP backend
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let api = Arc::new(HttpSignalApi::new(config.clone())?);
        Ok(Self::new(api, config))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The analyze button on a result row: open the modal for that row's ticker
    ///
    /// Returns the ticker, or `None` if there is no such row.
    pub fn analyze_row(&mut self, index: usize) -> Option<String> {
        let ticker = self.scan.row(index)?.ticker.clone();
        self.analysis.open(ticker.clone());
        Some(ticker)
    }

    pub async fn backtest(&self, ticker: &str, years: u32) -> Result<BacktestReport> {
        let request = BacktestRequest::new(ticker).with_years(years);
        self.api.backtest(&request).await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.api.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ModalState;
    use crate::api::MockSignalApi;
    use crate::models::{BacktestStats, Priority, Signal};

    fn signal(ticker: &str, distance_pct: f64) -> Signal {
        Signal {
            ticker: ticker.to_string(),
            passed: true,
            pattern: String::new(),
            close: 50.0,
            trigger: 51.0,
            stop_loss: 50.49,
            volume_status: "NEUTRAL".to_string(),
            distance_pct,
            priority: Priority::Sniper,
            ath_pct: None,
            blue_sky: None,
        }
    }

    #[tokio::test]
    async fn test_row_button_opens_modal_for_row_ticker() {
        let mut api = MockSignalApi::new();
        api.expect_scan()
            .returning(|_| Ok(vec![signal("X", 5.0), signal("Y", 1.0)]));

        let mut dashboard = Dashboard::new(Arc::new(api), ClientConfig::default());
        dashboard.scan.run_scan("X\nY").await.unwrap();

        assert_eq!(dashboard.analyze_row(0).as_deref(), Some("Y"));
        assert_eq!(dashboard.analysis.current_ticker(), Some("Y"));
        assert_eq!(dashboard.analysis.state(), &ModalState::Open { file: None });

        assert!(dashboard.analyze_row(7).is_none());
        assert_eq!(dashboard.analysis.current_ticker(), Some("Y"));
    }

    #[tokio::test]
    async fn test_backtest_passthrough() {
        let mut api = MockSignalApi::new();
        api.expect_backtest()
            .withf(|req: &BacktestRequest| req.ticker == "ABC.NS" && req.years == 3)
            .times(1)
            .returning(|req| {
                Ok(BacktestReport {
                    ticker: req.ticker.clone(),
                    error: None,
                    trades: vec![],
                    stats: BacktestStats::default(),
                })
            });

        let dashboard = Dashboard::new(Arc::new(api), ClientConfig::default());
        let report = dashboard.backtest("ABC.NS", 3).await.unwrap();
        assert_eq!(report.ticker, "ABC.NS");
    }

    #[tokio::test]
    async fn test_health_passthrough() {
        let mut api = MockSignalApi::new();
        api.expect_health().returning(|| {
            Ok(HealthStatus {
                status: "DarvaX Scanner API is running".to_string(),
            })
        });

        let dashboard = Dashboard::new(Arc::new(api), ClientConfig::default());
        assert!(dashboard.health().await.unwrap().status.contains("running"));
    }

    #[test]
    fn test_connect_uses_config() {
        let config = ClientConfig::builder()
            .api_base("http://10.0.0.5:8000")
            .build()
            .unwrap();
        let dashboard = Dashboard::connect(config).unwrap();
        assert_eq!(dashboard.config().api_base, "http://10.0.0.5:8000");
    }
}
