//! Scan workflow: ticker input → one scan request → sorted result table

use crate::api::SignalApi;
use crate::config::ClientConfig;
use crate::error::{DarvaxError, Result};
use crate::models::{Priority, ScanRequest, Signal, sort_by_distance};
use crate::render::SignalRow;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Idle label of the scan trigger
pub const SCAN_LABEL: &str = "🎯 Scan for Signals";

/// Label while a scan is in flight
pub const SCANNING_LABEL: &str = "Scanning...";

/// What the results section currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ScanView {
    /// Nothing scanned yet
    Hidden,
    /// Request in flight
    Loading,
    /// The scan matched nothing
    NoResults,
    /// Rows sorted tightest first
    Table(Vec<SignalRow>),
}

/// State of the button that starts a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl TriggerControl {
    const IDLE: Self = Self {
        enabled: true,
        label: SCAN_LABEL,
    };

    const BUSY: Self = Self {
        enabled: false,
        label: SCANNING_LABEL,
    };
}

/// Counts for the status line shown above the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub requested: usize,
    pub matched: usize,
    pub sniper: usize,
    pub tight: usize,
    pub standard: usize,
    pub wide: usize,
    pub scanned_at: DateTime<Utc>,
}

impl ScanSummary {
    fn from_signals(requested: usize, signals: &[Signal]) -> Self {
        let count = |p: Priority| signals.iter().filter(|s| s.priority == p).count();
        Self {
            requested,
            matched: signals.len(),
            sniper: count(Priority::Sniper),
            tight: count(Priority::Tight),
            standard: count(Priority::Standard),
            wide: count(Priority::Wide),
            scanned_at: Utc::now(),
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} signal(s) from {} ticker(s) | 🎯 {} ⚡ {} ✓ {} ⚠️ {} | {}",
            self.matched,
            self.requested,
            self.sniper,
            self.tight,
            self.standard,
            self.wide,
            self.scanned_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Split raw input into tickers: one per line, trimmed, blanks dropped
///
/// Order is kept and duplicates are not removed.
pub fn parse_tickers(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drives the scan panel
pub struct ScanController {
    api: Arc<dyn SignalApi>,
    config: ClientConfig,
    view: ScanView,
    /// View to restore if the in-flight scan fails
    before_scan: Option<ScanView>,
    trigger: TriggerControl,
    alert: Option<String>,
    summary: Option<ScanSummary>,
    pending: usize,
}

impl ScanController {
    pub fn new(api: Arc<dyn SignalApi>, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            view: ScanView::Hidden,
            before_scan: None,
            trigger: TriggerControl::IDLE,
            alert: None,
            summary: None,
            pending: 0,
        }
    }

    /// Validate input and enter the loading state
    ///
    /// Returns `Ok(None)` when a scan is already running, as clicking a
    /// disabled trigger does nothing. Empty input raises an alert and leaves
    /// the panel untouched.
    pub fn begin(&mut self, raw_input: &str) -> Result<Option<ScanRequest>> {
        if !self.trigger.enabled {
            debug!("Scan trigger disabled, ignoring");
            return Ok(None);
        }

        let tickers = parse_tickers(raw_input);
        if tickers.is_empty() {
            let err = DarvaxError::NoTickers;
            self.alert = Some(err.user_message(&self.config.api_base));
            return Err(err);
        }

        self.alert = None;
        self.before_scan = Some(std::mem::replace(&mut self.view, ScanView::Loading));
        self.trigger = TriggerControl::BUSY;
        self.pending = tickers.len();

        Ok(Some(ScanRequest { tickers }))
    }

    /// Apply the collaborator's answer and re-enable the trigger
    ///
    /// Returns the number of rows shown.
    pub fn settle(&mut self, outcome: Result<Vec<Signal>>) -> Result<usize> {
        self.trigger = TriggerControl::IDLE;
        let previous = self.before_scan.take().unwrap_or(ScanView::Hidden);

        match outcome {
            Ok(mut signals) => {
                sort_by_distance(&mut signals);
                self.summary = Some(ScanSummary::from_signals(self.pending, &signals));

                if signals.is_empty() {
                    info!("Scan of {} ticker(s) matched nothing", self.pending);
                    self.view = ScanView::NoResults;
                    return Ok(0);
                }

                let rows: Vec<SignalRow> = signals
                    .iter()
                    .map(|s| SignalRow::from_signal(s, &self.config.chart_viewer_base))
                    .collect();
                let shown = rows.len();

                info!("Scan of {} ticker(s) returned {shown} signal(s)", self.pending);
                self.view = ScanView::Table(rows);
                Ok(shown)
            }
            Err(err) => {
                error!("Scan failed: {err}");
                let err = match err {
                    DarvaxError::ScanFailed(_) => err,
                    other => DarvaxError::ScanFailed(other.to_string()),
                };
                self.alert = Some(err.user_message(&self.config.api_base));
                self.view = previous;
                Err(err)
            }
        }
    }

    /// Run a full scan: validate, request once, render
    pub async fn run_scan(&mut self, raw_input: &str) -> Result<usize> {
        let Some(request) = self.begin(raw_input)? else {
            return Ok(0);
        };

        debug!("Scanning {:?}", request.tickers);
        let outcome = self.api.scan(&request.tickers).await;
        self.settle(outcome)
    }

    pub fn view(&self) -> &ScanView {
        &self.view
    }

    pub fn trigger(&self) -> TriggerControl {
        self.trigger
    }

    /// Pending alert for the user, if any
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Take the alert once it has been shown
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn summary(&self) -> Option<&ScanSummary> {
        self.summary.as_ref()
    }

    /// Rows currently in the table; empty unless the table is shown
    pub fn rows(&self) -> &[SignalRow] {
        match &self.view {
            ScanView::Table(rows) => rows,
            _ => &[],
        }
    }

    pub fn row(&self, index: usize) -> Option<&SignalRow> {
        self.rows().get(index)
    }

    /// Table body markup, or `None` when the table is hidden
    pub fn table_html(&self) -> Option<String> {
        match &self.view {
            ScanView::Table(rows) => Some(rows.iter().map(SignalRow::to_html).collect()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSignalApi;
    use crate::models::BlueSky;
    use tokio_test::{assert_err, assert_ok};

    fn signal(ticker: &str, distance_pct: f64, priority: Priority) -> Signal {
        Signal {
            ticker: ticker.to_string(),
            passed: true,
            pattern: "WEEKLY_JALWA".to_string(),
            close: 100.0,
            trigger: 102.0,
            stop_loss: 101.0,
            volume_status: "EXPANSION".to_string(),
            distance_pct,
            priority,
            ath_pct: Some(96.0),
            blue_sky: Some(BlueSky::NearAth),
        }
    }

    fn controller(api: MockSignalApi) -> ScanController {
        darvax_utils::init_tracing();
        ScanController::new(Arc::new(api), ClientConfig::default())
    }

    #[test]
    fn test_parse_tickers() {
        assert_eq!(parse_tickers("AAPL\n\nMSFT\n"), vec!["AAPL", "MSFT"]);
        assert_eq!(parse_tickers("  tcs.ns \r\n\t\nTCS.NS"), vec!["tcs.ns", "TCS.NS"]);
        assert!(parse_tickers(" \n \n").is_empty());
    }

    #[tokio::test]
    async fn test_scan_request_body() {
        let mut api = MockSignalApi::new();
        api.expect_scan()
            .withf(|tickers: &[String]| tickers == ["AAPL", "MSFT"])
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut scan = controller(api);
        assert_ok!(scan.run_scan("AAPL\n\nMSFT\n").await);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let mut api = MockSignalApi::new();
        api.expect_scan().times(0);

        let mut scan = controller(api);
        let err = assert_err!(scan.run_scan("\n   \n").await);

        assert!(matches!(err, DarvaxError::NoTickers));
        assert_eq!(scan.alert(), Some("Please enter at least one ticker"));
        assert_eq!(scan.view(), &ScanView::Hidden);
        assert!(scan.trigger().enabled);
    }

    #[tokio::test]
    async fn test_results_sorted_tightest_first() {
        let mut api = MockSignalApi::new();
        api.expect_scan().times(1).returning(|_| {
            Ok(vec![
                signal("X", 5.0, Priority::Wide),
                signal("Y", 1.0, Priority::Sniper),
                signal("Z", 1.0, Priority::Sniper),
                signal("W", 2.5, Priority::Tight),
            ])
        });

        let mut scan = controller(api);
        let shown = scan.run_scan("X\nY\nZ\nW").await.unwrap();
        assert_eq!(shown, 4);

        let order: Vec<&str> = scan.rows().iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["Y", "Z", "W", "X"]);
        assert!(scan.rows().windows(2).all(|w| w[0].distance_pct <= w[1].distance_pct));

        let summary = scan.summary().unwrap();
        assert_eq!((summary.requested, summary.matched, summary.sniper), (4, 4, 2));
    }

    #[tokio::test]
    async fn test_empty_results_show_no_results() {
        let mut api = MockSignalApi::new();
        api.expect_scan().returning(|_| Ok(vec![]));

        let mut scan = controller(api);
        assert_eq!(scan.run_scan("AAPL").await.unwrap(), 0);
        assert_eq!(scan.view(), &ScanView::NoResults);
        assert!(scan.table_html().is_none());
        assert!(scan.rows().is_empty());
    }

    #[test]
    fn test_loading_state_while_in_flight() {
        let mut scan = controller(MockSignalApi::new());

        let request = scan.begin("INFY.NS").unwrap().unwrap();
        assert_eq!(request.tickers, vec!["INFY.NS"]);
        assert_eq!(scan.view(), &ScanView::Loading);
        assert_eq!(scan.trigger(), TriggerControl { enabled: false, label: "Scanning..." });

        // A second click on the disabled trigger does nothing
        assert!(scan.begin("TCS.NS").unwrap().is_none());

        scan.settle(Ok(vec![signal("INFY.NS", 1.2, Priority::Sniper)])).unwrap();
        assert_eq!(scan.trigger().label, SCAN_LABEL);
        assert!(scan.trigger().enabled);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let mut api = MockSignalApi::new();
        let mut calls = 0;
        api.expect_scan().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![signal("A", 3.0, Priority::Standard)])
            } else {
                Err(DarvaxError::ApiError {
                    status: 500,
                    body: "Internal Server Error".to_string(),
                })
            }
        });

        let mut scan = controller(api);
        scan.run_scan("A").await.unwrap();
        let before = scan.view().clone();

        let err = scan.run_scan("A\nB").await.unwrap_err();
        assert!(matches!(err, DarvaxError::ScanFailed(ref msg) if msg.contains("API error 500")));
        assert_eq!(scan.view(), &before);
        assert!(scan.trigger().enabled);
        assert_eq!(
            scan.take_alert().as_deref(),
            Some("Failed to scan. Make sure the backend is running on http://localhost:8000")
        );
        assert!(scan.alert().is_none());
    }

    #[tokio::test]
    async fn test_table_html_has_one_row_per_signal() {
        let mut api = MockSignalApi::new();
        api.expect_scan().returning(|_| {
            Ok(vec![
                signal("B.NS", 4.0, Priority::Standard),
                signal("A.BO", 0.5, Priority::Sniper),
            ])
        });

        let mut scan = controller(api);
        scan.run_scan("A.BO\nB.NS").await.unwrap();

        let html = scan.table_html().unwrap();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.find("A.BO").unwrap() < html.find("B.NS").unwrap());
        assert!(html.contains("priority-sniper"));
    }
}
