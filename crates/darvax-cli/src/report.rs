//! Text output for scan results and the analysis panel

use crate::table::{backtest_tables, signal_table};
use darvax_client::models::BacktestReport;
use darvax_client::{ModalState, ScanController, ScanView};

/// Results section as text
pub fn scan_output(scan: &ScanController, html: bool) -> String {
    match scan.view() {
        ScanView::Hidden => "No scan yet. Enter tickers to scan.".to_string(),
        ScanView::Loading => "Scanning...".to_string(),
        ScanView::NoResults => "No signals found for these tickers.".to_string(),
        ScanView::Table(rows) => {
            let body = if html {
                scan.table_html().unwrap_or_default()
            } else {
                signal_table(rows).to_string()
            };
            match scan.summary() {
                Some(summary) => format!("{body}\n{summary}"),
                None => body,
            }
        }
    }
}

/// Analysis panel as text, or `None` when the modal is closed
pub fn modal_output(state: &ModalState, ticker: &str, html: bool) -> Option<String> {
    let text = match state {
        ModalState::Closed => return None,
        ModalState::Open { file: None } => format!("[{ticker}] Choose a chart image to analyze."),
        ModalState::Open { file: Some(file) } => {
            format!("[{ticker}] {} selected. Ready to analyze.", file.name())
        }
        ModalState::Submitting => format!("[{ticker}] Analyzing chart..."),
        ModalState::Result { text, html: markup } => {
            if html {
                markup.clone()
            } else {
                format!("[{ticker}] Chart analysis\n\n{text}")
            }
        }
        ModalState::Failed { message, html: markup } => {
            if html {
                markup.clone()
            } else {
                format!("[{ticker}] {message}")
            }
        }
    };
    Some(text)
}

/// Backtest statistics and trades
pub fn backtest_output(report: &BacktestReport) -> String {
    if let Some(error) = &report.error {
        return format!("Backtest failed: {error}");
    }
    if report.trades.is_empty() {
        return format!("{}: no setups triggered in the period.", report.ticker);
    }

    let (summary, trades) = backtest_tables(report);
    format!("{} backtest\n{summary}\n{trades}", report.ticker)
}
