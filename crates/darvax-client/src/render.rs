//! Presentation of scan results
//!
//! [`SignalRow`] captures every display decision for one signal so that the
//! HTML table and the terminal table agree on icons, labels and formatting.

use crate::markdown::escape_html;
use crate::models::{BlueSky, Priority, Signal};

/// Currency glyph prefixed to every price
pub const CURRENCY: &str = "₹";

/// One rendered result row
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    /// Ticker as returned by the scanner; the analyze button targets it
    pub ticker: String,
    pub priority_class: &'static str,
    /// Icon and label, e.g. `🎯 SNIPER`
    pub priority_label: String,
    pub ath_class: &'static str,
    /// Blank when the blue-sky status is missing or unknown
    pub ath_label: &'static str,
    pub chart_url: String,
    pub close: String,
    pub trigger: String,
    pub distance: String,
    pub distance_pct: f64,
    pub stop_loss: String,
    pub volume_class: String,
    pub volume_label: String,
}

impl SignalRow {
    /// Build the row for a signal
    pub fn from_signal(signal: &Signal, chart_viewer_base: &str) -> Self {
        let (priority_class, icon) = priority_style(&signal.priority);
        let priority_label = match icon {
            Some(icon) => format!("{icon} {}", signal.priority),
            None => signal.priority.to_string(),
        };
        let (ath_class, ath_label) = blue_sky_style(signal.blue_sky.as_ref());

        Self {
            ticker: signal.ticker.clone(),
            priority_class,
            priority_label,
            ath_class,
            ath_label,
            chart_url: chart_url(chart_viewer_base, &signal.ticker),
            close: format_price(signal.close),
            trigger: format_price(signal.trigger),
            distance: format!("{}%", signal.distance_pct),
            distance_pct: signal.distance_pct,
            stop_loss: format_price(signal.stop_loss),
            volume_class: format!("volume-{}", signal.volume_status.to_lowercase()),
            volume_label: signal.volume_status.clone(),
        }
    }

    /// Render as a `<tr>` element
    pub fn to_html(&self) -> String {
        let ticker = escape_html(&self.ticker);
        format!(
            concat!(
                "<tr>",
                "<td class=\"{}\">{}</td>",
                "<td class=\"{}\">{}</td>",
                "<td><a href=\"{}\" target=\"_blank\" class=\"ticker-link\">{}</a></td>",
                "<td>{}</td>",
                "<td class=\"trigger\">{}</td>",
                "<td class=\"distance\">{}</td>",
                "<td class=\"stop\">{}</td>",
                "<td class=\"{}\">{}</td>",
                "<td><button class=\"analyze-chart-btn\" data-ticker=\"{}\">📊</button></td>",
                "</tr>"
            ),
            self.priority_class,
            escape_html(&self.priority_label),
            self.ath_class,
            self.ath_label,
            escape_html(&self.chart_url),
            ticker,
            self.close,
            self.trigger,
            self.distance,
            self.stop_loss,
            escape_html(&self.volume_class),
            escape_html(&self.volume_label),
            ticker,
        )
    }
}

/// CSS class and icon for a priority; unknown priorities get neither
pub fn priority_style(priority: &Priority) -> (&'static str, Option<&'static str>) {
    match priority {
        Priority::Sniper => ("priority-sniper", Some("🎯")),
        Priority::Tight => ("priority-tight", Some("⚡")),
        Priority::Standard => ("priority-standard", Some("✓")),
        Priority::Wide => ("priority-wide", Some("⚠️")),
        Priority::Other(_) => ("", None),
    }
}

/// CSS class and label for the all-time-high proximity
pub fn blue_sky_style(blue_sky: Option<&BlueSky>) -> (&'static str, &'static str) {
    match blue_sky {
        Some(BlueSky::BlueSky) => ("ath-bluesky", "🚀 BLUE SKY"),
        Some(BlueSky::NearAth) => ("ath-near", "↗️ NEAR"),
        Some(BlueSky::Resist) => ("ath-resist", "⚠️ RESIST"),
        Some(BlueSky::Other(_)) | None => ("", ""),
    }
}

/// Strip the exchange suffix used by the data feed
pub fn chart_symbol(ticker: &str) -> &str {
    let ticker = ticker.strip_suffix(".NS").unwrap_or(ticker);
    ticker.strip_suffix(".BO").unwrap_or(ticker)
}

/// External chart viewer link for a ticker
pub fn chart_url(chart_viewer_base: &str, ticker: &str) -> String {
    format!(
        "{}/chart/?symbol=NSE:{}",
        chart_viewer_base.trim_end_matches('/'),
        chart_symbol(ticker)
    )
}

/// Price with currency glyph and two decimals
pub fn format_price(value: f64) -> String {
    format!("{CURRENCY}{value:.2}")
}
