//! Terminal tables for scan results and backtests

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use darvax_client::SignalRow;
use darvax_client::models::BacktestReport;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn priority_color(class: &str) -> Option<Color> {
    match class {
        "priority-sniper" => Some(Color::Red),
        "priority-tight" => Some(Color::Yellow),
        "priority-standard" => Some(Color::Green),
        "priority-wide" => Some(Color::DarkGrey),
        _ => None,
    }
}

/// Result rows as a table; the `#` column is what `/analyze <row>` takes
pub fn signal_table(rows: &[SignalRow]) -> Table {
    let mut table = base_table();
    table.set_header(vec![
        "#", "Priority", "ATH", "Ticker", "Close", "Trigger", "Distance", "Stop", "Volume",
    ]);

    for (index, row) in rows.iter().enumerate() {
        let mut priority = Cell::new(&row.priority_label);
        if let Some(color) = priority_color(row.priority_class) {
            priority = priority.fg(color);
        }

        table.add_row(vec![
            Cell::new(index + 1),
            priority,
            Cell::new(row.ath_label),
            Cell::new(&row.ticker),
            Cell::new(&row.close).set_alignment(CellAlignment::Right),
            Cell::new(&row.trigger).set_alignment(CellAlignment::Right),
            Cell::new(&row.distance).set_alignment(CellAlignment::Right),
            Cell::new(&row.stop_loss).set_alignment(CellAlignment::Right),
            Cell::new(&row.volume_label),
        ]);
    }

    table
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Backtest statistics followed by the trade list
pub fn backtest_tables(report: &BacktestReport) -> (Table, Table) {
    let stats = &report.stats;

    let mut summary = base_table();
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec!["Trades".to_string(), stats.total_trades.to_string()]);
    summary.add_row(vec!["Wins".to_string(), opt(stats.wins)]);
    summary.add_row(vec!["Losses".to_string(), opt(stats.losses)]);
    summary.add_row(vec!["Carries".to_string(), opt(stats.carries)]);
    summary.add_row(vec!["Win rate %".to_string(), opt(stats.win_rate)]);
    summary.add_row(vec!["Total return %".to_string(), opt(stats.total_return)]);
    summary.add_row(vec!["Avg win %".to_string(), opt(stats.avg_win)]);
    summary.add_row(vec!["Avg loss %".to_string(), opt(stats.avg_loss)]);
    summary.add_row(vec!["Expected value".to_string(), opt(stats.expected_value)]);

    let mut trades = base_table();
    trades.set_header(vec![
        "Setup", "Trigger", "Stop", "Target", "Entry", "Exit", "Exit price", "Status", "P&L %",
    ]);
    for trade in &report.trades {
        trades.add_row(vec![
            trade.setup_date.to_string(),
            format!("{:.2}", trade.trigger),
            format!("{:.2}", trade.stop_loss),
            format!("{:.2}", trade.target),
            opt(trade.entry_date),
            opt(trade.exit_date),
            opt(trade.exit_price.map(|p| format!("{p:.2}"))),
            trade.status.clone(),
            format!("{:.2}", trade.pnl_pct),
        ]);
    }

    (summary, trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use darvax_client::config::DEFAULT_CHART_VIEWER_BASE;
    use darvax_client::models::{BacktestStats, BacktestTrade, Priority, Signal};

    fn row(ticker: &str, priority: Priority) -> SignalRow {
        let signal = Signal {
            ticker: ticker.to_string(),
            passed: true,
            pattern: String::new(),
            close: 10.0,
            trigger: 10.2,
            stop_loss: 10.1,
            volume_status: "CONTRACTION".to_string(),
            distance_pct: 2.0,
            priority,
            ath_pct: None,
            blue_sky: None,
        };
        SignalRow::from_signal(&signal, DEFAULT_CHART_VIEWER_BASE)
    }

    #[test]
    fn test_signal_table_rows() {
        let table = signal_table(&[row("AAA.NS", Priority::Sniper), row("BBB.BO", Priority::Wide)]);
        assert_eq!(table.row_count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("AAA.NS"));
        assert!(rendered.contains("₹10.20"));
    }

    #[test]
    fn test_backtest_tables() {
        let report = BacktestReport {
            ticker: "ABC.NS".to_string(),
            error: None,
            trades: vec![BacktestTrade {
                setup_date: "2024-01-05".parse().unwrap(),
                trigger: 100.0,
                stop_loss: 99.0,
                target: 110.0,
                entry_date: Some("2024-01-08".parse().unwrap()),
                exit_date: None,
                exit_price: None,
                status: "CARRY".to_string(),
                pnl_pct: 4.2,
            }],
            stats: BacktestStats {
                total_trades: 1,
                carries: Some(1),
                ..Default::default()
            },
        };

        let (summary, trades) = backtest_tables(&report);
        assert_eq!(summary.row_count(), 9);
        assert_eq!(trades.row_count(), 1);
        assert!(trades.to_string().contains("CARRY"));
    }
}
