//! DarvaX scanner client
//!
//! Client side of the DarvaX weekly-breakout scanner. It covers the two
//! interactive workflows of the scanner page:
//!
//! - **Scan**: turn a pasted ticker list into one `/api/scan` request and
//!   render the returned signals tightest first, with priority and
//!   all-time-high badges
//! - **Chart analysis**: a modal that uploads a chart image for one ticker to
//!   `/api/analyze-chart` and renders the markdown report it gets back
//!
//! Page state lives in plain structs ([`ScanView`], [`ModalView`]) derived from
//! the controllers, so any front end (HTML, terminal) can draw it.
//!
//! # Example
//!
//! ```rust,no_run
//! use darvax_client::{ChartFile, ClientConfig, Dashboard};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut dashboard = Dashboard::connect(ClientConfig::from_env()?)?;
//!
//!     dashboard.scan.run_scan("RELIANCE\nTCS\n").await?;
//!     for row in dashboard.scan.rows() {
//!         println!("{} {} {}", row.priority_label, row.ticker, row.distance);
//!     }
//!
//!     if dashboard.analyze_row(0).is_some() {
//!         dashboard.analysis.file_selected(Some(ChartFile::from_path("chart.png")));
//!         dashboard.analysis.submit().await;
//!         println!("{:?}", dashboard.analysis.view().result_html);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod chart_file;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod markdown;
pub mod models;
pub mod render;
pub mod scan;

// Re-export main types for convenience
pub use analysis::{AnalysisController, ClickTarget, ModalState, ModalView};
pub use api::{HttpSignalApi, SignalApi};
pub use chart_file::ChartFile;
pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::{DarvaxError, ErrorKind, Result};
pub use markdown::markdown_to_html;
pub use models::{AnalysisRequest, AnalysisResponse, BlueSky, Priority, Signal};
pub use render::SignalRow;
pub use scan::{ScanController, ScanView};
