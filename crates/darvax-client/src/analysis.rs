//! Chart analysis modal
//!
//! The modal is an explicit state machine:
//!
//! ```text
//! Closed ──open──▶ Open ──submit──▶ Submitting ──▶ Result | Failed
//!   ▲                 ▲                                 │
//!   └──── close ──────┴──────────── open(any) ──────────┘
//! ```
//!
//! Every submission is tagged with the ticker and an open-generation number.
//! Reopening the modal bumps the generation, so an answer that arrives for an
//! earlier session is dropped instead of landing in the wrong panel.

use crate::api::SignalApi;
use crate::chart_file::{ChartFile, strip_data_url_prefix};
use crate::error::{DarvaxError, Result};
use crate::markdown::{escape_html, render_report};
use crate::models::{AnalysisRequest, AnalysisResponse};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shown when the request could not be completed at all
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to analyze chart. Check backend.";

/// Shown when the selected image could not be read
pub const READ_FAILURE_MESSAGE: &str = "Failed to read chart image.";

/// Modal lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Upload panel visible; submit enabled once a file is chosen
    Open { file: Option<ChartFile> },
    Submitting,
    Result { text: String, html: String },
    Failed { message: String, html: String },
}

/// Where a click inside the modal overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the dialog
    Backdrop,
    /// The dialog itself
    Content,
}

/// Everything the modal displays, derived from [`ModalState`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalView {
    pub visible: bool,
    pub ticker: String,
    pub upload_visible: bool,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub result_visible: bool,
    pub result_html: Option<String>,
}

/// Identifies the modal session a submission belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub ticker: String,
    generation: u64,
}

/// A submission that has left the modal and awaits the collaborator
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    ticket: AnalysisTicket,
    request: AnalysisRequest,
}

impl PendingAnalysis {
    pub fn ticket(&self) -> &AnalysisTicket {
        &self.ticket
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    /// Issue the single analysis request
    pub async fn send(&self, api: &dyn SignalApi) -> Result<AnalysisResponse> {
        debug!("Requesting chart analysis for {}", self.ticket.ticker);
        api.analyze_chart(&self.request)
            .await
            .map_err(|err| DarvaxError::AnalysisFailed(err.to_string()))
    }
}

/// Drives the analysis modal
pub struct AnalysisController {
    api: Arc<dyn SignalApi>,
    state: ModalState,
    current_ticker: Option<String>,
    generation: u64,
}

impl AnalysisController {
    pub fn new(api: Arc<dyn SignalApi>) -> Self {
        Self {
            api,
            state: ModalState::Closed,
            current_ticker: None,
            generation: 0,
        }
    }

    /// Open the modal for a ticker, discarding whatever it showed before
    pub fn open(&mut self, ticker: impl Into<String>) {
        let ticker = ticker.into();
        debug!("Opening analysis modal for {ticker}");

        self.generation += 1;
        self.current_ticker = Some(ticker);
        self.state = ModalState::Open { file: None };
    }

    /// Record the file picked in the upload panel; `None` clears the choice
    ///
    /// Ignored unless the upload panel is showing.
    pub fn file_selected(&mut self, file: Option<ChartFile>) {
        if let ModalState::Open { file: slot } = &mut self.state {
            *slot = file;
        }
    }

    /// Read the chosen file and move to `Submitting`
    ///
    /// Returns `None` without changing state when no file is chosen. A file
    /// that cannot be read moves the modal to `Failed`.
    pub async fn begin_submit(&mut self) -> Option<PendingAnalysis> {
        let ModalState::Open { file: Some(file) } = &self.state else {
            return None;
        };
        let file = file.clone();
        let ticker = self.current_ticker.clone().unwrap_or_default();

        let data_url = match file.read_data_url().await {
            Ok(url) => url,
            Err(err) => {
                error!("Could not read {}: {err}", file.name());
                self.state = failed(READ_FAILURE_MESSAGE.to_string());
                return None;
            }
        };

        self.state = ModalState::Submitting;

        Some(PendingAnalysis {
            ticket: AnalysisTicket {
                ticker: ticker.clone(),
                generation: self.generation,
            },
            request: AnalysisRequest {
                ticker,
                image_base64: strip_data_url_prefix(&data_url).to_string(),
            },
        })
    }

    /// Apply the collaborator's answer
    ///
    /// Returns `false` when the answer belongs to an earlier modal session or
    /// the modal is no longer waiting for it; the state is left untouched.
    pub fn complete(&mut self, ticket: &AnalysisTicket, outcome: Result<AnalysisResponse>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                "Discarding analysis response for {}: modal was reopened for {}",
                ticket.ticker,
                self.current_ticker.as_deref().unwrap_or_default()
            );
            return false;
        }
        if self.state != ModalState::Submitting {
            warn!(
                "Discarding analysis response for {}: modal is no longer waiting",
                ticket.ticker
            );
            return false;
        }

        self.state = match outcome {
            Ok(response) if response.success => {
                info!("Analysis ready for {}", ticket.ticker);
                let text = response.analysis.unwrap_or_default();
                let html = render_report(&text);
                ModalState::Result { text, html }
            }
            Ok(response) => {
                let reason = response.error.unwrap_or_else(|| "Unknown error".to_string());
                warn!("Analysis rejected for {}: {reason}", ticket.ticker);
                failed(format!("Error: {reason}"))
            }
            Err(err) => {
                error!("Analysis request for {} failed: {err}", ticket.ticker);
                failed(TRANSPORT_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Submit the chosen file and wait for the analysis
    ///
    /// No-op returning `false` when nothing is selected.
    pub async fn submit(&mut self) -> bool {
        let Some(pending) = self.begin_submit().await else {
            return false;
        };

        let outcome = pending.send(self.api.as_ref()).await;
        self.complete(pending.ticket(), outcome)
    }

    /// Hide the modal. The current ticker is kept until the next `open`.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Handle a click on the overlay; clicks outside the dialog close it
    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Ticker of the most recently opened modal
    pub fn current_ticker(&self) -> Option<&str> {
        self.current_ticker.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Render the modal from its state
    pub fn view(&self) -> ModalView {
        let ticker = self.current_ticker.clone().unwrap_or_default();

        match &self.state {
            ModalState::Closed => ModalView {
                ticker,
                ..ModalView::default()
            },
            ModalState::Open { file } => ModalView {
                visible: true,
                ticker,
                upload_visible: true,
                submit_enabled: file.is_some(),
                ..ModalView::default()
            },
            ModalState::Submitting => ModalView {
                visible: true,
                ticker,
                loading_visible: true,
                ..ModalView::default()
            },
            ModalState::Result { html, .. } | ModalState::Failed { html, .. } => ModalView {
                visible: true,
                ticker,
                result_visible: true,
                result_html: Some(html.clone()),
                ..ModalView::default()
            },
        }
    }
}

fn failed(message: String) -> ModalState {
    let html = format!("<p class=\"error\">{}</p>", escape_html(&message));
    ModalState::Failed { message, html }
}
