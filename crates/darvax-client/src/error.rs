//! Error types for scanner client operations

use thiserror::Error;

/// Broad class of a [`DarvaxError`], used to pick the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any request was issued
    Validation,
    /// Scan collaborator failed
    Scan,
    /// Chart analysis failed
    Analysis,
    /// Bad client configuration
    Config,
    /// Anything else
    Other,
}

/// Scanner client errors
#[derive(Debug, Error)]
pub enum DarvaxError {
    /// Ticker input contained no usable lines
    #[error("No tickers provided")]
    NoTickers,

    /// Scan request failed
    #[error("Scan failed: {0}")]
    ScanFailed(String),

    /// Chart analysis failed
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    /// Backend answered with a non-success status
    #[error("API error {status}: {body}")]
    ApiError {
        status: u16,
        body: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Reading a chart image failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, DarvaxError>;

impl DarvaxError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTickers => ErrorKind::Validation,
            Self::ScanFailed(_) | Self::ApiError { .. } | Self::NetworkError(_) | Self::JsonError(_) => {
                ErrorKind::Scan
            }
            Self::AnalysisFailed(_) | Self::IoError(_) => ErrorKind::Analysis,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Alert text shown to the user
    ///
    /// Transport errors are reported under the scan wording; the analysis
    /// workflow renders its own inline message instead of calling this.
    pub fn user_message(&self, api_base: &str) -> String {
        match self.kind() {
            ErrorKind::Validation => "Please enter at least one ticker".to_string(),
            ErrorKind::Scan => {
                format!("Failed to scan. Make sure the backend is running on {api_base}")
            }
            ErrorKind::Analysis => "Failed to analyze chart. Check backend.".to_string(),
            ErrorKind::Config | ErrorKind::Other => self.to_string(),
        }
    }
}

/// Convert anyhow::Error to DarvaxError
impl From<anyhow::Error> for DarvaxError {
    fn from(err: anyhow::Error) -> Self {
        DarvaxError::Other(err.to_string())
    }
}
