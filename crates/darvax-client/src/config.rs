//! Configuration for the scanner client

use crate::error::{DarvaxError, Result};
use std::time::Duration;
use url::Url;

/// Default backend address
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Default chart viewer used for ticker links
pub const DEFAULT_CHART_VIEWER_BASE: &str = "https://www.tradingview.com";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL both backend endpoints are resolved against
    pub api_base: String,

    /// Request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Host of the external chart viewer
    pub chart_viewer_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
            chart_viewer_base: DEFAULT_CHART_VIEWER_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from `DARVAX_API_BASE` and `DARVAX_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base).map_err(|e| {
            DarvaxError::ConfigError(format!("Invalid api_base '{}': {e}", self.api_base))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DarvaxError::ConfigError(format!(
                "api_base must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(DarvaxError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    chart_viewer_base: Option<String>,
    env_timeout_error: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the backend base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the chart viewer host
    pub fn chart_viewer_base(mut self, base: impl Into<String>) -> Self {
        self.chart_viewer_base = Some(base.into());
        self
    }

    /// Load overrides from the environment
    pub fn with_env(mut self) -> Self {
        if let Ok(base) = std::env::var("DARVAX_API_BASE") {
            self.api_base = Some(base);
        }
        if let Ok(secs) = std::env::var("DARVAX_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                Err(e) => {
                    self.env_timeout_error = Some(format!("DARVAX_TIMEOUT_SECS '{secs}': {e}"));
                }
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        if let Some(err) = self.env_timeout_error {
            return Err(DarvaxError::ConfigError(err));
        }

        let defaults = ClientConfig::default();

        let config = ClientConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
            chart_viewer_base: self.chart_viewer_base.unwrap_or(defaults.chart_viewer_base),
        };

        config.validate()?;
        Ok(config)
    }
}
