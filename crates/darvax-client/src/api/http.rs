//! HTTP implementation of the scanner backend collaborator

use super::SignalApi;
use crate::config::ClientConfig;
use crate::error::{DarvaxError, Result};
use crate::models::{
    AnalysisRequest, AnalysisResponse, BacktestReport, BacktestRequest, HealthStatus, ScanRequest,
    Signal,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

pub const SCAN_PATH: &str = "/api/scan";
pub const ANALYZE_CHART_PATH: &str = "/api/analyze-chart";
pub const BACKTEST_PATH: &str = "/api/backtest";
pub const HEALTH_PATH: &str = "/";

/// Scanner backend reached over HTTP with JSON bodies
pub struct HttpSignalApi {
    client: Client,
    config: ClientConfig,
}

impl HttpSignalApi {
    /// Create a client for the configured backend
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Backend returned {status}: {body}");
            return Err(DarvaxError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SignalApi for HttpSignalApi {
    #[instrument(skip(self), fields(count = tickers.len()))]
    async fn scan(&self, tickers: &[String]) -> Result<Vec<Signal>> {
        let request = ScanRequest {
            tickers: tickers.to_vec(),
        };
        self.post_json(SCAN_PATH, &request).await
    }

    #[instrument(skip(self, request), fields(ticker = %request.ticker, payload_len = request.image_base64.len()))]
    async fn analyze_chart(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        self.post_json(ANALYZE_CHART_PATH, request).await
    }

    #[instrument(skip(self), fields(ticker = %request.ticker))]
    async fn backtest(&self, request: &BacktestRequest) -> Result<BacktestReport> {
        self.post_json(BACKTEST_PATH, request).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json(HEALTH_PATH).await
    }
}
