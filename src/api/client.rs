//! HTTP client for the Graylog REST API.

use super::models::*;
use super::ApiError;
use crate::config::{CheckConfig, Credentials};
use crate::target::Target;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Authenticated client bound to one API base URL.
pub struct GraylogClient {
    http: reqwest::Client,
    target: Target,
    credentials: Credentials,
    log_bodies: bool,
}

impl GraylogClient {
    /// Create a client. `insecure` disables TLS certificate verification.
    pub fn new(target: Target, credentials: Credentials, insecure: bool) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            target,
            credentials,
            log_bodies: false,
        })
    }

    pub fn from_config(config: &CheckConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            config.target.clone(),
            config.credentials.clone(),
            config.insecure,
        )?
        .with_body_logging(config.debug))
    }

    /// Log raw response bodies at debug level.
    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    pub async fn system(&self) -> Result<SystemStatus, ApiError> {
        self.query(SYSTEM_PATH).await
    }

    pub async fn indexer_failures(&self) -> Result<IndexerFailuresResponse, ApiError> {
        self.query(INDEXER_FAILURES_PATH).await
    }

    pub async fn throughput(&self) -> Result<ThroughputResponse, ApiError> {
        self.query(THROUGHPUT_PATH).await
    }

    pub async fn inputs(&self) -> Result<InputsResponse, ApiError> {
        self.query(INPUTS_PATH).await
    }

    pub async fn total_count(&self) -> Result<TotalCountResponse, ApiError> {
        self.query(TOTAL_COUNT_PATH).await
    }

    /// GET one endpoint and decode its document.
    ///
    /// The body is parsed as JSON before the status code is looked at, so
    /// an error page that is not JSON reports as a parse failure.
    async fn query<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ApiError> {
        let url = self.target.endpoint(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Connect)?;

        let status = response.status();
        // Consuming the body releases the connection whatever happens next.
        let body = response.bytes().await.map_err(ApiError::Read)?;
        tracing::debug!(%status, bytes = body.len(), "response from {}", endpoint);
        if self.log_bodies {
            tracing::debug!("{}", String::from_utf8_lossy(&body));
        }

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(ApiError::Json)?;

        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        serde_json::from_value(value).map_err(|source| ApiError::Shape { endpoint, source })
    }
}
