use crate::config::Config;
use crate::errors::AppError;
use crate::models::{DebtSummaryResponse, HelloResponse};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DATA_PATH: &str = "/api/data";
pub const HELLO_PATH: &str = "/api/hello";

/// Client for the debt API the pages render from.
///
/// Every call goes to the network; responses are never cached and one
/// endpoint's failures never affect calls to the other.
#[derive(Clone)]
pub struct DebtApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl DebtApiClient {
    /// Creates a new `DebtApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme, host and port of the debt API, without a trailing slash.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create debt API client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `GET /api/data`.
    pub async fn fetch_debt_summary(&self) -> Result<DebtSummaryResponse, AppError> {
        self.get_json(DATA_PATH).await
    }

    /// Fetches `GET /api/hello`.
    pub async fn fetch_hello(&self) -> Result<HelloResponse, AppError> {
        self.get_json(HELLO_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Debt API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Debt API returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Debt API returned {}: {}",
                status, error_text
            )));
        }

        // Read the body first so a shape mismatch reports the serde error.
        let body = response.bytes().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to read debt API response: {}", e))
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse debt API response: {}", e))
        })
    }
}
