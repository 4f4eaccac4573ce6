use crate::config::Config;
use crate::errors::GatewayError;
use crate::models::{
    AssetRecommendationRequest, AssetRecommendationResult, FinancialHealthResult, ScoreResult,
    ScoringRequest, ServiceStatus, SystemInfo,
};
use crate::score_adapter;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Client for the remote scoring backend.
///
/// Owns its base URL and HTTP client; cloning is cheap and shares the
/// connection pool. Every call is a single request with no retry.
#[derive(Clone)]
pub struct ScoringGateway {
    client: reqwest::Client,
    base_url: String,
}

impl ScoringGateway {
    /// Creates a new `ScoringGateway` from loaded configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Provides the backend base URL and request timeout.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Self::build_client(config.request_timeout())?;
        Ok(Self::with_client(config.scoring_api_url.clone(), client))
    }

    /// Creates a gateway around a caller-supplied HTTP client.
    ///
    /// The caller is responsible for the client's timeout and default headers;
    /// `Content-Type: application/json` is still set on every POST.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the default HTTP client: JSON content type, bounded timeout.
    pub fn build_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::new(format!("Failed to create scoring client: {}", e)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scores an applicant.
    ///
    /// Accepts both the canonical and the legacy response shape and always
    /// returns a fully-populated [`ScoreResult`].
    pub async fn get_credit_score(
        &self,
        request: &ScoringRequest,
    ) -> Result<ScoreResult, GatewayError> {
        let payload: Value = self.post_json("/credit/score", request).await?;
        score_adapter::normalize_payload(payload)
    }

    /// Computes the financial-health score and band for an applicant.
    pub async fn get_financial_health(
        &self,
        request: &ScoringRequest,
    ) -> Result<FinancialHealthResult, GatewayError> {
        self.post_json("/financial-health/score", request).await
    }

    /// Requests a portfolio recommendation.
    pub async fn get_asset_recommendation(
        &self,
        request: &AssetRecommendationRequest,
    ) -> Result<AssetRecommendationResult, GatewayError> {
        self.post_json("/asset-management/recommendation", request)
            .await
    }

    /// Probes `GET /health` on the backend root (outside `/api`).
    pub async fn health_check(&self) -> Result<ServiceStatus, GatewayError> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url).await
    }

    /// Fetches library versions from `GET /api/system-info`.
    pub async fn system_info(&self) -> Result<SystemInfo, GatewayError> {
        let url = self.api_url("/system-info");
        self.get_json(&url).await
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        tracing::info!("POST /api{}", path);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        Self::read_response(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        tracing::info!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_response(url, response).await
    }

    async fn read_response<T: DeserializeOwned>(
        target: &str,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = GatewayError::from_error_body(status.as_u16(), &error_text);
            tracing::warn!("Scoring API {} returned {}: {}", target, status, err);
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Failed to parse response from {}: {}", target, e);
            GatewayError::new(format!("Failed to parse scoring API response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = Config {
            scoring_api_url: "https://example.com".to_string(),
            request_timeout_secs: 30,
        };
        let gateway = ScoringGateway::new(&config);
        assert!(gateway.is_ok());
    }

    #[test]
    fn test_api_url_joins_under_api_prefix() {
        let gateway =
            ScoringGateway::with_client("https://example.com/", reqwest::Client::new());
        assert_eq!(gateway.base_url(), "https://example.com");
        assert_eq!(
            gateway.api_url("/credit/score"),
            "https://example.com/api/credit/score"
        );
    }
}
