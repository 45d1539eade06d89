/// Caption generation service client
use std::time::Duration;

use async_trait::async_trait;
use postdeck_core::CaptionGenerator;
use postdeck_domain::{
    CaptionCandidate, CaptionRequest, GenerationConfig, OptimizeCaptionRequest, PostdeckError,
    RepurposeRequest, Result,
};
use reqwest::header::RETRY_AFTER;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::types::{CaptionEnvelope, GenerationError};
use crate::errors::InfraError;
use crate::http::HttpClient;

const GENERATE_ENDPOINT: &str = "generateCaption";
const OPTIMIZE_ENDPOINT: &str = "optimizeCaption";
const REPURPOSE_ENDPOINT: &str = "repurposeContent";

/// Client for the remote caption generation service
#[derive(Clone)]
pub struct GenerationClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl GenerationClient {
    /// Create a client for the service rooted at `base_url`
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http_client, base_url, api_key: None }
    }

    /// Build the client and its HTTP stack from configuration
    ///
    /// # Errors
    /// `PostdeckError::Config` when the base URL is not a valid absolute URL.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            PostdeckError::Config(format!(
                "Invalid generation base URL '{}': {}",
                config.base_url, e
            ))
        })?;

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .max_attempts(config.max_attempts)
            .user_agent(concat!("postdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = Self::new(http_client, config.base_url.clone());
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    /// Send a bearer token with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fresh captions for a post or attachment
    ///
    /// # Errors
    /// Returns `GenerationError` for network failures, API errors, or
    /// responses in an unknown shape. An empty candidate list is not an error.
    #[instrument(skip(self, request), fields(platforms = request.platforms.len()))]
    pub async fn generate(
        &self,
        request: &CaptionRequest,
    ) -> std::result::Result<Vec<CaptionCandidate>, GenerationError> {
        self.call(GENERATE_ENDPOINT, request).await
    }

    /// Improved versions of an existing caption
    #[instrument(skip(self, request), fields(platform = %request.platform))]
    pub async fn optimize(
        &self,
        request: &OptimizeCaptionRequest,
    ) -> std::result::Result<Vec<CaptionCandidate>, GenerationError> {
        self.call(OPTIMIZE_ENDPOINT, request).await
    }

    /// Rewrites of existing content for other platforms
    #[instrument(skip(self, request), fields(source = %request.source_platform))]
    pub async fn repurpose(
        &self,
        request: &RepurposeRequest,
    ) -> std::result::Result<Vec<CaptionCandidate>, GenerationError> {
        self.call(REPURPOSE_ENDPOINT, request).await
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> std::result::Result<Vec<CaptionCandidate>, GenerationError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut request_builder = self
            .http_client
            .request(Method::POST, &url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "Received generation service response");

        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Transport(InfraError::from(e).into()))?;
        let envelope: CaptionEnvelope = serde_json::from_slice(&bytes).map_err(|e| {
            GenerationError::InvalidSchema(format!("Unrecognised response shape: {}", e))
        })?;

        let candidates = envelope.into_candidates();
        info!(endpoint, candidates = candidates.len(), "Generation request complete");
        Ok(candidates)
    }
}

/// Handle HTTP error status codes
async fn handle_error_status(status: u16, response: reqwest::Response) -> GenerationError {
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 | 403 => GenerationError::Authentication(format!("Request rejected ({})", status)),
        429 => GenerationError::RateLimit { retry_after },
        _ => GenerationError::Api { status, message },
    }
}

#[async_trait]
impl CaptionGenerator for GenerationClient {
    async fn generate_caption(&self, request: &CaptionRequest) -> Result<Vec<CaptionCandidate>> {
        Ok(self.generate(request).await?)
    }

    async fn optimize_caption(
        &self,
        request: &OptimizeCaptionRequest,
    ) -> Result<Vec<CaptionCandidate>> {
        Ok(self.optimize(request).await?)
    }

    async fn repurpose_content(&self, request: &RepurposeRequest) -> Result<Vec<CaptionCandidate>> {
        Ok(self.repurpose(request).await?)
    }
}
