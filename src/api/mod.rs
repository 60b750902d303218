//! Client for the content generation service

pub mod fallback;
pub mod http;

use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::models::{ContentType, GeneratedContent, GenerationRequest, Platform};

pub use http::HttpBackend;

/// Message used when a failed response carries no error text
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to generate content";

/// Errors from the remote service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or undecodable body
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status with the message extracted from the body
    #[error("{message} (status {status})")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },
}

/// Content as returned by the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContent {
    /// Identifier assigned by the service
    pub id: String,
    /// Platform the content targets
    pub platform: Platform,
    /// Content type
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Post body
    pub text: String,
    /// Attached image URL
    #[serde(default)]
    pub media_url: Option<String>,
    /// Attached video URL
    #[serde(default)]
    pub video_url: Option<String>,
    /// Prompt echoed back by the service
    #[serde(default)]
    pub prompt: Option<String>,
}

impl RemoteContent {
    /// Stamp the remote result into a `GeneratedContent`
    pub fn into_content(self, request: &GenerationRequest, is_connected: bool) -> GeneratedContent {
        GeneratedContent {
            id: self.id,
            platform: self.platform,
            content_type: self.content_type,
            prompt: self.prompt.unwrap_or_else(|| request.prompt.clone()),
            text: self.text,
            media_url: self.media_url,
            video_url: self.video_url,
            is_connected,
            created_at: Utc::now(),
        }
    }
}

/// Remote operations the generation client and publisher rely on
#[allow(async_fn_in_trait)]
pub trait ContentBackend {
    /// Request generated content
    async fn generate(&self, request: &GenerationRequest) -> Result<RemoteContent, ApiError>;

    /// Post text (and optional media) to a connected account
    async fn direct_post(
        &self,
        platform: Platform,
        text: &str,
        media_url: Option<&str>,
    ) -> Result<(), ApiError>;

    /// Account-connection URL for `platform`
    fn auth_url(&self, platform: Platform) -> String;
}

impl<T: ContentBackend> ContentBackend for &T {
    async fn generate(&self, request: &GenerationRequest) -> Result<RemoteContent, ApiError> {
        (**self).generate(request).await
    }

    async fn direct_post(
        &self,
        platform: Platform,
        text: &str,
        media_url: Option<&str>,
    ) -> Result<(), ApiError> {
        (**self).direct_post(platform, text, media_url).await
    }

    fn auth_url(&self, platform: Platform) -> String {
        (**self).auth_url(platform)
    }
}

/// Generation client with local fallback
pub struct GenerationClient<B> {
    backend: B,
    fallback_delay: Duration,
    connected: Vec<Platform>,
}

impl GenerationClient<HttpBackend> {
    /// Create a client for the service configured in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(HttpBackend::new(&config.api_base_url), config)
    }
}

impl<B: ContentBackend> GenerationClient<B> {
    /// Create a client over an arbitrary backend
    pub fn new(backend: B, config: &Config) -> Self {
        Self {
            backend,
            fallback_delay: config.fallback_delay(),
            connected: config.connected.clone(),
        }
    }

    /// Generate content. Never fails: any remote error yields fallback content.
    pub async fn generate(&self, request: GenerationRequest) -> GeneratedContent {
        let is_connected = self.connected.contains(&request.platform);

        match self.backend.generate(&request).await {
            Ok(remote) => {
                tracing::debug!(id = %remote.id, "Generated content via service");
                remote.into_content(&request, is_connected)
            }
            Err(e) => {
                tracing::warn!("Generation service failed, using fallback: {}", e);
                tokio::time::sleep(self.fallback_delay).await;
                fallback::synthesize(&request, is_connected)
            }
        }
    }
}
