//! Generation request and generated content models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Platform;

/// Kind of content to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    /// Text-only post
    #[default]
    Text,
    /// Post with an image
    Image,
    /// Post with a video
    Video,
}

impl ContentType {
    /// Get all content types
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Image, Self::Video]
    }

    /// Wire identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }

    /// Parse from user input
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "t" => Some(Self::Text),
            "image" | "img" | "i" => Some(Self::Image),
            "video" | "vid" | "v" => Some(Self::Video),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected generation request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Prompt was empty or whitespace
    #[error("prompt must not be empty")]
    EmptyPrompt,
}

/// A single generation request, consumed once by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Target platform
    pub platform: Platform,
    /// User prompt (never empty)
    pub prompt: String,
    /// Requested content type
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl GenerationRequest {
    /// Build a request, rejecting blank prompts
    pub fn new(
        platform: Platform,
        prompt: impl Into<String>,
        content_type: ContentType,
    ) -> Result<Self, RequestError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        Ok(Self {
            platform,
            prompt,
            content_type,
        })
    }
}

/// Generated content. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Opaque identifier, unique per generation
    pub id: String,
    /// Target platform
    pub platform: Platform,
    /// Content type
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Prompt the content was generated from
    pub prompt: String,
    /// Post body
    pub text: String,
    /// Attached image URL
    #[serde(default)]
    pub media_url: Option<String>,
    /// Attached video URL
    #[serde(default)]
    pub video_url: Option<String>,
    /// Whether an account is connected for direct posting
    #[serde(default)]
    pub is_connected: bool,
    /// When the content was generated
    pub created_at: DateTime<Utc>,
}

impl GeneratedContent {
    /// Get a short single-line preview of the text
    pub fn preview(&self, max_len: usize) -> String {
        let text = self.text.replace('\n', " ");
        if text.chars().count() <= max_len {
            text
        } else {
            let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let duration = Utc::now().signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d").to_string()
        }
    }

    /// Whether the text is longer than the platform allows
    pub fn exceeds_limit(&self) -> bool {
        self.text.chars().count() > self.platform.info().max_length
    }

    /// Plain-text export of the content and its media links
    pub fn to_export_text(&self) -> String {
        let mut out = format!(
            "{} {} post\nGenerated: {}\nPrompt: {}\n\n{}\n",
            self.platform.name(),
            self.content_type,
            self.created_at.to_rfc3339(),
            self.prompt,
            self.text
        );
        if let Some(url) = &self.media_url {
            out.push_str(&format!("\nImage: {url}\n"));
        }
        if let Some(url) = &self.video_url {
            out.push_str(&format!("\nVideo: {url}\n"));
        }
        out
    }
}
