//! Publishing generated content
//!
//! Two paths:
//! - `publish` follows the connection state of the content: a connect
//!   redirect when no account is connected, a direct post otherwise.
//! - `manual_publish` copies the text and opens the platform's share page,
//!   regardless of connection state.
//!
//! Every failure is recoverable; the content itself is never touched.

use anyhow::{Context, Result};
use thiserror::Error;

use crate::api::{ContentBackend, HttpBackend};
use crate::config::Config;
use crate::models::{GeneratedContent, Platform};

/// Publishing failures. All are recoverable; the caller may retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PublishError {
    /// Platform has no direct-post path enabled
    #[error("{0} does not support direct posting; use `share` instead")]
    DirectPostUnsupported(Platform),
    /// Text is over the platform limit
    #[error("post is {len} characters but {platform} allows {max}")]
    TextTooLong {
        /// Target platform
        platform: Platform,
        /// Length of the text
        len: usize,
        /// Platform limit
        max: usize,
    },
    /// The service rejected or never received the post
    #[error("direct post failed: {0}")]
    DirectPost(String),
    /// The browser could not be opened
    #[error("could not open a browser window for {url}")]
    PopupBlocked {
        /// URL that should have been opened
        url: String,
    },
}

/// Result of `publish`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// No account connected; the browser was sent to the connection page
    ConnectRedirect {
        /// Authorization URL
        url: String,
    },
    /// Posted through the connected account
    Posted {
        /// Target platform
        platform: Platform,
    },
}

/// Result of `manual_publish`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualShare {
    /// Share page that was opened
    pub url: String,
    /// Whether the text reached the clipboard
    pub copied: bool,
}

/// Opens URLs in a new browser context
pub trait Browser {
    /// Open `url`
    fn open(&self, url: &str) -> Result<()>;
}

/// Holds text for pasting
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn copy(&self, text: &str) -> Result<()>;
}

/// The user's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("Failed to open {url}"))
    }
}

/// The desktop clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
        clipboard
            .set_text(text)
            .context("Failed to copy to clipboard")?;
        Ok(())
    }
}

/// Prefilled share page for manual publishing
pub fn share_url(content: &GeneratedContent) -> String {
    let text = urlencoding::encode(&content.text);
    match content.platform {
        Platform::LinkedIn => {
            format!("https://www.linkedin.com/feed/?shareActive=true&text={text}")
        }
        Platform::Instagram => "https://www.instagram.com/".to_string(),
        Platform::Facebook => {
            let media = content.media_url.as_ref().or(content.video_url.as_ref());
            match media {
                Some(url) => format!(
                    "https://www.facebook.com/sharer/sharer.php?u={}&quote={text}",
                    urlencoding::encode(url)
                ),
                None => format!("https://www.facebook.com/sharer/sharer.php?quote={text}"),
            }
        }
        Platform::YouTube => "https://studio.youtube.com/".to_string(),
    }
}

/// Routes publish actions to the service, browser and clipboard
pub struct PublishDispatcher<B, W = SystemBrowser, C = SystemClipboard> {
    backend: B,
    browser: W,
    clipboard: C,
    direct_post: Vec<Platform>,
}

impl PublishDispatcher<HttpBackend> {
    /// Create a dispatcher for the configured service and the desktop
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HttpBackend::new(&config.api_base_url),
            SystemBrowser,
            SystemClipboard,
            config,
        )
    }
}

impl<B: ContentBackend, W: Browser, C: Clipboard> PublishDispatcher<B, W, C> {
    /// Create a dispatcher over arbitrary seams
    pub fn new(backend: B, browser: W, clipboard: C, config: &Config) -> Self {
        Self {
            backend,
            browser,
            clipboard,
            direct_post: config.direct_post.clone(),
        }
    }

    /// Publish through the connected account, or start the connection flow
    pub async fn publish(
        &self,
        content: &GeneratedContent,
    ) -> Result<PublishOutcome, PublishError> {
        let platform = content.platform;

        if !content.is_connected {
            let url = self.backend.auth_url(platform);
            tracing::info!("No {} account connected, redirecting to {}", platform, url);
            return match self.browser.open(&url) {
                Ok(()) => Ok(PublishOutcome::ConnectRedirect { url }),
                Err(e) => {
                    tracing::warn!("{}", e);
                    Err(PublishError::PopupBlocked { url })
                }
            };
        }

        if !self.direct_post.contains(&platform) {
            return Err(PublishError::DirectPostUnsupported(platform));
        }

        let len = content.text.chars().count();
        let max = platform.info().max_length;
        if len > max {
            return Err(PublishError::TextTooLong { platform, len, max });
        }

        self.backend
            .direct_post(platform, &content.text, content.media_url.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!("Direct post to {} failed: {}", platform, e);
                PublishError::DirectPost(e.to_string())
            })?;

        tracing::info!("Posted {} to {}", content.id, platform);
        Ok(PublishOutcome::Posted { platform })
    }

    /// Copy the text and open the platform's share page
    pub fn manual_publish(&self, content: &GeneratedContent) -> Result<ManualShare, PublishError> {
        let copied = match self.clipboard.copy(&content.text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{:#}", e);
                false
            }
        };

        let url = share_url(content);
        match self.browser.open(&url) {
            Ok(()) => Ok(ManualShare { url, copied }),
            Err(e) => {
                tracing::warn!("{:#}", e);
                Err(PublishError::PopupBlocked { url })
            }
        }
    }

    /// Copy the text only
    pub fn copy_text(&self, content: &GeneratedContent) -> Result<()> {
        self.clipboard.copy(&content.text)
    }

    /// Open the account-connection page for `platform`
    pub fn connect(&self, platform: Platform) -> Result<String, PublishError> {
        let url = self.backend.auth_url(platform);
        match self.browser.open(&url) {
            Ok(()) => Ok(url),
            Err(e) => {
                tracing::warn!("{:#}", e);
                Err(PublishError::PopupBlocked { url })
            }
        }
    }
}
