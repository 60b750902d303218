//! # Spark ✨
//!
//! AI social media content generation from your terminal.
//!
//! ## Overview
//!
//! Pick a platform (LinkedIn, Instagram, Facebook, YouTube) and a content
//! type (text, image, video), give a prompt, and Spark asks the generation
//! service for a post. When the service is unreachable a local fallback post
//! is produced instead, so a result always comes back. Results are kept in a
//! bounded history and can be copied, exported, or published.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                │
//! │  Parses commands, drives a Session, prints results          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │     Publish     │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • HTTP backend  │ │ • Connect       │
//! │ • Connections   │ │ • Fallback      │ │ • Direct post   │
//! │ • Capabilities  │ │ • Backend trait │ │ • Manual share  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     State       │ │     History     │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Reducer       │ │ • Bounded list  │ │ • Platform      │
//! │ • Session       │ │ • JSON store    │ │ • Content       │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Generation client, HTTP backend and fallback content
//! - [`config`] — Configuration management
//! - [`history`] — Bounded history and its JSON store
//! - [`models`] — Data models (Platform, `GeneratedContent`)
//! - [`publish`] — Connect, direct post and manual share
//! - [`state`] — Application state reducer and session
//! - [`templates`] — Built-in prompt templates
//!
//! ## Example
//!
//! ```no_run
//! use spark::{Config, ContentType, GenerationClient, GenerationRequest, Platform};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = GenerationClient::from_config(&config);
//! let request = GenerationRequest::new(Platform::LinkedIn, "Our team is hiring", ContentType::Text)?;
//! let content = client.generate(request).await;
//! println!("{}", content.text);
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/spark/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]

pub mod api;
pub mod config;
pub mod history;
pub mod models;
pub mod paths;
pub mod publish;
pub mod state;
pub mod templates;

// Re-export main types for convenience
pub use api::{ContentBackend, GenerationClient, HttpBackend};
pub use config::Config;
pub use history::{HISTORY_LIMIT, History, HistoryStore};
pub use models::{ContentType, GeneratedContent, GenerationRequest, Platform, PlatformInfo};
pub use publish::{ManualShare, PublishDispatcher, PublishError, PublishOutcome};
pub use state::{Action, AppState, Session};

/// ASCII logo for the application
pub const LOGO: &str = r"
   ____                  __
  / __/__  ___ _________/ /__
 _\ \/ _ \/ _ `/ __/ '_/ -_)
/___/ .__/\_,_/_/ /_/\_\\__/
   /_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
