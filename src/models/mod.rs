//! Data models for Spark

mod content;
mod platform;

pub use content::{ContentType, GeneratedContent, GenerationRequest, RequestError};
pub use platform::{Platform, PlatformInfo};

#[cfg(test)]
pub(crate) use content::tests::sample;
