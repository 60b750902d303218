//! Platform catalog

use serde::{Deserialize, Serialize};

/// Static per-platform constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Display name
    pub name: &'static str,
    /// Accent color (hex)
    pub color: &'static str,
    /// Maximum post length in characters
    pub max_length: usize,
    /// Whether posts can carry an image
    pub supports_image: bool,
    /// Whether posts can carry a video
    pub supports_video: bool,
    /// Whether the platform exposes an API path for direct posting
    pub supports_direct_post: bool,
}

const LINKEDIN: PlatformInfo = PlatformInfo {
    name: "LinkedIn",
    color: "#0a66c2",
    max_length: 3000,
    supports_image: true,
    supports_video: false,
    supports_direct_post: true,
};

const INSTAGRAM: PlatformInfo = PlatformInfo {
    name: "Instagram",
    color: "#e4405f",
    max_length: 2200,
    supports_image: true,
    supports_video: true,
    supports_direct_post: false,
};

const FACEBOOK: PlatformInfo = PlatformInfo {
    name: "Facebook",
    color: "#1877f2",
    max_length: 63206,
    supports_image: true,
    supports_video: true,
    supports_direct_post: true,
};

const YOUTUBE: PlatformInfo = PlatformInfo {
    name: "YouTube",
    color: "#ff0000",
    max_length: 5000,
    supports_image: false,
    supports_video: true,
    supports_direct_post: true,
};

/// Supported social platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    /// LinkedIn
    #[default]
    LinkedIn,
    /// Instagram
    Instagram,
    /// Facebook
    Facebook,
    /// YouTube
    YouTube,
}

impl Platform {
    /// Get all supported platforms
    pub const fn all() -> &'static [Self] {
        &[Self::LinkedIn, Self::Instagram, Self::Facebook, Self::YouTube]
    }

    /// Catalog record for this platform
    pub const fn info(&self) -> &'static PlatformInfo {
        match self {
            Self::LinkedIn => &LINKEDIN,
            Self::Instagram => &INSTAGRAM,
            Self::Facebook => &FACEBOOK,
            Self::YouTube => &YOUTUBE,
        }
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        self.info().name
    }

    /// Wire identifier (`LINKEDIN`, `INSTAGRAM`, ...)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LINKEDIN",
            Self::Instagram => "INSTAGRAM",
            Self::Facebook => "FACEBOOK",
            Self::YouTube => "YOUTUBE",
        }
    }

    /// Lower-case path segment used by the `/auth` and `/post` endpoints
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::YouTube => "youtube",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::LinkedIn => "💼",
            Self::Instagram => "📸",
            Self::Facebook => "👥",
            Self::YouTube => "▶️",
        }
    }

    /// Sign-off line appended to fallback posts
    pub const fn sign_off(&self) -> &'static str {
        match self {
            Self::Instagram => "Enjoying the process! 📸 ✨",
            Self::LinkedIn | Self::Facebook | Self::YouTube => "Check this out!",
        }
    }

    /// Parse from user input (case-insensitive, short aliases accepted)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" | "li" => Some(Self::LinkedIn),
            "instagram" | "ig" | "insta" => Some(Self::Instagram),
            "facebook" | "fb" => Some(Self::Facebook),
            "youtube" | "yt" => Some(Self::YouTube),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Platform::LinkedIn).unwrap();
        assert_eq!(json, "\"LINKEDIN\"");
        let parsed: Platform = serde_json::from_str("\"YOUTUBE\"").unwrap();
        assert_eq!(parsed, Platform::YouTube);
        for platform in Platform::all() {
            let json = serde_json::to_string(platform).unwrap();
            assert_eq!(json.trim_matches('"'), platform.as_str());
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(Platform::from_str("LinkedIn"), Some(Platform::LinkedIn));
        assert_eq!(Platform::from_str(" ig "), Some(Platform::Instagram));
        assert_eq!(Platform::from_str("FB"), Some(Platform::Facebook));
        assert_eq!(Platform::from_str("yt"), Some(Platform::YouTube));
        assert_eq!(Platform::from_str("myspace"), None);
    }

    #[test]
    fn test_catalog() {
        assert_eq!(Platform::Facebook.info().max_length, 63206);
        assert!(!Platform::Instagram.info().supports_direct_post);
        assert!(!Platform::YouTube.info().supports_image);
        assert!(Platform::YouTube.info().supports_video);
        assert!(!Platform::LinkedIn.info().supports_video);
    }
}
