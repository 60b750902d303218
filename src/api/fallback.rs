//! Locally synthesized content used when the service is unavailable

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::models::{ContentType, GeneratedContent, GenerationRequest};

/// Sample images attached to fallback IMAGE content
pub const SAMPLE_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1611162617474-5b21e879e113?q=80&w=1000",
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?q=80&w=1000",
    "https://images.unsplash.com/photo-1512486130939-2c4f79935e4f?q=80&w=1000",
    "https://images.unsplash.com/photo-1551434678-e076c223a692?q=80&w=1000",
];

/// Sample video attached to fallback VIDEO content
pub const SAMPLE_VIDEO: &str = "https://www.w3schools.com/html/mov_bbb.mp4";

/// Marker appended to every fallback post
pub const FALLBACK_MARKER: &str = "(Note: Backend was not reachable, showing fallback mock)";

const HASHTAGS: &str = "#SocialSpark #AI #ContentCreation #Trending";

const PROFESSIONAL_TERMS: &[&str] = &["job", "career", "work"];
const EXCITING_TERMS: &[&str] = &["launch", "new", "exciting"];

/// Tone of the opening sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Career / work topics
    Professional,
    /// Launches and announcements
    Exciting,
    /// Anything else
    Neutral,
}

impl Tone {
    /// Pick the tone for a prompt. Exciting terms take precedence.
    pub fn detect(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        let mentions = |terms: &[&str]| terms.iter().any(|t| prompt.contains(t));

        if mentions(EXCITING_TERMS) {
            Self::Exciting
        } else if mentions(PROFESSIONAL_TERMS) {
            Self::Professional
        } else {
            Self::Neutral
        }
    }

    /// Opening sentence for this tone
    pub const fn sentence(&self) -> &'static str {
        match self {
            Self::Professional => {
                "This professional post is crafted to highlight your industry expertise and leadership."
            }
            Self::Exciting => {
                "Get ready to create some buzz! This high-energy post is designed to maximize reach and excitement."
            }
            Self::Neutral => "Here is an optimized post for your audience.",
        }
    }
}

/// Build fallback content for a request
pub fn synthesize(request: &GenerationRequest, is_connected: bool) -> GeneratedContent {
    let tone = Tone::detect(&request.prompt);
    let text = format!(
        "{}\n\n\"{}\"\n\n{} {} {}",
        tone.sentence(),
        request.prompt,
        request.platform.sign_off(),
        HASHTAGS,
        FALLBACK_MARKER
    );

    let media_url = match request.content_type {
        ContentType::Image => {
            let index = rand::rng().random_range(0..SAMPLE_IMAGES.len());
            Some(SAMPLE_IMAGES[index].to_string())
        }
        ContentType::Text | ContentType::Video => None,
    };
    let video_url = match request.content_type {
        ContentType::Video => Some(SAMPLE_VIDEO.to_string()),
        ContentType::Text | ContentType::Image => None,
    };

    GeneratedContent {
        id: Uuid::new_v4().simple().to_string(),
        platform: request.platform,
        content_type: request.content_type,
        prompt: request.prompt.clone(),
        text,
        media_url,
        video_url,
        is_connected,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    fn request(platform: Platform, prompt: &str, content_type: ContentType) -> GenerationRequest {
        GenerationRequest::new(platform, prompt, content_type).unwrap()
    }

    #[test]
    fn test_tone_detection() {
        assert_eq!(
            Tone::detect("Write about career transition into AI"),
            Tone::Professional
        );
        assert_eq!(Tone::detect("Looking for a JOB"), Tone::Professional);
        assert_eq!(Tone::detect("We LAUNCH tomorrow"), Tone::Exciting);
        assert_eq!(Tone::detect("a new job"), Tone::Exciting);
        assert_eq!(Tone::detect("sunset over the bay"), Tone::Neutral);
    }

    #[test]
    fn test_text_layout() {
        let content = synthesize(
            &request(Platform::Instagram, "sunset over the bay", ContentType::Text),
            false,
        );
        assert_eq!(
            content.text,
            format!(
                "Here is an optimized post for your audience.\n\n\"sunset over the bay\"\n\n\
                 Enjoying the process! 📸 ✨ {HASHTAGS} {FALLBACK_MARKER}"
            )
        );
    }

    #[test]
    fn test_media_by_content_type() {
        let text = synthesize(&request(Platform::LinkedIn, "p", ContentType::Text), false);
        assert!(text.media_url.is_none() && text.video_url.is_none());

        for _ in 0..20 {
            let image = synthesize(&request(Platform::LinkedIn, "p", ContentType::Image), false);
            let url = image.media_url.expect("image url");
            assert!(SAMPLE_IMAGES.contains(&url.as_str()));
            assert!(image.video_url.is_none());
        }

        let video = synthesize(&request(Platform::YouTube, "p", ContentType::Video), false);
        assert_eq!(video.video_url.as_deref(), Some(SAMPLE_VIDEO));
        assert!(video.media_url.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let req = request(Platform::Facebook, "p", ContentType::Text);
        let a = synthesize(&req, true);
        let b = synthesize(&req, true);
        assert_ne!(a.id, b.id);
        assert!(a.is_connected);
        assert_eq!(a.prompt, "p");
    }
}
