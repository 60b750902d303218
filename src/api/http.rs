//! HTTP transport for the generation service

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::models::{GenerationRequest, Platform};

use super::{ApiError, ContentBackend, DEFAULT_ERROR_MESSAGE, RemoteContent};

/// HTTP client for the generation service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectPostRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_url: Option<&'a str>,
}

impl HttpBackend {
    /// Create a new client for `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build endpoint URL
    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl ContentBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<RemoteContent, ApiError> {
        let response = self
            .client
            .post(self.url("/generate"))
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn direct_post(
        &self,
        platform: Platform,
        text: &str,
        media_url: Option<&str>,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/post/{}", platform.slug())))
            .json(&DirectPostRequest { text, media_url })
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    fn auth_url(&self, platform: Platform) -> String {
        self.url(&format!("/auth/{}", platform.slug()))
    }
}

/// Turn a non-success response into `ApiError::Status`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(&body),
    })
}

/// Extract the error text from a failure body (`{error}` or `{detail}`)
pub fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        detail: Option<serde_json::Value>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| {
            b.error
                .or_else(|| b.detail.and_then(|d| d.as_str().map(String::from)))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenerationClient;
    use crate::api::fallback::FALLBACK_MARKER;
    use crate::config::Config;
    use crate::models::ContentType;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response per connection, returning the base URL
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}")
    }

    /// Read headers and the declared body so the client sees a clean exchange
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let Ok(n) = socket.read(&mut chunk).await else {
                return;
            };
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(Platform::LinkedIn, "Hiring a new engineer", ContentType::Text)
            .unwrap()
    }

    fn config(base_url: String) -> Config {
        Config {
            api_base_url: base_url,
            fallback_delay_ms: 0,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_error_status_carries_body_message() {
        let base = serve("500 Internal Server Error", r#"{"error": "model overloaded"}"#).await;
        let backend = HttpBackend::new(&base);

        match backend.generate(&request()).await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }

        let content = GenerationClient::from_config(&config(base)).generate(request()).await;
        assert!(content.text.contains("Hiring a new engineer"));
        assert!(content.text.contains(FALLBACK_MARKER));
    }

    #[tokio::test]
    async fn test_malformed_success_body_falls_back() {
        let base = serve("200 OK", r#"{"unexpected": true}"#).await;
        let backend = HttpBackend::new(&base);
        assert!(matches!(
            backend.generate(&request()).await,
            Err(ApiError::Http(_))
        ));

        let content = GenerationClient::from_config(&config(base)).generate(request()).await;
        assert_eq!(content.platform, Platform::LinkedIn);
        assert!(content.text.contains(FALLBACK_MARKER));
    }

    #[tokio::test]
    async fn test_successful_response_is_used() {
        let base = serve(
            "200 OK",
            r#"{"id": "f00d", "platform": "LINKEDIN", "type": "TEXT", "text": "We're hiring!"}"#,
        )
        .await;

        let content = GenerationClient::from_config(&config(base)).generate(request()).await;
        assert_eq!(content.id, "f00d");
        assert_eq!(content.text, "We're hiring!");
        assert_eq!(content.prompt, "Hiring a new engineer");
    }

    #[tokio::test]
    async fn test_direct_post_rejection_message() {
        let base = serve("401 Unauthorized", r#"{"error": "token expired"}"#).await;
        let err = HttpBackend::new(&base)
            .direct_post(Platform::Facebook, "hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 401, ref message } if message == "token expired"));
    }

    #[test]
    fn test_error_message_fields() {
        assert_eq!(error_message(r#"{"error": "quota exceeded"}"#), "quota exceeded");
        assert_eq!(
            error_message(r#"{"detail": "Missing platform or prompt"}"#),
            "Missing platform or prompt"
        );
        assert_eq!(error_message("<html>502</html>"), DEFAULT_ERROR_MESSAGE);
        assert_eq!(error_message(r#"{"error": ""}"#), DEFAULT_ERROR_MESSAGE);
        assert_eq!(error_message(r#"{"detail": [{"msg": "bad"}]}"#), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new("https://api.example.com/");
        assert_eq!(backend.url("/generate"), "https://api.example.com/generate");
        assert_eq!(
            backend.auth_url(Platform::YouTube),
            "https://api.example.com/auth/youtube"
        );
    }

    #[test]
    fn test_direct_post_body() {
        let body = serde_json::to_value(DirectPostRequest {
            text: "hi",
            media_url: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"text": "hi"}));

        let body = serde_json::to_value(DirectPostRequest {
            text: "hi",
            media_url: Some("https://example.com/a.png"),
        })
        .unwrap();
        assert_eq!(body["mediaUrl"], "https://example.com/a.png");
    }

    #[test]
    fn test_remote_content_parses_service_response() {
        let body = r#"{
            "id": "a1b2c3d4",
            "platform": "INSTAGRAM",
            "type": "IMAGE",
            "text": "Sunset vibes",
            "mediaUrl": "https://images.example.com/1.jpg",
            "videoUrl": null,
            "prompt": "sunset"
        }"#;
        let remote: RemoteContent = serde_json::from_str(body).unwrap();
        assert_eq!(remote.platform, Platform::Instagram);
        assert_eq!(remote.media_url.as_deref(), Some("https://images.example.com/1.jpg"));
        assert!(remote.video_url.is_none());
    }
}
