//! Streaming client for the Gemini generative language API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::error::OcrError;
use crate::prompt::EXTRACTION_PROMPT;
use crate::relay::ImageInput;

/// Public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// HTTP client for `models/{model}:streamGenerateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, mut config: GeminiConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { client, config }
    }

    /// The active model id.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Start a streaming extraction over `images`.
    ///
    /// Returns the open response once the upstream has accepted the
    /// request; the body is a `text/event-stream`.
    pub async fn stream_extraction(
        &self,
        images: &[ImageInput],
    ) -> Result<reqwest::Response, OcrError> {
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent",
            self.config.base_url, self.config.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("alt", "sse")])
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body(images))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OcrError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Build the `generateContent` request: prompt first, then each image
/// inline, with JSON output and thought summaries requested.
pub fn request_body(images: &[ImageInput]) -> Value {
    let mut parts = vec![json!({ "text": EXTRACTION_PROMPT })];
    parts.extend(images.iter().map(|image| {
        json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": STANDARD.encode(&image.data),
            }
        })
    }));

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "thinkingConfig": { "includeThoughts": true },
        },
    })
}
