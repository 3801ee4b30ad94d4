use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;

use super::types::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
use super::{GenerateError, Generator};
use crate::config::GeminiConfig;
use crate::media::EncodedImage;

/// Gemini REST client for multimodal `generateContent` calls.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    max_output_tokens: Option<u32>,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// A `models/` prefix on the configured model is stripped.
    pub fn new(api_key: String, config: &GeminiConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;
        let model = config
            .model
            .strip_prefix("models/")
            .unwrap_or(&config.model)
            .to_string();

        Ok(Self {
            client,
            api_key,
            model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(&self, image: &EncodedImage, prompt: &str) -> GenerateContentRequest {
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.to_string(),
                            data,
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: self.max_output_tokens.map(|max| GenerationConfig {
                max_output_tokens: Some(max),
            }),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerateError {
        if err.is_timeout() {
            GenerateError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            GenerateError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<String, GenerateError> {
        tracing::debug!(
            model = %self.model,
            image_bytes = image.bytes.len(),
            mime_type = image.mime_type,
            "Sending generateContent request"
        );

        let request = self.build_request(image, prompt);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                self.transport_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            GenerateError::Parse(e.to_string())
        })?;

        extract_text(parsed)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        return Err(match reason {
            Some(reason) => GenerateError::Blocked { reason },
            None => GenerateError::EmptyResponse,
        });
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| match part {
                    Part::Text { text } => Some(text),
                    Part::InlineData { .. } => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if !text.trim().is_empty() {
        return Ok(text);
    }

    match candidate.finish_reason.as_deref() {
        Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
            Err(GenerateError::Blocked {
                reason: reason.to_string(),
            })
        }
        _ => Err(GenerateError::EmptyResponse),
    }
}

/// Pull `error.message` out of an error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/png",
            bytes: Arc::from(vec![0x89, 0x50, 0x4E, 0x47]),
        }
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig {
            base_url: server.uri(),
            model: "models/gemini-test".to_string(),
            timeout_seconds: 5,
            ..GeminiConfig::default()
        };
        GeminiClient::new("test-key".to_string(), &config).unwrap()
    }

    #[test]
    fn strips_models_prefix() {
        let config = GeminiConfig {
            model: "models/gemini-2.5-flash".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new("k".to_string(), &config).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn request_carries_image_before_prompt() {
        let config = GeminiConfig {
            max_output_tokens: Some(256),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new("k".to_string(), &config).unwrap();
        let request = client.build_request(&image(), "describe this");
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "iVBORw==");
        assert_eq!(parts[1]["text"], "describe this");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn generation_config_omitted_without_limit() {
        let client = GeminiClient::new("k".to_string(), &GeminiConfig::default()).unwrap();
        let json = serde_json::to_value(client.build_request(&image(), "x")).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn returns_text_of_first_candidate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("\"inlineData\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "A chocolate " }, { "text": "cake." }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate(&image(), "describe this")
            .await
            .unwrap();
        assert_eq!(text, "A chocolate cake.");
    }

    #[tokio::test]
    async fn api_error_uses_message_from_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&image(), "x")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Api {
                status: 400,
                message: "API key not valid.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn blocked_prompt_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&image(), "x")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Blocked {
                reason: "SAFETY".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&image(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let config = GeminiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 5,
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new("k".to_string(), &config).unwrap();

        let err = client.generate(&image(), "x").await.unwrap_err();
        assert!(matches!(err, GenerateError::Network(_)), "got {err:?}");
    }

    #[test]
    fn safety_finish_without_text_is_blocked() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(
            extract_text(response).unwrap_err(),
            GenerateError::Blocked {
                reason: "SAFETY".to_string()
            }
        );
    }

    #[test]
    fn candidate_without_content_is_empty() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "STOP" }]
        }))
        .unwrap();
        assert_eq!(
            extract_text(response).unwrap_err(),
            GenerateError::EmptyResponse
        );
    }

    #[test]
    fn plain_text_error_body_is_kept() {
        assert_eq!(api_error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(api_error_message(""), "no response body");
    }
}
