//! HTTP client for the generative-language `generateContent` endpoint.
//!
//! Wraps `reqwest` with API-key management, typed response deserialization,
//! grounding-source extraction, and retry on transient failures. The base
//! URL is overridable so tests can point the client at a wiremock server.

use std::time::Duration;

use reqwest::{Client, Url};

use sniper_core::{AppConfig, GroundingSource};

use crate::backend::{GenerateReply, GenerateRequest, GenerativeBackend};
use crate::error::GeminiError;
use crate::retry::retry_with_backoff;
use crate::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, RequestContent,
    RequestPart, Tool,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Client for the generative analysis service.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeminiClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("phone-sniper/0.1 (market-scanner)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so joined
        // paths resolve under the root rather than replacing a segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeminiError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 2,
            backoff_base_ms: 1_000,
        })
    }

    /// Creates a client from the resolved application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] if no API key is configured,
    /// or the construction errors of [`GeminiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeminiError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;
        let mut client = Self::with_base_url(
            api_key,
            config.gemini_request_timeout_secs,
            &config.gemini_base_url,
        )?;
        client.max_retries = config.gemini_max_retries;
        client.backoff_base_ms = config.gemini_backoff_base_ms;
        Ok(client)
    }

    fn endpoint(&self, model_id: &str) -> Result<Url, GeminiError> {
        self.base_url
            .join(&format!("v1beta/models/{model_id}:generateContent"))
            .map_err(|e| GeminiError::ApiError(format!("invalid endpoint for '{model_id}': {e}")))
    }

    fn build_body(request: &GenerateRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: request.prompt.clone(),
                }],
            }],
            tools: request.grounded.then(|| vec![Tool::search()]),
            generation_config: request.json_response.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        }
    }

    async fn request_once(
        &self,
        url: &Url,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .client
            .post(url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Flattens the first candidate into the reply text and citation list.
    fn extract_reply(envelope: GenerateContentResponse) -> Result<GenerateReply, GeminiError> {
        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeminiError::ApiError("response contains no candidates".to_string()))?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| GroundingSource {
                        title: web.title.unwrap_or_else(|| "Market Source".to_string()),
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(GenerateReply { text, sources })
    }
}

impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateReply, GeminiError> {
        let url = self.endpoint(request.tier.model_id())?;
        let body = Self::build_body(&request);
        let envelope = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_once(&url, &body)
        })
        .await?;
        Self::extract_reply(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ModelTier;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_model_path_under_base() {
        let client = test_client("https://generativelanguage.googleapis.com");
        let url = client.endpoint(ModelTier::Flash.model_id()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let client = test_client("http://127.0.0.1:9999/");
        let url = client.endpoint(ModelTier::Pro.model_id()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn build_body_omits_tools_and_config_when_disabled() {
        let body = GeminiClient::build_body(&GenerateRequest {
            tier: ModelTier::Flash,
            prompt: "hello".to_string(),
            json_response: false,
            grounded: false,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("generationConfig").is_none());
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn build_body_declares_search_tool_and_json_mode() {
        let body = GeminiClient::build_body(&GenerateRequest {
            tier: ModelTier::Pro,
            prompt: "scan".to_string(),
            json_response: true,
            grounded: true,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["tools"][0].get("google_search").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
