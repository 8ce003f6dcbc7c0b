// ABOUTME: AI service for making structured generation calls to Google Gemini
// ABOUTME: Handles API requests, response-schema enforcement, and response parsing

use std::time::Duration;

use reqwest::Client;
use rockspace_config::{
    api_key_from_env, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_HTTP_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS, ROCKSPACE_GEMINI_API_URL,
    ROCKSPACE_GEMINI_MODEL,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::schema::Schema;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Schema,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.prompt_token_count
            .saturating_add(self.candidates_token_count)
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// Connection settings for [`GeminiService`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// API key from `GEMINI_API_KEY` (or legacy `API_KEY`)
    /// Model can be overridden with `ROCKSPACE_GEMINI_MODEL`, endpoint with `ROCKSPACE_GEMINI_API_URL`
    pub fn from_env() -> Self {
        let api_key = api_key_from_env();
        if api_key.is_none() {
            info!("GEMINI_API_KEY not set - brief analysis will fall back to manual review");
        }

        let model =
            std::env::var(ROCKSPACE_GEMINI_MODEL).unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        if model != DEFAULT_GEMINI_MODEL {
            info!("Using custom Gemini model: {}", model);
        }

        let base_url = std::env::var(ROCKSPACE_GEMINI_API_URL)
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());

        Self {
            api_key,
            model,
            base_url,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// AI service for making structured generation calls
pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    /// Creates a new service instance with timeout configuration applied to the HTTP client
    pub fn new(config: GeminiConfig) -> AIServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Creates a new service instance configured from the environment
    pub fn from_env() -> AIServiceResult<Self> {
        Self::new(GeminiConfig::from_env())
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Makes a structured generation call to Gemini.
    /// The response is constrained to `schema` and parsed into `T`; no partial results are returned.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: String,
        system_instruction: Option<String>,
        schema: &Schema,
    ) -> AIServiceResult<AIResponse<T>> {
        let api_key = self.config.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: system_instruction.map(|text| Content::text(None, text)),
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            },
        };

        info!(
            "Making Gemini API request: model={}, timeout={}s",
            self.config.model,
            self.config.timeout.as_secs()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", JSON_MIME_TYPE)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Gemini API request timed out");
                    AIServiceError::ApiError(
                        "Request timed out. The AI service may be overloaded or unavailable."
                            .to_string(),
                    )
                } else if e.is_connect() {
                    error!("Failed to connect to Gemini API: {}", e);
                    AIServiceError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Gemini API request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        info!("Received response from Gemini API: status={}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        let text = response_text(&gemini_response)?;
        let json_text = strip_code_fences(&text);

        info!(
            "Raw JSON response (first 5000 chars): {}",
            &json_text[..floor_char_boundary(json_text, 5000)]
        );
        let data: T = serde_json::from_str(json_text).map_err(|e| {
            error!(
                "JSON parsing failed: {}. JSON snippet: {}",
                e,
                &json_text[..floor_char_boundary(json_text, 500)]
            );
            AIServiceError::ParseError(format!("Failed to parse JSON: {}", e))
        })?;

        info!(
            "Gemini usage: prompt_tokens={}, output_tokens={}",
            gemini_response.usage_metadata.prompt_token_count,
            gemini_response.usage_metadata.candidates_token_count
        );

        Ok(AIResponse {
            data,
            usage: gemini_response.usage_metadata,
        })
    }
}

/// Concatenated text of the first candidate's parts
fn response_text(response: &GenerateContentResponse) -> AIServiceResult<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or(AIServiceError::EmptyResponse)?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            warn!("Gemini candidate finished with reason {}", reason);
        }
    }

    let text: String = candidate
        .content
        .as_ref()
        .ok_or(AIServiceError::EmptyResponse)?
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(AIServiceError::EmptyResponse);
    }
    Ok(text)
}

/// Strip markdown code fences if present (```json ... ```)
fn strip_code_fences(text: &str) -> &str {
    let cleaned_text = text.trim();
    if !cleaned_text.starts_with("```") {
        return cleaned_text;
    }
    // Body starts after the first newline; closing fence is searched from there
    let start = cleaned_text.find('\n').map(|i| i + 1).unwrap_or(cleaned_text.len());
    let end = cleaned_text[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned_text.len());
    cleaned_text[start..end].trim()
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(response_text(&response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_response_text_without_candidates_is_empty() {
        let response = parse(json!({ "candidates": [] }));
        assert!(matches!(
            response_text(&response),
            Err(AIServiceError::EmptyResponse)
        ));

        let response = parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        assert!(matches!(
            response_text(&response),
            Err(AIServiceError::EmptyResponse)
        ));
    }

    #[test]
    fn test_usage_defaults_when_metadata_missing() {
        let response = parse(json!({}));
        assert_eq!(response.usage_metadata, Usage::default());
        assert_eq!(response.usage_metadata.total_tokens(), 0);
    }

    #[test]
    fn test_total_tokens_saturates_on_overflow() {
        let usage = Usage {
            prompt_token_count: u32::MAX,
            candidates_token_count: 5,
        };
        assert_eq!(usage.total_tokens(), u32::MAX);
    }

    #[test]
    fn test_request_body_shape() {
        let schema = Schema::object().required_property("x", Schema::string());
        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "hello".to_string())],
            system_instruction: Some(Content::text(None, "be brief".to_string())),
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: &schema,
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "systemInstruction": { "parts": [{ "text": "be brief" }] },
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "OBJECT",
                        "properties": { "x": { "type": "STRING" } },
                        "required": ["x"],
                        "propertyOrdering": ["x"]
                    }
                }
            })
        );
    }

    #[test]
    fn test_floor_char_boundary() {
        assert_eq!(floor_char_boundary("héllo", 2), 1);
        assert_eq!(floor_char_boundary("abc", 10), 3);
    }
}
