//! Generation Service Client
//!
//! Interface to the external generative model. A client performs exactly one
//! structured-output request per call: an instruction prompt plus a response
//! schema go out, the raw JSON text of the model's answer comes back. No
//! retries and no request timeout; the call resolves when the service answers
//! or the connection fails.

use crate::error::{ApiError, ServiceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Generation service client trait
#[async_trait]
pub trait GenerationServiceClient: Send + Sync {
    /// Request a JSON document conforming to `schema`, answering `prompt`.
    /// Returns the raw response text, unparsed.
    async fn generate_structured(&self, prompt: &str, schema: &Value)
        -> Result<String, ServiceError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Generation service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the service API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; when absent the key is read from `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature passed through to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            api_key_env: default_api_key_env(),
            temperature: None,
        }
    }
}

impl ProviderConfig {
    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            ));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }
        Ok(())
    }

    /// The API key: configured value, else `api_key_env`, else `GEMINI_API_KEY`.
    pub fn resolve_api_key(&self) -> Result<String, ApiError> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.clone());
        }
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "No API key configured: set provider.api_key or the {} environment variable",
                    self.api_key_env
                ))
            })
    }
}

// Gemini generateContent request/response structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

fn build_request<'a>(
    prompt: &str,
    schema: &'a Value,
    temperature: Option<f32>,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
            temperature,
        },
    }
}

/// Concatenated text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ServiceError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let detail = response
            .prompt_feedback
            .map(|f| f.to_string())
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ServiceError::EmptyResponse(detail));
    };
    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() {
        return Err(ServiceError::EmptyResponse(format!(
            "candidate has no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text)
}

fn map_status(status: StatusCode, body: String) -> ServiceError {
    match status.as_u16() {
        401 | 403 => ServiceError::AuthFailed(format!("Authentication failed: {}", body)),
        429 => ServiceError::RateLimit(format!("Rate limit exceeded: {}", body)),
        404 => ServiceError::ModelNotFound(format!("Model not found: {}", body)),
        _ => ServiceError::RequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

// Helper function to map transport errors to ServiceError
fn map_http_error(error: reqwest::Error) -> ServiceError {
    if let Some(status) = error.status() {
        map_status(status, error.to_string())
    } else if error.is_connect() {
        ServiceError::Connection(format!("Connection error: {}", error))
    } else {
        ServiceError::Transport(error.to_string())
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    endpoint: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(model: String, api_key: String, endpoint: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(|e| {
            ApiError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;
        let endpoint = endpoint
            .unwrap_or_else(default_endpoint)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            model,
            api_key,
            endpoint,
            temperature: None,
        })
    }

    /// Build a client from configuration, resolving the API key.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let api_key = config.resolve_api_key()?;
        let mut client = Self::new(config.model.clone(), api_key, Some(config.endpoint.clone()))?;
        client.temperature = config.temperature;
        Ok(client)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl GenerationServiceClient for GeminiClient {
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, ServiceError> {
        let request = build_request(prompt, schema, self.temperature);
        let url = self.url();
        debug!(url = %url, model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, error_text));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            ServiceError::Transport(format!("Failed to decode service envelope: {}", e))
        })?;

        extract_text(body)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
