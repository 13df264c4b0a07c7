//! OpenAI-compatible completion and embedding backend.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use smartidea_core::{
    defaults, CompletionBackend, EmbeddingBackend, Error, GatewayError, GatewayResult,
    GenerationParams, Result, Vector,
};

use super::error::{to_gateway_error, OpenAIErrorCode};
use super::types::*;

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for embeddings.
    pub embed_model: String,
    /// Model to use for generation.
    pub gen_model: String,
    /// Label used in error messages and logs.
    pub provider_name: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLM_BASE_URL.to_string(),
            api_key: None,
            embed_model: defaults::EMBED_MODEL.to_string(),
            gen_model: defaults::LLM_MODEL.to_string(),
            provider_name: defaults::LLM_PROVIDER.to_string(),
            timeout_seconds: defaults::LLM_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Read `LLM_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| defaults::LLM_BASE_URL.to_string()),
            api_key: std::env::var("LLM_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            embed_model: std::env::var("LLM_EMBED_MODEL")
                .unwrap_or_else(|_| defaults::EMBED_MODEL.to_string()),
            gen_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| defaults::LLM_MODEL.to_string()),
            provider_name: std::env::var("LLM_PROVIDER")
                .unwrap_or_else(|_| defaults::LLM_PROVIDER.to_string()),
            timeout_seconds: std::env::var("LLM_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::LLM_TIMEOUT_SECS),
        }
    }

    /// The hosted OpenAI endpoint cannot be used without a key.
    fn requires_key(&self) -> bool {
        self.base_url.trim_end_matches('/') == defaults::LLM_BASE_URL
    }
}

/// OpenAI-compatible backend.
///
/// Built once at startup and shared behind `Arc<dyn CompletionBackend>`.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            provider = %config.provider_name,
            url = %config.base_url,
            model = %config.gen_model,
            embed_model = %config.embed_model,
            has_key = config.api_key.is_some(),
            "Initializing completion backend"
        );
        if config.api_key.is_none() && config.requires_key() {
            warn!(
                provider = %config.provider_name,
                "No API key configured; completions will use fallback documents"
            );
        }

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req
    }

    fn not_configured(&self) -> Option<GatewayError> {
        (self.config.api_key.is_none() && self.config.requires_key()).then(|| {
            GatewayError::NotConfigured {
                provider: self.config.provider_name.clone(),
                message: "LLM_API_KEY is not set".to_string(),
            }
        })
    }

    /// Classify a non-2xx response.
    async fn classify_failure(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let (message, error_type, code) = match serde_json::from_str::<OpenAIErrorResponse>(&body)
        {
            Ok(parsed) => {
                let code = parsed.error.code_str().unwrap_or_default();
                (
                    parsed.error.message,
                    parsed.error.error_type.unwrap_or_default(),
                    code,
                )
            }
            Err(_) if body.trim().is_empty() => {
                ("Unknown error".to_string(), String::new(), String::new())
            }
            Err(_) => (body, String::new(), String::new()),
        };

        let kind = OpenAIErrorCode::from_response(status, &error_type, &code);
        to_gateway_error(kind, &self.config.provider_name, status, &message)
    }
}

#[async_trait]
impl CompletionBackend for OpenAIBackend {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> GatewayResult<String> {
        if let Some(err) = self.not_configured() {
            return Err(err);
        }

        let model = params
            .model
            .clone()
            .unwrap_or_else(|| self.config.gen_model.clone());
        debug!(
            provider = %self.config.provider_name,
            model = %model,
            prompt_len = prompt.len(),
            max_tokens = params.max_tokens,
            "Requesting completion"
        );

        let request = ChatCompletionRequest {
            model,
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(params.temperature),
            max_tokens: Some(params.max_tokens),
            stream: false,
        };

        let start = Instant::now();
        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                provider: self.config.provider_name.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let err = self.classify_failure(response).await;
            warn!(
                provider = %self.config.provider_name,
                error_kind = err.kind(),
                error = %err,
                duration_ms = start.elapsed().as_millis() as u64,
                "Completion request failed"
            );
            return Err(err);
        }

        let result: ChatCompletionResponse =
            response.json().await.map_err(|e| GatewayError::Transport {
                provider: self.config.provider_name.clone(),
                message: format!("Failed to parse response: {}", e),
            })?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(
            response_len = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Completion received"
        );
        Ok(content)
    }

    fn provider_name(&self) -> &str {
        &self.config.provider_name
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}

#[async_trait]
impl EmbeddingBackend for OpenAIBackend {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        if let Some(err) = self.not_configured() {
            return Err(Error::Embedding(err.to_string()));
        }

        debug!(
            input_count = texts.len(),
            model = %self.config.embed_model,
            "Embedding texts"
        );

        let request = EmbeddingRequest {
            model: self.config.embed_model.clone(),
            input: texts.to_vec(),
            encoding_format: Some("float".to_string()),
        };

        let response = self
            .build_request("/embeddings")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let err = self.classify_failure(response).await;
            return Err(Error::Embedding(err.to_string()));
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse response: {}", e)))?;

        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.config.embed_model
    }
}
