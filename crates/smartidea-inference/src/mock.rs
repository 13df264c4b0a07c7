//! Mock inference backend for deterministic testing.
//!
//! Implements both [`CompletionBackend`] and [`EmbeddingBackend`] with
//! canned responses, configurable gateway failures and a call log.
//!
//! ## Usage
//!
//! ```rust
//! use smartidea_inference::mock::MockInferenceBackend;
//! use smartidea_core::GatewayError;
//!
//! let backend = MockInferenceBackend::new()
//!     .with_fixed_response(r#"[{"title": "X"}]"#);
//!
//! let failing = MockInferenceBackend::new().with_completion_failure(
//!     GatewayError::RateLimitOrQuota {
//!         provider: "openai".to_string(),
//!         message: "insufficient_quota".to_string(),
//!     },
//! );
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use smartidea_core::{
    CompletionBackend, EmbeddingBackend, Error, GatewayError, GatewayResult, GenerationParams,
    Result, Vector,
};

/// Mock inference backend for testing.
#[derive(Clone)]
pub struct MockInferenceBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    dimension: usize,
    provider: String,
    fixed_responses: HashMap<String, String>,
    default_response: String,
    completion_failure: Option<GatewayError>,
    embed_failure: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub params: Option<GenerationParams>,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            dimension: 64,
            provider: "mock".to_string(),
            fixed_responses: HashMap::new(),
            default_response: "Mock response".to_string(),
            completion_failure: None,
            embed_failure: None,
        }
    }
}

impl MockInferenceBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        Arc::make_mut(&mut self.config).dimension = dimension;
        self
    }

    /// Set the provider label reported by `provider_name`.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).provider = provider.into();
        self
    }

    /// Set a fixed response for completion requests.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for prompts containing `needle`.
    pub fn with_response_mapping(
        mut self,
        needle: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(needle.into(), output.into());
        self
    }

    /// Make every completion fail with `error`.
    pub fn with_completion_failure(mut self, error: GatewayError) -> Self {
        Arc::make_mut(&mut self.config).completion_failure = Some(error);
        self
    }

    /// Make every embedding call fail with `message`.
    pub fn with_embed_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).embed_failure = Some(message.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of embed calls.
    pub fn embed_call_count(&self) -> usize {
        self.count("embed")
    }

    /// Get number of completion calls.
    pub fn complete_call_count(&self) -> usize {
        self.count("complete")
    }

    /// Prompt of the most recent completion call.
    pub fn last_prompt(&self) -> Option<String> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.operation == "complete")
            .map(|c| c.input.clone())
    }

    fn count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str, params: Option<&GenerationParams>) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            params: params.cloned(),
            timestamp: std::time::Instant::now(),
        });
    }
}

impl Default for MockInferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockInferenceBackend {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> GatewayResult<String> {
        self.log_call("complete", prompt, Some(params));

        if let Some(ref err) = self.config.completion_failure {
            return Err(err.clone());
        }

        let mapped = self
            .config
            .fixed_responses
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, output)| output.clone());

        Ok(mapped.unwrap_or_else(|| self.config.default_response.clone()))
    }

    fn provider_name(&self) -> &str {
        &self.config.provider
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl EmbeddingBackend for MockInferenceBackend {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            self.log_call("embed", text, None);
            if let Some(ref message) = self.config.embed_failure {
                return Err(Error::Embedding(message.clone()));
            }
            results.push(MockEmbeddingGenerator::generate(text, self.config.dimension));
        }
        Ok(results)
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }
}

/// Mock embedding generator with deterministic output.
pub struct MockEmbeddingGenerator;

impl MockEmbeddingGenerator {
    /// Generate a deterministic unit vector from text.
    ///
    /// Word-based so texts sharing vocabulary score closer together.
    pub fn generate(text: &str, dimension: usize) -> Vec<f32> {
        let mut vec = vec![0.0; dimension.max(1)];

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            let idx = word
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                % vec.len();
            vec[idx] += 1.0;
        }

        Self::normalize(&mut vec);
        vec
    }

    fn normalize(vec: &mut [f32]) {
        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            vec.iter_mut().for_each(|x| *x /= magnitude);
        }
    }
}
