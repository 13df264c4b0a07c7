//! OpenAI-compatible completion backend.
//!
//! Works with any server that exposes the OpenAI chat completions and
//! embeddings endpoints:
//! - OpenAI (`https://api.openai.com/v1`)
//! - Ollama (`http://localhost:11434/v1`)
//! - vLLM, LocalAI, LM Studio
//! - OpenRouter and other hosted gateways
//!
//! Non-2xx responses are classified into [`smartidea_core::GatewayError`]
//! variants from the HTTP status and the provider's error `type`/`code`.

mod backend;
pub mod error;
pub mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use error::{to_gateway_error, OpenAIErrorCode};
