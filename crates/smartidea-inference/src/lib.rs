//! # smartidea-inference
//!
//! Completion and embedding backends for Smart Idea Finder.
//!
//! This crate provides:
//! - An OpenAI-compatible backend implementing both
//!   [`CompletionBackend`] and [`EmbeddingBackend`]
//! - Classification of provider failures into [`GatewayError`]
//! - A deterministic mock backend (feature `mock`, always on in tests)
//!
//! # Example
//!
//! ```rust,no_run
//! use smartidea_inference::OpenAIBackend;
//! use smartidea_core::{CompletionBackend, GenerationKind, GenerationParams};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::from_env().unwrap();
//!     let params = GenerationParams::for_kind(GenerationKind::Idea);
//!     let text = backend.complete("Generate 5 ideas", &params).await;
//! }
//! ```

pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use openai::{OpenAIBackend, OpenAIConfig};
pub use smartidea_core::{CompletionBackend, EmbeddingBackend, GatewayError, GatewayResult};
