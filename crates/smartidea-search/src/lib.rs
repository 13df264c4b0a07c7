//! # smartidea-search
//!
//! Retrieval-augmented context for generation prompts.
//!
//! This crate provides:
//! - Cosine similarity over stored embeddings (full scan, no index)
//! - [`Retriever`], which ranks the knowledge base against a query and
//!   renders the top results as a numbered context string
//! - One-time seeding of an empty knowledge base
//!
//! Retrieval never fails: embedding or storage errors degrade to an empty
//! [`RetrievalContext`].
//!
//! ## Example
//!
//! ```ignore
//! use smartidea_search::Retriever;
//!
//! let retriever = Retriever::new(embedder, knowledge_store);
//! let ctx = retriever.retrieve("pitch deck content for Acme", 3).await;
//! println!("{}", ctx.context);
//! ```

pub mod retrieval;
pub mod seed;
pub mod similarity;

pub use retrieval::Retriever;
pub use seed::{seed_documents, seed_if_empty, SeedDocument, SeedOutcome};
pub use similarity::cosine_similarity;
pub use smartidea_core::{RetrievalContext, RetrievedDocument};
