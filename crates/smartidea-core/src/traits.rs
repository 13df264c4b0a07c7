//! Core traits for Smart Idea Finder abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Error, GatewayResult, Result};
use crate::models::*;

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Text-generation capability used by the orchestrator.
///
/// One call per invocation; implementations do not retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Complete a prompt, returning the raw model text.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> GatewayResult<String>;

    /// Provider label that appears in error messages ("openai", ...).
    fn provider_name(&self) -> &str;

    /// Default generation model.
    fn model_name(&self) -> &str;
}

/// Backend for generating text embeddings.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Generate embeddings for a batch of texts.
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Embed one text.
    async fn embed(&self, text: &str) -> Result<Vector> {
        self.embed_texts(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("Backend returned no embedding".to_string()))
    }

    /// Embedding model name.
    fn model_name(&self) -> &str;
}

// =============================================================================
// PERSISTENCE TRAITS
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create an account. Fails with `Error::Conflict` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Look up an account by email (exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up an account by id.
    async fn get(&self, id: Uuid) -> Result<Option<User>>;
}

/// Repository for saved idea documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Upsert keyed on `(owner, title)`.
    ///
    /// Only the provided (non-empty) fields of `patch` are written, `saved`
    /// is forced to `true`, and a missing document is created with `title`.
    async fn find_and_merge_by_title(
        &self,
        owner: Uuid,
        title: &str,
        patch: DocumentPatch,
    ) -> Result<SavedDocument>;

    /// Create a new saved document, filling defaults for absent fields.
    async fn create(&self, owner: Uuid, patch: DocumentPatch) -> Result<SavedDocument>;

    /// List an owner's documents, newest first.
    async fn list_for_owner(&self, owner: Uuid, saved_only: bool) -> Result<Vec<SavedDocument>>;
}

/// Repository for the retrieval knowledge base.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Store an embedded document.
    async fn insert(&self, document: KnowledgeDocument) -> Result<Uuid>;

    /// Every stored document (full scan).
    async fn list(&self) -> Result<Vec<KnowledgeDocument>>;

    /// Number of stored documents.
    async fn count(&self) -> Result<usize>;
}
