//! # smartidea-db
//!
//! In-process persistence layer for Smart Idea Finder.
//!
//! This crate provides:
//! - Account storage with unique emails
//! - Saved-document storage with merge-by-title upserts
//! - The embedded knowledge base used for retrieval
//!
//! Each repository implements its `smartidea-core` trait behind a
//! `tokio::sync::RwLock`, so callers depend only on the trait and a
//! different backend can be swapped in at startup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use smartidea_db::Database;
//!
//! let db = Database::in_memory();
//! let user = db.users.create(new_user).await?;
//! let doc = db.documents.find_and_merge_by_title(user.id, "Acme", patch).await?;
//! ```

pub mod documents;
pub mod knowledge;
pub mod users;

use std::sync::Arc;

pub use documents::MemDocumentRepository;
pub use knowledge::MemKnowledgeRepository;
pub use users::MemUserRepository;

// Re-export core types
pub use smartidea_core::{DocumentRepository, KnowledgeRepository, UserRepository};

/// Repository bundle shared by the HTTP layer.
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub knowledge: Arc<dyn KnowledgeRepository>,
}

impl Database {
    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemUserRepository::new()),
            documents: Arc::new(MemDocumentRepository::new()),
            knowledge: Arc::new(MemKnowledgeRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_starts_empty() {
        let db = Database::in_memory();
        assert_eq!(db.knowledge.count().await.unwrap(), 0);
        assert!(db.users.find_by_email("a@b.c").await.unwrap().is_none());
    }
}
