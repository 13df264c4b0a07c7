//! Knowledge-base repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use smartidea_core::{KnowledgeDocument, KnowledgeRepository, Result};

/// Knowledge base held in memory, in insertion order.
#[derive(Default)]
pub struct MemKnowledgeRepository {
    documents: RwLock<Vec<KnowledgeDocument>>,
}

impl MemKnowledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeRepository for MemKnowledgeRepository {
    async fn insert(&self, document: KnowledgeDocument) -> Result<Uuid> {
        let id = document.id;
        self.documents.write().await.push(document);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<KnowledgeDocument>> {
        Ok(self.documents.read().await.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.documents.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn doc(content: &str) -> KnowledgeDocument {
        KnowledgeDocument {
            id: Uuid::new_v4(),
            content: content.to_string(),
            embedding: vec![1.0, 0.0],
            metadata: json!({}),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_in_order() {
        let repo = MemKnowledgeRepository::new();
        let first = doc("first");
        let id = repo.insert(first.clone()).await.unwrap();
        repo.insert(doc("second")).await.unwrap();

        assert_eq!(id, first.id);
        assert_eq!(repo.count().await.unwrap(), 2);
        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].content, "first");
        assert_eq!(listed[1].content, "second");
    }
}
