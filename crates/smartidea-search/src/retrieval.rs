//! Similarity-ranked context retrieval.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use smartidea_core::{
    EmbeddingBackend, KnowledgeRepository, Result, RetrievalContext, RetrievedDocument,
};

use crate::similarity::cosine_similarity;

/// Ranks the knowledge base against a query.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingBackend>,
    store: Arc<dyn KnowledgeRepository>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingBackend>, store: Arc<dyn KnowledgeRepository>) -> Self {
        Self { embedder, store }
    }

    /// Top `k` documents by cosine similarity, highest first.
    ///
    /// Errors from the embedder or the store are returned; see
    /// [`Retriever::retrieve`] for the non-failing variant.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        let start = Instant::now();
        let query_embedding = self.embedder.embed(query).await?;
        let documents = self.store.list().await?;

        let mut scored: Vec<RetrievedDocument> = documents
            .into_iter()
            .map(|doc| RetrievedDocument {
                score: cosine_similarity(&query_embedding, &doc.embedding),
                content: doc.content,
                metadata: doc.metadata,
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(
            query = %query,
            result_count = scored.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Knowledge base search complete"
        );
        Ok(scored)
    }

    /// Build prompt context for `query`.
    ///
    /// Never fails: any error yields an empty context.
    pub async fn retrieve(&self, query: &str, k: usize) -> RetrievalContext {
        match self.search(query, k).await {
            Ok(documents) => RetrievalContext {
                query: query.to_string(),
                context: render_context(&documents),
                documents,
            },
            Err(e) => {
                warn!(query = %query, error = %e, "Retrieval failed, using empty context");
                RetrievalContext::empty(query)
            }
        }
    }
}

/// `[Context 1]: ...` entries separated by a blank line.
pub fn render_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("[Context {}]: {}", i + 1, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use smartidea_core::KnowledgeDocument;
    use smartidea_db::MemKnowledgeRepository;
    use smartidea_inference::mock::{MockEmbeddingGenerator, MockInferenceBackend};
    use uuid::Uuid;

    const DIM: usize = 64;

    async fn store_with(texts: &[&str]) -> Arc<MemKnowledgeRepository> {
        let store = Arc::new(MemKnowledgeRepository::new());
        for text in texts {
            store
                .insert(KnowledgeDocument {
                    id: Uuid::new_v4(),
                    content: text.to_string(),
                    embedding: MockEmbeddingGenerator::generate(text, DIM),
                    metadata: json!({"category": "test"}),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let store = store_with(&[
            "cooking recipes for pasta",
            "pitch deck slides for fundraising",
            "gardening tips",
        ])
        .await;
        let retriever = Retriever::new(
            Arc::new(MockInferenceBackend::new().with_dimension(DIM)),
            store,
        );

        let results = retriever
            .search("pitch deck slides for fundraising", 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "pitch deck slides for fundraising");
        assert!((results[0].score - 1.0).abs() < 1e-5);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_retrieve_renders_numbered_context() {
        let store = store_with(&["alpha beta", "gamma delta"]).await;
        let retriever = Retriever::new(
            Arc::new(MockInferenceBackend::new().with_dimension(DIM)),
            store,
        );

        let ctx = retriever.retrieve("alpha beta", 3).await;
        assert_eq!(ctx.query, "alpha beta");
        assert_eq!(ctx.documents.len(), 2);
        assert!(ctx.context.starts_with("[Context 1]: alpha beta"));
        assert!(ctx.context.contains("\n\n[Context 2]: "));
    }

    #[tokio::test]
    async fn test_retrieve_degrades_on_embedding_failure() {
        let store = store_with(&["anything"]).await;
        let retriever = Retriever::new(
            Arc::new(MockInferenceBackend::new().with_embed_failure("insufficient_quota")),
            store,
        );

        let ctx = retriever.retrieve("query", 3).await;
        assert_eq!(ctx, RetrievalContext::empty("query"));
    }

    #[tokio::test]
    async fn test_retrieve_on_empty_store() {
        let retriever = Retriever::new(
            Arc::new(MockInferenceBackend::new().with_dimension(DIM)),
            Arc::new(MemKnowledgeRepository::new()),
        );
        let ctx = retriever.retrieve("q", 3).await;
        assert!(ctx.context.is_empty());
        assert!(ctx.documents.is_empty());
    }

    #[test]
    fn test_render_context_empty() {
        assert_eq!(render_context(&[]), "");
    }
}
