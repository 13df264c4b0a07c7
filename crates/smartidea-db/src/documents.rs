//! Saved-document repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use smartidea_core::{
    defaults, provided, provided_json, DocumentPatch, DocumentRepository, Result, SavedDocument,
};

/// Saved documents held in memory.
#[derive(Default)]
pub struct MemDocumentRepository {
    documents: RwLock<Vec<SavedDocument>>,
}

impl MemDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn blank(owner: Uuid, title: &str) -> SavedDocument {
    SavedDocument {
        id: Uuid::now_v7(),
        owner,
        title: title.to_string(),
        description: String::new(),
        score: 0.0,
        domain: defaults::DOCUMENT_DOMAIN.to_string(),
        saved: true,
        roadmap: None,
        pitch_deck: None,
        ideas: None,
        target_market: None,
        business_model: None,
        competitive_advantage: None,
        funding_goal: None,
        created_at: Utc::now(),
    }
}

/// Write the provided content fields of `patch` onto `doc`.
///
/// Title, score and domain are identity fields and are left alone.
fn apply_content(doc: &mut SavedDocument, patch: &DocumentPatch) {
    if let Some(description) = provided(&patch.description) {
        doc.description = description.to_string();
    }
    if let Some(roadmap) = provided_json(&patch.roadmap) {
        doc.roadmap = Some(roadmap.clone());
    }
    if let Some(pitch_deck) = provided_json(&patch.pitch_deck) {
        doc.pitch_deck = Some(pitch_deck.clone());
    }
    if let Some(ideas) = provided_json(&patch.ideas) {
        doc.ideas = Some(ideas.clone());
    }
    if let Some(v) = provided(&patch.target_market) {
        doc.target_market = Some(v.to_string());
    }
    if let Some(v) = provided(&patch.business_model) {
        doc.business_model = Some(v.to_string());
    }
    if let Some(v) = provided(&patch.competitive_advantage) {
        doc.competitive_advantage = Some(v.to_string());
    }
    if let Some(v) = provided(&patch.funding_goal) {
        doc.funding_goal = Some(v.to_string());
    }
}

#[async_trait]
impl DocumentRepository for MemDocumentRepository {
    async fn find_and_merge_by_title(
        &self,
        owner: Uuid,
        title: &str,
        patch: DocumentPatch,
    ) -> Result<SavedDocument> {
        let mut documents = self.documents.write().await;

        if let Some(existing) = documents
            .iter_mut()
            .find(|d| d.owner == owner && d.title == title)
        {
            apply_content(existing, &patch);
            existing.saved = true;
            debug!(document_id = %existing.id, "Merged into existing document");
            return Ok(existing.clone());
        }

        let mut doc = blank(owner, title);
        apply_content(&mut doc, &patch);
        debug!(document_id = %doc.id, "Upsert created document");
        documents.push(doc.clone());
        Ok(doc)
    }

    async fn create(&self, owner: Uuid, patch: DocumentPatch) -> Result<SavedDocument> {
        let title = provided(&patch.title).unwrap_or(defaults::DOCUMENT_TITLE);
        let mut doc = blank(owner, title);
        apply_content(&mut doc, &patch);
        if let Some(score) = patch.score {
            doc.score = score;
        }
        if let Some(domain) = provided(&patch.domain) {
            doc.domain = domain.to_string();
        }

        debug!(document_id = %doc.id, "Created document");
        self.documents.write().await.push(doc.clone());
        Ok(doc)
    }

    async fn list_for_owner(&self, owner: Uuid, saved_only: bool) -> Result<Vec<SavedDocument>> {
        let documents = self.documents.read().await;
        // Reverse insertion order first so ties on created_at stay newest-first.
        let mut owned: Vec<SavedDocument> = documents
            .iter()
            .rev()
            .filter(|d| d.owner == owner && (!saved_only || d.saved))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch_with(description: &str) -> DocumentPatch {
        DocumentPatch {
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let repo = MemDocumentRepository::new();
        let owner = Uuid::new_v4();

        let doc = repo.create(owner, DocumentPatch::default()).await.unwrap();
        assert_eq!(doc.title, "Untitled Idea");
        assert_eq!(doc.description, "");
        assert_eq!(doc.score, 0.0);
        assert_eq!(doc.domain, "General");
        assert!(doc.saved);
    }

    #[tokio::test]
    async fn test_create_keeps_provided_fields() {
        let repo = MemDocumentRepository::new();
        let patch = DocumentPatch {
            title: Some("Acme".to_string()),
            score: Some(87.0),
            domain: Some("Fintech".to_string()),
            ideas: Some(json!([{"title": "A"}])),
            ..Default::default()
        };

        let doc = repo.create(Uuid::new_v4(), patch).await.unwrap();
        assert_eq!(doc.title, "Acme");
        assert_eq!(doc.score, 87.0);
        assert_eq!(doc.domain, "Fintech");
        assert_eq!(doc.ideas, Some(json!([{"title": "A"}])));
    }

    #[tokio::test]
    async fn test_merge_creates_then_updates_same_document() {
        let repo = MemDocumentRepository::new();
        let owner = Uuid::new_v4();

        let first = repo
            .find_and_merge_by_title(owner, "Acme", patch_with("v1"))
            .await
            .unwrap();
        let roadmap_patch = DocumentPatch {
            roadmap: Some(json!({"phases": []})),
            ..Default::default()
        };
        let second = repo
            .find_and_merge_by_title(owner, "Acme", roadmap_patch)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.description, "v1");
        assert_eq!(second.roadmap, Some(json!({"phases": []})));
        assert_eq!(repo.list_for_owner(owner, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_ignores_empty_fields() {
        let repo = MemDocumentRepository::new();
        let owner = Uuid::new_v4();
        repo.find_and_merge_by_title(owner, "Acme", patch_with("kept"))
            .await
            .unwrap();

        let merged = repo
            .find_and_merge_by_title(owner, "Acme", patch_with("  "))
            .await
            .unwrap();
        assert_eq!(merged.description, "kept");
    }

    #[tokio::test]
    async fn test_merge_is_scoped_per_owner() {
        let repo = MemDocumentRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let a = repo
            .find_and_merge_by_title(alice, "Acme", patch_with("a"))
            .await
            .unwrap();
        let b = repo
            .find_and_merge_by_title(bob, "Acme", patch_with("b"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.list_for_owner(alice, true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = MemDocumentRepository::new();
        let owner = Uuid::new_v4();
        for title in ["one", "two", "three"] {
            repo.create(
                owner,
                DocumentPatch {
                    title: Some(title.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let titles: Vec<String> = repo
            .list_for_owner(owner, true)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
    }
}
