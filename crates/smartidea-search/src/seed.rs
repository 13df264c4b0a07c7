//! Knowledge-base seeding.
//!
//! Runs once at startup, before traffic, and only when the store is empty.

use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};
use uuid::Uuid;

use smartidea_core::{EmbeddingBackend, KnowledgeDocument, KnowledgeRepository, Result};

/// A document to embed and store.
#[derive(Debug, Clone)]
pub struct SeedDocument {
    pub content: &'static str,
    pub category: &'static str,
    pub domain: &'static str,
}

impl SeedDocument {
    fn metadata(&self) -> JsonValue {
        json!({
            "source": "seed",
            "category": self.category,
            "domain": self.domain,
        })
    }
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Disabled by configuration.
    Skipped,
    /// Store already held this many documents.
    AlreadySeeded(usize),
    /// Inserted `inserted` of `attempted` documents.
    Seeded { inserted: usize, attempted: usize },
}

const SEED_DOCUMENTS: &[SeedDocument] = &[
    SeedDocument {
        content: "A strong business idea should solve a real problem, have a clear target market, and offer a unique value proposition.",
        category: "business-fundamentals",
        domain: "general",
    },
    SeedDocument {
        content: "Project roadmaps should include clear milestones, timelines, resource allocation, and risk assessment. Break down work into phases: Planning, Development, Testing, and Launch.",
        category: "project-management",
        domain: "general",
    },
    SeedDocument {
        content: "An effective pitch deck includes: Problem, Solution, Market Size, Business Model, Competitive Advantage, Team, Financial Projections, and Ask.",
        category: "pitch-deck",
        domain: "fundraising",
    },
    SeedDocument {
        content: "Tech startup ideas should leverage emerging technologies like AI, blockchain, IoT, or cloud computing to create scalable solutions.",
        category: "business-ideas",
        domain: "tech",
    },
    SeedDocument {
        content: "Market validation is crucial. Use surveys, interviews, and MVP testing to validate demand before building a full product.",
        category: "validation",
        domain: "general",
    },
    SeedDocument {
        content: "A minimum viable product (MVP) should focus on core features that solve the main problem with minimum resources.",
        category: "mvp",
        domain: "product",
    },
];

/// The built-in startup corpus.
pub fn seed_documents() -> &'static [SeedDocument] {
    SEED_DOCUMENTS
}

/// Embed and store the built-in corpus when the store is empty.
///
/// A document whose embedding fails is skipped; the rest are still stored.
/// Only the initial count query can return an error.
pub async fn seed_if_empty(
    embedder: &dyn EmbeddingBackend,
    store: &dyn KnowledgeRepository,
    skip: bool,
) -> Result<SeedOutcome> {
    if skip {
        warn!("Skipping knowledge base seeding because RAG_SKIP_SEED is set");
        return Ok(SeedOutcome::Skipped);
    }

    let count = store.count().await?;
    if count > 0 {
        info!(result_count = count, "Knowledge base already initialized");
        return Ok(SeedOutcome::AlreadySeeded(count));
    }

    let mut inserted = 0;
    for doc in SEED_DOCUMENTS {
        let embedding = match embedder.embed(doc.content).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, category = doc.category, "Seeding skipped for one item");
                continue;
            }
        };

        let record = KnowledgeDocument {
            id: Uuid::now_v7(),
            content: doc.content.to_string(),
            embedding,
            metadata: doc.metadata(),
            created_at: Utc::now(),
        };
        match store.insert(record).await {
            Ok(_) => inserted += 1,
            Err(e) => warn!(error = %e, category = doc.category, "Failed to store seed document"),
        }
    }

    info!(
        inserted,
        attempted = SEED_DOCUMENTS.len(),
        "Knowledge base seeding complete"
    );
    Ok(SeedOutcome::Seeded {
        inserted,
        attempted: SEED_DOCUMENTS.len(),
    })
}
