//! Generation orchestrator: retrieval, prompt, completion, normalization.
//!
//! Each call is one pass through
//! `Building -> AwaitingCompletion -> Normalizing | FallbackSelected | Failed`.
//! Provider failures whose message matches a masked substring for the kind
//! are answered with a fallback document instead of an error.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use smartidea_core::{
    CompletionBackend, GatewayError, GenerationKind, GenerationOutcome, GenerationParams,
    GenerationRequest, RetrievalContext,
};
use smartidea_search::Retriever;

use super::{fallback, prompts};
use crate::error::GenerationError;

/// Substrings that mask idea, roadmap and pitch deck failures.
const MASKED: &[&str] = &[
    "quota",
    "insufficient",
    "embedding",
    "openai",
    "watson",
    "404",
    "failed to generate",
];

/// Substrings that mask enhancement failures.
const MASKED_ENHANCEMENT: &[&str] = &[
    "quota",
    "insufficient",
    "embedding",
    "openai",
    "failed to generate",
];

/// True when a failure of `kind` should be answered with a fallback document.
pub fn is_masked(kind: GenerationKind, error: &GatewayError) -> bool {
    let message = error.to_string().to_lowercase();
    let needles = match kind {
        GenerationKind::Enhancement => MASKED_ENHANCEMENT,
        _ => MASKED,
    };
    needles.iter().any(|needle| message.contains(needle))
}

/// Runs generation requests end to end.
pub struct Orchestrator {
    completion: Arc<dyn CompletionBackend>,
    /// `None` when retrieval is disabled.
    retriever: Option<Retriever>,
    top_k: usize,
}

impl Orchestrator {
    pub fn new(
        completion: Arc<dyn CompletionBackend>,
        retriever: Option<Retriever>,
        top_k: usize,
    ) -> Self {
        Self {
            completion,
            retriever,
            top_k,
        }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        let kind = request.kind();
        let start = Instant::now();

        let retrieval = self.context_for(request).await;
        let prompt = render_prompt(request, &retrieval.context);
        debug!(
            kind = %kind,
            prompt_len = prompt.len(),
            result_count = retrieval.documents.len(),
            "Prompt built"
        );

        let params = GenerationParams::for_kind(kind);
        match self.completion.complete(&prompt, &params).await {
            Ok(raw) => {
                let data = smartidea_normalize::normalize(&raw, kind);
                info!(
                    kind = %kind,
                    parse_error = data.is_parse_failure(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Generation complete"
                );
                Ok(GenerationOutcome {
                    success: true,
                    data,
                    context: retrieval.documents,
                    fallback: false,
                    warning: None,
                    timestamp: Utc::now(),
                })
            }
            Err(source) if is_masked(kind, &source) => {
                let (data, warning) = fallback::fallback_for(request);
                warn!(kind = %kind, error = %source, "Completion failed, serving fallback document");
                Ok(GenerationOutcome {
                    success: true,
                    data,
                    context: Vec::new(),
                    fallback: true,
                    warning: Some(warning.to_string()),
                    timestamp: Utc::now(),
                })
            }
            Err(source) => {
                warn!(kind = %kind, error = %source, "Completion failed");
                Err(GenerationError { kind, source })
            }
        }
    }

    async fn context_for(&self, request: &GenerationRequest) -> RetrievalContext {
        let query = retrieval_query(request);
        match &self.retriever {
            Some(retriever) => retriever.retrieve(&query, self.top_k).await,
            None => RetrievalContext::empty(query),
        }
    }
}

fn retrieval_query(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Idea(req) => prompts::idea_query(req),
        GenerationRequest::Roadmap(req) => prompts::roadmap_query(req),
        GenerationRequest::PitchDeck(req) => prompts::pitch_deck_query(req),
        GenerationRequest::Enhancement(req) => prompts::enhancement_query(req),
    }
}

fn render_prompt(request: &GenerationRequest, context: &str) -> String {
    match request {
        GenerationRequest::Idea(req) => prompts::idea_prompt(req, context),
        GenerationRequest::Roadmap(req) => prompts::roadmap_prompt(req, context),
        GenerationRequest::PitchDeck(req) => prompts::pitch_deck_prompt(req, context),
        GenerationRequest::Enhancement(req) => prompts::enhancement_prompt(req, context),
    }
}
