//! # smartidea-normalize
//!
//! Turns free-form model completions into canonical documents.
//!
//! The pipeline is the same for every schema:
//!
//! 1. strip code fences and wrapping quotes ([`clean::strip_fences`])
//! 2. extract balanced blocks left to right ([`extract::extract_blocks`])
//! 3. strip comments from each block and strict-parse it; the first block
//!    that parses is selected and later blocks are never consulted
//! 4. map the selected value onto the schema through ordered alias tables
//!
//! Idea lists additionally get one truncation repair attempt. Anything
//! unrecoverable becomes a [`ParseFailure`] carrying the untouched raw text;
//! nothing in this crate returns an error.

pub mod clean;
pub mod enhancement;
pub mod extract;
mod fields;
pub mod ideas;
pub mod pitch_deck;
pub mod roadmap;

use serde_json::Value;
use tracing::{debug, trace};

use smartidea_core::{GeneratedDocument, GenerationKind};

pub use enhancement::normalize_enhancement;
pub use extract::{extract_blocks, Blocks};
pub use ideas::normalize_ideas;
pub use pitch_deck::normalize_pitch_deck;
pub use roadmap::normalize_roadmap;
pub use smartidea_core::{Normalized, ParseFailure};

/// Normalize `raw` into the canonical document for `kind`.
pub fn normalize(raw: &str, kind: GenerationKind) -> GeneratedDocument {
    match kind {
        GenerationKind::Idea => GeneratedDocument::Ideas(normalize_ideas(raw)),
        GenerationKind::Roadmap => GeneratedDocument::Roadmap(normalize_roadmap(raw)),
        GenerationKind::PitchDeck => GeneratedDocument::PitchDeck(normalize_pitch_deck(raw)),
        GenerationKind::Enhancement => {
            GeneratedDocument::Enhancement(normalize_enhancement(raw))
        }
    }
}

/// First block of `cleaned` accepted by `accept` that parses as JSON once
/// comments are removed.
pub(crate) fn first_parsed_block(cleaned: &str, accept: impl Fn(&str) -> bool) -> Option<Value> {
    for (index, block) in extract_blocks(cleaned).enumerate() {
        if !accept(block) {
            trace!(block = index, "Block skipped by schema filter");
            continue;
        }
        match serde_json::from_str::<Value>(&clean::strip_comments(block)) {
            Ok(value) => {
                debug!(block = index, block_len = block.len(), "Selected parsed block");
                return Some(value);
            }
            Err(e) => trace!(block = index, error = %e, "Block did not parse"),
        }
    }
    None
}
