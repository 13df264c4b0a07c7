//! Structured logging schema for Smart Idea Finder.
//!
//! Field names shared by more than one subsystem. Call sites emit them as
//! literal `tracing` keys; this module is the reference list for log queries.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, seeding), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (extracted blocks, scored documents) |

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Generation kind: "idea", "roadmap", "pitchDeck", "enhancement".
pub const KIND: &str = "kind";

/// Owning user UUID.
pub const USER_ID: &str = "user_id";

/// Saved document UUID.
pub const DOCUMENT_ID: &str = "document_id";

/// Retrieval query text.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a retrieval.
pub const RESULT_COUNT: &str = "result_count";

/// Number of input texts sent to an embedding model.
pub const INPUT_COUNT: &str = "input_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model slug used for the call.
pub const MODEL: &str = "model";

/// Provider name ("openai", ...).
pub const PROVIDER: &str = "provider";

/// Classified gateway error kind.
pub const ERROR_KIND: &str = "error_kind";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Whether normalization fell back to the raw completion.
pub const PARSE_ERROR: &str = "parse_error";

/// Error message (for WARN/ERROR events).
pub const ERROR_MSG: &str = "error";

/// Every field name above.
pub const ALL_FIELDS: &[&str] = &[
    KIND,
    USER_ID,
    DOCUMENT_ID,
    QUERY,
    DURATION_MS,
    RESULT_COUNT,
    INPUT_COUNT,
    PROMPT_LEN,
    RESPONSE_LEN,
    MODEL,
    PROVIDER,
    ERROR_KIND,
    PARSE_ERROR,
    ERROR_MSG,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let unique: HashSet<_> = ALL_FIELDS.iter().collect();
        assert_eq!(unique.len(), ALL_FIELDS.len());
    }

    /// Sources that emit the shared fields.
    const EMITTERS: &[&str] = &[
        include_str!("../../smartidea-inference/src/openai/backend.rs"),
        include_str!("../../smartidea-search/src/retrieval.rs"),
        include_str!("../../smartidea-db/src/documents.rs"),
        include_str!("../../smartidea-db/src/users.rs"),
        include_str!("../../smartidea-api/src/services/generation.rs"),
        include_str!("../../smartidea-normalize/src/ideas.rs"),
    ];

    fn emits(source: &str, field: &str) -> bool {
        let key = format!("{field} =");
        source.match_indices(&key).any(|(i, _)| {
            source[..i]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'))
        })
    }

    #[test]
    fn test_every_field_is_emitted() {
        for field in ALL_FIELDS {
            assert!(
                EMITTERS.iter().any(|source| emits(source, field)),
                "{field} is not emitted by any call site"
            );
        }
    }

    #[test]
    fn test_field_names_are_snake_case() {
        for field in ALL_FIELDS {
            assert!(
                field.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{field} is not snake_case"
            );
        }
    }
}
