//! Centralized default constants for Smart Idea Finder.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 5000;

/// Default CORS origin (any).
pub const CORS_ORIGIN: &str = "*";

// =============================================================================
// AUTH
// =============================================================================

/// Development-only signing secret; the server warns when it is in use.
pub const JWT_SECRET: &str = "supersecret";

/// Token lifetime in hours (7 days).
pub const JWT_TTL_HOURS: i64 = 168;

// =============================================================================
// COMPLETION GATEWAY
// =============================================================================

/// Default OpenAI-compatible endpoint.
pub const LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Provider label used in error messages and logs.
pub const LLM_PROVIDER: &str = "openai";

/// Default generation model.
pub const LLM_MODEL: &str = "gpt-4o-mini";

/// Default embedding model.
pub const EMBED_MODEL: &str = "text-embedding-3-small";

/// Request timeout in seconds for completion and embedding calls.
pub const LLM_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// GENERATION PARAMETERS (per kind)
// =============================================================================

pub const IDEA_TEMPERATURE: f32 = 0.8;
pub const IDEA_MAX_TOKENS: u32 = 4000;

pub const ROADMAP_TEMPERATURE: f32 = 0.7;
pub const ROADMAP_MAX_TOKENS: u32 = 3000;

pub const PITCH_DECK_TEMPERATURE: f32 = 0.7;
pub const PITCH_DECK_MAX_TOKENS: u32 = 3500;

pub const ENHANCEMENT_TEMPERATURE: f32 = 0.7;
pub const ENHANCEMENT_MAX_TOKENS: u32 = 2000;

// =============================================================================
// RETRIEVAL
// =============================================================================

/// Documents retrieved per prompt.
pub const RAG_TOP_K: usize = 3;

// =============================================================================
// TRENDS
// =============================================================================

/// Related-queries CSV served when no live trend source answers.
pub const TRENDS_CSV_PATH: &str = "data/relatedQueries.csv";

// =============================================================================
// SAVED DOCUMENTS
// =============================================================================

/// Domain assigned to documents saved without one.
pub const DOCUMENT_DOMAIN: &str = "General";

/// Title used when a create request carries an empty title.
pub const DOCUMENT_TITLE: &str = "Untitled Idea";
