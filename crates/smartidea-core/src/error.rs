//! Error types for Smart Idea Finder.

use thiserror::Error;

/// Result type alias using the crate-wide Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for completion gateway calls.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Core error type for Smart Idea Finder operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Completion gateway failure (classified)
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Classified failure of a single completion call.
///
/// Display strings are matched by substring downstream, so the provider
/// name and the "quota" / "Failed to generate" wording must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credentials rejected (HTTP 401/403).
    #[error("{provider} authentication failed: {message}")]
    Auth { provider: String, message: String },

    /// Rate limit hit or account quota exhausted (HTTP 429, `insufficient_quota`).
    #[error("{provider} quota or rate limit exceeded: {message}")]
    RateLimitOrQuota { provider: String, message: String },

    /// Connection, timeout, or response decoding failure.
    #[error("Failed to generate completion via {provider}: {message}")]
    Transport { provider: String, message: String },

    /// Any other non-2xx status from the provider.
    #[error("Failed to generate completion: {provider} returned {status}: {message}")]
    Upstream {
        provider: String,
        status: u16,
        message: String,
    },

    /// The backend was constructed without the credentials it needs.
    #[error("{provider} client not initialized: {message}")]
    NotConfigured { provider: String, message: String },
}

impl GatewayError {
    /// Short, stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Auth { .. } => "auth",
            GatewayError::RateLimitOrQuota { .. } => "rate_limit_or_quota",
            GatewayError::Transport { .. } => "transport",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::NotConfigured { .. } => "not_configured",
        }
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            GatewayError::Auth { provider, .. }
            | GatewayError::RateLimitOrQuota { provider, .. }
            | GatewayError::Transport { provider, .. }
            | GatewayError::Upstream { provider, .. }
            | GatewayError::NotConfigured { provider, .. } => provider,
        }
    }
}
