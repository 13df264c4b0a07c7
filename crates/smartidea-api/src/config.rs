//! Server configuration from environment variables.

use std::str::FromStr;

use thiserror::Error;

use smartidea_core::defaults;

/// Configuration error raised at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server settings. Inference settings live in `OpenAIConfig`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    /// Skip seeding and retrieval entirely.
    pub rag_skip_seed: bool,
    pub rag_top_k: usize,
    pub trends_csv_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            cors_origins: vec![defaults::CORS_ORIGIN.to_string()],
            jwt_secret: defaults::JWT_SECRET.to_string(),
            jwt_ttl_hours: defaults::JWT_TTL_HOURS,
            rag_skip_seed: false,
            rag_top_k: defaults::RAG_TOP_K,
            trends_csv_path: defaults::TRENDS_CSV_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(base.host),
            port: parse_or("PORT", &lookup, base.port)?,
            cors_origins: lookup("CORS_ORIGIN")
                .map(|v| split_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(base.cors_origins),
            jwt_secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or(base.jwt_secret),
            jwt_ttl_hours: parse_or("JWT_TTL_HOURS", &lookup, base.jwt_ttl_hours)?,
            rag_skip_seed: lookup("RAG_SKIP_SEED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(base.rag_skip_seed),
            rag_top_k: parse_or("RAG_TOP_K", &lookup, base.rag_top_k)?,
            trends_csv_path: lookup("TRENDS_CSV_PATH").unwrap_or(base.trends_csv_path),
        })
    }

    /// True when the development signing secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == defaults::JWT_SECRET
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
