//! HTTP handlers for smartidea-api.

pub mod ai;
pub mod auth;
pub mod ideas;
pub mod trends;

use axum::Json;
use serde_json::{json, Value as JsonValue};

/// Liveness check.
pub async fn health() -> Json<JsonValue> {
    Json(json!({"status": "ok"}))
}
