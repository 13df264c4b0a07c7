//! Saved ideas, roadmaps and pitch decks.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::{ApiError, AppState};
use smartidea_core::{provided, DocumentPatch, SavedDocument};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// Body of `POST /api/ideas/save`.
#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    #[serde(flatten)]
    pub patch: DocumentPatch,
    /// When set, merge into the caller's document with this title instead
    /// of creating a new one.
    #[serde(rename = "_mergeTitle", default)]
    pub merge_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub idea: SavedDocument,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Save a document, or merge content into an existing one by title.
///
/// # Returns
/// - 200 OK with `{success: true, idea}`
/// - 400 Bad Request if `title` is missing
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    if provided(&req.patch.title).is_none() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let idea = match provided(&req.merge_title) {
        Some(title) => {
            state
                .db
                .documents
                .find_and_merge_by_title(user.id, title, req.patch)
                .await?
        }
        None => state.db.documents.create(user.id, req.patch).await?,
    };

    info!(user_id = %user.id, document_id = %idea.id, "Saved document");
    Ok(Json(SaveResponse {
        success: true,
        idea,
    }))
}

/// Saved documents of the caller, newest first.
pub async fn favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SavedDocument>>, ApiError> {
    let documents = state.db.documents.list_for_owner(user.id, true).await?;
    Ok(Json(documents))
}

/// All documents of the caller, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SavedDocument>>, ApiError> {
    let documents = state.db.documents.list_for_owner(user.id, false).await?;
    Ok(Json(documents))
}
