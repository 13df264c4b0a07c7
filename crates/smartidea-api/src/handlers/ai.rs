//! Generation endpoints.
//!
//! All four routes run the orchestrator and answer with
//! `{success, <ideas|roadmap|pitchDeck|enhancement>, context, fallback?, warning?, timestamp}`.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::{ApiError, AppState};
use smartidea_core::{
    EnhancementRequest, GenerationOutcome, GenerationRequest, IdeaRequest, PitchDeckRequest,
    RoadmapRequest,
};

async fn run(
    state: &AppState,
    request: GenerationRequest,
) -> Result<Json<GenerationOutcome>, ApiError> {
    let outcome = state.orchestrator.generate(&request).await?;
    Ok(Json(outcome))
}

pub async fn generate_idea(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<IdeaRequest>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    run(&state, GenerationRequest::Idea(req)).await
}

pub async fn generate_roadmap(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    run(&state, GenerationRequest::Roadmap(req)).await
}

pub async fn generate_pitch_deck(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<PitchDeckRequest>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    run(&state, GenerationRequest::PitchDeck(req)).await
}

/// Analyze an existing idea.
///
/// # Returns
/// - 400 Bad Request if `idea` is not a JSON object
pub async fn enhance_idea(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<EnhancementRequest>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    if !req.idea.is_object() {
        return Err(ApiError::BadRequest("Idea object is required".to_string()));
    }
    run(&state, GenerationRequest::Enhancement(req)).await
}
