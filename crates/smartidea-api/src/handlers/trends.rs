//! Search-trend data.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::services::{load_related_queries, RelatedQueries};
use crate::{ApiError, AppState};

/// Query parameters of `GET /api/trends`. Only logged; the bundled data set
/// is not filtered by them.
#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    pub domain: Option<String>,
    pub keywords: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub success: bool,
    pub trends: RelatedQueries,
    pub fallback: bool,
}

/// Related queries from the configured CSV export.
///
/// # Returns
/// - 200 OK with `{success, trends: {top, rising}, fallback: true}`
/// - 500 Internal Server Error if the file cannot be read
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendsResponse>, ApiError> {
    debug!(
        domain = query.domain.as_deref().unwrap_or(""),
        keywords = query.keywords.as_deref().unwrap_or(""),
        region = query.region.as_deref().unwrap_or(""),
        "Trends requested"
    );

    let trends = load_related_queries(&state.config.trends_csv_path)
        .await
        .map_err(|e| {
            error!(error = %e, path = %state.config.trends_csv_path, "Trends file unavailable");
            ApiError::Internal("Failed to fetch trends".to_string())
        })?;

    Ok(Json(TrendsResponse {
        success: true,
        trends,
        fallback: true,
    }))
}
