//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use smartidea_core::{Error, GatewayError, GenerationKind};

/// A gateway failure that could not be masked by a fallback document.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", failure_label(.kind))]
pub struct GenerationError {
    pub kind: GenerationKind,
    #[source]
    pub source: GatewayError,
}

/// Error label for an unmasked failure of `kind`.
pub fn failure_label(kind: &GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Idea => "Failed to generate ideas",
        GenerationKind::Roadmap => "Failed to generate roadmap",
        GenerationKind::PitchDeck => "Failed to generate pitch deck",
        GenerationKind::Enhancement => "Failed to enhance idea",
    }
}

/// Errors returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
    Generation(GenerationError),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({"success": false, "error": msg}),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({"success": false, "error": msg}),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({"success": false, "error": msg}),
            ),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"success": false, "error": msg}),
                )
            }
            ApiError::Generation(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": failure_label(&err.kind),
                    "message": err.source.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        assert!(matches!(
            ApiError::from(Error::InvalidInput("x".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Unauthorized("x".into())),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Internal("x".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_generation_error_status() {
        let err = ApiError::from(GenerationError {
            kind: GenerationKind::PitchDeck,
            source: GatewayError::Auth {
                provider: "local".into(),
                message: "bad key".into(),
            },
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError {
            kind: GenerationKind::Enhancement,
            source: GatewayError::Auth {
                provider: "local".into(),
                message: "bad key".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to enhance idea: local authentication failed: bad key"
        );
    }
}
