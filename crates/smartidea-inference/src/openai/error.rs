//! OpenAI-specific error classification.

use smartidea_core::GatewayError;

/// OpenAI-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Account quota or billing limit exhausted.
    QuotaExceeded,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Request too large.
    ContextLengthExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl OpenAIErrorCode {
    /// Determine error code from HTTP status, error type and error code.
    pub fn from_response(status: u16, error_type: &str, code: &str) -> Self {
        if error_type == "insufficient_quota" || code == "insufficient_quota" {
            return Self::QuotaExceeded;
        }
        match (status, error_type) {
            (401 | 403, _) => Self::AuthenticationError,
            (429, _) => Self::RateLimitExceeded,
            (404, _) | (_, "model_not_found") => Self::ModelNotFound,
            (400, _) if error_type.contains("context_length") || code.contains("context_length") => {
                Self::ContextLengthExceeded
            }
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a classified OpenAI error into a gateway error.
pub fn to_gateway_error(
    code: OpenAIErrorCode,
    provider: &str,
    status: u16,
    message: &str,
) -> GatewayError {
    let provider = provider.to_string();
    match code {
        OpenAIErrorCode::AuthenticationError => GatewayError::Auth {
            provider,
            message: message.to_string(),
        },
        OpenAIErrorCode::QuotaExceeded => GatewayError::RateLimitOrQuota {
            provider,
            message: format!("insufficient_quota: {}", message),
        },
        OpenAIErrorCode::RateLimitExceeded => GatewayError::RateLimitOrQuota {
            provider,
            message: message.to_string(),
        },
        OpenAIErrorCode::ModelNotFound => GatewayError::Upstream {
            provider,
            status,
            message: format!("Model not found: {}", message),
        },
        OpenAIErrorCode::ContextLengthExceeded => GatewayError::Upstream {
            provider,
            status,
            message: format!("Context too long: {}", message),
        },
        OpenAIErrorCode::ServerError | OpenAIErrorCode::Unknown => GatewayError::Upstream {
            provider,
            status,
            message: message.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_401() {
        let code = OpenAIErrorCode::from_response(401, "invalid_request_error", "invalid_api_key");
        assert_eq!(code, OpenAIErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_insufficient_quota_wins_over_status() {
        let code = OpenAIErrorCode::from_response(429, "insufficient_quota", "insufficient_quota");
        assert_eq!(code, OpenAIErrorCode::QuotaExceeded);
    }

    #[test]
    fn test_error_code_from_429() {
        let code = OpenAIErrorCode::from_response(429, "requests", "rate_limit_exceeded");
        assert_eq!(code, OpenAIErrorCode::RateLimitExceeded);
    }

    #[test]
    fn test_error_code_from_404() {
        let code = OpenAIErrorCode::from_response(404, "invalid_request_error", "model_not_found");
        assert_eq!(code, OpenAIErrorCode::ModelNotFound);
    }

    #[test]
    fn test_error_code_context_length() {
        let code =
            OpenAIErrorCode::from_response(400, "invalid_request_error", "context_length_exceeded");
        assert_eq!(code, OpenAIErrorCode::ContextLengthExceeded);
    }

    #[test]
    fn test_error_code_from_500() {
        assert_eq!(
            OpenAIErrorCode::from_response(502, "", ""),
            OpenAIErrorCode::ServerError
        );
    }

    #[test]
    fn test_error_code_unknown() {
        assert_eq!(
            OpenAIErrorCode::from_response(418, "", ""),
            OpenAIErrorCode::Unknown
        );
    }

    #[test]
    fn test_quota_maps_to_rate_limit_or_quota() {
        let err = to_gateway_error(OpenAIErrorCode::QuotaExceeded, "openai", 429, "exceeded");
        assert!(matches!(err, GatewayError::RateLimitOrQuota { .. }));
        assert!(err.to_string().contains("insufficient_quota"));
    }

    #[test]
    fn test_model_not_found_keeps_status() {
        let err = to_gateway_error(OpenAIErrorCode::ModelNotFound, "openai", 404, "gpt-x");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_auth_maps_to_auth() {
        let err = to_gateway_error(OpenAIErrorCode::AuthenticationError, "local", 401, "bad key");
        assert_eq!(
            err,
            GatewayError::Auth {
                provider: "local".to_string(),
                message: "bad key".to_string()
            }
        );
    }
}
