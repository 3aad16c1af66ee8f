//! # Error Types
//!
//! Typed error handling for the bistro ordering backend.
//! All fallible operations return `Result<T, ApiError>`.

use thiserror::Error;

/// Core error type for all backend operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, expired, or badly signed token.
    /// Deliberately carries no detail: the caller only learns "unauthorized".
    #[error("unauthorized")]
    Unauthenticated,

    /// Authenticated, but role or identity does not permit the operation
    #[error("forbidden access")]
    Forbidden,

    /// Referenced user/menu item/record is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Payment-intent creation failed at the gateway adapter
    #[error("gateway failure [{provider}]: {message}")]
    GatewayFailure { provider: String, message: String },

    /// Underlying persistence unavailable or a write failed
    #[error("store failure: {0}")]
    StoreFailure(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthenticated => 401,
            ApiError::Forbidden => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InvalidRequest(_) => 400,
            ApiError::GatewayFailure { .. } => 502,
            ApiError::StoreFailure(_) => 503,
            ApiError::Configuration(_) => 500,
            ApiError::Serialization(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Returns true if retrying the same operation could succeed.
    /// Only the coordinator's cart-clear saga uses this; nothing else
    /// retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::StoreFailure(_))
    }
}

/// Result type alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthenticated.status_code(), 401);
        assert_eq!(ApiError::Forbidden.status_code(), 403);
        assert_eq!(ApiError::NotFound("user".into()).status_code(), 404);
        assert_eq!(
            ApiError::GatewayFailure {
                provider: "stripe".into(),
                message: "boom".into()
            }
            .status_code(),
            502
        );
        assert_eq!(ApiError::StoreFailure("down".into()).status_code(), 503);
    }

    #[test]
    fn test_unauthenticated_leaks_nothing() {
        assert_eq!(ApiError::Unauthenticated.to_string(), "unauthorized");
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::StoreFailure("timeout".into()).is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
        assert!(!ApiError::GatewayFailure {
            provider: "stripe".into(),
            message: "declined".into()
        }
        .is_retryable());
    }
}
