/*
[INPUT]:  Error sources (HTTP, API, serialization, auth)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the dashboard adapter
#[derive(Error, Debug)]
pub enum OpsboardError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Token missing, expired or rejected
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Requested resource does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl OpsboardError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            OpsboardError::Http(err) => err.is_connect() || err.is_timeout(),
            OpsboardError::Api { code, .. } => *code >= 500,
            OpsboardError::RateLimit { .. }
            | OpsboardError::Timeout { .. }
            | OpsboardError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            OpsboardError::RateLimit { retry_after } => Some(*retry_after),
            OpsboardError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, OpsboardError::Authentication { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, OpsboardError::NotFound { .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        OpsboardError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, OpsboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let timeout_err = OpsboardError::Timeout { duration: 30 };
        assert!(timeout_err.is_retryable());
        assert_eq!(timeout_err.retry_delay(), Some(1));

        let auth_err = OpsboardError::Authentication {
            message: "expired".to_string(),
        };
        assert!(!auth_err.is_retryable());
        assert_eq!(auth_err.retry_delay(), None);
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(OpsboardError::api_error(StatusCode::BAD_GATEWAY, "upstream").is_retryable());
        assert!(!OpsboardError::api_error(StatusCode::CONFLICT, "stale").is_retryable());
    }

    #[test]
    fn test_error_classification() {
        let auth = OpsboardError::Authentication {
            message: "bad token".to_string(),
        };
        assert!(auth.is_auth_error());
        assert!(!auth.is_not_found());

        let missing = OpsboardError::NotFound {
            resource: "task t-1".to_string(),
        };
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "Not found: task t-1");
    }

    #[test]
    fn test_api_error_creation() {
        let err = OpsboardError::api_error(StatusCode::BAD_REQUEST, "Invalid status");
        match err {
            OpsboardError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid status");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
