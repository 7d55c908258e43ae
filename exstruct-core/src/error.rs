//! Extraction error types.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the extraction pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Invalid or missing configuration (API key, malformed settings).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named schema could not be found.
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    /// API-level error reported by the provider.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Connection failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Rate limited, either by the provider or by local admission control.
    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested delay before the next attempt.
        retry_after: Option<Duration>,
    },

    /// The provider returned no content.
    #[error("Empty response from LLM")]
    EmptyResponse,

    /// The provider returned content that is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(String),

    /// Decoded JSON violates the schema contract.
    #[error("Invalid response format: {0}")]
    Validation(String),

    /// JSON serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File-level failure while loading schemas or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Check if this error is worth retrying.
    ///
    /// Decode failures are retryable; the provider samples a fresh response
    /// on each attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ExtractError::Timeout(_) => true,
            ExtractError::Connection(_) => true,
            ExtractError::RateLimited { .. } => true,
            ExtractError::Decode(_) => true,
            ExtractError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the retry-after duration if applicable.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ExtractError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a schema-not-found error.
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound(name.into())
    }

    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a rate limited error.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimited { retry_after }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::Timeout(Duration::from_secs(30)) // Default timeout
        } else if err.is_connect() {
            ExtractError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ExtractError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ExtractError::Connection(err.to_string())
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ExtractError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(ExtractError::rate_limited(None).is_retryable());
        assert!(ExtractError::Connection("refused".into()).is_retryable());
        assert!(ExtractError::api(500, "Server error").is_retryable());
        assert!(ExtractError::api(503, "Unavailable").is_retryable());
        assert!(ExtractError::decode("unexpected token").is_retryable());

        assert!(!ExtractError::api(400, "Bad request").is_retryable());
        assert!(!ExtractError::api(401, "Unauthorized").is_retryable());
        assert!(!ExtractError::EmptyResponse.is_retryable());
        assert!(!ExtractError::validation("missing field").is_retryable());
        assert!(!ExtractError::configuration("no key").is_retryable());
        assert!(!ExtractError::schema_not_found("missing").is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let err = ExtractError::rate_limited(Some(Duration::from_secs(20)));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(20)));

        let err = ExtractError::rate_limited(None);
        assert_eq!(err.retry_after(), None);

        let err = ExtractError::Timeout(Duration::from_secs(30));
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ExtractError::EmptyResponse;
        assert_eq!(err.to_string(), "Empty response from LLM");

        let err = ExtractError::decode("expected value at line 1");
        assert!(err.to_string().starts_with("Invalid JSON response:"));

        let err = ExtractError::validation("missing field `title`");
        assert!(err.to_string().starts_with("Invalid response format:"));

        let err = ExtractError::api(404, "Not found");
        assert!(err.to_string().contains("404"));
    }
}
