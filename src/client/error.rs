//! Error types for service calls.
//!
//! These never cross the operation boundary: the client renders them into the
//! returned string. They exist so construction failures and tests can match on
//! the failure kind.

use thiserror::Error;

/// Errors that can occur while talking to the OpenAlex service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Base URL cannot be parsed or is not http(s)
    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL
        base_url: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client construction failed: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Request could not be sent or the response body could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// Creates an `InvalidBaseUrl` error.
    #[must_use]
    pub fn invalid_base_url(base_url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_message() {
        let err = ServiceError::invalid_base_url("ftp://x", "scheme must be http or https");
        let msg = err.to_string();
        assert!(msg.contains("ftp://x"));
        assert!(msg.contains("scheme must be http or https"));
    }

    #[test]
    fn test_decode_error_message() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let msg = ServiceError::from(source).to_string();
        assert!(msg.starts_with("unexpected response format:"));
    }
}
