//! Error taxonomy for Skylight API operations.

use thiserror::Error;

/// Maximum length of an error body excerpt carried in [`SkylightError::Api`].
const BODY_EXCERPT_LEN: usize = 200;

/// Errors that can occur while talking to the Skylight API.
#[derive(Error, Debug)]
pub enum SkylightError {
    /// Credentials were rejected (HTTP 401). The token must be refreshed.
    #[error("authentication failed: check that the API token is valid and not expired")]
    Authentication,

    /// The requested entity does not exist (HTTP 404).
    #[error("{0} not found")]
    NotFound(String),

    /// The backend asked us to slow down (HTTP 429).
    #[error("rate limited{}", .retry_after.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimit {
        /// Seconds to wait, parsed from the `Retry-After` header if present.
        retry_after: Option<u64>,
    },

    /// Any other non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure: no response at all (connect error, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A date phrase that matches none of the recognized forms.
    /// User-correctable; never a system fault.
    #[error("unrecognized date {0:?}: expected YYYY-MM-DD, 'today', 'tomorrow', or a weekday name")]
    InvalidDate(String),

    /// Malformed response body.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SkylightError {
    /// Build an `Api` error, truncating the body excerpt.
    pub(crate) fn api(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            format!("HTTP {status}: {excerpt}")
        };
        Self::Api { status, message }
    }

    /// Rewrite a generic `NotFound` with the entity kind the caller was
    /// actually addressing ("chore", "list item", ...). Other variants pass
    /// through untouched.
    #[must_use]
    pub fn for_kind(self, kind: &str) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(kind.to_string()),
            other => other,
        }
    }

    /// Whether the caller may retry the operation. The library itself never
    /// retries; creation requests are not idempotent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_truncates_body() {
        let body = "x".repeat(500);
        let err = SkylightError::api(502, &body);
        match err {
            SkylightError::Api { status, message } => {
                assert_eq!(status, 502);
                // "HTTP 502: " prefix plus 200 chars of body
                assert_eq!(message.len(), "HTTP 502: ".len() + 200);
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(SkylightError::RateLimit { retry_after: None }.is_retryable());
        assert!(SkylightError::api(500, "boom").is_retryable());
        assert!(SkylightError::api(503, "").is_retryable());
        assert!(!SkylightError::api(400, "bad request").is_retryable());
        assert!(!SkylightError::Authentication.is_retryable());
        assert!(!SkylightError::NotFound("chore".into()).is_retryable());
        assert!(!SkylightError::InvalidDate("next blursday".into()).is_retryable());
    }

    #[test]
    fn test_for_kind_rewrites_not_found_only() {
        let err = SkylightError::NotFound("resource".into()).for_kind("list item");
        assert_eq!(err.to_string(), "list item not found");

        let err = SkylightError::Authentication.for_kind("list item");
        assert!(matches!(err, SkylightError::Authentication));
    }

    #[test]
    fn test_rate_limit_display() {
        let err = SkylightError::RateLimit {
            retry_after: Some(30),
        };
        assert_eq!(err.to_string(), "rate limited, retry after 30s");
        let err = SkylightError::RateLimit { retry_after: None };
        assert_eq!(err.to_string(), "rate limited");
    }
}
