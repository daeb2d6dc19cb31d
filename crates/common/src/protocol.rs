//! Request and response types exchanged with callers.
//!
//! These types define the public HTTP surface: the decrypt query parameters
//! and the JSON bodies for errors and health checks.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Query parameters accepted by `GET /`.
///
/// `ciphertext` is the canonical parameter name; `text` is an accepted
/// alias. An empty value counts as absent, so an empty `ciphertext` falls
/// through to `text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecryptQuery {
    /// Encoded `hex(IV) + base64(ciphertext)` string.
    pub ciphertext: Option<String>,
    /// Alias for `ciphertext`.
    pub text: Option<String>,
}

impl DecryptQuery {
    /// The effective ciphertext parameter, or `None` if neither name carries
    /// a non-empty value.
    pub fn param(&self) -> Option<&str> {
        self.ciphertext
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.text.as_deref().filter(|s| !s.is_empty()))
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`; the endpoint itself never fails.
    pub status: String,
    /// Whether the runtime key file currently exists.
    pub key_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_prefers_ciphertext() {
        let q = DecryptQuery {
            ciphertext: Some("abc".into()),
            text: Some("def".into()),
        };
        assert_eq!(q.param(), Some("abc"));
    }

    #[test]
    fn empty_ciphertext_falls_through_to_text() {
        let q = DecryptQuery {
            ciphertext: Some(String::new()),
            text: Some("def".into()),
        };
        assert_eq!(q.param(), Some("def"));
    }

    #[test]
    fn param_absent_when_both_empty_or_missing() {
        assert_eq!(DecryptQuery::default().param(), None);
        let q = DecryptQuery {
            ciphertext: Some(String::new()),
            text: Some(String::new()),
        };
        assert_eq!(q.param(), None);
    }

    #[test]
    fn error_response_shape() {
        let e = ErrorResponse::new("Missing ciphertext parameter");
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"error":"Missing ciphertext parameter"}"#);
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "healthy".into(),
            key_available: false,
        };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"status":"healthy","key_available":false}"#);
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert!(!decoded.key_available);
    }
}
