//! Error classification for backend requests.
//!
//! Every call site gets the same four-way split, so the messages the
//! user sees do not drift between commands: missing session, transport
//! failure, non-2xx response, or a 2xx body of the wrong shape.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The command needs a session and none is stored. Raised before
    /// any request is made.
    #[error("Not logged in. Run `samuday login` first.")]
    AuthRequired,

    /// The request never produced a response (connect, timeout, or a
    /// broken body stream).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` carries
    /// the backend's own wording when its body provides one.
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Protocol(String),
}

/// Error bodies the backend produces. Most endpoints use a single
/// `error` or `detail` string; validation failures come back as a map
/// of field name to message list.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub(crate) fn from_status_body(status: u16, body: &str) -> Self {
        ApiError::Api {
            status,
            message: extract_message(status, body),
        }
    }

    /// True for 401 responses, which the CLI turns into a login hint.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status: 401, .. })
    }
}

/// Pull the most specific human-readable message out of an error body.
///
/// Precedence: `error`, then `detail`, then the first field-level
/// validation message, then a generic fallback.
fn extract_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error {
            return msg;
        }
        if let Some(msg) = parsed.detail {
            return msg;
        }
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for (field, value) in &map {
            let msg = match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Array(items) => items
                    .iter()
                    .find_map(|v| v.as_str().map(|s| s.to_string())),
                _ => None,
            };
            if let Some(msg) = msg {
                return format!("{}: {}", field, msg);
            }
        }
    }

    format!("request failed with HTTP {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_wins() {
        let err = ApiError::from_status_body(400, r#"{"error": "Invalid credentials"}"#);
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_field_used_when_no_error() {
        let err = ApiError::from_status_body(
            403,
            r#"{"detail": "You do not have permission to perform this action."}"#,
        );
        match err {
            ApiError::Api { message, .. } => {
                assert_eq!(message, "You do not have permission to perform this action.");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_map_surfaces_first_field() {
        let err = ApiError::from_status_body(
            400,
            r#"{"username": ["A user with that username already exists."]}"#,
        );
        match err {
            ApiError::Api { message, .. } => {
                assert!(message.contains("already exists"), "got: {}", message);
                assert!(message.contains("username"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_falls_back_to_generic() {
        let err = ApiError::from_status_body(500, "");
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("500"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body_falls_back_to_generic() {
        let err = ApiError::from_status_body(502, "<html>Bad Gateway</html>");
        match err {
            ApiError::Api { message, .. } => assert!(message.contains("502")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::from_status_body(401, r#"{"detail": "Invalid token."}"#);
        assert!(err.is_unauthorized());

        let err = ApiError::from_status_body(403, r#"{"detail": "Permission denied"}"#);
        assert!(!err.is_unauthorized());
        assert!(!ApiError::AuthRequired.is_unauthorized());
    }
}
