//! Error types for the protocol layer.
//!
//! Each crate in FestFrenzy defines its own error enum. When you see an
//! `ApiError`, you know the problem happened while talking to the
//! backend: the body could not be (de)serialized, the request never got
//! an answer, or the backend answered with a rejection.

use festfrenzy_transport::TransportError;
use serde::Deserialize;
use serde_json::Value;

/// Errors returned by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Serializing a request body failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The response body did not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// No response was received at all.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered with a non-2xx status.
    ///
    /// `detail` is the backend's human-readable explanation, when the
    /// body carried one.
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Builds a [`ApiError::Rejected`] from an error response, pulling
    /// the `detail` text out of the body if it has one.
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        Self::Rejected {
            status,
            detail: extract_detail(body),
        }
    }

    /// Returns the backend's human-readable rejection text, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the text to show a user: the backend's detail verbatim
    /// when present, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// A timestamp string that is neither RFC 3339 nor a zone-less
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0:?}")]
pub struct InvalidTimestamp(pub String);

// ---------------------------------------------------------------------------
// Detail extraction
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Reads the `detail` field of an error body.
///
/// The backend sends either `{"detail": "text"}` for hand-raised errors
/// or `{"detail": [{"msg": ...}, ...]}` for request validation failures.
/// List messages are joined with `"; "`.
fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_string_detail_is_used_verbatim() {
        let err = ApiError::rejected(400, br#"{"detail":"A venue with this name already exists"}"#);

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("A venue with this name already exists"));
    }

    #[test]
    fn test_rejected_validation_list_joins_messages() {
        let body = br#"{"detail":[
            {"loc":["body","cost"],"msg":"Input should be greater than or equal to 0","type":"greater_than_equal"},
            {"loc":["body"],"msg":"Value error, End date & time must be after start date & time","type":"value_error"}
        ]}"#;

        let err = ApiError::rejected(422, body);

        assert_eq!(
            err.detail(),
            Some(
                "Input should be greater than or equal to 0; \
                 Value error, End date & time must be after start date & time"
            )
        );
    }

    #[test]
    fn test_rejected_non_json_body_has_no_detail() {
        let err = ApiError::rejected(502, b"<html>Bad Gateway</html>");

        assert_eq!(err.detail(), None);
        assert_eq!(err.message_or("Could not load data."), "Could not load data.");
    }

    #[test]
    fn test_rejected_blank_detail_falls_back() {
        let err = ApiError::rejected(500, br#"{"detail":"  "}"#);

        assert_eq!(err.message_or("Could not add venue."), "Could not add venue.");
    }

    #[test]
    fn test_message_or_transport_error_uses_fallback() {
        let err = ApiError::from(TransportError::Timeout("10s".into()));

        assert_eq!(err.status(), None);
        assert_eq!(err.message_or("Could not create event."), "Could not create event.");
    }

    #[test]
    fn test_display_includes_status_and_detail() {
        let err = ApiError::rejected(404, br#"{"detail":"Venue not found"}"#);

        assert_eq!(err.to_string(), "request rejected with status 404: Venue not found");
    }
}
