//! Error types for the page layer.

use festfrenzy_protocol::ApiError;
use festfrenzy_session::SessionError;

/// Errors returned by page actions.
///
/// Every action also records a user-facing message on the page itself;
/// the error is for callers that want to branch on the outcome.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A form failed local validation. No request was sent.
    #[error("{0}")]
    Invalid(String),

    /// The backend call failed or was rejected.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Signing in or out failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The action needs a signed-in viewer and the page has none
    /// (not mounted yet, or mounted as a guest).
    #[error("page has no signed-in viewer")]
    NotSignedIn,

    /// The page was unmounted while the request was in flight; its
    /// result was dropped.
    #[error("page was unmounted")]
    Cancelled,
}

impl PageError {
    /// The text to show the user, with `fallback` for failures that
    /// carry no message of their own.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Invalid(message) => message.clone(),
            Self::Api(error) => error.message_or(fallback),
            Self::Session(error) => error.message_or(fallback),
            Self::NotSignedIn | Self::Cancelled => fallback.to_string(),
        }
    }
}
