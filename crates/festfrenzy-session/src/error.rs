//! Error types for the session layer.

use std::path::PathBuf;

use festfrenzy_protocol::ApiError;

/// Errors that can occur while signing in, signing out or touching the
/// credential store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The sign-in form was rejected before any request was sent.
    /// The string is the message to show the user.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend call failed or was rejected.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading or writing the credential slot failed.
    #[error("credential store at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Returns the text to show a user for this failure.
    ///
    /// Validation messages and backend detail are shown verbatim;
    /// everything else falls back to `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::Api(error) => error.message_or(fallback),
            Self::Storage { .. } => fallback.to_string(),
        }
    }
}
