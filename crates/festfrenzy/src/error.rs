//! Unified error type for the FestFrenzy client.

use festfrenzy_pages::PageError;
use festfrenzy_protocol::ApiError;
use festfrenzy_session::{Route, SessionError};
use festfrenzy_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum FestfrenzyError {
    /// A transport-level error (connect, timeout, bad URL).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, rejected request).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A session-level error (sign-in input, credential storage).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A page action failed.
    #[error(transparent)]
    Page(#[from] PageError),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Gates kept redirecting without settling on a page.
    #[error("too many redirects, last one to {0}")]
    RedirectLoop(Route),
}
