/// Errors that can occur in the transport layer.
///
/// Every variant means "no HTTP response was received". A response with
/// an error status is delivered as a normal [`HttpResponse`](crate::HttpResponse).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request path could not be joined onto the base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connecting, sending, or reading the body failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),
}
