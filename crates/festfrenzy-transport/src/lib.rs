//! HTTP transport abstraction layer for FestFrenzy.
//!
//! Provides the [`HttpTransport`] trait that the rest of the workspace
//! talks to, plus the request/response types that cross it. The trait
//! knows nothing about users, venues or events: it moves a method, a
//! path, an optional bearer token and a body to the backend and hands
//! back the raw status and bytes.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): real HTTP via [`ReqwestTransport`]
//! - `mock`: scriptable in-memory [`MockTransport`] for tests

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::TransportError;
#[cfg(feature = "mock")]
pub use mock::{MockReply, MockTransport};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique request IDs.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for one outgoing request, used to correlate logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Allocates the next process-unique request ID.
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// The HTTP methods the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// The body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// A pre-encoded JSON document.
    Json(Vec<u8>),
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
}

/// One request to the backend.
///
/// `path` is relative to the transport's base URL (e.g. `/api/venues`).
/// When `bearer` is set, the transport sends it as
/// `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Body,
}

impl HttpRequest {
    /// Creates a request with no bearer and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: Body::Empty,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a bearer token.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, bytes: Vec<u8>) -> Self {
        self.body = Body::Json(bytes);
        self
    }

    /// Sets a form-encoded body.
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Body::Form(pairs);
        self
    }
}

// Hand-written so the bearer token never reaches the logs.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("body", &self.body)
            .finish()
    }
}

/// The backend's answer: status code and raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Sends requests to the backend and returns its responses.
///
/// Non-2xx statuses are *not* errors at this layer: a `401` or `409` is
/// a perfectly good response that the protocol layer knows how to read.
/// `Err` is reserved for requests that never produced a response
/// (connection refused, timeout, bad URL).
///
/// The returned future must be `Send` so pages can be driven from any
/// Tokio worker thread.
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends one request and waits for the response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
