//! Scriptable in-memory transport for tests.
//!
//! Tests script a reply per `(method, path)`, drive the code under test,
//! then inspect what was actually sent. Nothing touches the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// A canned reply for one route.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with this status and JSON body.
    Respond { status: u16, body: Vec<u8> },
    /// Fail as if the network were down.
    Fail(String),
}

type RouteKey = (Method, String);

#[derive(Default)]
struct MockState {
    replies: HashMap<RouteKey, MockReply>,
    stalls: HashMap<RouteKey, Arc<Notify>>,
    log: Vec<HttpRequest>,
}

/// An [`HttpTransport`] that answers from a script and records requests.
///
/// Unscripted routes answer `404 {"detail":"Not Found"}`, the same shape
/// the real backend uses for unknown paths.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Creates an empty mock with no scripted routes.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Scripts a JSON reply for `method path`, replacing any earlier one.
    pub fn respond(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        let body = body.to_string().into_bytes();
        self.lock()
            .replies
            .insert((method, path.to_string()), MockReply::Respond { status, body });
        self
    }

    /// Scripts a transport-level failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, reason: &str) -> &Self {
        self.lock()
            .replies
            .insert((method, path.to_string()), MockReply::Fail(reason.to_string()));
        self
    }

    /// Holds every reply on `method path` until the returned handle is
    /// notified with `notify_one()`.
    pub fn stall(&self, method: Method, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.lock()
            .stalls
            .insert((method, path.to_string()), Arc::clone(&notify));
        notify
    }

    /// Returns every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().log.clone()
    }

    /// Returns how many requests have been sent.
    pub fn request_count(&self) -> usize {
        self.lock().log.len()
    }

    /// Returns how many requests hit `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl HttpTransport for MockTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let key = (request.method, request.path.clone());
        let (reply, stall) = {
            let mut state = self.lock();
            state.log.push(request);
            (state.replies.get(&key).cloned(), state.stalls.get(&key).cloned())
        };

        if let Some(notify) = stall {
            notify.notified().await;
        }

        match reply {
            Some(MockReply::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(MockReply::Fail(reason)) => Err(TransportError::RequestFailed(reason)),
            None => Ok(HttpResponse {
                status: 404,
                body: br#"{"detail":"Not Found"}"#.to_vec(),
            }),
        }
    }
}
