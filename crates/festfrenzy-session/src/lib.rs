//! Session handling for FestFrenzy.
//!
//! This crate decides who is looking at a page and whether they may:
//!
//! 1. **Credential storage**: one named slot holding the bearer token
//!    ([`CredentialStore`], [`MemoryStore`], [`FileStore`])
//! 2. **Identity lookup**: turning a credential into a [`Viewer`]
//!    ([`IdentityResolver`])
//! 3. **The session gate**: the per-page state machine that admits the
//!    viewer or sends them elsewhere ([`SessionGate`], [`GatePolicy`])
//! 4. **Session context**: the store and API client bundled together
//!    and handed to every page, plus sign-in and sign-out
//!    ([`SessionContext`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Pages (above)  ← mount behind a gate, read the credential from the context
//!     ↕
//! Session (this crate)  ← who is signed in, where should they go
//!     ↕
//! Protocol (below)  ← Viewer, Role, Credential, ApiClient
//! ```
//!
//! [`Viewer`]: festfrenzy_protocol::Viewer

#![allow(async_fn_in_trait)]

mod context;
mod error;
mod gate;
mod identity;
mod route;
mod store;

pub use context::{SessionContext, SIGN_IN_FAILED};
pub use error::SessionError;
pub use gate::{
    Audience, GatePolicy, GateState, SessionGate, Verdict,
    PERMISSION_DENIED, SESSION_EXPIRED,
};
pub use identity::IdentityResolver;
pub use route::{Navigation, Route};
pub use store::{CredentialStore, FileStore, MemoryStore, TOKEN_SLOT};
