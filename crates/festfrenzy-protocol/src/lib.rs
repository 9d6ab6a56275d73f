//! Wire protocol for FestFrenzy.
//!
//! This crate defines the "language" the client and the REST backend
//! speak:
//!
//! - **Types** ([`Viewer`], [`Venue`], [`Event`], [`Timestamp`], etc.):
//!   the JSON documents that travel on the wire.
//! - **Endpoints** ([`Endpoint`]): the fixed table of method, path and
//!   authentication for every call the UI makes.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those documents
//!   are converted to/from bytes.
//! - **Client** ([`ApiClient`]): one typed async method per endpoint.
//! - **Errors** ([`ApiError`]): what can go wrong, including the
//!   backend's own human-readable rejection text.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw HTTP) and session
//! (who is signed in). It doesn't know about pages or redirects; it only
//! knows how to turn a typed call into a request and a response back
//! into a typed value.
//!
//! ```text
//! Transport (status + bytes) → Protocol (Viewer, Event, ...) → Session (gate)
//! ```

#![allow(async_fn_in_trait)]

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod client;
mod codec;
mod endpoint;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use client::ApiClient;
pub use codec::{Codec, JsonCodec};
pub use endpoint::{Auth, Endpoint};
pub use error::{ApiError, InvalidTimestamp};
pub use types::{
    AccessToken, Credential, Event, EventId, LoginForm, NewEvent, NewVenue,
    Organizer, Role, Timestamp, UserId, Venue, VenueId, Viewer,
};
