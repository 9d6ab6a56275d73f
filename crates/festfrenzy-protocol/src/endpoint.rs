//! The REST endpoints the UI consumes.
//!
//! Keeping method, path and auth in one table means the client methods
//! can't drift from each other: every call goes through
//! [`Endpoint::request`], which builds the transport request from this
//! table.

use festfrenzy_transport::{HttpRequest, Method};

use crate::{UserId, VenueId};

/// How a request authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Public endpoint, no credential attached.
    None,
    /// `Authorization: Bearer <token>` header.
    Bearer,
    /// Form-encoded username/password (the login call itself).
    Form,
}

/// One backend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/users/me`: resolve viewer identity/role.
    CurrentUser,
    /// `POST /api/organizer/login`: obtain a bearer token.
    Login,
    /// `GET /api/venues`: public venue list.
    ListVenues,
    /// `POST /api/admin/venues`: create a venue (admin).
    CreateVenue,
    /// `DELETE /api/admin/venues/{id}`: delete a venue (admin).
    DeleteVenue(VenueId),
    /// `GET /api/admin/pending-organizers`: unapproved organizers (admin).
    PendingOrganizers,
    /// `POST /api/admin/approve-organizer/{id}`: approve one (admin).
    ApproveOrganizer(UserId),
    /// `GET /api/events`: public event list.
    ListEvents,
    /// `GET /api/organizer/events`: the caller's own events (organizer).
    MyEvents,
    /// `POST /api/organizer/events`: create an event (organizer).
    CreateEvent,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::CurrentUser
            | Self::ListVenues
            | Self::PendingOrganizers
            | Self::ListEvents
            | Self::MyEvents => Method::Get,
            Self::Login
            | Self::CreateVenue
            | Self::ApproveOrganizer(_)
            | Self::CreateEvent => Method::Post,
            Self::DeleteVenue(_) => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::CurrentUser => "/api/users/me".to_string(),
            Self::Login => "/api/organizer/login".to_string(),
            Self::ListVenues => "/api/venues".to_string(),
            Self::CreateVenue => "/api/admin/venues".to_string(),
            Self::DeleteVenue(id) => format!("/api/admin/venues/{id}"),
            Self::PendingOrganizers => "/api/admin/pending-organizers".to_string(),
            Self::ApproveOrganizer(id) => format!("/api/admin/approve-organizer/{id}"),
            Self::ListEvents => "/api/events".to_string(),
            Self::MyEvents | Self::CreateEvent => "/api/organizer/events".to_string(),
        }
    }

    pub fn auth(&self) -> Auth {
        match self {
            Self::ListVenues | Self::ListEvents => Auth::None,
            Self::Login => Auth::Form,
            _ => Auth::Bearer,
        }
    }

    /// Starts a transport request for this endpoint (no body, no bearer).
    pub fn request(&self) -> HttpRequest {
        HttpRequest::new(self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table_matches_backend_routes() {
        let table = [
            (Endpoint::CurrentUser, Method::Get, "/api/users/me", Auth::Bearer),
            (Endpoint::ListVenues, Method::Get, "/api/venues", Auth::None),
            (Endpoint::CreateVenue, Method::Post, "/api/admin/venues", Auth::Bearer),
            (Endpoint::DeleteVenue(VenueId(4)), Method::Delete, "/api/admin/venues/4", Auth::Bearer),
            (Endpoint::PendingOrganizers, Method::Get, "/api/admin/pending-organizers", Auth::Bearer),
            (Endpoint::ApproveOrganizer(UserId(9)), Method::Post, "/api/admin/approve-organizer/9", Auth::Bearer),
            (Endpoint::ListEvents, Method::Get, "/api/events", Auth::None),
            (Endpoint::MyEvents, Method::Get, "/api/organizer/events", Auth::Bearer),
            (Endpoint::CreateEvent, Method::Post, "/api/organizer/events", Auth::Bearer),
            (Endpoint::Login, Method::Post, "/api/organizer/login", Auth::Form),
        ];

        for (endpoint, method, path, auth) in table {
            assert_eq!(endpoint.method(), method, "{endpoint:?}");
            assert_eq!(endpoint.path(), path, "{endpoint:?}");
            assert_eq!(endpoint.auth(), auth, "{endpoint:?}");
        }
    }

    #[test]
    fn test_request_has_no_bearer_or_body() {
        let req = Endpoint::DeleteVenue(VenueId(1)).request();

        assert_eq!(req.method, Method::Delete);
        assert!(req.bearer.is_none());
    }
}
