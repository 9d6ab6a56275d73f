//! Typed client over an [`HttpTransport`].

use std::sync::Arc;

use festfrenzy_transport::{HttpRequest, HttpTransport};
use serde::de::DeserializeOwned;

use crate::{
    AccessToken, ApiError, Codec, Credential, Endpoint, Event, JsonCodec,
    LoginForm, NewEvent, NewVenue, Organizer, UserId, Venue, VenueId, Viewer,
};

/// One typed async method per backend endpoint.
///
/// ## Generic parameters
///
/// - `T: HttpTransport` → how bytes reach the backend. Production code
///   uses `ReqwestTransport`; tests use `MockTransport`.
/// - `C: Codec` → how bodies are encoded. Defaults to [`JsonCodec`], so
///   most code just writes `ApiClient<T>`.
///
/// The transport sits behind an `Arc`, so cloning the client is cheap
/// and every page can hold its own handle.
pub struct ApiClient<T, C = JsonCodec> {
    transport: Arc<T>,
    codec: C,
}

impl<T, C: Clone> Clone for ApiClient<T, C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            codec: self.codec.clone(),
        }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a JSON client over `transport`.
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Creates a JSON client over a transport the caller keeps a handle to.
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self::with_codec(transport, JsonCodec)
    }
}

impl<T: HttpTransport, C: Codec> ApiClient<T, C> {
    /// Creates a client with an explicit codec.
    pub fn with_codec(transport: Arc<T>, codec: C) -> Self {
        Self { transport, codec }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -- Session --

    /// `GET /api/users/me`: who does this credential belong to?
    pub async fn current_viewer(&self, credential: &Credential) -> Result<Viewer, ApiError> {
        let endpoint = Endpoint::CurrentUser;
        self.call(endpoint, bearer(endpoint, credential)).await
    }

    /// `POST /api/organizer/login` with form-encoded credentials.
    pub async fn login(&self, form: &LoginForm) -> Result<AccessToken, ApiError> {
        let endpoint = Endpoint::Login;
        self.call(endpoint, endpoint.request().form(form.to_pairs())).await
    }

    // -- Venues --

    /// `GET /api/venues` (public).
    pub async fn list_venues(&self) -> Result<Vec<Venue>, ApiError> {
        let endpoint = Endpoint::ListVenues;
        self.call(endpoint, endpoint.request()).await
    }

    /// `POST /api/admin/venues`. Returns the venue as the backend stored it.
    pub async fn create_venue(
        &self,
        credential: &Credential,
        venue: &NewVenue,
    ) -> Result<Venue, ApiError> {
        let endpoint = Endpoint::CreateVenue;
        let body = self.codec.encode(venue)?;
        self.call(endpoint, bearer(endpoint, credential).json(body)).await
    }

    /// `DELETE /api/admin/venues/{id}`. Returns the deleted venue.
    pub async fn delete_venue(
        &self,
        credential: &Credential,
        id: VenueId,
    ) -> Result<Venue, ApiError> {
        let endpoint = Endpoint::DeleteVenue(id);
        self.call(endpoint, bearer(endpoint, credential)).await
    }

    // -- Organizer approval --

    /// `GET /api/admin/pending-organizers`.
    pub async fn pending_organizers(
        &self,
        credential: &Credential,
    ) -> Result<Vec<Organizer>, ApiError> {
        let endpoint = Endpoint::PendingOrganizers;
        self.call(endpoint, bearer(endpoint, credential)).await
    }

    /// `POST /api/admin/approve-organizer/{id}`. Returns the updated account.
    pub async fn approve_organizer(
        &self,
        credential: &Credential,
        id: UserId,
    ) -> Result<Viewer, ApiError> {
        let endpoint = Endpoint::ApproveOrganizer(id);
        self.call(endpoint, bearer(endpoint, credential)).await
    }

    // -- Events --

    /// `GET /api/events` (public).
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let endpoint = Endpoint::ListEvents;
        self.call(endpoint, endpoint.request()).await
    }

    /// `GET /api/organizer/events`: events owned by the credential's organizer.
    pub async fn my_events(&self, credential: &Credential) -> Result<Vec<Event>, ApiError> {
        let endpoint = Endpoint::MyEvents;
        self.call(endpoint, bearer(endpoint, credential)).await
    }

    /// `POST /api/organizer/events`. Returns the event as the backend stored it.
    pub async fn create_event(
        &self,
        credential: &Credential,
        event: &NewEvent,
    ) -> Result<Event, ApiError> {
        let endpoint = Endpoint::CreateEvent;
        let body = self.codec.encode(event)?;
        self.call(endpoint, bearer(endpoint, credential).json(body)).await
    }

    // -----------------------------------------------------------------------

    /// Sends `request` and decodes a 2xx body as `R`.
    ///
    /// Non-2xx responses become [`ApiError::Rejected`] carrying the
    /// backend's detail text.
    async fn call<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: HttpRequest,
    ) -> Result<R, ApiError> {
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(?endpoint, error = %e, "request failed");
        })?;

        if !response.is_success() {
            let error = ApiError::rejected(response.status, &response.body);
            tracing::warn!(
                ?endpoint,
                status = response.status,
                detail = ?error.detail(),
                "request rejected"
            );
            return Err(error);
        }

        self.codec.decode(&response.body)
    }
}

fn bearer(endpoint: Endpoint, credential: &Credential) -> HttpRequest {
    endpoint.request().bearer(credential.expose())
}
