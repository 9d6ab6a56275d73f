//! Identity lookup hook.
//!
//! The gate doesn't talk HTTP itself. It asks an [`IdentityResolver`]
//! "whose credential is this?", which lets tests swap in a resolver that
//! counts calls or returns a canned viewer without scripting a transport.

use std::future::Future;

use festfrenzy_protocol::{ApiClient, ApiError, Codec, Credential, Viewer};
use festfrenzy_transport::HttpTransport;

/// Resolves a credential to the account it belongs to.
///
/// # Example
///
/// ```rust
/// use festfrenzy_protocol::{ApiError, Credential, Role, UserId, Viewer};
/// use festfrenzy_session::IdentityResolver;
///
/// /// Treats every credential as the same organizer.
/// struct AlwaysOrganizer;
///
/// impl IdentityResolver for AlwaysOrganizer {
///     async fn resolve(&self, _credential: &Credential) -> Result<Viewer, ApiError> {
///         Ok(Viewer {
///             id: UserId(1),
///             name: "SPark".into(),
///             email: "spark@college.edu".into(),
///             role: Role::Organizer,
///             is_approved: true,
///         })
///     }
/// }
/// ```
pub trait IdentityResolver: Send + Sync + 'static {
    /// Looks up the viewer behind `credential`.
    ///
    /// Any error (rejected, expired, network down) means the credential
    /// can't be trusted.
    fn resolve(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Viewer, ApiError>> + Send;
}

/// The real resolver: `GET /api/users/me` with the credential as bearer.
impl<T: HttpTransport, C: Codec> IdentityResolver for ApiClient<T, C> {
    async fn resolve(&self, credential: &Credential) -> Result<Viewer, ApiError> {
        self.current_viewer(credential).await
    }
}
