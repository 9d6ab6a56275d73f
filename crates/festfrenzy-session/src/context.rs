//! The session context handed to every page.
//!
//! Pages never reach for a global credential. They receive a
//! [`SessionContext`] and read the store through it, so a test can hand
//! a page a [`MemoryStore`](crate::MemoryStore) and a mock transport and
//! nothing else.

use std::sync::Arc;

use festfrenzy_protocol::{ApiClient, Credential, LoginForm};
use festfrenzy_transport::HttpTransport;

use crate::{CredentialStore, Navigation, Route, SessionError, SessionGate, Verdict};

/// Sign-in failure text when the backend gave no detail.
pub const SIGN_IN_FAILED: &str = "Sign in failed. Check credentials.";

/// Longest password (in bytes) the backend's hashing accepts.
const MAX_PASSWORD_BYTES: usize = 72;

/// The credential store and API client for one running UI.
///
/// Cloning is cheap: both halves are reference counted.
pub struct SessionContext<S, T> {
    store: Arc<S>,
    api: ApiClient<T>,
}

impl<S, T> Clone for SessionContext<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            api: self.api.clone(),
        }
    }
}

impl<S: CredentialStore, T: HttpTransport> SessionContext<S, T> {
    pub fn new(store: S, api: ApiClient<T>) -> Self {
        Self {
            store: Arc::new(store),
            api,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// The stored credential, if any. Read errors count as "none".
    pub fn credential(&self) -> Option<Credential> {
        self.store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read credential");
            None
        })
    }

    /// Runs `gate` against this context's store and API.
    pub async fn admit(&self, gate: &mut SessionGate) -> Verdict {
        gate.resolve(self.store.as_ref(), &self.api).await
    }

    /// Signs in with email and password.
    ///
    /// On success the token is stored and the caller is sent to the
    /// organizer dashboard, whose gate re-routes admins to theirs.
    ///
    /// # Errors
    /// - [`SessionError::InvalidInput`] for an empty field or a password
    ///   longer than 72 bytes (no request is sent)
    /// - [`SessionError::Api`] when the backend rejects the credentials
    /// - [`SessionError::Storage`] when the token can't be saved
    pub async fn sign_in(&self, form: &LoginForm) -> Result<Navigation, SessionError> {
        if form.email.trim().is_empty() || form.password.is_empty() {
            return Err(SessionError::InvalidInput(
                "Email and password are required.".into(),
            ));
        }
        if form.password.len() > MAX_PASSWORD_BYTES {
            return Err(SessionError::InvalidInput(
                "Password must be 72 characters or less.".into(),
            ));
        }

        let token = self.api.login(form).await?;
        self.store.save(&token.into_credential())?;
        tracing::info!(email = %form.email, "signed in");

        Ok(Navigation::new(Route::OrganizerDashboard))
    }

    /// Signs out: clears the credential and heads back to login.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the slot can't be cleared.
    pub fn sign_out(&self) -> Result<Navigation, SessionError> {
        self.store.clear()?;
        tracing::info!("signed out");
        Ok(Navigation::new(Route::Login))
    }
}
