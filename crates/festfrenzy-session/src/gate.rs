//! The session gate: decides, once per page mount, whether the viewer
//! may see the page and, if not, where to send them.
//!
//! Every page runs the same protocol. Only the [`GatePolicy`] differs:
//! which roles are accepted, where other dashboard roles are sent, and
//! whether failures redirect (protected pages) or fall back to a guest
//! view (the public events page).

use festfrenzy_protocol::{Credential, Role, Viewer};

use crate::{CredentialStore, IdentityResolver, Navigation, Route};

/// Notice shown on the login page when identity lookup fails and the
/// backend gave no explanation.
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Notice shown on the login page when the viewer's role has no business
/// on the page they asked for.
pub const PERMISSION_DENIED: &str = "You do not have permission to view this page.";

// ---------------------------------------------------------------------------
// GatePolicy
// ---------------------------------------------------------------------------

/// Whether a page can be seen without signing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GateMode {
    /// Only accepted roles get in; everyone else is redirected.
    Protected,
    /// Everyone gets in. A valid credential only adds the viewer's role.
    Relaxed,
}

/// The per-page parameters of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    mode: GateMode,
    accepted: Vec<Role>,
    redirects: Vec<(Role, Route)>,
}

impl GatePolicy {
    /// A protected page that admits the given roles.
    pub fn protected(accepted: impl IntoIterator<Item = Role>) -> Self {
        Self {
            mode: GateMode::Protected,
            accepted: accepted.into_iter().collect(),
            redirects: Vec::new(),
        }
    }

    /// A page anyone may see.
    pub fn public() -> Self {
        Self {
            mode: GateMode::Relaxed,
            accepted: Vec::new(),
            redirects: Vec::new(),
        }
    }

    /// Sends viewers with `role` to `to` without an error.
    pub fn redirect(mut self, role: Role, to: Route) -> Self {
        self.redirects.push((role, to));
        self
    }

    /// Organizers only; admins are sent to their own dashboard.
    pub fn organizer_dashboard() -> Self {
        Self::protected([Role::Organizer]).redirect(Role::Admin, Route::AdminDashboard)
    }

    /// Admins only; organizers are sent to their own dashboard.
    pub fn admin_dashboard() -> Self {
        Self::protected([Role::Admin]).redirect(Role::Organizer, Route::OrganizerDashboard)
    }

    pub fn accepts(&self, role: &Role) -> bool {
        self.mode == GateMode::Relaxed || self.accepted.contains(role)
    }

    pub fn redirect_for(&self, role: &Role) -> Option<Route> {
        self.redirects
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, to)| *to)
    }
}

// ---------------------------------------------------------------------------
// GateState
// ---------------------------------------------------------------------------

/// Where the gate is in its lifecycle.
///
/// ```text
///                              ┌──→ Authorized   (render the page)
///                              ├──→ Rerouted     (other role's home, silent)
/// Unresolved ──→ Resolving ────┼──→ WrongRole    (login + permission notice)
///                              ├──→ Unauthenticated (login)
///                              └──→ Guest        (relaxed pages only)
/// ```
///
/// `Unresolved` and `Resolving` are the only non-terminal states. While
/// in either, the page shows its blocking loader and fetches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unresolved,
    Resolving,
    Unauthenticated,
    WrongRole,
    Rerouted(Route),
    Authorized,
    Guest,
}

impl GateState {
    /// Returns `true` once the gate has reached a terminal state.
    pub fn is_settled(&self) -> bool {
        !self.is_blocking()
    }

    /// Returns `true` while the page must show its full-screen loader.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Unresolved | Self::Resolving)
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Who the page is being rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Nobody is signed in (relaxed pages only).
    Guest,
    /// A resolved viewer and the credential that proved it.
    Member {
        viewer: Viewer,
        credential: Credential,
    },
}

impl Audience {
    pub fn viewer(&self) -> Option<&Viewer> {
        match self {
            Self::Guest => None,
            Self::Member { viewer, .. } => Some(viewer),
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Guest => None,
            Self::Member { credential, .. } => Some(credential),
        }
    }

    /// The role name shown in the header: `"guest"` or the viewer's role.
    pub fn role_label(&self) -> &str {
        self.viewer().map_or("guest", |v| v.role.as_str())
    }
}

/// The outcome of running the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Render the page for this audience.
    Admit(Audience),
    /// Leave the page.
    Navigate(Navigation),
}

// ---------------------------------------------------------------------------
// SessionGate
// ---------------------------------------------------------------------------

/// The gate state machine for one page.
#[derive(Debug, Clone)]
pub struct SessionGate {
    policy: GatePolicy,
    state: GateState,
}

impl SessionGate {
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy,
            state: GateState::Unresolved,
        }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Runs the gate and settles it.
    ///
    /// 1. No stored credential → settle without a network call.
    /// 2. Otherwise look the credential up via `resolver`.
    ///    - accepted role → `Authorized`
    ///    - another dashboard role → `Rerouted` to that role's home
    ///    - any other role → clear the credential, `WrongRole`
    ///    - lookup failure → clear the credential, `Unauthenticated`
    ///      (or `Guest` on relaxed pages)
    ///
    /// Store failures are logged and treated as "no credential", so the
    /// gate always settles.
    pub async fn resolve<S, R>(&mut self, store: &S, resolver: &R) -> Verdict
    where
        S: CredentialStore,
        R: IdentityResolver,
    {
        self.state = GateState::Resolving;

        let credential = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read credential, treating as signed out");
            None
        });

        let Some(credential) = credential else {
            return match self.policy.mode {
                GateMode::Protected => self.settle(
                    GateState::Unauthenticated,
                    Verdict::Navigate(Navigation::new(Route::Login)),
                ),
                GateMode::Relaxed => {
                    self.settle(GateState::Guest, Verdict::Admit(Audience::Guest))
                }
            };
        };

        let lookup = resolver.resolve(&credential).await;
        match lookup {
            Ok(viewer) if self.policy.accepts(&viewer.role) => self.settle(
                GateState::Authorized,
                Verdict::Admit(Audience::Member { viewer, credential }),
            ),
            Ok(viewer) => match self.policy.redirect_for(&viewer.role) {
                Some(home) => self.settle(
                    GateState::Rerouted(home),
                    Verdict::Navigate(Navigation::new(home)),
                ),
                None => {
                    tracing::warn!(role = %viewer.role, "role not allowed on this page");
                    discard(store);
                    self.settle(
                        GateState::WrongRole,
                        Verdict::Navigate(Navigation::with_notice(Route::Login, PERMISSION_DENIED)),
                    )
                }
            },
            Err(error) => {
                tracing::warn!(error = %error, "identity lookup failed");
                discard(store);
                match self.policy.mode {
                    GateMode::Protected => self.settle(
                        GateState::Unauthenticated,
                        Verdict::Navigate(Navigation::with_notice(
                            Route::Login,
                            error.message_or(SESSION_EXPIRED),
                        )),
                    ),
                    GateMode::Relaxed => {
                        self.settle(GateState::Guest, Verdict::Admit(Audience::Guest))
                    }
                }
            }
        }
    }

    fn settle(&mut self, state: GateState, verdict: Verdict) -> Verdict {
        self.state = state;
        tracing::info!(?state, "session gate settled");
        verdict
    }
}

fn discard<S: CredentialStore>(store: &S) {
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "could not clear credential");
    }
}
