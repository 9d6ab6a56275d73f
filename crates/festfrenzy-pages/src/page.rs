//! The shared mount lifecycle for gated pages.
//!
//! A page implements [`Page`] (how to fetch its data, how to apply it)
//! and embeds a [`Lifecycle`] (gate, load state, cancellation). [`mount`]
//! drives the rest, so the gate-then-fetch protocol is written once
//! instead of once per page.

use std::future::Future;

use festfrenzy_protocol::{Credential, Viewer};
use festfrenzy_session::{
    Audience, CredentialStore, GatePolicy, GateState, Navigation, SessionContext,
    SessionGate, Verdict,
};
use festfrenzy_transport::HttpTransport;

use crate::{CancelToken, LoadState, PageError};

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Mount state every gated page carries.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    gate: SessionGate,
    load: LoadState,
    cancel: CancelToken,
    audience: Option<Audience>,
}

impl Lifecycle {
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            gate: SessionGate::new(policy),
            load: LoadState::Idle,
            cancel: CancelToken::new(),
            audience: None,
        }
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// `true` while the gate is unsettled: show only the full-screen loader.
    pub fn is_blocking(&self) -> bool {
        self.gate.state().is_blocking()
    }

    pub fn audience(&self) -> Option<&Audience> {
        self.audience.as_ref()
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.audience.as_ref().and_then(Audience::viewer)
    }

    /// The admitted viewer's credential, for mutations.
    pub fn credential(&self) -> Result<Credential, PageError> {
        self.audience
            .as_ref()
            .and_then(Audience::credential)
            .cloned()
            .ok_or(PageError::NotSignedIn)
    }

    /// A handle that cancels this page from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// ---------------------------------------------------------------------------
// Page trait
// ---------------------------------------------------------------------------

/// A page that sits behind the session gate and loads data once admitted.
pub trait Page: Send + Sync {
    /// Everything the page's batch fetch returns.
    type Data: Send;

    /// Error banner text when the batch fails without a server detail.
    const LOAD_FAILED: &'static str;

    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Issues the page's requests as one batch. Any failure fails the
    /// whole batch.
    fn fetch<S, T>(
        &self,
        ctx: &SessionContext<S, T>,
        audience: &Audience,
    ) -> impl Future<Output = Result<Self::Data, PageError>> + Send
    where
        S: CredentialStore,
        T: HttpTransport;

    /// Replaces the page's lists with freshly fetched data.
    fn apply(&mut self, data: Self::Data);

    /// Banner text for a failed batch. Defaults to the server's detail,
    /// falling back to [`LOAD_FAILED`](Self::LOAD_FAILED).
    fn load_error(error: &PageError) -> String {
        error.message_or(Self::LOAD_FAILED)
    }

    /// Leaves the page. Responses still in flight will be ignored.
    fn unmount(&mut self) {
        self.lifecycle().cancel.cancel();
        tracing::debug!("page unmounted");
    }
}

/// What the front end should do after [`mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFlow {
    /// The page is ready to render (possibly with an error banner).
    Render,
    /// The gate sent the viewer elsewhere.
    Navigate(Navigation),
    /// The page was unmounted before mounting finished.
    Abandoned,
}

/// Runs the gate and, if admitted, the page's batch fetch.
///
/// While the gate resolves no data request is issued. After each await
/// the cancel token is checked, so a page unmounted mid-flight is never
/// touched by the late response.
pub async fn mount<P, S, T>(page: &mut P, ctx: &SessionContext<S, T>) -> PageFlow
where
    P: Page,
    S: CredentialStore,
    T: HttpTransport,
{
    let cancel = page.lifecycle().cancel_token();

    let verdict = ctx.admit(&mut page.lifecycle_mut().gate).await;
    if cancel.is_cancelled() {
        tracing::debug!("gate settled after unmount, ignoring");
        return PageFlow::Abandoned;
    }

    let audience = match verdict {
        Verdict::Navigate(navigation) => return PageFlow::Navigate(navigation),
        Verdict::Admit(audience) => audience,
    };

    {
        let lifecycle = page.lifecycle_mut();
        lifecycle.audience = Some(audience.clone());
        lifecycle.load = LoadState::Loading;
    }

    let result = page.fetch(ctx, &audience).await;
    if cancel.is_cancelled() {
        tracing::debug!("batch fetch settled after unmount, ignoring");
        return PageFlow::Abandoned;
    }

    match result {
        Ok(data) => {
            page.apply(data);
            page.lifecycle_mut().load = LoadState::Ready;
        }
        Err(error) => {
            tracing::warn!(error = %error, "batch fetch failed");
            page.lifecycle_mut().load = LoadState::Failed(P::load_error(&error));
        }
    }
    PageFlow::Render
}
