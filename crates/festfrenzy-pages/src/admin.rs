//! The admin dashboard: organizer approvals and venue management.

use std::fmt;

use festfrenzy_protocol::{ApiError, Credential, Organizer, UserId, Venue, VenueId, Viewer};
use festfrenzy_session::{Audience, CredentialStore, GatePolicy, SessionContext};
use festfrenzy_transport::HttpTransport;
use futures_util::future::try_join;

use crate::{Header, Lifecycle, Page, PageConfig, PageError, Reconcile, VenueDraft};

pub const ADMIN_LOAD_FAILED: &str = "Could not load data.";
pub const APPROVE_FAILED: &str = "Could not approve organizer.";
pub const ADD_VENUE_FAILED: &str = "Could not add venue.";
pub const DELETE_VENUE_FAILED: &str = "Could not delete venue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    ApproveOrganizers,
    ManageVenues,
}

pub struct AdminDashboard {
    lifecycle: Lifecycle,
    config: PageConfig,
    tab: AdminTab,
    pending: Vec<Organizer>,
    venues: Vec<Venue>,
    venue_draft: VenueDraft,
    venue_error: Option<String>,
    alert: Option<String>,
}

impl AdminDashboard {
    pub fn new(config: PageConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(GatePolicy::admin_dashboard()),
            config,
            tab: AdminTab::default(),
            pending: Vec::new(),
            venues: Vec::new(),
            venue_draft: VenueDraft::default(),
            venue_error: None,
            alert: None,
        }
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.lifecycle.viewer()
    }

    pub fn pending(&self) -> &[Organizer] {
        &self.pending
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
    }

    pub fn venue_draft_mut(&mut self) -> &mut VenueDraft {
        &mut self.venue_draft
    }

    pub fn venue_draft(&self) -> &VenueDraft {
        &self.venue_draft
    }

    /// Inline error under the add-venue form.
    pub fn venue_error(&self) -> Option<&str> {
        self.venue_error.as_deref()
    }

    /// Message from the last failed approve or delete.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Approves a pending organizer and drops them from the list.
    /// A failure leaves the list as it was.
    pub async fn approve_organizer<S, T>(
        &mut self,
        ctx: &SessionContext<S, T>,
        id: UserId,
    ) -> Result<(), PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        self.alert = None;
        let credential = self.lifecycle.credential()?;

        let result = ctx.api().approve_organizer(&credential, id).await;
        if self.lifecycle.is_cancelled() {
            return Err(PageError::Cancelled);
        }

        match result {
            Ok(approved) => {
                tracing::info!(%id, name = %approved.name, "organizer approved");
                self.pending.retain(|organizer| organizer.id != id);
                if self.config.reconcile == Reconcile::Refetch {
                    let refreshed = ctx.api().pending_organizers(&credential).await;
                    self.reconcile(refreshed, |page, list| page.pending = list);
                }
                Ok(())
            }
            Err(error) => Err(self.fail_alert(error, APPROVE_FAILED)),
        }
    }

    /// Validates the venue draft and creates the venue.
    ///
    /// The venue appended to the list is the one the backend returned.
    pub async fn add_venue<S, T>(&mut self, ctx: &SessionContext<S, T>) -> Result<(), PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        self.venue_error = None;
        let credential = self.lifecycle.credential()?;
        let new_venue = match self.venue_draft.validate() {
            Ok(venue) => venue,
            Err(error) => {
                self.venue_error = Some(error.message_or(ADD_VENUE_FAILED));
                return Err(error);
            }
        };

        let result = ctx.api().create_venue(&credential, &new_venue).await;
        if self.lifecycle.is_cancelled() {
            return Err(PageError::Cancelled);
        }

        match result {
            Ok(venue) => {
                tracing::info!(id = %venue.id, name = %venue.name, "venue added");
                self.venues.push(venue);
                self.venue_draft = VenueDraft::default();
                self.refetch_venues(ctx).await;
                Ok(())
            }
            Err(error) => {
                self.venue_error = Some(error.message_or(ADD_VENUE_FAILED));
                Err(error.into())
            }
        }
    }

    /// Deletes a venue. The caller is responsible for confirming first.
    /// A failure leaves the list exactly as it was.
    pub async fn delete_venue<S, T>(
        &mut self,
        ctx: &SessionContext<S, T>,
        id: VenueId,
    ) -> Result<(), PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        self.alert = None;
        let credential = self.lifecycle.credential()?;

        let result = ctx.api().delete_venue(&credential, id).await;
        if self.lifecycle.is_cancelled() {
            return Err(PageError::Cancelled);
        }

        match result {
            Ok(_) => {
                tracing::info!(%id, "venue deleted");
                self.venues.retain(|venue| venue.id != id);
                self.refetch_venues(ctx).await;
                Ok(())
            }
            Err(error) => Err(self.fail_alert(error, DELETE_VENUE_FAILED)),
        }
    }

    async fn refetch_venues<S, T>(&mut self, ctx: &SessionContext<S, T>)
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        if self.config.reconcile == Reconcile::Refetch {
            let refreshed = ctx.api().list_venues().await;
            self.reconcile(refreshed, |page, list| page.venues = list);
        }
    }

    /// Applies a post-mutation refetch. A failed refetch keeps the
    /// locally updated list.
    fn reconcile<L>(&mut self, refreshed: Result<L, ApiError>, replace: impl FnOnce(&mut Self, L)) {
        if self.lifecycle.is_cancelled() {
            return;
        }
        match refreshed {
            Ok(list) => replace(self, list),
            Err(error) => tracing::warn!(error = %error, "refetch after mutation failed, keeping local list"),
        }
    }

    fn fail_alert(&mut self, error: ApiError, fallback: &str) -> PageError {
        let message = error.message_or(fallback);
        tracing::warn!(%message, "admin action failed");
        self.alert = Some(message);
        error.into()
    }
}

impl Page for AdminDashboard {
    type Data = (Vec<Organizer>, Vec<Venue>);

    const LOAD_FAILED: &'static str = ADMIN_LOAD_FAILED;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    async fn fetch<S, T>(
        &self,
        ctx: &SessionContext<S, T>,
        audience: &Audience,
    ) -> Result<Self::Data, PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        let credential: &Credential = audience.credential().ok_or(PageError::NotSignedIn)?;
        let batch = try_join(ctx.api().pending_organizers(credential), ctx.api().list_venues()).await;
        Ok(batch?)
    }

    fn apply(&mut self, (pending, venues): Self::Data) {
        self.pending = pending;
        self.venues = venues;
    }
}

impl fmt::Display for AdminDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lifecycle.is_blocking() {
            return writeln!(f, "Loading...");
        }
        if let Some(error) = self.lifecycle.load_state().error() {
            writeln!(f, "Error")?;
            return writeln!(f, "{error}");
        }

        write!(f, "{}", Header::for_audience(self.lifecycle.audience()))?;
        writeln!(f, "\nAdmin Dashboard")?;
        writeln!(f, "Manage organizers and venues")?;
        if let Some(alert) = &self.alert {
            writeln!(f, "! {alert}")?;
        }

        match self.tab {
            AdminTab::ApproveOrganizers => {
                writeln!(f, "\nApprove Organizers")?;
                if self.pending.is_empty() {
                    return writeln!(f, "No organizers pending approval.");
                }
                for organizer in &self.pending {
                    writeln!(f, "  [{}] {} <{}>", organizer.id, organizer.name, organizer.email)?;
                }
                Ok(())
            }
            AdminTab::ManageVenues => {
                writeln!(f, "\nExisting Venues")?;
                if self.venues.is_empty() {
                    writeln!(f, "No venues created yet.")?;
                }
                for venue in &self.venues {
                    writeln!(f, "  [{}] {} - {} (Cap: {})", venue.id, venue.name, venue.location, venue.capacity)?;
                }
                if let Some(error) = &self.venue_error {
                    writeln!(f, "\nAdd New Venue: {error}")?;
                }
                Ok(())
            }
        }
    }
}
