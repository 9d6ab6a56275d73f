//! The organizer dashboard: the organizer's own events, the venue list,
//! and the create-event form.

use std::fmt;

use festfrenzy_protocol::{ApiError, Credential, Event, Venue, Viewer};
use festfrenzy_session::{Audience, CredentialStore, GatePolicy, SessionContext};
use festfrenzy_transport::HttpTransport;
use futures_util::future::try_join;

use crate::{
    format_cost, format_event_dates, EventDraft, Header, Lifecycle, Page, PageConfig,
    PageError, Reconcile,
};

pub const ORGANIZER_LOAD_FAILED: &str = "Could not load dashboard data.";
pub const CREATE_EVENT_FAILED: &str = "Could not create event.";
pub const EVENT_CREATED: &str = "Event created successfully!";

/// The dashboard's tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrganizerTab {
    #[default]
    MyEvents,
    /// Static placeholder; payment verification isn't built.
    VerifyPayments,
    CreateEvent,
}

pub struct OrganizerDashboard {
    lifecycle: Lifecycle,
    config: PageConfig,
    tab: OrganizerTab,
    venues: Vec<Venue>,
    events: Vec<Event>,
    draft: EventDraft,
    create_error: Option<String>,
    notice: Option<String>,
}

impl OrganizerDashboard {
    pub fn new(config: PageConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(GatePolicy::organizer_dashboard()),
            config,
            tab: OrganizerTab::default(),
            venues: Vec::new(),
            events: Vec::new(),
            draft: EventDraft::default(),
            create_error: None,
            notice: None,
        }
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.lifecycle.viewer()
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// The organizer's events, earliest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn tab(&self) -> OrganizerTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: OrganizerTab) {
        self.tab = tab;
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

    /// Inline error under the create-event form.
    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    /// Confirmation after a successful create.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Validates the draft and creates the event.
    ///
    /// On success the server's record is added and the list re-sorted by
    /// start time, and the draft is reset. On failure the draft is kept
    /// and [`create_error`](Self::create_error) explains why.
    pub async fn create_event<S, T>(&mut self, ctx: &SessionContext<S, T>) -> Result<(), PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        self.create_error = None;
        self.notice = None;

        let credential = self.lifecycle.credential()?;
        let new_event = match self.draft.validate(self.config.display_offset()) {
            Ok(event) => event,
            Err(error) => {
                self.create_error = Some(error.message_or(CREATE_EVENT_FAILED));
                return Err(error);
            }
        };

        let result = ctx.api().create_event(&credential, &new_event).await;
        if self.lifecycle.is_cancelled() {
            return Err(PageError::Cancelled);
        }

        match result {
            Ok(event) => {
                tracing::info!(id = %event.id, title = %event.title, "event created");
                self.events.push(event);
                self.sort_events();
                self.draft = EventDraft::default();
                self.notice = Some(EVENT_CREATED.to_string());
                if self.config.reconcile == Reconcile::Refetch {
                    self.refetch_events(ctx, &credential).await;
                }
                Ok(())
            }
            Err(error) => {
                self.create_error = Some(error.message_or(CREATE_EVENT_FAILED));
                Err(error.into())
            }
        }
    }

    async fn refetch_events<S, T>(&mut self, ctx: &SessionContext<S, T>, credential: &Credential)
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        let result = ctx.api().my_events(credential).await;
        if self.lifecycle.is_cancelled() {
            return;
        }
        match result {
            Ok(events) => {
                self.events = events;
                self.sort_events();
            }
            Err(error) => tracing::warn!(error = %error, "refetch after create failed, keeping local list"),
        }
    }

    fn sort_events(&mut self) {
        self.events.sort_by_key(|event| event.event_datetime);
    }
}

impl Page for OrganizerDashboard {
    type Data = (Vec<Venue>, Vec<Event>);

    const LOAD_FAILED: &'static str = ORGANIZER_LOAD_FAILED;

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
        let credential = audience.credential().ok_or(PageError::NotSignedIn)?;
        let batch: Result<_, ApiError> =
            try_join(ctx.api().list_venues(), ctx.api().my_events(credential)).await;
        Ok(batch?)
    }

    fn apply(&mut self, (venues, events): Self::Data) {
        self.venues = venues;
        self.events = events;
        self.sort_events();
    }
}

impl fmt::Display for OrganizerDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lifecycle.is_blocking() {
            return writeln!(f, "Loading...");
        }
        if let Some(error) = self.lifecycle.load_state().error() {
            writeln!(f, "Error")?;
            return writeln!(f, "{error}");
        }

        write!(f, "{}", Header::for_audience(self.lifecycle.audience()))?;
        let name = self.viewer().map_or("Organizer", |v| v.name.as_str());
        writeln!(f, "\nWelcome, {name}")?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }

        match self.tab {
            OrganizerTab::MyEvents => {
                writeln!(f, "\nMy Events")?;
                if self.lifecycle.load_state().is_loading() {
                    return writeln!(f, "Loading...");
                }
                if self.events.is_empty() {
                    return writeln!(f, "You haven't created any events yet.");
                }
                let offset = self.config.display_offset();
                for event in &self.events {
                    writeln!(
                        f,
                        "  {} | {} | {} ({}) | {} | {}",
                        event.title,
                        format_event_dates(event.event_datetime, event.end_datetime, offset),
                        event.venue.name,
                        event.venue.location,
                        event.capacity,
                        format_cost(event.cost, &self.config.currency_symbol),
                    )?;
                }
                Ok(())
            }
            OrganizerTab::VerifyPayments => {
                writeln!(f, "\nVerify Payments")?;
                writeln!(f, "Payment verification feature coming soon.")
            }
            OrganizerTab::CreateEvent => {
                writeln!(f, "\nCreate New Event")?;
                if self.venues.is_empty() {
                    writeln!(f, "No venues available. Ask admin to add some.")?;
                } else {
                    writeln!(f, "Venues:")?;
                    for venue in &self.venues {
                        writeln!(f, "  [{}] {} - {} (Cap: {})", venue.id, venue.name, venue.location, venue.capacity)?;
                    }
                }
                if let Some(error) = &self.create_error {
                    writeln!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}
