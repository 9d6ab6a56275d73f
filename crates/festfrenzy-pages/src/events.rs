//! The public events browser.
//!
//! Anyone may view it. A valid credential only changes the header; a
//! stale one is dropped and the page carries on as a guest.

use std::fmt;

use festfrenzy_protocol::{Event, EventId};
use festfrenzy_session::{Audience, CredentialStore, GatePolicy, SessionContext};
use festfrenzy_transport::HttpTransport;

use crate::{
    category_of, format_entry_fee, format_event_dates, Header, Lifecycle, Page, PageConfig,
    PageError, COMMITTEES,
};

pub const EVENTS_LOAD_FAILED: &str = "Could not load events. Please try refreshing the page.";

pub struct EventsPage {
    lifecycle: Lifecycle,
    config: PageConfig,
    events: Vec<Event>,
    committee: Option<String>,
    selected: Option<EventId>,
}

impl EventsPage {
    pub fn new(config: PageConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(GatePolicy::public()),
            config,
            events: Vec::new(),
            committee: None,
            selected: None,
        }
    }

    /// `"guest"`, or the signed-in viewer's role.
    pub fn role_label(&self) -> &str {
        self.lifecycle.audience().map_or("guest", Audience::role_label)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn committee(&self) -> Option<&str> {
        self.committee.as_deref()
    }

    /// Selects a committee, or clears the filter if it's already selected.
    pub fn toggle_committee(&mut self, committee: &str) {
        if self.committee.as_deref() == Some(committee) {
            self.committee = None;
        } else {
            self.committee = Some(committee.to_string());
        }
    }

    pub fn clear_committee(&mut self) {
        self.committee = None;
    }

    /// Events passing the committee filter, in backend order.
    pub fn visible_events(&self) -> Vec<&Event> {
        match &self.committee {
            None => self.events.iter().collect(),
            Some(committee) => self
                .events
                .iter()
                .filter(|event| event.committee() == Some(committee.as_str()))
                .collect(),
        }
    }

    /// Text shown when no event passes the filter.
    pub fn empty_message(&self) -> String {
        match &self.committee {
            Some(committee) => format!("No upcoming events found for {committee}."),
            None => "No upcoming events scheduled right now.".to_string(),
        }
    }

    /// Opens the detail view for an event. Returns it if it exists.
    pub fn select_event(&mut self, id: EventId) -> Option<&Event> {
        let found = self.events.iter().position(|event| event.id == id)?;
        self.selected = Some(id);
        self.events.get(found)
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let id = self.selected?;
        self.events.iter().find(|event| event.id == id)
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>, event: &Event) -> fmt::Result {
        let offset = self.config.display_offset();
        writeln!(f, "\n{}", event.title)?;
        if let Some(committee) = event.committee() {
            match category_of(committee) {
                Some(category) => writeln!(f, "by {committee} ({category})")?,
                None => writeln!(f, "by {committee}")?,
            }
        }
        writeln!(f, "{}", event.description)?;
        writeln!(f, "When:     {}", format_event_dates(event.event_datetime, event.end_datetime, offset))?;
        writeln!(f, "Where:    {}, {}", event.venue.name, event.venue.location)?;
        writeln!(f, "Capacity: {}", event.capacity)?;
        writeln!(f, "Entry:    {}", format_entry_fee(event.cost, &self.config.currency_symbol))
    }
}

impl Page for EventsPage {
    type Data = Vec<Event>;

    const LOAD_FAILED: &'static str = EVENTS_LOAD_FAILED;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    async fn fetch<S, T>(
        &self,
        ctx: &SessionContext<S, T>,
        _audience: &Audience,
    ) -> Result<Self::Data, PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        Ok(ctx.api().list_events().await?)
    }

    fn apply(&mut self, events: Self::Data) {
        self.events = events;
        if self.selected_event().is_none() {
            self.selected = None;
        }
    }

    /// Public page: backend details are never shown to visitors.
    fn load_error(_error: &PageError) -> String {
        EVENTS_LOAD_FAILED.to_string()
    }
}

impl fmt::Display for EventsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lifecycle.is_blocking() || self.lifecycle.load_state().is_loading() {
            return writeln!(f, "Loading...");
        }

        write!(f, "{}", Header::for_audience(self.lifecycle.audience()))?;

        if let Some(event) = self.selected_event() {
            return self.write_details(f, event);
        }

        writeln!(f, "\nUpcoming Events")?;
        if let Some(committee) = &self.committee {
            writeln!(f, "Filtered by: {committee}")?;
        }
        if let Some(error) = self.lifecycle.load_state().error() {
            writeln!(f, "Error")?;
            writeln!(f, "{error}")?;
        } else {
            let visible = self.visible_events();
            if visible.is_empty() {
                writeln!(f, "{}", self.empty_message())?;
            }
            let offset = self.config.display_offset();
            for event in visible {
                writeln!(
                    f,
                    "  [{}] {} | {} | {} | {}",
                    event.id,
                    event.title,
                    format_event_dates(event.event_datetime, event.end_datetime, offset),
                    event.venue.name,
                    format_entry_fee(event.cost, &self.config.currency_symbol),
                )?;
            }
        }

        writeln!(f, "\nExplore College Committees")?;
        for group in COMMITTEES {
            writeln!(f, "  {}: {}", group.category, group.committees.join(", "))?;
        }
        Ok(())
    }
}
