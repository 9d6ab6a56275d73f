//! Page controllers for FestFrenzy.
//!
//! Each page owns its state (lists, form drafts, notices) and exposes the
//! actions a user can take on it. Rendering is plain [`Display`]: the
//! terminal front end prints a page, a browser front end would map the
//! same state onto widgets.
//!
//! Every gated page follows one lifecycle, implemented once in [`mount`]:
//!
//! ```text
//! mount()
//!   ├─ session gate ──→ Navigate(..)        leave the page
//!   └─ admitted ──→ batch fetch ──→ Ready   render
//!                               └─→ Failed  single error banner
//! unmount() ──→ any response still in flight is ignored
//! ```
//!
//! [`Display`]: std::fmt::Display

#![allow(async_fn_in_trait)]

mod admin;
mod cancel;
mod committee;
mod config;
mod error;
mod events;
mod format;
mod header;
mod login;
mod organizer;
mod page;
mod validation;

pub use admin::{AdminDashboard, AdminTab, ADMIN_LOAD_FAILED, APPROVE_FAILED, ADD_VENUE_FAILED, DELETE_VENUE_FAILED};
pub use cancel::CancelToken;
pub use committee::{category_of, CommitteeGroup, COMMITTEES};
pub use config::{LoadState, PageConfig, Reconcile};
pub use error::PageError;
pub use events::{EventsPage, EVENTS_LOAD_FAILED};
pub use format::{
    format_cost, format_datetime, format_entry_fee, format_event_dates,
    parse_local_datetime,
};
pub use header::{initials, Header, NavEntry};
pub use login::{LoginPage, LoginView};
pub use organizer::{
    OrganizerDashboard, OrganizerTab, CREATE_EVENT_FAILED, EVENT_CREATED,
    ORGANIZER_LOAD_FAILED,
};
pub use page::{mount, Lifecycle, Page, PageFlow};
pub use validation::{
    EventDraft, VenueDraft, ALL_FIELDS_REQUIRED, END_BEFORE_START,
    INVALID_CAPACITY, INVALID_COST, INVALID_DATETIME,
};
