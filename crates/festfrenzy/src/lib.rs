//! # FestFrenzy
//!
//! Client for the FestFrenzy college event platform.
//!
//! The crate ties the layers together: transport → protocol → session →
//! pages. [`App`] opens a route, runs the page's session gate, follows any
//! redirect it issues, and hands back the settled [`Screen`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use festfrenzy::prelude::*;
//!
//! # async fn demo() -> Result<(), FestfrenzyError> {
//! let app = App::connect(&ClientConfig::default())?;
//! let screen = app.sign_in("spark@college.edu", "secret").await?;
//! print!("{screen}");
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;

pub use app::{App, Screen};
pub use config::ClientConfig;
pub use error::FestfrenzyError;

pub use festfrenzy_pages as pages;
pub use festfrenzy_protocol as protocol;
pub use festfrenzy_session as session;
pub use festfrenzy_transport as transport;

pub mod prelude {
    pub use crate::{App, ClientConfig, FestfrenzyError, Screen};
    pub use festfrenzy_pages::{
        AdminDashboard, AdminTab, EventsPage, LoginPage, OrganizerDashboard, OrganizerTab,
        Page, PageConfig, Reconcile,
    };
    pub use festfrenzy_protocol::{ApiClient, Credential, EventId, Role, UserId, VenueId};
    pub use festfrenzy_session::{
        CredentialStore, FileStore, MemoryStore, Navigation, Route, SessionContext,
    };
    pub use festfrenzy_transport::{HttpTransport, ReqwestTransport};
}
