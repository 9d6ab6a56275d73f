//! The `App` router: opens routes and follows gate redirects until a
//! page settles.

use std::fmt;

use festfrenzy_pages::{
    mount, AdminDashboard, EventsPage, LoginPage, OrganizerDashboard, Page, PageConfig,
    PageError, PageFlow,
};
use festfrenzy_protocol::ApiClient;
use festfrenzy_session::{CredentialStore, FileStore, Navigation, Route, SessionContext};
use festfrenzy_transport::{HttpTransport, ReqwestTransport};

use crate::{ClientConfig, FestfrenzyError};

/// Redirects followed before giving up. Two is the most a healthy gate
/// chain needs (dashboard → other dashboard, or anything → login).
const MAX_HOPS: usize = 4;

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The page a navigation settled on, ready to render or act on.
pub enum Screen {
    Login(LoginPage),
    Events(EventsPage),
    Organizer(OrganizerDashboard),
    Admin(AdminDashboard),
    /// A route with no page behind it yet.
    Unavailable(Route),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Events(_) => Route::Events,
            Self::Organizer(_) => Route::OrganizerDashboard,
            Self::Admin(_) => Route::AdminDashboard,
            Self::Unavailable(route) => *route,
        }
    }

    /// The failure message the page is showing, if any: a load banner,
    /// a form error, or an action alert.
    pub fn alert(&self) -> Option<&str> {
        match self {
            Self::Login(page) => page.error(),
            Self::Events(page) => page.lifecycle().load_state().error(),
            Self::Organizer(page) => page
                .lifecycle()
                .load_state()
                .error()
                .or(page.create_error()),
            Self::Admin(page) => page
                .lifecycle()
                .load_state()
                .error()
                .or(page.venue_error())
                .or(page.alert()),
            Self::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login(page) => fmt::Display::fmt(page, f),
            Self::Events(page) => fmt::Display::fmt(page, f),
            Self::Organizer(page) => fmt::Display::fmt(page, f),
            Self::Admin(page) => fmt::Display::fmt(page, f),
            Self::Unavailable(route) => writeln!(f, "FestFrenzy\n{route} is not available yet."),
        }
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Screen").field(&self.route()).finish()
    }
}

enum Step {
    Show(Screen),
    Follow(Navigation),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// One running front end: a session context plus page settings.
///
/// # Example
///
/// ```rust,no_run
/// use festfrenzy::prelude::*;
///
/// # async fn demo() -> Result<(), FestfrenzyError> {
/// let app = App::connect(&ClientConfig::default())?;
/// let screen = app.open(Route::OrganizerDashboard).await?;
/// print!("{screen}");
/// # Ok(())
/// # }
/// ```
pub struct App<S, T> {
    ctx: SessionContext<S, T>,
    pages: PageConfig,
}

impl App<FileStore, ReqwestTransport> {
    /// Builds an app that talks HTTP to `config.api_url` and keeps the
    /// credential under `config.state_dir`.
    ///
    /// # Errors
    /// Returns [`FestfrenzyError::Config`] for a bad URL and
    /// [`FestfrenzyError::Transport`] if the HTTP client can't be built.
    pub fn connect(config: &ClientConfig) -> Result<Self, FestfrenzyError> {
        let transport = ReqwestTransport::new(config.base_url()?, config.timeout)?;
        let store = FileStore::new(&config.state_dir);
        tracing::debug!(api_url = %config.api_url, state = %store.path().display(), "app configured");
        Ok(Self::new(
            SessionContext::new(store, ApiClient::new(transport)),
            config.pages.clone(),
        ))
    }
}

impl<S: CredentialStore, T: HttpTransport> App<S, T> {
    pub fn new(ctx: SessionContext<S, T>, pages: PageConfig) -> Self {
        Self { ctx, pages }
    }

    /// The session context, for acting on an opened screen.
    pub fn context(&self) -> &SessionContext<S, T> {
        &self.ctx
    }

    /// Opens `route`, following redirects.
    pub async fn open(&self, route: Route) -> Result<Screen, FestfrenzyError> {
        self.follow(Navigation::new(route)).await
    }

    /// Follows `navigation` (and any redirects it leads to) to a screen.
    ///
    /// # Errors
    /// Returns [`FestfrenzyError::RedirectLoop`] if no page settles
    /// within a few hops.
    pub async fn follow(&self, navigation: Navigation) -> Result<Screen, FestfrenzyError> {
        let mut next = navigation;
        for _ in 0..MAX_HOPS {
            tracing::debug!(route = %next.to, "opening page");
            match self.visit(next).await? {
                Step::Show(screen) => return Ok(screen),
                Step::Follow(navigation) => next = navigation,
            }
        }
        tracing::warn!(route = %next.to, "gave up following redirects");
        Err(FestfrenzyError::RedirectLoop(next.to))
    }

    /// Signs in as an organizer and opens the resulting dashboard.
    ///
    /// A rejected sign-in is not an error here: the login screen comes
    /// back with its error message set.
    pub async fn sign_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Screen, FestfrenzyError> {
        let mut page = LoginPage::new();
        page.choose_organizer();
        page.set_email(email);
        page.set_password(password);

        match page.submit(&self.ctx).await {
            Ok(navigation) => self.follow(navigation).await,
            Err(error) => {
                tracing::debug!(%error, "staying on login");
                Ok(Screen::Login(page))
            }
        }
    }

    /// Clears the credential and returns to the login screen.
    pub async fn sign_out(&self) -> Result<Screen, FestfrenzyError> {
        let navigation = self.ctx.sign_out()?;
        self.follow(navigation).await
    }

    async fn visit(&self, navigation: Navigation) -> Result<Step, FestfrenzyError> {
        let config = self.pages.clone();
        match navigation.to {
            Route::Login => Ok(Step::Show(Screen::Login(LoginPage::with_notice(
                navigation.notice,
            )))),
            Route::Events => self.show(EventsPage::new(config), Screen::Events).await,
            Route::OrganizerDashboard => {
                self.show(OrganizerDashboard::new(config), Screen::Organizer).await
            }
            Route::AdminDashboard => self.show(AdminDashboard::new(config), Screen::Admin).await,
            Route::Profile => Ok(Step::Show(Screen::Unavailable(Route::Profile))),
        }
    }

    async fn show<P: Page>(&self, mut page: P, wrap: fn(P) -> Screen) -> Result<Step, FestfrenzyError> {
        match mount(&mut page, &self.ctx).await {
            PageFlow::Render => Ok(Step::Show(wrap(page))),
            PageFlow::Navigate(navigation) => Ok(Step::Follow(navigation)),
            PageFlow::Abandoned => Err(PageError::Cancelled.into()),
        }
    }
}
