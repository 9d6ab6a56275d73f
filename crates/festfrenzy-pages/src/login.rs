//! The login page: choose between browsing and organizer sign-in.

use std::fmt;

use festfrenzy_protocol::LoginForm;
use festfrenzy_session::{CredentialStore, Navigation, Route, SessionContext, SIGN_IN_FAILED};
use festfrenzy_transport::HttpTransport;

use crate::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginView {
    /// "Browse as attendee" or "Organizer sign in".
    #[default]
    Choice,
    OrganizerForm,
}

/// The login page. It has no gate and loads nothing.
#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    view: LoginView,
    email: String,
    password: String,
    notice: Option<String>,
    error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A login page reached through a redirect that carried a notice,
    /// e.g. after the session expired.
    pub fn with_notice(notice: Option<String>) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }

    pub fn view(&self) -> LoginView {
        self.view
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attendees don't sign in; they go straight to the events list.
    pub fn browse_as_attendee(&self) -> Navigation {
        Navigation::new(Route::Events)
    }

    pub fn choose_organizer(&mut self) {
        self.view = LoginView::OrganizerForm;
    }

    /// Back to the access choice. Clears any sign-in error.
    pub fn back(&mut self) {
        self.view = LoginView::Choice;
        self.error = None;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Signs in with the entered credentials.
    ///
    /// On failure the form stays filled in and [`error`](Self::error)
    /// holds the server's detail or a generic message.
    pub async fn submit<S, T>(&mut self, ctx: &SessionContext<S, T>) -> Result<Navigation, PageError>
    where
        S: CredentialStore,
        T: HttpTransport,
    {
        self.error = None;
        let form = LoginForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        match ctx.sign_in(&form).await {
            Ok(navigation) => {
                self.password.clear();
                Ok(navigation)
            }
            Err(error) => {
                let message = error.message_or(SIGN_IN_FAILED);
                tracing::warn!(%message, "sign in failed");
                self.error = Some(message);
                Err(error.into())
            }
        }
    }
}

impl fmt::Display for LoginPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FestFrenzy")?;
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        match self.view {
            LoginView::Choice => {
                writeln!(f, "Choose Your Access")?;
                writeln!(f, "  Browse as Attendee")?;
                writeln!(f, "  Organizer Sign In")
            }
            LoginView::OrganizerForm => {
                writeln!(f, "Organizer Access")?;
                writeln!(f, "  Email: {}", self.email)?;
                if let Some(error) = &self.error {
                    writeln!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_on_choice() {
        let page = LoginPage::new();

        assert_eq!(page.view(), LoginView::Choice);
        assert!(page.to_string().contains("Choose Your Access"));
    }

    #[test]
    fn test_browse_as_attendee_goes_to_events() {
        let page = LoginPage::new();

        assert_eq!(page.browse_as_attendee(), Navigation::new(Route::Events));
    }

    #[test]
    fn test_back_clears_error() {
        let mut page = LoginPage::new();
        page.choose_organizer();
        page.error = Some("Sign in failed. Check credentials.".into());

        page.back();

        assert_eq!(page.view(), LoginView::Choice);
        assert!(page.error().is_none());
    }

    #[test]
    fn test_display_shows_arrival_notice() {
        let page = LoginPage::with_notice(Some("Session expired. Please log in again.".into()));

        assert!(page.to_string().contains("Session expired. Please log in again."));
    }

    #[test]
    fn test_display_organizer_form_heading() {
        let mut page = LoginPage::new();
        page.choose_organizer();
        page.set_email("cs@college.edu");

        let rendered = page.to_string();
        assert!(rendered.contains("Organizer Access"));
        assert!(rendered.contains("cs@college.edu"));
    }
}
