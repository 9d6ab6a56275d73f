//! Pages the UI can show and how to move between them.

use std::fmt;

use festfrenzy_protocol::Role;

/// A page, addressed by its URL-style path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    OrganizerDashboard,
    AdminDashboard,
    Events,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::OrganizerDashboard,
        Route::AdminDashboard,
        Route::Events,
        Route::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::OrganizerDashboard => "/dashboard",
            Self::AdminDashboard => "/admin/dashboard",
            Self::Events => "/events",
            Self::Profile => "/profile",
        }
    }

    /// Looks a route up by path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// The dashboard a role lands on, if it has one.
    pub fn home_of(role: &Role) -> Option<Self> {
        role.home_path().and_then(Self::from_path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// An instruction to leave the current page.
///
/// `notice` is shown on arrival (e.g. on the login page after a session
/// expired). Silent redirects carry no notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    pub notice: Option<String>,
}

impl Navigation {
    /// A silent redirect.
    pub fn new(to: Route) -> Self {
        Self { to, notice: None }
    }

    /// A redirect that shows `notice` on arrival.
    pub fn with_notice(to: Route, notice: impl Into<String>) -> Self {
        Self {
            to,
            notice: Some(notice.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_round_trips_every_route() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_ignores_trailing_slash() {
        assert_eq!(Route::from_path("/admin/dashboard/"), Some(Route::AdminDashboard));
        assert_eq!(Route::from_path("/bookings"), None);
    }

    #[test]
    fn test_home_of_maps_dashboard_roles() {
        assert_eq!(Route::home_of(&Role::Admin), Some(Route::AdminDashboard));
        assert_eq!(Route::home_of(&Role::Organizer), Some(Route::OrganizerDashboard));
        assert_eq!(Route::home_of(&Role::Attendee), None);
    }

    #[test]
    fn test_navigation_constructors() {
        assert_eq!(Navigation::new(Route::Events).notice, None);
        assert_eq!(
            Navigation::with_notice(Route::Login, "bye").notice.as_deref(),
            Some("bye")
        );
    }
}
