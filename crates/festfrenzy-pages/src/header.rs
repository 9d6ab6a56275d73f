//! The navigation header shown on every page.

use std::fmt;

use festfrenzy_protocol::Role;
use festfrenzy_session::{Audience, Route};

/// One item in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Events,
    /// Organizers and admins; points at the viewer's own dashboard.
    MyDashboard(Route),
    /// Guests only.
    SignIn,
    Profile,
    LogOut,
}

impl NavEntry {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::MyDashboard(_) => "My Dashboard",
            Self::SignIn => "Sign In",
            Self::Profile => "Profile",
            Self::LogOut => "Log Out",
        }
    }

    /// Where the entry leads. Log Out goes to login after clearing the
    /// credential, which the caller does via `SessionContext::sign_out`.
    pub fn target(&self) -> Route {
        match self {
            Self::Events => Route::Events,
            Self::MyDashboard(home) => *home,
            Self::SignIn | Self::LogOut => Route::Login,
            Self::Profile => Route::Profile,
        }
    }
}

/// Avatar initials: first letters of the first and last word of `name`,
/// or `"G"` for a guest.
pub fn initials(name: Option<&str>) -> String {
    let words: Vec<&str> = name.unwrap_or_default().split_whitespace().collect();
    let letters: String = match words.as_slice() {
        [] => return "G".to_string(),
        [only] => only.chars().take(1).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    letters.to_uppercase()
}

/// The header for one audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: Option<String>,
    role: Option<Role>,
}

impl Header {
    pub fn guest() -> Self {
        Self {
            name: None,
            role: None,
        }
    }

    pub fn for_audience(audience: Option<&Audience>) -> Self {
        match audience.and_then(Audience::viewer) {
            Some(viewer) => Self {
                name: Some(viewer.name.clone()),
                role: Some(viewer.role.clone()),
            },
            None => Self::guest(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.role.is_none()
    }

    pub fn initials(&self) -> String {
        initials(self.name.as_deref())
    }

    pub fn entries(&self) -> Vec<NavEntry> {
        let mut entries = vec![NavEntry::Events];
        if let Some(home) = self.role.as_ref().and_then(Route::home_of) {
            entries.push(NavEntry::MyDashboard(home));
        }
        if self.is_guest() {
            entries.push(NavEntry::SignIn);
        } else {
            entries.extend([NavEntry::Profile, NavEntry::LogOut]);
        }
        entries
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FestFrenzy  |")?;
        for entry in self.entries() {
            if entry == NavEntry::Profile {
                write!(f, "  ({})", self.initials())?;
            }
            write!(f, "  {}", entry.label())?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use festfrenzy_protocol::{Credential, UserId, Viewer};

    use super::*;

    fn member(name: &str, role: Role) -> Audience {
        Audience::Member {
            viewer: Viewer {
                id: UserId(1),
                name: name.into(),
                email: "x@college.edu".into(),
                role,
                is_approved: true,
            },
            credential: Credential::new("tok"),
        }
    }

    #[test]
    fn test_initials_first_and_last_word() {
        assert_eq!(initials(Some("asha mehta rao")), "AR");
        assert_eq!(initials(Some("MUDRA")), "M");
        assert_eq!(initials(None), "G");
        assert_eq!(initials(Some("   ")), "G");
    }

    #[test]
    fn test_entries_for_guest() {
        let header = Header::for_audience(Some(&Audience::Guest));

        assert_eq!(header.entries(), vec![NavEntry::Events, NavEntry::SignIn]);
        assert_eq!(header.initials(), "G");
    }

    #[test]
    fn test_entries_for_admin_point_to_admin_dashboard() {
        let audience = member("Root Admin", Role::Admin);
        let header = Header::for_audience(Some(&audience));

        assert_eq!(
            header.entries(),
            vec![
                NavEntry::Events,
                NavEntry::MyDashboard(Route::AdminDashboard),
                NavEntry::Profile,
                NavEntry::LogOut,
            ]
        );
    }

    #[test]
    fn test_entries_for_attendee_have_no_dashboard() {
        let audience = member("Student One", Role::Attendee);
        let header = Header::for_audience(Some(&audience));

        assert_eq!(
            header.entries(),
            vec![NavEntry::Events, NavEntry::Profile, NavEntry::LogOut]
        );
    }

    #[test]
    fn test_display_shows_initials_for_members() {
        let audience = member("Ieee Cs", Role::Organizer);
        let rendered = Header::for_audience(Some(&audience)).to_string();

        assert!(rendered.contains("My Dashboard"));
        assert!(rendered.contains("(IC)"));
    }
}
