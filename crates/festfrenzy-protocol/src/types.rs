//! Core wire types for the FestFrenzy REST API.
//!
//! Every type here mirrors a JSON document the backend sends or accepts.
//! Field names match the backend's snake_case names exactly, so no
//! `rename` attributes are needed.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidTimestamp;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a user account (attendee, organizer or admin).
///
/// Newtype wrappers keep a `VenueId` from being passed where a `UserId`
/// is expected, even though both are integers on the wire.
/// `#[serde(transparent)]` makes `UserId(7)` serialize as plain `7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub u64);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The role attached to an account.
///
/// The backend sends lowercase strings. Values this client doesn't know
/// are kept in [`Role::Other`] rather than failing to decode, because
/// an unknown role is a *routing* decision (deny access), not a
/// malformed response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Attendee,
    Organizer,
    Admin,
    Other(String),
}

impl Role {
    /// The backend's string for this role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Attendee => "attendee",
            Self::Organizer => "organizer",
            Self::Admin => "admin",
            Self::Other(raw) => raw,
        }
    }

    /// Path of the role's own dashboard, if it has one.
    ///
    /// Only organizers and admins have a home page; attendees browse the
    /// public events page like guests.
    pub fn home_path(&self) -> Option<&'static str> {
        match self {
            Self::Organizer => Some("/dashboard"),
            Self::Admin => Some("/admin/dashboard"),
            Self::Attendee | Self::Other(_) => None,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "attendee" => Self::Attendee,
            "organizer" => Self::Organizer,
            "admin" => Self::Admin,
            _ => Self::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// An instant in UTC.
///
/// The backend stores naive datetimes and sends them without a zone
/// marker (`2025-10-29T04:30:00`). Those are read as UTC. Strings that
/// do carry `Z` or an offset are honoured. Every timestamp is written
/// back as RFC 3339 with millisecond precision and a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wraps a UTC datetime.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Returns the instant as a chrono UTC datetime.
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Parses a backend timestamp string.
    ///
    /// # Errors
    /// Returns [`InvalidTimestamp`] when `raw` matches none of the
    /// accepted formats.
    pub fn parse(raw: &str) -> Result<Self, InvalidTimestamp> {
        let raw = raw.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(at.with_timezone(&Utc)));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| InvalidTimestamp(raw.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// The signed-in account, as returned by `GET /api/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_approved: bool,
}

/// An organizer account as it appears nested in events and in the
/// pending-approval list. The organizer's `name` is the committee name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Venues & events
// ---------------------------------------------------------------------------

/// A bookable location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
}

/// Body of `POST /api/admin/venues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub location: String,
    pub capacity: u32,
}

/// An event with its venue and organizer embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub event_datetime: Timestamp,
    pub end_datetime: Timestamp,
    pub capacity: u32,
    pub cost: f64,
    pub venue_id: VenueId,
    pub organizer_id: UserId,
    pub venue: Venue,
    #[serde(default)]
    pub organizer: Option<Organizer>,
}

impl Event {
    /// The committee that runs this event, i.e. its organizer's name.
    pub fn committee(&self) -> Option<&str> {
        self.organizer.as_ref().map(|o| o.name.as_str())
    }
}

/// Body of `POST /api/organizer/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub venue_id: VenueId,
    pub event_datetime: Timestamp,
    pub end_datetime: Timestamp,
    pub capacity: u32,
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An opaque bearer token.
///
/// `Debug` never prints the token itself; use [`Credential::expose`]
/// where the raw value is genuinely needed (the `Authorization` header
/// and the credential store).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Response of `POST /api/organizer/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    /// Converts the login response into the credential that gets stored.
    pub fn into_credential(self) -> Credential {
        Credential(self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Sign-in credentials, sent form-encoded as `username` / `password`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// The `application/x-www-form-urlencoded` pairs the login endpoint
    /// expects. The backend's form calls the email `username`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // =========================================================================
    // Role
    // =========================================================================

    #[test]
    fn test_role_known_values_round_trip_as_lowercase() {
        let role: Role = serde_json::from_value(json!("admin")).expect("should decode");
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_value(&Role::Organizer).expect("encode"), json!("organizer"));
    }

    #[test]
    fn test_role_unknown_value_is_kept() {
        let role: Role = serde_json::from_value(json!("superuser")).expect("should decode");

        assert_eq!(role, Role::Other("superuser".into()));
        assert_eq!(role.as_str(), "superuser");
        assert_eq!(role.home_path(), None);
    }

    #[test]
    fn test_role_home_path_only_for_dashboard_roles() {
        assert_eq!(Role::Organizer.home_path(), Some("/dashboard"));
        assert_eq!(Role::Admin.home_path(), Some("/admin/dashboard"));
        assert_eq!(Role::Attendee.home_path(), None);
    }

    // =========================================================================
    // Timestamp
    // =========================================================================

    #[test]
    fn test_timestamp_parse_zoneless_is_utc() {
        let ts = Timestamp::parse("2025-10-29T04:30:00").expect("should parse");

        assert_eq!(ts.as_utc(), Utc.with_ymd_and_hms(2025, 10, 29, 4, 30, 0).unwrap());
    }

    #[test]
    fn test_timestamp_parse_fractional_zoneless() {
        let ts = Timestamp::parse("2025-10-29T04:30:00.250000").expect("should parse");

        assert_eq!(ts.to_string(), "2025-10-29T04:30:00.250Z");
    }

    #[test]
    fn test_timestamp_parse_offset_is_normalised_to_utc() {
        let ts = Timestamp::parse("2025-10-29T10:00:00+05:30").expect("should parse");

        assert_eq!(ts, Timestamp::parse("2025-10-29T04:30:00Z").expect("should parse"));
    }

    #[test]
    fn test_timestamp_parse_garbage_returns_error() {
        let err = Timestamp::parse("next tuesday").expect_err("should fail");

        assert_eq!(err, InvalidTimestamp("next tuesday".into()));
    }

    #[test]
    fn test_timestamp_serializes_with_millis_and_z() {
        let ts = Timestamp::parse("2025-10-29T04:30:00").expect("should parse");

        assert_eq!(serde_json::to_value(ts).expect("encode"), json!("2025-10-29T04:30:00.000Z"));
    }

    // =========================================================================
    // Documents
    // =========================================================================

    #[test]
    fn test_event_decodes_backend_shape() {
        let json = json!({
            "id": 11,
            "title": "Hack Night",
            "description": "24h build sprint",
            "event_datetime": "2025-10-29T04:30:00",
            "end_datetime": "2025-10-29T07:00:00",
            "capacity": 80,
            "cost": 0.0,
            "venue_id": 2,
            "organizer_id": 5,
            "venue": {"id": 2, "name": "Lab 4", "location": "Block C", "capacity": 90},
            "organizer": {"id": 5, "name": "SPark", "email": "spark@college.edu",
                          "role": "organizer", "is_approved": true}
        });

        let event: Event = serde_json::from_value(json).expect("should decode");

        assert_eq!(event.id, EventId(11));
        assert_eq!(event.venue.name, "Lab 4");
        assert_eq!(event.committee(), Some("SPark"));
    }

    #[test]
    fn test_event_without_organizer_has_no_committee() {
        let json = json!({
            "id": 1, "title": "t", "description": "d",
            "event_datetime": "2025-01-01T00:00:00", "end_datetime": "2025-01-01T01:00:00",
            "capacity": 1, "cost": 10.5, "venue_id": 1, "organizer_id": 1,
            "venue": {"id": 1, "name": "v", "location": "l", "capacity": 1}
        });

        let event: Event = serde_json::from_value(json).expect("should decode");

        assert_eq!(event.committee(), None);
    }

    #[test]
    fn test_login_form_uses_username_field() {
        let form = LoginForm {
            email: "ieee@college.edu".into(),
            password: "secret".into(),
        };

        let pairs = form.to_pairs();

        assert_eq!(pairs[0], ("username".to_string(), "ieee@college.edu".to_string()));
        assert_eq!(pairs[1].0, "password");
    }

    #[test]
    fn test_secrets_are_redacted_from_debug() {
        let cred = Credential::new("tok-abc");
        let token = AccessToken {
            access_token: "tok-abc".into(),
            token_type: "bearer".into(),
        };
        let form = LoginForm {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };

        let printed = format!("{cred:?} {token:?} {form:?}");

        assert!(!printed.contains("tok-abc"));
        assert!(!printed.contains("hunter2"));
        assert_eq!(token.into_credential().expose(), "tok-abc");
    }
}
