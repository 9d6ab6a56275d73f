//! Client-side form validation.
//!
//! Drafts hold exactly what the user typed. `validate` either produces
//! the request body or the message to show inline. A draft that fails
//! validation never reaches the network.

use chrono::FixedOffset;
use festfrenzy_protocol::{NewEvent, NewVenue, VenueId};

use crate::{parse_local_datetime, PageError};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const INVALID_COST: &str = "Cost must be a valid number (0 or greater).";
pub const INVALID_CAPACITY: &str = "Capacity must be a whole number greater than 0.";
pub const INVALID_DATETIME: &str = "Start and end must be valid dates (YYYY-MM-DDTHH:MM).";
pub const END_BEFORE_START: &str = "End date & time must be after start date & time.";

fn invalid(message: &str) -> PageError {
    PageError::Invalid(message.to_string())
}

fn parse_capacity(raw: &str) -> Result<u32, PageError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|capacity| *capacity > 0)
        .ok_or_else(|| invalid(INVALID_CAPACITY))
}

// ---------------------------------------------------------------------------
// EventDraft
// ---------------------------------------------------------------------------

/// The create-event form.
///
/// `start` and `end` are wall-clock times in the display offset, as a
/// `datetime-local` input would produce them (`2025-10-29T10:00`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub venue_id: String,
    pub start: String,
    pub end: String,
    pub capacity: String,
    pub cost: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            venue_id: String::new(),
            start: String::new(),
            end: String::new(),
            capacity: String::new(),
            cost: "0".to_string(),
        }
    }
}

impl EventDraft {
    /// Checks, in order: required fields, cost, capacity, dates.
    pub fn validate(&self, offset: FixedOffset) -> Result<NewEvent, PageError> {
        let required = [
            &self.title,
            &self.description,
            &self.venue_id,
            &self.start,
            &self.end,
            &self.capacity,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(invalid(ALL_FIELDS_REQUIRED));
        }

        let cost = self
            .cost
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|cost| cost.is_finite() && *cost >= 0.0)
            .ok_or_else(|| invalid(INVALID_COST))?;

        let capacity = parse_capacity(&self.capacity)?;

        let venue_id = self
            .venue_id
            .trim()
            .parse::<u64>()
            .map(VenueId)
            .map_err(|_| invalid(ALL_FIELDS_REQUIRED))?;

        let start = parse_local_datetime(&self.start, offset).ok_or_else(|| invalid(INVALID_DATETIME))?;
        let end = parse_local_datetime(&self.end, offset).ok_or_else(|| invalid(INVALID_DATETIME))?;
        if end <= start {
            return Err(invalid(END_BEFORE_START));
        }

        Ok(NewEvent {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            venue_id,
            event_datetime: start,
            end_datetime: end,
            capacity,
            cost,
        })
    }
}

// ---------------------------------------------------------------------------
// VenueDraft
// ---------------------------------------------------------------------------

/// The add-venue form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueDraft {
    pub name: String,
    pub location: String,
    pub capacity: String,
}

impl VenueDraft {
    pub fn validate(&self) -> Result<NewVenue, PageError> {
        if [&self.name, &self.location, &self.capacity]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(invalid(ALL_FIELDS_REQUIRED));
        }
        Ok(NewVenue {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            capacity: parse_capacity(&self.capacity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use festfrenzy_protocol::Timestamp;

    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).expect("valid offset")
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Robo Wars".into(),
            description: "Bot combat finals".into(),
            venue_id: "2".into(),
            start: "2025-10-29T10:00".into(),
            end: "2025-10-29T12:30".into(),
            capacity: "150".into(),
            cost: "49.5".into(),
        }
    }

    fn message(result: Result<NewEvent, PageError>) -> String {
        result.expect_err("should fail").message_or("unexpected")
    }

    // =========================================================================
    // EventDraft
    // =========================================================================

    #[test]
    fn test_event_draft_valid_converts_to_utc() {
        let event = draft().validate(ist()).expect("should validate");

        assert_eq!(event.venue_id, VenueId(2));
        assert_eq!(event.capacity, 150);
        assert_eq!(event.event_datetime, Timestamp::parse("2025-10-29T04:30:00Z").expect("ts"));
        assert_eq!(event.end_datetime, Timestamp::parse("2025-10-29T07:00:00Z").expect("ts"));
    }

    #[test]
    fn test_event_draft_default_cost_is_zero() {
        assert_eq!(EventDraft::default().cost, "0");
    }

    #[test]
    fn test_event_draft_missing_field_is_required_error() {
        let mut d = draft();
        d.description = "   ".into();

        assert_eq!(message(d.validate(ist())), ALL_FIELDS_REQUIRED);
    }

    #[test]
    fn test_event_draft_negative_or_blank_cost_rejected() {
        let mut d = draft();
        d.cost = "-1".into();
        assert_eq!(message(d.validate(ist())), INVALID_COST);

        d.cost = String::new();
        assert_eq!(message(d.validate(ist())), INVALID_COST);

        d.cost = "abc".into();
        assert_eq!(message(d.validate(ist())), INVALID_COST);
    }

    #[test]
    fn test_event_draft_zero_capacity_rejected() {
        let mut d = draft();
        d.capacity = "0".into();

        assert_eq!(message(d.validate(ist())), INVALID_CAPACITY);
    }

    #[test]
    fn test_event_draft_end_equal_to_start_rejected() {
        let mut d = draft();
        d.end = d.start.clone();

        assert_eq!(message(d.validate(ist())), END_BEFORE_START);
    }

    #[test]
    fn test_event_draft_end_before_start_rejected() {
        let mut d = draft();
        d.end = "2025-10-29T09:00".into();

        assert_eq!(message(d.validate(ist())), END_BEFORE_START);
    }

    #[test]
    fn test_event_draft_unparsable_date_rejected() {
        let mut d = draft();
        d.start = "29/10/2025".into();

        assert_eq!(message(d.validate(ist())), INVALID_DATETIME);
    }

    // =========================================================================
    // VenueDraft
    // =========================================================================

    #[test]
    fn test_venue_draft_valid() {
        let venue = VenueDraft {
            name: " Main Hall ".into(),
            location: "Block A".into(),
            capacity: "300".into(),
        }
        .validate()
        .expect("should validate");

        assert_eq!(venue.name, "Main Hall");
        assert_eq!(venue.capacity, 300);
    }

    #[test]
    fn test_venue_draft_empty_field_rejected() {
        let err = VenueDraft::default().validate().expect_err("should fail");

        assert_eq!(err.message_or(""), ALL_FIELDS_REQUIRED);
    }

    #[test]
    fn test_venue_draft_non_numeric_capacity_rejected() {
        let err = VenueDraft {
            name: "Hall".into(),
            location: "A".into(),
            capacity: "lots".into(),
        }
        .validate()
        .expect_err("should fail");

        assert_eq!(err.message_or(""), INVALID_CAPACITY);
    }
}
