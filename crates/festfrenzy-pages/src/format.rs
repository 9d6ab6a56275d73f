//! Date and cost formatting.

use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use festfrenzy_protocol::Timestamp;

const DATE_FORMAT: &str = "%b %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Renders an event's time range in the display offset.
///
/// Same calendar day: `"Oct 29, 2025, 10:00 AM - 12:30 PM"`.
/// Different days: `"Oct 29, 2025, 11:00 PM - Oct 30, 2025, 1:00 AM"`.
pub fn format_event_dates(start: Timestamp, end: Timestamp, offset: FixedOffset) -> String {
    let same_day = start.as_utc().with_timezone(&offset).date_naive()
        == end.as_utc().with_timezone(&offset).date_naive();

    if same_day {
        let end_time = end.as_utc().with_timezone(&offset).format(TIME_FORMAT);
        format!("{} - {end_time}", format_datetime(start, offset))
    } else {
        format!("{} - {}", format_datetime(start, offset), format_datetime(end, offset))
    }
}

/// Renders a single instant, e.g. `"Oct 29, 2025, 10:00 AM"`.
pub fn format_datetime(at: Timestamp, offset: FixedOffset) -> String {
    let local = at.as_utc().with_timezone(&offset);
    format!("{}, {}", local.format(DATE_FORMAT), local.format(TIME_FORMAT))
}

/// Dashboard cost cell: `"Free"` or `"₹ 1234.50"`.
pub fn format_cost(cost: f64, symbol: &str) -> String {
    if cost <= 0.0 {
        "Free".to_string()
    } else {
        format!("{symbol} {cost:.2}")
    }
}

/// Public listing price: `"Free Entry"` or `"₹ 50.00 per person"`.
pub fn format_entry_fee(cost: f64, symbol: &str) -> String {
    if cost <= 0.0 {
        "Free Entry".to_string()
    } else {
        format!("{symbol} {cost:.2} per person")
    }
}

/// Parses a form datetime (`2025-10-29T10:00`, seconds optional) as a
/// wall-clock time in `offset` and converts it to UTC.
pub fn parse_local_datetime(raw: &str, offset: FixedOffset) -> Option<Timestamp> {
    let raw = raw.trim();
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(Timestamp::from_utc(local.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).expect("valid offset")
    }

    fn ts(raw: &str) -> Timestamp {
        Timestamp::parse(raw).expect("valid timestamp")
    }

    #[test]
    fn test_format_event_dates_same_day() {
        let formatted = format_event_dates(ts("2025-10-29T04:30:00"), ts("2025-10-29T07:00:00"), ist());

        assert_eq!(formatted, "Oct 29, 2025, 10:00 AM - 12:30 PM");
    }

    #[test]
    fn test_format_event_dates_across_midnight_shows_both_dates() {
        let formatted = format_event_dates(ts("2025-10-29T17:30:00"), ts("2025-10-29T19:30:00"), ist());

        assert_eq!(formatted, "Oct 29, 2025, 11:00 PM - Oct 30, 2025, 1:00 AM");
    }

    #[test]
    fn test_format_event_dates_day_boundary_depends_on_offset() {
        let utc = FixedOffset::east_opt(0).expect("valid offset");

        let formatted = format_event_dates(ts("2025-10-29T20:00:00"), ts("2025-10-29T21:00:00"), utc);

        assert_eq!(formatted, "Oct 29, 2025, 8:00 PM - 9:00 PM");
    }

    #[test]
    fn test_format_datetime_single_instant() {
        assert_eq!(format_datetime(ts("2025-01-05T03:35:00Z"), ist()), "Jan 5, 2025, 9:05 AM");
    }

    #[test]
    fn test_format_cost_free_and_paid() {
        assert_eq!(format_cost(0.0, "₹"), "Free");
        assert_eq!(format_cost(1234.5, "₹"), "₹ 1234.50");
    }

    #[test]
    fn test_format_entry_fee_free_and_paid() {
        assert_eq!(format_entry_fee(0.0, "₹"), "Free Entry");
        assert_eq!(format_entry_fee(50.0, "₹"), "₹ 50.00 per person");
    }

    #[test]
    fn test_parse_local_datetime_converts_to_utc() {
        let parsed = parse_local_datetime("2025-10-29T10:00", ist()).expect("should parse");

        assert_eq!(parsed, ts("2025-10-29T04:30:00Z"));
    }

    #[test]
    fn test_parse_local_datetime_rejects_garbage() {
        assert!(parse_local_datetime("tomorrow", ist()).is_none());
        assert!(parse_local_datetime("", ist()).is_none());
    }
}
