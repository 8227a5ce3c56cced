//! Local date-time parsing and formatting
//!
//! Timestamps are ISO-8601 local date-times without offset:
//! `2024-01-01T10:00:00`, `2024-01-01T10:00:00.250` or `2024-01-01T10:00`.

use chrono::NaiveDateTime;

use crate::types::{EventsError, EventsResult};

/// Minute precision, seconds are optional in ISO local date-time
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Second precision with an optional fraction
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Output format, fraction printed only when non-zero
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `d` marks a digit, anything else must match literally
const MINUTE_SHAPE: &[u8] = b"dddd-dd-ddTdd:dd";

/// Nanosecond precision
const MAX_FRACTION_DIGITS: usize = 9;

/// Parse an ISO-8601 local date-time.
///
/// Only the strict `ISO_LOCAL_DATE_TIME` shape is accepted: four-digit year
/// without sign, `T` separator, optional seconds, at most nine fraction
/// digits and no surrounding whitespace.
pub fn parse_local_datetime(value: &str) -> EventsResult<NaiveDateTime> {
    let invalid = |reason: &str| {
        EventsError::InvalidArgument(format!("invalid local date-time '{}': {}", value, reason))
    };

    let format = check_shape(value.as_bytes()).map_err(invalid)?;

    NaiveDateTime::parse_from_str(value, format).map_err(|e| invalid(&e.to_string()))
}

/// Validate the layout and pick the matching chrono format
fn check_shape(bytes: &[u8]) -> Result<&'static str, &'static str> {
    let (head, rest) = bytes.split_at(bytes.len().min(MINUTE_SHAPE.len()));

    let head_ok = head.len() == MINUTE_SHAPE.len()
        && head.iter().zip(MINUTE_SHAPE).all(|(&b, &pattern)| match pattern {
            b'd' => b.is_ascii_digit(),
            literal => b == literal,
        });
    if !head_ok {
        return Err("expected yyyy-MM-ddTHH:mm[:ss[.fffffffff]]");
    }

    match rest {
        [] => Ok(MINUTE_FORMAT),
        [b':', s1, s2] if s1.is_ascii_digit() && s2.is_ascii_digit() => Ok(SECOND_FORMAT),
        [b':', s1, s2, b'.', fraction @ ..]
            if s1.is_ascii_digit() && s2.is_ascii_digit() =>
        {
            if fraction.is_empty() || !fraction.iter().all(u8::is_ascii_digit) {
                Err("fraction must be digits")
            } else if fraction.len() > MAX_FRACTION_DIGITS {
                Err("fraction has more than nine digits")
            } else {
                Ok(SECOND_FORMAT)
            }
        }
        _ => Err("expected yyyy-MM-ddTHH:mm[:ss[.fffffffff]]"),
    }
}

/// Format a timestamp as an ISO-8601 local date-time
pub fn format_local_datetime(timestamp: &NaiveDateTime) -> String {
    timestamp.format(OUTPUT_FORMAT).to_string()
}
