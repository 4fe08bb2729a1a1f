//! Conversions between store timestamps and what a viewer types and reads.
//!
//! The store keeps ISO-8601 UTC strings. Forms produce `datetime-local`
//! values (`YYYY-MM-DDTHH:MM`) in the viewer's zone, and views print en-US
//! style local date-times. Every function takes the zone explicitly so the
//! conversions are deterministic under test.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use super::CoercionError;

const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const DATETIME_LOCAL_OUTPUT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M %p";

/// Coerce a form value into a UTC timestamp.
///
/// RFC 3339 input is taken as-is, which is how seeded edit fields survive an
/// unchanged save. Anything else is read as a `datetime-local` value in
/// `zone`. When a wall-clock time is ambiguous the earlier instant wins.
///
/// # Examples
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use event_board::domain::coerce_timestamp;
///
/// let zone = FixedOffset::east_opt(2 * 3600).expect("valid offset");
/// let at = coerce_timestamp("startTime", "2024-05-01T19:30", &zone).expect("valid input");
/// assert_eq!(at, Utc.with_ymd_and_hms(2024, 5, 1, 17, 30, 0).unwrap());
/// ```
pub fn coerce_timestamp<Tz: TimeZone>(
    field: &'static str,
    input: &str,
    zone: &Tz,
) -> Result<DateTime<Utc>, CoercionError> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| CoercionError::InvalidTimestamp {
            field,
            input: input.to_owned(),
        })?;

    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CoercionError::NonexistentLocalTime {
            field,
            input: input.to_owned(),
        })
}

/// Render a timestamp the way JavaScript's `toISOString` does.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use event_board::domain::to_iso_string;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 17, 30, 0).unwrap();
/// assert_eq!(to_iso_string(&at), "2024-05-01T17:30:00.000Z");
/// ```
pub fn to_iso_string(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render a timestamp as a `datetime-local` value in `zone`.
pub fn to_local_input<Tz>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(zone)
        .format(DATETIME_LOCAL_OUTPUT)
        .to_string()
}

/// Render a timestamp for reading, e.g. `5/1/2024, 7:30 PM`.
pub fn display_local<Tz>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(zone).format(DISPLAY_FORMAT).to_string()
}
