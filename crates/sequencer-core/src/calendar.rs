//! Location-aware week calendar.
//!
//! A scheduling week starts on Monday 00:00 in the location's timezone.
//! Nothing here reads the wall clock; callers always pass the reference
//! instant explicitly.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::constants::{DAYS_PER_WEEK, NEVER_SELECTED_WEEKS};
use crate::errors::CalendarError;

/// Parse an IANA timezone name such as `America/Chicago`.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimezone {
            name: name.to_string(),
        })
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday of the week containing `reference`, as observed in `tz`.
pub fn local_week_start(reference: DateTime<Utc>, tz: Tz) -> NaiveDate {
    monday_of(reference.with_timezone(&tz).date_naive())
}

/// Move a week start forward (positive) or backward (negative).
pub fn shift_weeks(week_start: NaiveDate, weeks: i64) -> NaiveDate {
    week_start + Duration::days(weeks * DAYS_PER_WEEK)
}

/// Whole weeks from `earlier` to `later`, floored, never negative.
pub fn weeks_between(earlier: NaiveDate, later: NaiveDate) -> u32 {
    let days = (later - earlier).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from(days / DAYS_PER_WEEK).unwrap_or(NEVER_SELECTED_WEEKS)
}

/// Half-open window `[reference - weeks, reference)`.
pub fn window_start(reference: NaiveDate, weeks: u32) -> NaiveDate {
    shift_weeks(reference, -i64::from(weeks))
}
