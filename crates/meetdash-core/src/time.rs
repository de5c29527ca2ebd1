//! Calendar windows and day labels.
//!
//! Day and week boundaries are computed in the viewer's rendering timezone,
//! passed explicitly so the derivations stay pure and testable. Instants are
//! stored and compared in UTC throughout.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// A half-open interval `[start, end)` in UTC covering whole calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// The calendar day containing `now`, with boundaries in `tz`.
    ///
    /// Keeping the end exclusive at next midnight makes "up to and including
    /// the end of the day" hold for every representable instant of the day.
    pub fn for_day<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> Self {
        let today = now.with_timezone(tz).date_naive();
        Self {
            start: local_midnight(today, tz),
            end: local_midnight(next_day(today), tz),
        }
    }

    /// The Sunday-based calendar week containing `now`, with boundaries in `tz`.
    pub fn for_week<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> Self {
        let today = now.with_timezone(tz).date_naive();
        let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        Self {
            start: local_midnight(sunday, tz),
            end: local_midnight(sunday + Duration::days(7), tz),
        }
    }

    /// Checks if an instant falls within this window (`[start, end)`).
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }
}

/// Midnight of `date` in `tz`, converted back to UTC.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
        .single()
        .expect("unambiguous local midnight")
        .with_timezone(&Utc)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().expect("valid successor date")
}

/// The long-form calendar-day label for an instant, in `tz`.
///
/// The label is rendered in a fixed English display locale, e.g.
/// `"Monday, January 1, 2024"`, and serves as the grouping key for meetings
/// sharing a day.
pub fn day_label<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%A, %B %-d, %Y").to_string()
}
