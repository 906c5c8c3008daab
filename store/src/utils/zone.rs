//! The calendar a reader sees messages in.
//!
//! Day boundaries must be computed with the UTC offset in force at each
//! instant, not with whatever offset applies today. [`CalendarZone`] is a
//! `chrono` time zone that resolves the offset per instant, so a message
//! sent late on a winter evening stays on that evening even when the list
//! is built in summer.

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Time zone used for calendar-day comparisons and date labels.
///
/// # Examples
///
/// ```no_run
/// use chrono::{TimeZone, Utc};
/// use store::utils::{CalendarZone, DateUtils};
///
/// let berlin: CalendarZone = "Europe/Berlin".parse().unwrap();
/// // 23:30 CET on January 10th and 10:00 CET on January 11th
/// let evening = Utc.with_ymd_and_hms(2024, 1, 10, 22, 30, 0).unwrap();
/// let morning = Utc.with_ymd_and_hms(2024, 1, 11, 9, 0, 0).unwrap();
///
/// assert!(!DateUtils::is_same_day(&evening, &morning, &berlin));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CalendarZone {
    /// The host's zone, including its daylight saving rules
    #[default]
    Local,
    /// A constant offset from UTC
    Fixed(FixedOffset),
    /// A named IANA zone such as `Europe/Berlin`
    Named(chrono_tz::Tz),
}

impl From<FixedOffset> for CalendarZone {
    fn from(offset: FixedOffset) -> Self {
        CalendarZone::Fixed(offset)
    }
}

impl From<chrono_tz::Tz> for CalendarZone {
    fn from(tz: chrono_tz::Tz) -> Self {
        CalendarZone::Named(tz)
    }
}

impl FromStr for CalendarZone {
    type Err = String;

    /// Parses `local` or an IANA zone name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("local") {
            return Ok(CalendarZone::Local);
        }
        name.parse::<chrono_tz::Tz>()
            .map(CalendarZone::Named)
            .map_err(|e| format!("Unknown time zone '{name}': {e}"))
    }
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarZone::Local => write!(f, "local"),
            CalendarZone::Fixed(offset) => write!(f, "{offset}"),
            CalendarZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl TimeZone for CalendarZone {
    type Offset = FixedOffset;

    fn from_offset(offset: &FixedOffset) -> Self {
        CalendarZone::Fixed(*offset)
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        match self {
            CalendarZone::Local => chrono::Local.offset_from_local_date(local),
            CalendarZone::Fixed(offset) => offset.offset_from_local_date(local),
            CalendarZone::Named(tz) => tz.offset_from_local_date(local).map(|o| o.fix()),
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        match self {
            CalendarZone::Local => chrono::Local.offset_from_local_datetime(local),
            CalendarZone::Fixed(offset) => offset.offset_from_local_datetime(local),
            CalendarZone::Named(tz) => tz.offset_from_local_datetime(local).map(|o| o.fix()),
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        match self {
            CalendarZone::Local => chrono::Local.offset_from_utc_date(utc),
            CalendarZone::Fixed(offset) => offset.offset_from_utc_date(utc),
            CalendarZone::Named(tz) => tz.offset_from_utc_date(utc).fix(),
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            CalendarZone::Local => chrono::Local.offset_from_utc_datetime(utc),
            CalendarZone::Fixed(offset) => offset.offset_from_utc_datetime(utc),
            CalendarZone::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
        }
    }
}
