//! Calendar-day helpers for date header placement and labelling.
//!
//! Messages carry UTC timestamps, but day boundaries are a property of the
//! reader's calendar. Every comparison here therefore takes the time zone in
//! which the two instants should be projected before comparing them.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// Calendar-day comparisons over UTC instants.
///
/// # Examples
///
/// ```no_run
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use store::utils::DateUtils;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// let morning = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
/// let evening = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();
///
/// assert!(DateUtils::is_same_day(&morning, &evening, &utc));
/// ```
pub struct DateUtils;

impl DateUtils {
    /// Checks whether two instants fall on the same calendar day in `tz`.
    ///
    /// Each instant is projected with the offset `tz` has at that instant,
    /// so zones with daylight saving compare correctly across seasons.
    ///
    /// Days are equal when both the year and the ordinal day of the year
    /// match. chrono's proleptic Gregorian year is signed, so the era is part
    /// of the comparison.
    pub fn is_same_day<Tz: TimeZone>(a: &DateTime<Utc>, b: &DateTime<Utc>, tz: &Tz) -> bool {
        let a = a.with_timezone(tz);
        let b = b.with_timezone(tz);
        a.year() == b.year() && a.ordinal() == b.ordinal()
    }

    /// Checks whether `date` falls on the same calendar day as `now`.
    pub fn is_today<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Utc>, tz: &Tz) -> bool {
        Self::is_same_day(date, now, tz)
    }

    /// Checks whether `date` falls on the calendar day before `now`.
    pub fn is_yesterday<Tz: TimeZone>(
        date: &DateTime<Utc>,
        now: &DateTime<Utc>,
        tz: &Tz,
    ) -> bool {
        let local_now = now.with_timezone(tz);
        let Some(yesterday) = local_now.date_naive().pred_opt() else {
            return false;
        };
        date.with_timezone(tz).date_naive() == yesterday
    }

    /// Shifts an instant by whole days; handy when building relative dates.
    pub fn days_before(date: &DateTime<Utc>, days: i64) -> DateTime<Utc> {
        *date - Duration::days(days)
    }
}
