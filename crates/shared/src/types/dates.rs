//! Display formatting for dates in the school's timezone (Asia/Manila).

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::{Asia::Manila, Tz};

/// The school's timezone.
pub const SCHOOL_TIMEZONE: Tz = Manila;

/// Current time in Manila.
#[must_use]
pub fn now_manila() -> DateTime<Tz> {
    Utc::now().with_timezone(&SCHOOL_TIMEZONE)
}

/// Converts any instant to Manila local time.
#[must_use]
pub fn to_manila<T: TimeZone>(date: &DateTime<T>) -> DateTime<Tz> {
    date.with_timezone(&SCHOOL_TIMEZONE)
}

/// `"January 20, 2024"`
#[must_use]
pub fn format_date_manila<T: TimeZone>(date: &DateTime<T>) -> String {
    to_manila(date).format("%B %-d, %Y").to_string()
}

/// `"January 20, 2024, 3:45 PM"`
#[must_use]
pub fn format_date_time_manila<T: TimeZone>(date: &DateTime<T>) -> String {
    to_manila(date).format("%B %-d, %Y, %-I:%M %p").to_string()
}

/// `"01/20/2024"`
#[must_use]
pub fn format_date_short_manila<T: TimeZone>(date: &DateTime<T>) -> String {
    to_manila(date).format("%m/%d/%Y").to_string()
}

/// `"2024-01-20"`
#[must_use]
pub fn format_date_iso_manila<T: TimeZone>(date: &DateTime<T>) -> String {
    to_manila(date).format("%Y-%m-%d").to_string()
}

/// `"3:45 PM"`
#[must_use]
pub fn format_time_manila<T: TimeZone>(date: &DateTime<T>) -> String {
    to_manila(date).format("%-I:%M %p").to_string()
}

/// Describes `date` relative to `now`, e.g. `"2 hours ago"` or `"in 3 days"`.
#[must_use]
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (date - now).num_milliseconds().div_euclid(1000);
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if seconds.abs() < 60 {
        return if seconds < 0 { "just now" } else { "in a moment" }.to_string();
    }
    if minutes.abs() < 60 {
        return relative(minutes, "minute");
    }
    if hours.abs() < 24 {
        return relative(hours, "hour");
    }
    relative(days, "day")
}

fn relative(amount: i64, unit: &str) -> String {
    let count = amount.abs();
    let plural = if count == 1 { "" } else { "s" };
    if amount < 0 {
        format!("{count} {unit}{plural} ago")
    } else {
        format!("in {count} {unit}{plural}")
    }
}
