//! Time-related utilities

use chrono::{DateTime, Local, TimeZone};

/// Layout used for notice timestamps, e.g. `Sun Oct 18 09:05:01 2026`.
pub const NOTICE_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Current local time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Render a timestamp the way it appears in a blocked-poke notice
pub fn format_notice_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(NOTICE_TIME_FORMAT).to_string()
}
