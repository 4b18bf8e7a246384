//! Clock abstraction and time formatting.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Source of the current moment.
///
/// The session store reads time only through this trait so tests can pin it.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock implementation backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Format an instant as a two-digit `HH:MM` clock time in the instant's own offset.
pub fn format_clock_time<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%H:%M").to_string()
}

/// Get current Unix timestamp (milliseconds)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
