//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A `Timestamp` rendered in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A due date with its weekday, e.g. `Mon 2024-01-01`.
pub struct DueDate<'a>(pub &'a Date);

impl fmt::Display for DueDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}
