//! Calendar arithmetic core.
//!
//! Converts between days since 1970-01-01 (ISO) and year/month/day triples
//! in 19 calendar systems, with month arithmetic, eras and week-year rules.

mod calendar_system;
mod calendars;
mod consts;
mod day_of_week;
mod era;
mod ordinal;
mod prelude;
mod types;
mod week_year;

pub use calendar_system::{CalendarSystem, calendar_for_id, calendar_for_ordinal};
pub use calendars::{HebrewMonthNumbering, IslamicEpoch, IslamicLeapYearPattern};
pub use consts::*;
pub use day_of_week::IsoDayOfWeek;
pub use era::Era;
pub use ordinal::CalendarOrdinal;
pub use types::{YearMonthDay, YearMonthDayCalendar};
pub use week_year::{CalendarWeekRule, WeekYearRule};

use crate::prelude::*;

/// Broad category of a [`CalendarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// An argument lies outside its valid range
    Range,
    /// Arithmetic would leave the calendar's supported range
    Overflow,
    /// A calendar id or era is not known to this calendar
    Lookup,
    /// Text could not be parsed
    Format,
}

/// Error type for every fallible calendar operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// An argument is outside its valid range.
    #[error("{name} = {value} is out of range (must be {min}-{max})")]
    OutOfRange {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// The week-year, week and day of week do not name a day in the calendar.
    #[error("Invalid week date: week-year {week_year}, week {week}, {day_of_week}")]
    InvalidWeekDate {
        week_year: i32,
        week: i32,
        day_of_week: IsoDayOfWeek,
    },

    /// Date arithmetic would leave the calendar's supported range.
    #[error("Date computation would overflow calendar bounds")]
    Overflow,

    /// No calendar system has the given id.
    #[error("No calendar system for ID {0:?} exists")]
    UnknownCalendarId(String),

    /// The era is not used by the calendar.
    #[error("Era {era} is not supported by the {calendar} calendar")]
    UnsupportedEra {
        era: &'static str,
        calendar: &'static str,
    },

    /// Text form of a packed date could not be parsed.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}

impl CalendarError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } | Self::InvalidWeekDate { .. } => ErrorKind::Range,
            Self::Overflow => ErrorKind::Overflow,
            Self::UnknownCalendarId(_) | Self::UnsupportedEra { .. } => ErrorKind::Lookup,
            Self::InvalidFormat(_) => ErrorKind::Format,
        }
    }
}

/// Checks that `min <= value <= max`, naming the argument on failure.
pub(crate) const fn check_range(
    name: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<(), CalendarError> {
    if value < min || value > max {
        return Err(CalendarError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
