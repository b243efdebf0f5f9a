use crate::consts::{
    CALENDAR_BITS, CALENDAR_MASK, DATE_SEPARATOR, DAY_BITS, DAY_MASK, MONTH_BITS, MONTH_MASK,
};
use crate::prelude::*;
use crate::{CalendarError, CalendarOrdinal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A year, month and day packed into a single `i32`.
///
/// Layout (least significant first): `day - 1` in 6 bits, `month - 1` in 5
/// bits, `year - 1` in the remaining bits (signed). Equality, ordering and
/// hashing are those of the raw value, which is chronological for every
/// calendar whose year starts in month 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Into,
)]
#[serde(from = "i32", into = "i32")]
#[repr(transparent)]
pub struct YearMonthDay(i32);

impl YearMonthDay {
    /// Packs the given components. No validation is performed.
    #[inline]
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self(((year - 1) << (DAY_BITS + MONTH_BITS)) | ((month - 1) << DAY_BITS) | (day - 1))
    }

    /// Returns the raw packed value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn year(self) -> i32 {
        (self.0 >> (DAY_BITS + MONTH_BITS)) + 1
    }

    #[inline]
    pub const fn month(self) -> i32 {
        ((self.0 & MONTH_MASK) >> DAY_BITS) + 1
    }

    #[inline]
    pub const fn day(self) -> i32 {
        (self.0 & DAY_MASK) + 1
    }

    /// Tags this value with a calendar.
    #[inline]
    pub const fn with_calendar(self, ordinal: CalendarOrdinal) -> YearMonthDayCalendar {
        YearMonthDayCalendar((self.0 << CALENDAR_BITS) | ordinal as i32)
    }
}

impl fmt::Display for YearMonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{}", self.year(), self.month(), self.day())
    }
}

impl FromStr for YearMonthDay {
    type Err = CalendarError;

    /// Parses `Y-M-D`, where a leading `-` makes the year negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s)?;
        match fields.as_slice() {
            [year, month, day] => Ok(Self::new(*year, *month, *day)),
            _ => Err(CalendarError::InvalidFormat(s.to_string())),
        }
    }
}

/// A [`YearMonthDay`] shifted left to make room for a [`CalendarOrdinal`] in
/// the low 6 bits.
///
/// Two values compare equal only when all four components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(transparent)]
pub struct YearMonthDayCalendar(i32);

impl YearMonthDayCalendar {
    /// Packs the given components. No validation is performed.
    #[inline]
    pub const fn new(year: i32, month: i32, day: i32, ordinal: CalendarOrdinal) -> Self {
        YearMonthDay::new(year, month, day).with_calendar(ordinal)
    }

    /// Returns the raw packed value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.to_year_month_day().year()
    }

    #[inline]
    pub const fn month(self) -> i32 {
        self.to_year_month_day().month()
    }

    #[inline]
    pub const fn day(self) -> i32 {
        self.to_year_month_day().day()
    }

    #[inline]
    pub const fn calendar_ordinal(self) -> CalendarOrdinal {
        CalendarOrdinal::ALL[(self.0 & CALENDAR_MASK) as usize]
    }

    /// Drops the calendar ordinal.
    #[inline]
    pub const fn to_year_month_day(self) -> YearMonthDay {
        YearMonthDay(self.0 >> CALENDAR_BITS)
    }
}

impl TryFrom<i32> for YearMonthDayCalendar {
    type Error = CalendarError;

    /// Accepts any raw value whose ordinal bits name a known calendar.
    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        let ordinal = raw & CALENDAR_MASK;
        if ordinal >= i32::from(CalendarOrdinal::SIZE) {
            return Err(CalendarError::OutOfRange {
                name: "calendar_ordinal",
                value: ordinal,
                min: 0,
                max: i32::from(CalendarOrdinal::SIZE) - 1,
            });
        }
        Ok(Self(raw))
    }
}

impl From<YearMonthDayCalendar> for i32 {
    fn from(value: YearMonthDayCalendar) -> Self {
        value.0
    }
}

impl fmt::Display for YearMonthDayCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DATE_SEPARATOR}{}", self.to_year_month_day(), self.calendar_ordinal())
    }
}

impl FromStr for YearMonthDayCalendar {
    type Err = CalendarError;

    /// Parses `Y-M-D-Ordinal`, e.g. `2017-8-21-Iso` or `-5-1-1-Julian`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, ordinal) = s
            .rsplit_once(DATE_SEPARATOR)
            .ok_or_else(|| CalendarError::InvalidFormat(s.to_string()))?;
        let ordinal = CalendarOrdinal::ALL
            .into_iter()
            .find(|candidate| candidate.to_string() == ordinal)
            .ok_or_else(|| CalendarError::InvalidFormat(s.to_string()))?;
        Ok(date.parse::<YearMonthDay>()?.with_calendar(ordinal))
    }
}

fn parse_int(field: &str) -> Result<i32, CalendarError> {
    field
        .parse()
        .map_err(|_| CalendarError::InvalidFormat(field.to_string()))
}

/// Splits `[-]Y-M-D` into integers, applying a leading `-` to the year.
fn split_fields(s: &str) -> Result<Vec<i32>, CalendarError> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let mut fields = body
        .split(DATE_SEPARATOR)
        .map(parse_int)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CalendarError::InvalidFormat(s.to_string()))?;
    if negative {
        if let Some(year) = fields.first_mut() {
            *year = -*year;
        }
    }
    Ok(fields)
}
