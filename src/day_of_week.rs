use crate::CalendarError;
use crate::consts::DAYS_PER_WEEK;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Day of the week, numbered the ISO-8601 way from Monday (1) to Sunday (7).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "i32")]
#[repr(u8)]
pub enum IsoDayOfWeek {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl IsoDayOfWeek {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO number of this day, 1 to 7
    #[inline]
    pub const fn number(self) -> i32 {
        self as i32
    }

    /// Day of week of a day count where 0 is 1970-01-01, a Thursday.
    pub const fn for_days_since_epoch(days: i32) -> Self {
        Self::ALL[(days + 3).rem_euclid(DAYS_PER_WEEK) as usize]
    }
}

impl TryFrom<i32> for IsoDayOfWeek {
    type Error = CalendarError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value - 1)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(CalendarError::OutOfRange {
                name: "day_of_week",
                value,
                min: 1,
                max: DAYS_PER_WEEK,
            })
    }
}

impl From<IsoDayOfWeek> for i32 {
    fn from(day: IsoDayOfWeek) -> Self {
        day.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_days_since_epoch() {
        struct TestCase {
            days: i32,
            expected: IsoDayOfWeek,
        }

        let cases = [
            TestCase { days: 0, expected: IsoDayOfWeek::Thursday },
            TestCase { days: 3, expected: IsoDayOfWeek::Sunday },
            TestCase { days: 4, expected: IsoDayOfWeek::Monday },
            TestCase { days: -1, expected: IsoDayOfWeek::Wednesday },
            TestCase { days: -4, expected: IsoDayOfWeek::Sunday },
            // 2005-01-02
            TestCase { days: 12_785, expected: IsoDayOfWeek::Sunday },
            // 0001-01-01 (proleptic Gregorian)
            TestCase { days: -719_162, expected: IsoDayOfWeek::Monday },
        ];

        for case in cases {
            assert_eq!(IsoDayOfWeek::for_days_since_epoch(case.days), case.expected, "{}", case.days);
        }
    }

    #[test]
    fn test_try_from_i32() {
        for number in 1..=7 {
            assert_eq!(IsoDayOfWeek::try_from(number).unwrap().number(), number);
        }
        assert!(matches!(IsoDayOfWeek::try_from(0), Err(CalendarError::OutOfRange { value: 0, .. })));
        assert!(IsoDayOfWeek::try_from(8).is_err());
        assert!(IsoDayOfWeek::try_from(-1).is_err());
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(IsoDayOfWeek::Wednesday.to_string(), "Wednesday");
        assert_eq!(serde_json::to_string(&IsoDayOfWeek::Sunday).unwrap(), "7");
        let parsed: IsoDayOfWeek = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, IsoDayOfWeek::Monday);
    }
}
