use crate::CalendarError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Dense identifier of a built-in calendar system.
///
/// The numeric values are stored in the low bits of
/// [`YearMonthDayCalendar`](crate::YearMonthDayCalendar) and index the
/// calendar registry, so they must stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CalendarOrdinal {
    Iso = 0,
    Gregorian = 1,
    Julian = 2,
    Coptic = 3,
    HebrewCivil = 4,
    HebrewScriptural = 5,
    PersianSimple = 6,
    PersianArithmetic = 7,
    PersianAstronomical = 8,
    IslamicAstronomicalBase15 = 9,
    IslamicAstronomicalBase16 = 10,
    IslamicAstronomicalIndian = 11,
    IslamicAstronomicalHabashAlHasib = 12,
    IslamicCivilBase15 = 13,
    IslamicCivilBase16 = 14,
    IslamicCivilIndian = 15,
    IslamicCivilHabashAlHasib = 16,
    UmAlQura = 17,
    Badi = 18,
}

impl CalendarOrdinal {
    /// Number of built-in calendars
    pub const SIZE: u8 = 19;

    /// Every ordinal, in numeric order
    pub const ALL: [Self; Self::SIZE as usize] = [
        Self::Iso,
        Self::Gregorian,
        Self::Julian,
        Self::Coptic,
        Self::HebrewCivil,
        Self::HebrewScriptural,
        Self::PersianSimple,
        Self::PersianArithmetic,
        Self::PersianAstronomical,
        Self::IslamicAstronomicalBase15,
        Self::IslamicAstronomicalBase16,
        Self::IslamicAstronomicalIndian,
        Self::IslamicAstronomicalHabashAlHasib,
        Self::IslamicCivilBase15,
        Self::IslamicCivilBase16,
        Self::IslamicCivilIndian,
        Self::IslamicCivilHabashAlHasib,
        Self::UmAlQura,
        Self::Badi,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for CalendarOrdinal {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(CalendarError::OutOfRange {
                name: "ordinal",
                value: i32::from(value),
                min: 0,
                max: i32::from(Self::SIZE) - 1,
            })
    }
}

impl From<CalendarOrdinal> for u8 {
    fn from(ordinal: CalendarOrdinal) -> Self {
        ordinal as Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_numeric_order() {
        for (index, ordinal) in CalendarOrdinal::ALL.iter().enumerate() {
            assert_eq!(ordinal.index(), index, "{ordinal}");
        }
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(CalendarOrdinal::try_from(0).unwrap(), CalendarOrdinal::Iso);
        assert_eq!(CalendarOrdinal::try_from(17).unwrap(), CalendarOrdinal::UmAlQura);
        assert_eq!(CalendarOrdinal::try_from(18).unwrap(), CalendarOrdinal::Badi);

        let result = CalendarOrdinal::try_from(19);
        assert!(matches!(result, Err(CalendarError::OutOfRange { value: 19, max: 18, .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(CalendarOrdinal::Iso.to_string(), "Iso");
        assert_eq!(
            CalendarOrdinal::IslamicCivilHabashAlHasib.to_string(),
            "IslamicCivilHabashAlHasib"
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&CalendarOrdinal::PersianAstronomical).unwrap();
        assert_eq!(json, "8");
        let parsed: CalendarOrdinal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, CalendarOrdinal::PersianAstronomical);
        assert!(serde_json::from_str::<CalendarOrdinal>("42").is_err());
    }
}
