//! Eras and the per-calendar mapping between absolute years and years of era.

use std::fmt;
use std::ptr;

use crate::{CalendarError, check_range};

/// A named span of years within a calendar, such as CE or BCE.
///
/// Every era is a process-wide static; two eras are equal only if they are
/// the same static. Anno martyrum and anno mundi share the name "AM" but are
/// different eras.
#[derive(Debug)]
pub struct Era {
    name: &'static str,
    resource_identifier: &'static str,
}

static COMMON: Era = Era::new("CE", "Eras_Common");
static BEFORE_COMMON: Era = Era::new("BCE", "Eras_BeforeCommon");
static ANNO_MARTYRUM: Era = Era::new("AM", "Eras_AnnoMartyrum");
static ANNO_HEGIRAE: Era = Era::new("EH", "Eras_AnnoHegirae");
static ANNO_MUNDI: Era = Era::new("AM", "Eras_AnnoMundi");
static ANNO_PERSICO: Era = Era::new("AP", "Eras_AnnoPersico");
static BAHAI: Era = Era::new("BE", "Eras_Bahai");

static GREGORIAN_JULIAN_ERAS: [&Era; 2] = [&BEFORE_COMMON, &COMMON];

impl Era {
    const fn new(name: &'static str, resource_identifier: &'static str) -> Self {
        Self {
            name,
            resource_identifier,
        }
    }

    /// Years 1 onwards in the ISO, Gregorian and Julian calendars.
    pub fn common() -> &'static Self {
        &COMMON
    }

    /// Absolute years 0 and below in the ISO, Gregorian and Julian calendars.
    pub fn before_common() -> &'static Self {
        &BEFORE_COMMON
    }

    /// The sole era of the Coptic calendar.
    pub fn anno_martyrum() -> &'static Self {
        &ANNO_MARTYRUM
    }

    /// The sole era of the Islamic and Um Al Qura calendars.
    pub fn anno_hegirae() -> &'static Self {
        &ANNO_HEGIRAE
    }

    /// The sole era of the Hebrew calendar.
    pub fn anno_mundi() -> &'static Self {
        &ANNO_MUNDI
    }

    /// The sole era of the Persian calendars.
    pub fn anno_persico() -> &'static Self {
        &ANNO_PERSICO
    }

    /// The sole era of the Badi calendar.
    pub fn bahai() -> &'static Self {
        &BAHAI
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Key for looking up a localized name.
    pub const fn resource_identifier(&self) -> &'static str {
        self.resource_identifier
    }
}

impl PartialEq for Era {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Era {}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Maps absolute years to eras for one calendar.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EraCalculator {
    /// One era covering the whole calendar; year of era is the absolute year.
    Single {
        era: &'static Era,
        min_year: i32,
        max_year: i32,
    },
    /// CE for years 1 onwards, BCE counting back from absolute year 0.
    GregorianJulian {
        max_year_of_before_common: i32,
        max_year_of_common: i32,
    },
}

impl EraCalculator {
    pub(crate) const fn single(era: &'static Era, min_year: i32, max_year: i32) -> Self {
        Self::Single {
            era,
            min_year,
            max_year,
        }
    }

    pub(crate) const fn gregorian_julian(min_year: i32, max_year: i32) -> Self {
        Self::GregorianJulian {
            max_year_of_before_common: 1 - min_year,
            max_year_of_common: max_year,
        }
    }

    /// Eras in chronological order.
    pub(crate) fn eras(&self) -> &[&'static Era] {
        match self {
            Self::Single { era, .. } => std::slice::from_ref(era),
            Self::GregorianJulian { .. } => &GREGORIAN_JULIAN_ERAS,
        }
    }

    fn validate_era(&self, era: &Era, calendar: &'static str) -> Result<(), CalendarError> {
        if self.eras().iter().any(|known| *known == era) {
            return Ok(());
        }
        Err(CalendarError::UnsupportedEra {
            era: era.name,
            calendar,
        })
    }

    /// # Errors
    /// `UnsupportedEra` for an era the calendar doesn't use, `OutOfRange` for a
    /// year of era outside the era.
    pub(crate) fn absolute_year(
        &self,
        year_of_era: i32,
        era: &Era,
        calendar: &'static str,
    ) -> Result<i32, CalendarError> {
        let max = self.max_year_of_era(era, calendar)?;
        let min = self.min_year_of_era(era, calendar)?;
        check_range("year_of_era", year_of_era, min, max)?;
        Ok(match self {
            Self::GregorianJulian { .. } if *era == BEFORE_COMMON => 1 - year_of_era,
            _ => year_of_era,
        })
    }

    pub(crate) const fn year_of_era(&self, absolute_year: i32) -> i32 {
        match self {
            Self::GregorianJulian { .. } if absolute_year <= 0 => 1 - absolute_year,
            _ => absolute_year,
        }
    }

    pub(crate) fn era(&self, absolute_year: i32) -> &'static Era {
        match self {
            Self::Single { era, .. } => *era,
            Self::GregorianJulian { .. } if absolute_year > 0 => &COMMON,
            Self::GregorianJulian { .. } => &BEFORE_COMMON,
        }
    }

    pub(crate) fn min_year_of_era(&self, era: &Era, calendar: &'static str) -> Result<i32, CalendarError> {
        self.validate_era(era, calendar)?;
        Ok(match self {
            Self::Single { min_year, .. } => *min_year,
            Self::GregorianJulian { .. } => 1,
        })
    }

    pub(crate) fn max_year_of_era(&self, era: &Era, calendar: &'static str) -> Result<i32, CalendarError> {
        self.validate_era(era, calendar)?;
        Ok(match self {
            Self::Single { max_year, .. } => *max_year,
            Self::GregorianJulian {
                max_year_of_before_common,
                ..
            } if *era == BEFORE_COMMON => *max_year_of_before_common,
            Self::GregorianJulian {
                max_year_of_common, ..
            } => *max_year_of_common,
        })
    }
}
