//! The public face of every calendar: range-checked conversions and
//! arithmetic over a calculator, plus the process-wide registry of
//! calendar instances.

use std::cmp::Ordering;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use once_cell::race::OnceBox;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::calendars::{
    BadiCalculator, CopticCalculator, GregorianCalculator, HebrewCalculator, HebrewMonthNumbering,
    IslamicCalculator, IslamicEpoch, IslamicLeapYearPattern, JulianCalculator, PersianCalculator,
    PersianVariant, UmAlQuraCalculator, YearMonthDayCalculator,
};
use crate::era::{Era, EraCalculator};
use crate::{
    CalendarError, CalendarOrdinal, IsoDayOfWeek, YearMonthDay, YearMonthDayCalendar, check_range,
};

/// Id and display name of each calendar, indexed by ordinal.
static CALENDAR_IDS: [(&str, &str); CalendarOrdinal::SIZE as usize] = [
    ("ISO", "ISO"),
    ("Gregorian", "Gregorian"),
    ("Julian", "Julian"),
    ("Coptic", "Coptic"),
    ("Hebrew Civil", "Hebrew"),
    ("Hebrew Scriptural", "Hebrew"),
    ("Persian Simple", "Persian"),
    ("Persian Arithmetic", "Persian"),
    ("Persian Algorithmic", "Persian"),
    ("Hijri Astronomical-Base15", "Hijri"),
    ("Hijri Astronomical-Base16", "Hijri"),
    ("Hijri Astronomical-Indian", "Hijri"),
    ("Hijri Astronomical-HabashAlHasib", "Hijri"),
    ("Hijri Civil-Base15", "Hijri"),
    ("Hijri Civil-Base16", "Hijri"),
    ("Hijri Civil-Indian", "Hijri"),
    ("Hijri Civil-HabashAlHasib", "Hijri"),
    ("Um Al Qura", "Um Al Qura"),
    ("Badi", "Badi"),
];

static REGISTRY: [OnceBox<CalendarSystem>; CalendarOrdinal::SIZE as usize] =
    [const { OnceBox::new() }; CalendarOrdinal::SIZE as usize];

/// ISO and Gregorian differ only in identity, so they share one calculator
/// and with it one year-start cache.
static GREGORIAN_CALCULATOR: Lazy<Arc<GregorianCalculator>> =
    Lazy::new(|| Arc::new(GregorianCalculator::new()));

const ISLAMIC_PATTERNS: [IslamicLeapYearPattern; 4] = [
    IslamicLeapYearPattern::Base15,
    IslamicLeapYearPattern::Base16,
    IslamicLeapYearPattern::Indian,
    IslamicLeapYearPattern::HabashAlHasib,
];

/// A calendar system: how days map to years, months and eras.
///
/// There is exactly one instance per [`CalendarOrdinal`], created on first use
/// and never dropped, so instances can be compared by address.
pub struct CalendarSystem {
    ordinal: CalendarOrdinal,
    id: &'static str,
    name: &'static str,
    calculator: Arc<dyn YearMonthDayCalculator>,
    era_calculator: EraCalculator,
    min_year: i32,
    max_year: i32,
    min_days: i32,
    max_days: i32,
}

impl CalendarSystem {
    fn build(ordinal: CalendarOrdinal) -> Self {
        let calculator: Arc<dyn YearMonthDayCalculator> = match ordinal {
            CalendarOrdinal::Iso | CalendarOrdinal::Gregorian => {
                Arc::<GregorianCalculator>::clone(&GREGORIAN_CALCULATOR)
            }
            CalendarOrdinal::Julian => Arc::new(JulianCalculator::new()),
            CalendarOrdinal::Coptic => Arc::new(CopticCalculator::new()),
            CalendarOrdinal::HebrewCivil => Arc::new(HebrewCalculator::new(HebrewMonthNumbering::Civil)),
            CalendarOrdinal::HebrewScriptural => {
                Arc::new(HebrewCalculator::new(HebrewMonthNumbering::Scriptural))
            }
            CalendarOrdinal::PersianSimple => Arc::new(PersianCalculator::new(PersianVariant::Simple)),
            CalendarOrdinal::PersianArithmetic => {
                Arc::new(PersianCalculator::new(PersianVariant::Arithmetic))
            }
            CalendarOrdinal::PersianAstronomical => {
                Arc::new(PersianCalculator::new(PersianVariant::Astronomical))
            }
            CalendarOrdinal::IslamicAstronomicalBase15
            | CalendarOrdinal::IslamicAstronomicalBase16
            | CalendarOrdinal::IslamicAstronomicalIndian
            | CalendarOrdinal::IslamicAstronomicalHabashAlHasib => {
                let pattern = ISLAMIC_PATTERNS[ordinal.index() - CalendarOrdinal::IslamicAstronomicalBase15.index()];
                Arc::new(IslamicCalculator::new(pattern, IslamicEpoch::Astronomical))
            }
            CalendarOrdinal::IslamicCivilBase15
            | CalendarOrdinal::IslamicCivilBase16
            | CalendarOrdinal::IslamicCivilIndian
            | CalendarOrdinal::IslamicCivilHabashAlHasib => {
                let pattern = ISLAMIC_PATTERNS[ordinal.index() - CalendarOrdinal::IslamicCivilBase15.index()];
                Arc::new(IslamicCalculator::new(pattern, IslamicEpoch::Civil))
            }
            CalendarOrdinal::UmAlQura => Arc::new(UmAlQuraCalculator::new()),
            CalendarOrdinal::Badi => Arc::new(BadiCalculator::new()),
        };

        let min_year = calculator.min_year();
        let max_year = calculator.max_year();
        let era_calculator = match ordinal {
            CalendarOrdinal::Iso | CalendarOrdinal::Gregorian | CalendarOrdinal::Julian => {
                EraCalculator::gregorian_julian(min_year, max_year)
            }
            CalendarOrdinal::Coptic => EraCalculator::single(Era::anno_martyrum(), min_year, max_year),
            CalendarOrdinal::HebrewCivil | CalendarOrdinal::HebrewScriptural => {
                EraCalculator::single(Era::anno_mundi(), min_year, max_year)
            }
            CalendarOrdinal::PersianSimple
            | CalendarOrdinal::PersianArithmetic
            | CalendarOrdinal::PersianAstronomical => {
                EraCalculator::single(Era::anno_persico(), min_year, max_year)
            }
            CalendarOrdinal::Badi => EraCalculator::single(Era::bahai(), min_year, max_year),
            _ => EraCalculator::single(Era::anno_hegirae(), min_year, max_year),
        };

        let (id, name) = CALENDAR_IDS[ordinal.index()];
        let min_days = calculator.start_of_year_in_days(min_year);
        let max_days = calculator.start_of_year_in_days(max_year + 1) - 1;
        debug!(id, min_year, max_year, min_days, max_days, "built calendar system");
        Self {
            ordinal,
            id,
            name,
            calculator,
            era_calculator,
            min_year,
            max_year,
            min_days,
            max_days,
        }
    }

    /// The calendar for `ordinal`, building it on first use.
    ///
    /// Callers racing on first use may each build a calendar; one is
    /// published and the others are dropped.
    pub fn for_ordinal(ordinal: CalendarOrdinal) -> &'static Self {
        let slot = &REGISTRY[ordinal.index()];
        if let Some(calendar) = slot.get() {
            return calendar;
        }
        let mut built: Option<*const Self> = None;
        let calendar = slot.get_or_init(|| {
            let calendar = Box::new(Self::build(ordinal));
            built = Some(ptr::from_ref(&*calendar));
            calendar
        });
        match built {
            Some(candidate) if ptr::eq(candidate, calendar) => {
                debug!(id = calendar.id, "published calendar system");
            }
            Some(_) => debug!(id = calendar.id, "discarded calendar system after losing race"),
            None => {}
        }
        calendar
    }

    /// # Errors
    /// Returns `UnknownCalendarId` if no calendar has the id `id`.
    pub fn for_id(id: &str) -> Result<&'static Self, CalendarError> {
        CALENDAR_IDS
            .iter()
            .position(|(known, _)| *known == id)
            .map(|index| Self::for_ordinal(CalendarOrdinal::ALL[index]))
            .ok_or_else(|| CalendarError::UnknownCalendarId(id.to_string()))
    }

    /// Ids of every calendar, in ordinal order.
    pub fn ids() -> impl Iterator<Item = &'static str> {
        CALENDAR_IDS.iter().map(|(id, _)| *id)
    }

    /// ISO-8601: the proleptic Gregorian calendar.
    pub fn iso() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::Iso)
    }

    pub fn gregorian() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::Gregorian)
    }

    pub fn julian() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::Julian)
    }

    pub fn coptic() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::Coptic)
    }

    pub fn badi() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::Badi)
    }

    pub fn um_al_qura() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::UmAlQura)
    }

    pub fn hebrew(numbering: HebrewMonthNumbering) -> &'static Self {
        Self::for_ordinal(match numbering {
            HebrewMonthNumbering::Civil => CalendarOrdinal::HebrewCivil,
            HebrewMonthNumbering::Scriptural => CalendarOrdinal::HebrewScriptural,
        })
    }

    pub fn islamic(pattern: IslamicLeapYearPattern, epoch: IslamicEpoch) -> &'static Self {
        let first = match epoch {
            IslamicEpoch::Astronomical => CalendarOrdinal::IslamicAstronomicalBase15,
            IslamicEpoch::Civil => CalendarOrdinal::IslamicCivilBase15,
        };
        let offset = match pattern {
            IslamicLeapYearPattern::Base15 => 0,
            IslamicLeapYearPattern::Base16 => 1,
            IslamicLeapYearPattern::Indian => 2,
            IslamicLeapYearPattern::HabashAlHasib => 3,
        };
        Self::for_ordinal(CalendarOrdinal::ALL[first.index() + offset])
    }

    /// The Islamic calendar used by .NET's `HijriCalendar`: Base16 leap
    /// years with the astronomical epoch.
    pub fn islamic_bcl() -> &'static Self {
        Self::islamic(IslamicLeapYearPattern::Base16, IslamicEpoch::Astronomical)
    }

    /// Persian calendar with leap years on a 33-year cycle.
    pub fn persian_simple() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::PersianSimple)
    }

    /// Persian calendar with Birashk's 2820-year cycle.
    pub fn persian_arithmetic() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::PersianArithmetic)
    }

    /// Persian calendar with leap years from astronomical observation.
    pub fn persian_astronomical() -> &'static Self {
        Self::for_ordinal(CalendarOrdinal::PersianAstronomical)
    }

    /// Unique id, e.g. `"Hebrew Civil"`.
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Shared by variants of the same calendar, e.g. `"Hebrew"`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn ordinal(&self) -> CalendarOrdinal {
        self.ordinal
    }

    pub const fn min_year(&self) -> i32 {
        self.min_year
    }

    pub const fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Days since the epoch of the first day of `min_year`.
    pub const fn min_days(&self) -> i32 {
        self.min_days
    }

    /// Days since the epoch of the last day of `max_year`.
    pub const fn max_days(&self) -> i32 {
        self.max_days
    }

    pub fn eras(&self) -> &[&'static Era] {
        self.era_calculator.eras()
    }

    pub(crate) fn calculator(&self) -> &dyn YearMonthDayCalculator {
        &*self.calculator
    }

    const fn check_year(&self, year: i32) -> Result<(), CalendarError> {
        check_range("year", year, self.min_year, self.max_year)
    }

    /// # Errors
    /// Returns `OutOfRange` if `year` is outside the calendar.
    pub fn months_in_year(&self, year: i32) -> Result<i32, CalendarError> {
        self.check_year(year)?;
        Ok(self.calculator.months_in_year(year))
    }

    /// # Errors
    /// Returns `OutOfRange` if `year` or `month` is outside the calendar.
    pub fn days_in_month(&self, year: i32, month: i32) -> Result<i32, CalendarError> {
        self.calculator.validate(year, month, 1)?;
        Ok(self.calculator.days_in_month(year, month))
    }

    /// # Errors
    /// Returns `OutOfRange` if `year` is outside the calendar.
    pub fn days_in_year(&self, year: i32) -> Result<i32, CalendarError> {
        self.check_year(year)?;
        Ok(self.calculator.days_in_year(year))
    }

    /// # Errors
    /// Returns `OutOfRange` if `year` is outside the calendar.
    pub fn is_leap_year(&self, year: i32) -> Result<bool, CalendarError> {
        self.check_year(year)?;
        Ok(self.calculator.is_leap_year(year))
    }

    /// # Errors
    /// Returns `OutOfRange` naming the first of year, month or day that is invalid.
    pub fn validate(&self, year: i32, month: i32, day: i32) -> Result<(), CalendarError> {
        self.calculator.validate(year, month, day)
    }

    fn validate_ymd(&self, ymd: YearMonthDay) -> Result<(), CalendarError> {
        self.calculator.validate(ymd.year(), ymd.month(), ymd.day())
    }

    /// # Errors
    /// Returns `UnsupportedEra` if the calendar doesn't use `era`, or
    /// `OutOfRange` if `year_of_era` is outside it.
    pub fn absolute_year(&self, year_of_era: i32, era: &Era) -> Result<i32, CalendarError> {
        self.era_calculator.absolute_year(year_of_era, era, self.name)
    }

    /// # Errors
    /// Returns `OutOfRange` if `absolute_year` is outside the calendar.
    pub fn year_of_era(&self, absolute_year: i32) -> Result<i32, CalendarError> {
        self.check_year(absolute_year)?;
        Ok(self.era_calculator.year_of_era(absolute_year))
    }

    /// # Errors
    /// Returns `OutOfRange` if `absolute_year` is outside the calendar.
    pub fn era(&self, absolute_year: i32) -> Result<&'static Era, CalendarError> {
        self.check_year(absolute_year)?;
        Ok(self.era_calculator.era(absolute_year))
    }

    /// # Errors
    /// Returns `UnsupportedEra` if the calendar doesn't use `era`.
    pub fn min_year_of_era(&self, era: &Era) -> Result<i32, CalendarError> {
        self.era_calculator.min_year_of_era(era, self.name)
    }

    /// # Errors
    /// Returns `UnsupportedEra` if the calendar doesn't use `era`.
    pub fn max_year_of_era(&self, era: &Era) -> Result<i32, CalendarError> {
        self.era_calculator.max_year_of_era(era, self.name)
    }

    /// Days since 1970-01-01 ISO.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `ymd` isn't a date in this calendar.
    pub fn days_since_epoch(&self, ymd: YearMonthDay) -> Result<i32, CalendarError> {
        self.validate_ymd(ymd)?;
        Ok(self.calculator.days_since_epoch(ymd))
    }

    /// # Errors
    /// Returns `OutOfRange` if `days_since_epoch` is outside `min_days..=max_days`.
    pub fn year_month_day(&self, days_since_epoch: i32) -> Result<YearMonthDay, CalendarError> {
        check_range("days_since_epoch", days_since_epoch, self.min_days, self.max_days)?;
        Ok(self.calculator.year_month_day(days_since_epoch))
    }

    /// Like [`year_month_day`](Self::year_month_day), tagged with this calendar.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `days_since_epoch` is outside `min_days..=max_days`.
    pub fn year_month_day_calendar(
        &self,
        days_since_epoch: i32,
    ) -> Result<YearMonthDayCalendar, CalendarError> {
        Ok(self.year_month_day(days_since_epoch)?.with_calendar(self.ordinal))
    }

    /// # Errors
    /// Returns `OutOfRange` if `ymd` isn't a date in this calendar.
    pub fn day_of_week(&self, ymd: YearMonthDay) -> Result<IsoDayOfWeek, CalendarError> {
        Ok(IsoDayOfWeek::for_days_since_epoch(self.days_since_epoch(ymd)?))
    }

    /// One-based day within the year.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `ymd` isn't a date in this calendar.
    pub fn day_of_year(&self, ymd: YearMonthDay) -> Result<i32, CalendarError> {
        self.validate_ymd(ymd)?;
        Ok(self.calculator.day_of_year(ymd))
    }

    /// Adds `months`, truncating the day if the target month is shorter.
    ///
    /// # Errors
    /// Returns `OutOfRange` for an invalid `ymd`, or `Overflow` if the result
    /// would leave the calendar.
    pub fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        self.validate_ymd(ymd)?;
        self.calculator.add_months(ymd, months)
    }

    /// Whole months from `start` to `end`, negative if `end` is earlier.
    ///
    /// # Errors
    /// Returns `OutOfRange` for an invalid date, or `Overflow` if an
    /// intermediate result leaves the calendar.
    pub fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        self.validate_ymd(start)?;
        self.validate_ymd(end)?;
        self.calculator.months_between(start, end)
    }

    /// Moves `ymd` to `year`, adjusting month and day where they no longer exist.
    ///
    /// # Errors
    /// Returns `OutOfRange` for an invalid `ymd` or `year`.
    pub fn set_year(&self, ymd: YearMonthDay, year: i32) -> Result<YearMonthDay, CalendarError> {
        self.validate_ymd(ymd)?;
        self.check_year(year)?;
        Ok(self.calculator.set_year(ymd, year))
    }

    /// Chronological order of two dates in this calendar.
    ///
    /// # Errors
    /// Returns `OutOfRange` for an invalid date.
    pub fn compare(&self, lhs: YearMonthDay, rhs: YearMonthDay) -> Result<Ordering, CalendarError> {
        self.validate_ymd(lhs)?;
        self.validate_ymd(rhs)?;
        Ok(self.calculator.compare(lhs, rhs))
    }
}

impl fmt::Debug for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarSystem")
            .field("id", &self.id)
            .field("ordinal", &self.ordinal)
            .field("min_year", &self.min_year)
            .field("max_year", &self.max_year)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// Shorthand for [`CalendarSystem::for_ordinal`].
pub fn calendar_for_ordinal(ordinal: CalendarOrdinal) -> &'static CalendarSystem {
    CalendarSystem::for_ordinal(ordinal)
}

/// Shorthand for [`CalendarSystem::for_id`].
///
/// # Errors
/// Returns `UnknownCalendarId` if no calendar has the id `id`.
pub fn calendar_for_id(id: &str) -> Result<&'static CalendarSystem, CalendarError> {
    CalendarSystem::for_id(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ids_match_ordinals() {
        let ids = CalendarSystem::ids().collect::<Vec<_>>();
        assert_eq!(ids.len(), usize::from(CalendarOrdinal::SIZE));
        for (id, ordinal) in ids.into_iter().zip(CalendarOrdinal::ALL) {
            let calendar = CalendarSystem::for_id(id).unwrap();
            assert_eq!(calendar.ordinal(), ordinal);
            assert_eq!(calendar.id(), id);
            assert_eq!(calendar.to_string(), id);
        }
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(
            CalendarSystem::for_id("Mayan").unwrap_err(),
            CalendarError::UnknownCalendarId("Mayan".to_string())
        );
        assert!(calendar_for_id("iso").is_err());
    }

    #[test]
    fn test_named_accessors() {
        struct TestCase {
            calendar: &'static CalendarSystem,
            id: &'static str,
            name: &'static str,
        }

        let cases = [
            TestCase {
                calendar: CalendarSystem::iso(),
                id: "ISO",
                name: "ISO",
            },
            TestCase {
                calendar: CalendarSystem::hebrew(HebrewMonthNumbering::Scriptural),
                id: "Hebrew Scriptural",
                name: "Hebrew",
            },
            TestCase {
                calendar: CalendarSystem::islamic_bcl(),
                id: "Hijri Astronomical-Base16",
                name: "Hijri",
            },
            TestCase {
                calendar: CalendarSystem::islamic(IslamicLeapYearPattern::HabashAlHasib, IslamicEpoch::Civil),
                id: "Hijri Civil-HabashAlHasib",
                name: "Hijri",
            },
            TestCase {
                calendar: CalendarSystem::persian_astronomical(),
                id: "Persian Algorithmic",
                name: "Persian",
            },
            TestCase {
                calendar: CalendarSystem::um_al_qura(),
                id: "Um Al Qura",
                name: "Um Al Qura",
            },
        ];

        for case in cases {
            assert_eq!(case.calendar.id(), case.id);
            assert_eq!(case.calendar.name(), case.name);
        }
    }

    #[test]
    fn test_islamic_ids_follow_parameters() {
        for epoch in [IslamicEpoch::Astronomical, IslamicEpoch::Civil] {
            for pattern in ISLAMIC_PATTERNS {
                let calendar = CalendarSystem::islamic(pattern, epoch);
                assert_eq!(calendar.id(), format!("Hijri {epoch}-{pattern}"));
            }
        }
    }

    #[test]
    fn test_singleton_identity() {
        for ordinal in CalendarOrdinal::ALL {
            assert!(ptr::eq(calendar_for_ordinal(ordinal), calendar_for_ordinal(ordinal)));
        }
        assert!(ptr::eq(CalendarSystem::gregorian(), CalendarSystem::for_id("Gregorian").unwrap()));
    }

    #[test]
    fn test_concurrent_first_use_yields_one_instance() {
        let addresses = thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        CalendarOrdinal::ALL
                            .iter()
                            .map(|&ordinal| ptr::from_ref(calendar_for_ordinal(ordinal)) as usize)
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
        });
        for other in &addresses[1..] {
            assert_eq!(other, &addresses[0]);
        }
    }

    #[test]
    fn test_iso_and_gregorian_share_calculator() {
        let iso = CalendarSystem::iso();
        let gregorian = CalendarSystem::gregorian();
        assert!(!ptr::eq(iso, gregorian));
        assert!(Arc::ptr_eq(&iso.calculator, &gregorian.calculator));
    }

    #[test]
    fn test_day_bounds() {
        struct TestCase {
            calendar: &'static CalendarSystem,
            min_days: i32,
            max_days: i32,
        }

        let cases = [
            TestCase {
                calendar: CalendarSystem::iso(),
                min_days: -4_371_222,
                max_days: 2_932_896,
            },
            TestCase {
                calendar: CalendarSystem::julian(),
                min_days: -4_370_934,
                max_days: 2_932_604,
            },
            TestCase {
                calendar: CalendarSystem::coptic(),
                min_days: -615_558,
                max_days: 2_932_845,
            },
            TestCase {
                calendar: CalendarSystem::hebrew(HebrewMonthNumbering::Civil),
                min_days: -2_092_590,
                max_days: 1_559_487,
            },
            TestCase {
                calendar: CalendarSystem::badi(),
                min_days: -45_941,
                max_days: 318_935,
            },
            TestCase {
                calendar: CalendarSystem::um_al_qura(),
                min_days: -25_448,
                max_days: 39_401,
            },
            TestCase {
                calendar: CalendarSystem::persian_simple(),
                min_days: -492_268,
                max_days: 2_932_610,
            },
        ];

        for case in cases {
            assert_eq!(case.calendar.min_days(), case.min_days, "{}", case.calendar);
            assert_eq!(case.calendar.max_days(), case.max_days, "{}", case.calendar);
        }
    }

    #[test]
    fn test_range_checked_queries() {
        let iso = CalendarSystem::iso();
        assert_eq!(iso.days_in_month(2016, 2), Ok(29));
        assert_eq!(iso.days_in_year(2015), Ok(365));
        assert_eq!(iso.is_leap_year(2016), Ok(true));
        assert_eq!(iso.months_in_year(2016), Ok(12));
        assert!(matches!(
            iso.days_in_month(2016, 13),
            Err(CalendarError::OutOfRange { name: "month", .. })
        ));
        assert!(matches!(
            iso.is_leap_year(10_000),
            Err(CalendarError::OutOfRange { name: "year", .. })
        ));
        assert!(matches!(
            iso.validate(2015, 2, 29),
            Err(CalendarError::OutOfRange {
                name: "day",
                value: 29,
                min: 1,
                max: 28
            })
        ));
        assert_eq!(CalendarSystem::hebrew(HebrewMonthNumbering::Civil).months_in_year(5784), Ok(13));
    }

    #[test]
    fn test_conversions() {
        let iso = CalendarSystem::iso();
        let ymd = YearMonthDay::new(2005, 1, 2);
        assert_eq!(iso.days_since_epoch(ymd), Ok(12_785));
        assert_eq!(iso.year_month_day(12_785), Ok(ymd));
        assert_eq!(iso.day_of_week(ymd), Ok(IsoDayOfWeek::Sunday));
        assert_eq!(iso.day_of_year(YearMonthDay::new(2016, 3, 1)), Ok(61));
        assert_eq!(
            iso.year_month_day_calendar(12_785),
            Ok(YearMonthDayCalendar::new(2005, 1, 2, CalendarOrdinal::Iso))
        );
        assert!(matches!(
            iso.year_month_day(iso.max_days() + 1),
            Err(CalendarError::OutOfRange {
                name: "days_since_epoch",
                ..
            })
        ));
        assert!(iso.days_since_epoch(YearMonthDay::new(2015, 2, 29)).is_err());
    }

    #[test]
    fn test_eras() {
        let julian = CalendarSystem::julian();
        assert_eq!(julian.eras(), [Era::before_common(), Era::common()]);
        assert_eq!(julian.absolute_year(10, Era::before_common()), Ok(-9));
        assert_eq!(julian.year_of_era(-9), Ok(10));
        assert_eq!(julian.era(-9), Ok(Era::before_common()));
        assert_eq!(julian.max_year_of_era(Era::before_common()), Ok(9998));

        let coptic = CalendarSystem::coptic();
        assert_eq!(coptic.eras(), [Era::anno_martyrum()]);
        assert_eq!(coptic.min_year_of_era(Era::anno_martyrum()), Ok(1));
        assert_eq!(coptic.max_year_of_era(Era::anno_martyrum()), Ok(9715));
        assert_eq!(
            coptic.absolute_year(1, Era::anno_mundi()),
            Err(CalendarError::UnsupportedEra {
                era: "AM",
                calendar: "Coptic"
            })
        );
        assert_eq!(CalendarSystem::um_al_qura().era(1440), Ok(Era::anno_hegirae()));
        assert_eq!(CalendarSystem::badi().eras(), [Era::bahai()]);
    }

    #[test]
    fn test_arithmetic() {
        let gregorian = CalendarSystem::gregorian();
        let start = YearMonthDay::new(2016, 1, 31);
        assert_eq!(gregorian.add_months(start, 1), Ok(YearMonthDay::new(2016, 2, 29)));
        assert_eq!(gregorian.months_between(start, YearMonthDay::new(2017, 1, 31)), Ok(12));
        assert_eq!(
            gregorian.set_year(YearMonthDay::new(2016, 2, 29), 2017),
            Ok(YearMonthDay::new(2017, 2, 28))
        );
        assert_eq!(
            gregorian.compare(start, YearMonthDay::new(2016, 2, 1)),
            Ok(Ordering::Less)
        );
        assert_eq!(
            gregorian.add_months(YearMonthDay::new(9999, 12, 31), 1),
            Err(CalendarError::Overflow)
        );
        assert!(gregorian.set_year(start, 10_000).is_err());
    }
}
