use std::cmp::Ordering;

use super::{CalculatorCore, YearMonthDayCalculator, YearStartCache};
use crate::prelude::*;
use crate::{CalendarError, YearMonthDay};

const MIN_HEBREW_YEAR: i32 = 1;
const MAX_HEBREW_YEAR: i32 = 9999;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3654;
const DAYS_AT_START_OF_YEAR_1: i32 = -2_092_590;

const MONTHS_PER_LEAP_CYCLE: i32 = 235;
const YEARS_PER_LEAP_CYCLE: i32 = 19;

/// How the months of a Hebrew year are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HebrewMonthNumbering {
    /// Tishri is month 1; the year runs 1 to 12 (or 13) in order.
    Civil,
    /// Nisan is month 1; Tishri, which starts the year, is month 7 and
    /// Adar II is month 13.
    Scriptural,
}

/// Year-level rules, all in scriptural month numbering.
mod scriptural {
    use super::{MAX_HEBREW_YEAR, MIN_HEBREW_YEAR, YearStartCache};
    use crate::YearMonthDay;

    const IS_HESHVAN_LONG_CACHE_BIT: i32 = 1 << 0;
    const IS_KISLEV_SHORT_CACHE_BIT: i32 = 1 << 1;
    const ELAPSED_DAYS_CACHE_SHIFT: u32 = 2;

    /// Elapsed days at the start of each year, with the Heshvan and Kislev
    /// flags in the low two bits. Shared by both numberings.
    static YEAR_CACHE: YearStartCache = YearStartCache::new();

    /// Leap years have 13 months: 7 in every 19.
    pub(super) const fn is_leap_year(year: i32) -> bool {
        (year * 7 + 1) % 19 < 7
    }

    fn cache_entry(year: i32) -> i32 {
        if !(MIN_HEBREW_YEAR..=MAX_HEBREW_YEAR).contains(&year) {
            return compute_cache_entry(year);
        }
        YEAR_CACHE.get_or_compute(year, compute_cache_entry)
    }

    fn compute_cache_entry(year: i32) -> i32 {
        let days = elapsed_days_no_cache(year);
        let next_year = year + 1;
        let next_year_days = if next_year <= MAX_HEBREW_YEAR {
            YEAR_CACHE
                .get(next_year)
                .map_or_else(|| elapsed_days_no_cache(next_year), |entry| entry >> ELAPSED_DAYS_CACHE_SHIFT)
        } else {
            elapsed_days_no_cache(next_year)
        };
        let days_in_year = next_year_days - days;
        let mut entry = days << ELAPSED_DAYS_CACHE_SHIFT;
        match days_in_year % 10 {
            5 => entry |= IS_HESHVAN_LONG_CACHE_BIT,
            3 => entry |= IS_KISLEV_SHORT_CACHE_BIT,
            _ => {}
        }
        entry
    }

    /// Days from the Hebrew epoch to the start of `year`, counting year 1 as day 1.
    fn elapsed_days_no_cache(year: i32) -> i32 {
        let cycle_year = (year - 1) % 19;
        let months_elapsed = 235 * ((year - 1) / 19) + 12 * cycle_year + (cycle_year * 7 + 1) / 19;
        let parts_elapsed = 204 + 793 * (months_elapsed % 1080);
        let hours_elapsed =
            5 + 12 * months_elapsed + 793 * (months_elapsed / 1080) + parts_elapsed / 1080;
        let day = 1 + 29 * months_elapsed + hours_elapsed / 24;
        let parts = (hours_elapsed % 24) * 1080 + parts_elapsed % 1080;
        let postpone_rosh_ha_shanah = parts >= 19_440
            || (day % 7 == 2 && parts >= 9924 && !is_leap_year(year))
            || (day % 7 == 1 && parts >= 16_789 && is_leap_year(year - 1));
        let alternative_day = if postpone_rosh_ha_shanah { day + 1 } else { day };
        // Rosh Hashanah never falls on Sunday, Wednesday or Friday.
        if matches!(alternative_day % 7, 0 | 3 | 5) {
            alternative_day + 1
        } else {
            alternative_day
        }
    }

    pub(super) fn elapsed_days(year: i32) -> i32 {
        cache_entry(year) >> ELAPSED_DAYS_CACHE_SHIFT
    }

    pub(super) fn days_in_year(year: i32) -> i32 {
        elapsed_days(year + 1) - elapsed_days(year)
    }

    /// Month lengths that depend on the year: (Heshvan, Kislev, Adar I, Adar II).
    fn variable_month_lengths(year: i32) -> (i32, i32, i32, i32) {
        let entry = cache_entry(year);
        let heshvan = if entry & IS_HESHVAN_LONG_CACHE_BIT != 0 { 30 } else { 29 };
        let kislev = if entry & IS_KISLEV_SHORT_CACHE_BIT != 0 { 29 } else { 30 };
        if is_leap_year(year) {
            (heshvan, kislev, 30, 29)
        } else {
            (heshvan, kislev, 29, 0)
        }
    }

    pub(super) fn days_in_month(year: i32, month: i32) -> i32 {
        match month {
            2 | 4 | 6 | 10 | 13 => 29,
            8 => variable_month_lengths(year).0,
            9 => variable_month_lengths(year).1,
            12 if is_leap_year(year) => 30,
            12 => 29,
            _ => 30,
        }
    }

    pub(super) fn days_from_start_of_year_to_start_of_month(year: i32, month: i32) -> i32 {
        let (heshvan, kislev, first_adar, second_adar) = variable_month_lengths(year);
        // Tishri through Adar II, then Nisan through Elul.
        let to_nisan = 30 + heshvan + kislev + 29 + 30 + first_adar + second_adar;
        match month {
            7 => 0,
            8 => 30,
            9 => 30 + heshvan,
            10 => 30 + heshvan + kislev,
            11 => 30 + heshvan + kislev + 29,
            12 => 30 + heshvan + kislev + 29 + 30,
            13 => 30 + heshvan + kislev + 29 + 30 + first_adar,
            1 => to_nisan,
            2 => to_nisan + 30,
            3 => to_nisan + 30 + 29,
            4 => to_nisan + 30 + 29 + 30,
            5 => to_nisan + 30 + 29 + 30 + 29,
            _ => to_nisan + 30 + 29 + 30 + 29 + 30,
        }
    }

    /// Scriptural date for the one-based `day_of_year`.
    pub(super) fn year_month_day(year: i32, day_of_year: i32) -> YearMonthDay {
        let (heshvan, kislev, first_adar, second_adar) = variable_month_lengths(year);
        // Months in the order they occur within the year.
        let months = [
            (7, 30),
            (8, heshvan),
            (9, kislev),
            (10, 29),
            (11, 30),
            (12, first_adar),
            (13, second_adar),
            (1, 30),
            (2, 29),
            (3, 30),
            (4, 29),
            (5, 30),
        ];
        let mut remaining = day_of_year;
        for (month, length) in months {
            if remaining <= length {
                return YearMonthDay::new(year, month, remaining);
            }
            remaining -= length;
        }
        YearMonthDay::new(year, 6, remaining)
    }
}

/// Given a civil month and its year, the scriptural month. Month 13 in a
/// non-leap year yields 7.
pub(crate) const fn civil_to_scriptural(year: i32, month: i32) -> i32 {
    if month < 7 {
        return month + 6;
    }
    let leap_year = scriptural::is_leap_year(year);
    if month == 7 {
        return if leap_year { 13 } else { 1 };
    }
    if leap_year { month - 7 } else { month - 6 }
}

/// Given a scriptural month and its year, the civil month.
pub(crate) const fn scriptural_to_civil(year: i32, month: i32) -> i32 {
    if month >= 7 {
        return month - 6;
    }
    if scriptural::is_leap_year(year) { month + 7 } else { month + 6 }
}

/// The Hebrew lunisolar calendar, in either month numbering.
#[derive(Debug)]
pub(crate) struct HebrewCalculator {
    core: CalculatorCore,
    numbering: HebrewMonthNumbering,
}

impl HebrewCalculator {
    pub(crate) const fn new(numbering: HebrewMonthNumbering) -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_HEBREW_YEAR,
                MAX_HEBREW_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                DAYS_AT_START_OF_YEAR_1,
            ),
            numbering,
        }
    }

    fn calendar_to_civil_month(&self, year: i32, month: i32) -> i32 {
        match self.numbering {
            HebrewMonthNumbering::Civil => month,
            HebrewMonthNumbering::Scriptural => scriptural_to_civil(year, month),
        }
    }

    fn calendar_to_scriptural_month(&self, year: i32, month: i32) -> i32 {
        match self.numbering {
            HebrewMonthNumbering::Civil => civil_to_scriptural(year, month),
            HebrewMonthNumbering::Scriptural => month,
        }
    }

    fn civil_to_calendar_month(&self, year: i32, month: i32) -> i32 {
        match self.numbering {
            HebrewMonthNumbering::Civil => month,
            HebrewMonthNumbering::Scriptural => civil_to_scriptural(year, month),
        }
    }

    fn scriptural_to_calendar_month(&self, year: i32, month: i32) -> i32 {
        match self.numbering {
            HebrewMonthNumbering::Civil => scriptural_to_civil(year, month),
            HebrewMonthNumbering::Scriptural => month,
        }
    }

    /// Orders `start + months` relative to `end`; a shift past either end of
    /// the calendar counts as beyond `end` in that direction.
    fn compare_shifted(&self, start: YearMonthDay, months: i32, end: YearMonthDay) -> Ordering {
        match self.add_months(start, months) {
            Ok(shifted) => self.compare(shifted, end),
            Err(_) if months > 0 => Ordering::Greater,
            Err(_) => Ordering::Less,
        }
    }
}

impl YearMonthDayCalculator for HebrewCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32 {
        scriptural::days_from_start_of_year_to_start_of_month(
            year,
            self.calendar_to_scriptural_month(year, month),
        )
    }

    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        // Elapsed days count year 1 as day 1.
        scriptural::elapsed_days(year) - 1 + DAYS_AT_START_OF_YEAR_1
    }

    fn months_in_year(&self, year: i32) -> i32 {
        if scriptural::is_leap_year(year) { 13 } else { 12 }
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        scriptural::days_in_month(year, self.calendar_to_scriptural_month(year, month))
    }

    fn is_leap_year(&self, year: i32) -> bool {
        scriptural::is_leap_year(year)
    }

    /// Works in civil months, jumping whole 19-year cycles of 235 months first.
    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        if months == 0 {
            return Ok(ymd);
        }
        let mut year = ymd.year();
        let mut month = self.calendar_to_civil_month(year, ymd.month());
        year = i64::from(year)
            .checked_add(i64::from(months / MONTHS_PER_LEAP_CYCLE) * i64::from(YEARS_PER_LEAP_CYCLE))
            .and_then(|year| i32::try_from(year).ok())
            // The remaining months move at most one more cycle.
            .filter(|year| {
                (self.min_year() - YEARS_PER_LEAP_CYCLE - 1..=self.max_year() + YEARS_PER_LEAP_CYCLE + 1)
                    .contains(year)
            })
            .ok_or(CalendarError::Overflow)?;
        let mut months = months % MONTHS_PER_LEAP_CYCLE;
        if months > 0 {
            months += month - 1;
            while months >= self.months_in_year(year) {
                months -= self.months_in_year(year);
                year += 1;
            }
            month = months + 1;
        } else {
            months -= self.months_in_year(year) - month;
            while months + self.months_in_year(year) <= 0 {
                months += self.months_in_year(year);
                year -= 1;
            }
            month = self.months_in_year(year) + months;
        }
        if year < self.min_year() || year > self.max_year() {
            return Err(CalendarError::Overflow);
        }
        let month = self.civil_to_calendar_month(year, month);
        let day = ymd.day().min(self.days_in_month(year, month));
        Ok(YearMonthDay::new(year, month, day))
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        let scriptural = scriptural::year_month_day(year, day_of_year);
        match self.numbering {
            HebrewMonthNumbering::Scriptural => scriptural,
            HebrewMonthNumbering::Civil => YearMonthDay::new(
                year,
                scriptural_to_civil(year, scriptural.month()),
                scriptural.day(),
            ),
        }
    }

    fn days_in_year(&self, year: i32) -> i32 {
        scriptural::days_in_year(year)
    }

    /// Estimates from the average month length of the 19-year cycle, then
    /// walks one month at a time to the exact answer.
    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        let start_civil_month = self.calendar_to_civil_month(start.year(), start.month());
        let end_civil_month = self.calendar_to_civil_month(end.year(), end.month());
        let mut diff = ((end_civil_month - start_civil_month) * YEARS_PER_LEAP_CYCLE
            + (end.year() - start.year()) * MONTHS_PER_LEAP_CYCLE)
            / YEARS_PER_LEAP_CYCLE;

        if self.compare(start, end) != Ordering::Greater {
            while self.compare_shifted(start, diff, end) == Ordering::Greater {
                diff -= 1;
            }
            while self.compare_shifted(start, diff, end) != Ordering::Greater {
                diff += 1;
            }
            Ok(diff - 1)
        } else {
            while self.compare_shifted(start, diff, end) == Ordering::Less {
                diff += 1;
            }
            while self.compare_shifted(start, diff, end) != Ordering::Less {
                diff -= 1;
            }
            Ok(diff + 1)
        }
    }

    /// Keeps the month and day where possible. Adar II becomes Adar in a
    /// non-leap year and Adar of a non-leap year becomes Adar II in a leap
    /// year. Day 30 of a month that is shorter in the new year moves to the
    /// first of the following month.
    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        let current_year = ymd.year();
        let mut day = ymd.day();
        let mut month = self.calendar_to_scriptural_month(current_year, ymd.month());
        if month == 13 && !self.is_leap_year(year) {
            month = 12;
        } else if month == 12 && self.is_leap_year(year) && !self.is_leap_year(current_year) {
            month = 13;
        }
        if day == 30 && matches!(month, 8 | 9 | 12) && scriptural::days_in_month(year, month) != 30 {
            day = 1;
            month += 1;
            if month == 13 {
                month = 1;
            }
        }
        YearMonthDay::new(year, self.scriptural_to_calendar_month(year, month), day)
    }

    /// Civil numbering orders naturally. Scriptural numbering compares the
    /// civil equivalents of the months, as Nisan falls mid-year.
    fn compare(&self, lhs: YearMonthDay, rhs: YearMonthDay) -> Ordering {
        if self.numbering == HebrewMonthNumbering::Civil {
            return lhs.cmp(&rhs);
        }
        lhs.year()
            .cmp(&rhs.year())
            .then_with(|| {
                self.calendar_to_civil_month(lhs.year(), lhs.month())
                    .cmp(&self.calendar_to_civil_month(rhs.year(), rhs.month()))
            })
            .then_with(|| lhs.day().cmp(&rhs.day()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::test_support::assert_consistent;

    fn civil() -> HebrewCalculator {
        HebrewCalculator::new(HebrewMonthNumbering::Civil)
    }

    fn scriptural() -> HebrewCalculator {
        HebrewCalculator::new(HebrewMonthNumbering::Scriptural)
    }

    #[test]
    fn test_leap_years() {
        assert!(scriptural::is_leap_year(5402));
        assert!(scriptural::is_leap_year(5784));
        assert!(!scriptural::is_leap_year(5785));
        let leap_years_in_cycle = (1..=19).filter(|&year| scriptural::is_leap_year(year)).count();
        assert_eq!(leap_years_in_cycle, 7);
    }

    #[test]
    fn test_year_lengths() {
        let expected = [
            (5402, 385),
            (5780, 355),
            (5781, 353),
            (5782, 384),
            (5783, 355),
            (5784, 383),
            (5785, 355),
            (5786, 354),
            (5787, 385),
        ];
        for (year, length) in expected {
            assert_eq!(civil().days_in_year(year), length, "{year}");
        }
    }

    #[test]
    fn test_known_dates() {
        struct TestCase {
            days: i32,
            civil: YearMonthDay,
            scriptural: YearMonthDay,
        }

        let cases = [
            // 2023-09-16, Rosh Hashanah 5784
            TestCase {
                days: 19_616,
                civil: YearMonthDay::new(5784, 1, 1),
                scriptural: YearMonthDay::new(5784, 7, 1),
            },
            TestCase {
                days: 0,
                civil: YearMonthDay::new(5730, 4, 23),
                scriptural: YearMonthDay::new(5730, 10, 23),
            },
            TestCase {
                days: -2_092_590,
                civil: YearMonthDay::new(1, 1, 1),
                scriptural: YearMonthDay::new(1, 7, 1),
            },
            TestCase {
                days: 1_559_487,
                civil: YearMonthDay::new(9999, 12, 29),
                scriptural: YearMonthDay::new(9999, 6, 29),
            },
        ];

        for case in cases {
            assert_eq!(civil().year_month_day(case.days), case.civil, "{}", case.days);
            assert_eq!(scriptural().year_month_day(case.days), case.scriptural, "{}", case.days);
            assert_eq!(civil().days_since_epoch(case.civil), case.days);
            assert_eq!(scriptural().days_since_epoch(case.scriptural), case.days);
        }
    }

    #[test]
    fn test_month_converter() {
        for year in [5783, 5784] {
            for month in 1..=civil().months_in_year(year) {
                let converted = civil_to_scriptural(year, month);
                assert_eq!(scriptural_to_civil(year, converted), month, "{year}-{month}");
            }
        }
        // Leap year: civil 6 is Adar I (12), civil 7 is Adar II (13)
        assert_eq!(civil_to_scriptural(5784, 6), 12);
        assert_eq!(civil_to_scriptural(5784, 7), 13);
        assert_eq!(civil_to_scriptural(5784, 8), 1);
        // Non-leap year: civil 7 is Nisan
        assert_eq!(civil_to_scriptural(5783, 7), 1);
        assert_eq!(civil_to_scriptural(5783, 1), 7);
    }

    #[test]
    fn test_add_months() {
        struct TestCase {
            calc: HebrewCalculator,
            start: YearMonthDay,
            months: i32,
            expected: YearMonthDay,
        }

        let cases = [
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 6, 30),
                months: 1,
                expected: YearMonthDay::new(5784, 7, 29),
            },
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 1, 1),
                months: -1,
                expected: YearMonthDay::new(5783, 12, 1),
            },
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 1, 1),
                months: 235,
                expected: YearMonthDay::new(5803, 1, 1),
            },
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 13, 29),
                months: 12,
                expected: YearMonthDay::new(5785, 12, 29),
            },
            TestCase {
                calc: scriptural(),
                start: YearMonthDay::new(5784, 12, 30),
                months: 1,
                expected: YearMonthDay::new(5784, 13, 29),
            },
            TestCase {
                calc: scriptural(),
                start: YearMonthDay::new(5784, 7, 1),
                months: -1,
                expected: YearMonthDay::new(5783, 6, 1),
            },
        ];

        for case in cases {
            assert_eq!(
                case.calc.add_months(case.start, case.months).unwrap(),
                case.expected,
                "{:?} {} + {}",
                case.calc.numbering,
                case.start,
                case.months
            );
        }
    }

    #[test]
    fn test_add_months_overflow() {
        let result = civil().add_months(YearMonthDay::new(9999, 12, 1), 1);
        assert!(matches!(result, Err(CalendarError::Overflow)));
        let result = civil().add_months(YearMonthDay::new(1, 1, 1), -1);
        assert!(matches!(result, Err(CalendarError::Overflow)));
        let result = civil().add_months(YearMonthDay::new(5000, 1, 1), i32::MIN);
        assert!(matches!(result, Err(CalendarError::Overflow)));
    }

    #[test]
    fn test_months_between() {
        let between = |calc: HebrewCalculator, start, end| calc.months_between(start, end).unwrap();
        assert_eq!(between(civil(), YearMonthDay::new(5784, 1, 1), YearMonthDay::new(5785, 1, 1)), 13);
        assert_eq!(between(civil(), YearMonthDay::new(5785, 1, 1), YearMonthDay::new(5784, 1, 1)), -13);
        assert_eq!(
            between(scriptural(), YearMonthDay::new(5784, 7, 1), YearMonthDay::new(5784, 6, 29)),
            12
        );
        assert_eq!(
            between(scriptural(), YearMonthDay::new(5784, 1, 15), YearMonthDay::new(5790, 3, 2)),
            75
        );
        assert_eq!(
            between(civil(), YearMonthDay::new(9999, 1, 1), YearMonthDay::new(9999, 12, 29)),
            11
        );
    }

    #[test]
    fn test_set_year() {
        struct TestCase {
            calc: HebrewCalculator,
            start: YearMonthDay,
            year: i32,
            expected: YearMonthDay,
        }

        let cases = [
            // Adar II into a non-leap year
            TestCase {
                calc: scriptural(),
                start: YearMonthDay::new(5784, 13, 5),
                year: 5785,
                expected: YearMonthDay::new(5785, 12, 5),
            },
            // Adar into a leap year
            TestCase {
                calc: scriptural(),
                start: YearMonthDay::new(5785, 12, 5),
                year: 5784,
                expected: YearMonthDay::new(5784, 13, 5),
            },
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 3, 30),
                year: 5785,
                expected: YearMonthDay::new(5785, 3, 30),
            },
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5784, 7, 10),
                year: 5785,
                expected: YearMonthDay::new(5785, 6, 10),
            },
            // Kislev 30 into a year with a short Kislev
            TestCase {
                calc: civil(),
                start: YearMonthDay::new(5785, 3, 30),
                year: 5781,
                expected: YearMonthDay::new(5781, 4, 1),
            },
            // Adar I 30 into a non-leap year rolls into Nisan
            TestCase {
                calc: scriptural(),
                start: YearMonthDay::new(5784, 12, 30),
                year: 5785,
                expected: YearMonthDay::new(5785, 1, 1),
            },
        ];

        for case in cases {
            assert_eq!(
                case.calc.set_year(case.start, case.year),
                case.expected,
                "{:?} {} -> {}",
                case.calc.numbering,
                case.start,
                case.year
            );
        }
    }

    #[test]
    fn test_scriptural_compare() {
        let calc = scriptural();
        let tishri = YearMonthDay::new(5784, 7, 1);
        let nisan = YearMonthDay::new(5784, 1, 1);
        assert_eq!(calc.compare(tishri, nisan), Ordering::Less);
        assert_eq!(calc.compare(nisan, tishri), Ordering::Greater);
        assert_eq!(calc.compare(nisan, nisan), Ordering::Equal);
        assert_eq!(civil().compare(tishri, nisan), Ordering::Greater);
    }

    #[test]
    fn test_scriptural_day_counts_increase_with_compare() {
        let calc = scriptural();
        let mut previous = calc.year_month_day(19_000);
        for days in 19_001..19_800 {
            let current = calc.year_month_day(days);
            assert_eq!(calc.compare(previous, current), Ordering::Less, "{previous} / {current}");
            previous = current;
        }
    }

    #[test]
    fn test_consistency() {
        let calc = civil();
        assert_consistent(&calc, 1, 40);
        assert_consistent(&calc, 5380, 5420);
        assert_consistent(&calc, 5770, 5800);
        assert_consistent(&calc, 9980, 9999);
    }
}
