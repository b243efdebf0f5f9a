use super::{CalculatorCore, YearMonthDayCalculator, regular};
use crate::prelude::*;
use crate::{CalendarError, YearMonthDay};

const MIN_ISLAMIC_YEAR: i32 = 1;
const MAX_ISLAMIC_YEAR: i32 = 9665;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3544;

const MONTHS_IN_YEAR: i32 = 12;
const MONTH_PAIR_LENGTH: i32 = 59;
const LONG_MONTH_LENGTH: i32 = 30;
const SHORT_MONTH_LENGTH: i32 = 29;
const DAYS_PER_NON_LEAP_YEAR: i32 = 354;
const DAYS_PER_LEAP_YEAR: i32 = 355;
const LEAP_YEAR_CYCLE_LENGTH: i32 = 30;
const DAYS_PER_LEAP_CYCLE: i32 = 19 * DAYS_PER_NON_LEAP_YEAR + 11 * DAYS_PER_LEAP_YEAR;

/// Friday, July 16th 622 CE (Julian)
const DAYS_AT_CIVIL_EPOCH: i32 = -492_148;
/// Thursday, July 15th 622 CE (Julian)
const DAYS_AT_ASTRONOMICAL_EPOCH: i32 = DAYS_AT_CIVIL_EPOCH - 1;

/// Days before the start of each month (index 0 unused). Leap years only
/// lengthen month 12, so one table serves every year.
const TOTAL_DAYS_BY_MONTH: [i32; 13] = [0, 0, 30, 59, 89, 118, 148, 177, 207, 236, 266, 295, 325];

/// Which years of the 30-year cycle are leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IslamicLeapYearPattern {
    /// Leap years 2, 5, 7, 10, 13, 15, 18, 21, 24, 26 and 29
    Base15,
    /// Leap years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29
    Base16,
    /// Leap years 2, 5, 8, 10, 13, 16, 19, 21, 24, 27 and 29
    Indian,
    /// Leap years 2, 5, 8, 11, 13, 16, 19, 21, 24, 27 and 30
    HabashAlHasib,
}

impl IslamicLeapYearPattern {
    /// One bit per year of the cycle; cycle year 30 is bit 0.
    const fn bits(self) -> u32 {
        match self {
            Self::Base15 => 623_158_436,
            Self::Base16 => 623_191_204,
            Self::Indian => 690_562_340,
            Self::HabashAlHasib => 153_692_453,
        }
    }
}

/// The day the Islamic calendar counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IslamicEpoch {
    /// Thursday, July 15th 622 CE (Julian)
    Astronomical,
    /// Friday, July 16th 622 CE (Julian)
    Civil,
}

impl IslamicEpoch {
    const fn days_at_start_of_year_1(self) -> i32 {
        match self {
            Self::Astronomical => DAYS_AT_ASTRONOMICAL_EPOCH,
            Self::Civil => DAYS_AT_CIVIL_EPOCH,
        }
    }
}

/// The tabular Islamic calendar: alternating 30 and 29 day months, with 11
/// leap years in every 30.
#[derive(Debug)]
pub(crate) struct IslamicCalculator {
    core: CalculatorCore,
    leap_year_pattern_bits: u32,
}

impl IslamicCalculator {
    pub(crate) const fn new(pattern: IslamicLeapYearPattern, epoch: IslamicEpoch) -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_ISLAMIC_YEAR,
                MAX_ISLAMIC_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                epoch.days_at_start_of_year_1(),
            ),
            leap_year_pattern_bits: pattern.bits(),
        }
    }
}

impl YearMonthDayCalculator for IslamicCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, _year: i32, month: i32) -> i32 {
        TOTAL_DAYS_BY_MONTH[month as usize]
    }

    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        // Cycles start in year 1, 31, 61 and so on; years just below 1 are allowed.
        let cycle = if year > 0 {
            (year - 1) / LEAP_YEAR_CYCLE_LENGTH
        } else {
            (year - LEAP_YEAR_CYCLE_LENGTH) / LEAP_YEAR_CYCLE_LENGTH
        };
        let year_at_start_of_cycle = cycle * LEAP_YEAR_CYCLE_LENGTH + 1;
        let start_of_cycle = self.core.days_at_start_of_year_1 + cycle * DAYS_PER_LEAP_CYCLE;
        (year_at_start_of_cycle..year).fold(start_of_cycle, |days, y| days + self.days_in_year(y))
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        if month == 12 && self.is_leap_year(year) {
            return LONG_MONTH_LENGTH;
        }
        if month & 1 == 0 { SHORT_MONTH_LENGTH } else { LONG_MONTH_LENGTH }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        let year_of_cycle = if year >= 0 {
            year % LEAP_YEAR_CYCLE_LENGTH
        } else {
            year % LEAP_YEAR_CYCLE_LENGTH + LEAP_YEAR_CYCLE_LENGTH
        };
        self.leap_year_pattern_bits & (1 << year_of_cycle) != 0
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        if day_of_year == DAYS_PER_LEAP_YEAR {
            return YearMonthDay::new(year, 12, 30);
        }
        let zero_based = day_of_year - 1;
        let month = zero_based * 2 / MONTH_PAIR_LENGTH + 1;
        let day = zero_based % MONTH_PAIR_LENGTH % LONG_MONTH_LENGTH + 1;
        YearMonthDay::new(year, month, day)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        if self.is_leap_year(year) {
            DAYS_PER_LEAP_YEAR
        } else {
            DAYS_PER_NON_LEAP_YEAR
        }
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }
}
