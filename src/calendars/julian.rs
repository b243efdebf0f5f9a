use super::{CalculatorCore, YearMonthDayCalculator, gj, regular};
use crate::{CalendarError, YearMonthDay};

const MIN_JULIAN_YEAR: i32 = -9997;
const MAX_JULIAN_YEAR: i32 = 9998;
const AVERAGE_DAYS_PER_10_JULIAN_YEARS: i32 = 3653;
const DAYS_AT_START_OF_YEAR_1: i32 = -719_164;

const fn is_julian_leap_year(year: i32) -> bool {
    (year & 3) == 0
}

/// The proleptic Julian calendar: a leap year every four years, no exceptions.
#[derive(Debug)]
pub(crate) struct JulianCalculator {
    core: CalculatorCore,
}

impl JulianCalculator {
    pub(crate) const fn new() -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_JULIAN_YEAR,
                MAX_JULIAN_YEAR,
                AVERAGE_DAYS_PER_10_JULIAN_YEARS,
                DAYS_AT_START_OF_YEAR_1,
            ),
        }
    }
}

impl YearMonthDayCalculator for JulianCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32 {
        gj::days_from_start_of_year_to_start_of_month(is_julian_leap_year(year), month)
    }

    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        // Counted from 1968, the leap year nearest the epoch.
        let relative_year = year - 1968;
        let leap_years = if relative_year <= 0 {
            (relative_year + 3) >> 2
        } else if is_julian_leap_year(year) {
            relative_year >> 2
        } else {
            // January 1st falls after the leap day of every earlier cycle.
            (relative_year >> 2) + 1
        };
        // 1970-01-01 Gregorian is 1969-12-19 Julian.
        relative_year * 365 + leap_years - (366 + 352)
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        gj::MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        gj::days_in_month(is_julian_leap_year(year), month)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_julian_leap_year(year)
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, gj::MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        gj::year_month_day(year, is_julian_leap_year(year), day_of_year)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        gj::days_in_year(is_julian_leap_year(year))
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, gj::MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }
}
