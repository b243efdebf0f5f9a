use super::{CalculatorCore, YearMonthDayCalculator, regular};
use crate::{CalendarError, YearMonthDay};

const MIN_COPTIC_YEAR: i32 = 1;
const MAX_COPTIC_YEAR: i32 = 9715;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3653;
const DAYS_AT_START_OF_YEAR_1: i32 = -615_558;

const MONTHS_IN_YEAR: i32 = 13;
const DAYS_IN_MONTH: i32 = 30;

const fn is_coptic_leap_year(year: i32) -> bool {
    (year & 3) == 3
}

/// The Coptic calendar: twelve 30-day months followed by a short thirteenth
/// month of 5 or 6 days.
#[derive(Debug)]
pub(crate) struct CopticCalculator {
    core: CalculatorCore,
}

impl CopticCalculator {
    pub(crate) const fn new() -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_COPTIC_YEAR,
                MAX_COPTIC_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                DAYS_AT_START_OF_YEAR_1,
            ),
        }
    }
}

impl YearMonthDayCalculator for CopticCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, _year: i32, month: i32) -> i32 {
        (month - 1) * DAYS_IN_MONTH
    }

    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        // 1970-01-01 Gregorian is 1686-04-23 Coptic; count from 1687.
        let relative_year = year - 1687;
        let leap_years = if relative_year <= 0 {
            (relative_year + 3) >> 2
        } else if is_coptic_leap_year(year) {
            relative_year >> 2
        } else {
            (relative_year >> 2) + 1
        };
        relative_year * 365 + leap_years + (365 - 112)
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        match month {
            MONTHS_IN_YEAR if is_coptic_leap_year(year) => 6,
            MONTHS_IN_YEAR => 5,
            _ => DAYS_IN_MONTH,
        }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_coptic_leap_year(year)
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        let zero_based = day_of_year - 1;
        YearMonthDay::new(year, zero_based / DAYS_IN_MONTH + 1, zero_based % DAYS_IN_MONTH + 1)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        if is_coptic_leap_year(year) { 366 } else { 365 }
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::test_support::assert_consistent;

    #[test]
    fn test_epoch() {
        let calc = CopticCalculator::new();
        assert_eq!(calc.year_month_day(0), YearMonthDay::new(1686, 4, 23));
        assert_eq!(calc.start_of_year_in_days(1), DAYS_AT_START_OF_YEAR_1);
    }

    #[test]
    fn test_month_lengths() {
        let calc = CopticCalculator::new();
        assert_eq!(calc.days_in_month(1, 1), 30);
        assert_eq!(calc.days_in_month(1, 13), 5);
        assert_eq!(calc.days_in_month(3, 13), 6);
        assert_eq!(calc.days_in_year(3), 366);
        assert_eq!(calc.months_in_year(3), 13);
    }

    #[test]
    fn test_bounds() {
        let calc = CopticCalculator::new();
        assert_eq!(calc.days_since_epoch(YearMonthDay::new(9715, 13, 6)), 2_932_845);
        assert_eq!(calc.year_month_day(2_932_845), YearMonthDay::new(9715, 13, 6));
    }

    #[test]
    fn test_add_months_wraps_through_short_month() {
        let calc = CopticCalculator::new();
        assert_eq!(
            calc.add_months(YearMonthDay::new(2, 12, 30), 1).unwrap(),
            YearMonthDay::new(2, 13, 5)
        );
        assert_eq!(
            calc.add_months(YearMonthDay::new(2, 12, 30), 2).unwrap(),
            YearMonthDay::new(3, 1, 30)
        );
        assert_eq!(
            calc.add_months(YearMonthDay::new(3, 1, 1), -1).unwrap(),
            YearMonthDay::new(2, 13, 1)
        );
    }

    #[test]
    fn test_consistency() {
        let calc = CopticCalculator::new();
        assert_consistent(&calc, 1, 20);
        assert_consistent(&calc, 1680, 1700);
        assert_consistent(&calc, 9700, 9715);
    }
}
