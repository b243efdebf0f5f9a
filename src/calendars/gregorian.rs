use once_cell::sync::Lazy;
use tracing::debug;

use super::{CalculatorCore, YearMonthDayCalculator, gj, regular};
use crate::consts::DAYS_AT_START_OF_UNIX_EPOCH_YEAR_1;
use crate::{CalendarError, YearMonthDay};

const MIN_GREGORIAN_YEAR: i32 = -9998;
const MAX_GREGORIAN_YEAR: i32 = 9999;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3652;
const DAYS_FROM_0000_TO_1970: i32 = 719_527;

const FIRST_OPTIMIZED_YEAR: i32 = 1900;
const LAST_OPTIMIZED_YEAR: i32 = 2100;
const FIRST_OPTIMIZED_DAY: i32 = -25_567;
const LAST_OPTIMIZED_DAY: i32 = 47_846;
const OPTIMIZED_YEARS: usize = (LAST_OPTIMIZED_YEAR - FIRST_OPTIMIZED_YEAR + 1) as usize;

/// Precomputed year and month starts for 1900-2100.
struct OptimizedTables {
    /// Start of each year, in days since the epoch
    year_start_days: [i32; OPTIMIZED_YEARS],
    /// The day before each month starts, so adding the day of month gives the date.
    /// Index 0 unused; `(year - 1900) * 12 + month` otherwise.
    month_start_days: [i32; OPTIMIZED_YEARS * 12 + 1],
}

static OPTIMIZED: Lazy<OptimizedTables> = Lazy::new(|| {
    let mut tables = OptimizedTables {
        year_start_days: [0; OPTIMIZED_YEARS],
        month_start_days: [0; OPTIMIZED_YEARS * 12 + 1],
    };
    for (offset, year) in (FIRST_OPTIMIZED_YEAR..=LAST_OPTIMIZED_YEAR).enumerate() {
        let year_start = calculate_start_of_year_days(year);
        tables.year_start_days[offset] = year_start;
        let is_leap = is_gregorian_leap_year(year);
        let mut month_start_day = year_start - 1;
        for month in 1..=gj::MONTHS_IN_YEAR {
            tables.month_start_days[offset * 12 + month as usize] = month_start_day;
            month_start_day += gj::days_in_month(is_leap, month);
        }
    }
    debug!(
        first_year = FIRST_OPTIMIZED_YEAR,
        last_year = LAST_OPTIMIZED_YEAR,
        "built gregorian lookup tables"
    );
    tables
});

pub(crate) const fn is_gregorian_leap_year(year: i32) -> bool {
    (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Start of `year` in days since the epoch, without any caching.
pub(crate) const fn calculate_start_of_year_days(year: i32) -> i32 {
    let centuries = year / 100;
    let leap_years = if year < 0 {
        // /4 and >>2 differ on negative numbers; add 3 first.
        ((year + 3) >> 2) - centuries + ((centuries + 3) >> 2) - 1
    } else {
        let leap_years = (year >> 2) - centuries + (centuries >> 2);
        if is_gregorian_leap_year(year) {
            leap_years - 1
        } else {
            leap_years
        }
    };
    year * 365 + (leap_years - DAYS_FROM_0000_TO_1970)
}

/// The proleptic Gregorian calendar, shared by the ISO and Gregorian systems.
#[derive(Debug)]
pub(crate) struct GregorianCalculator {
    core: CalculatorCore,
}

impl GregorianCalculator {
    pub(crate) const fn new() -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_GREGORIAN_YEAR,
                MAX_GREGORIAN_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                DAYS_AT_START_OF_UNIX_EPOCH_YEAR_1,
            ),
        }
    }

    /// Date for a day in 1900-2100, found without the year estimate.
    fn optimized_year_month_day(days_since_epoch: i32) -> YearMonthDay {
        let tables = &*OPTIMIZED;
        // Dividing by 366 can only undershoot, and by at most one year.
        let year_index = ((days_since_epoch - FIRST_OPTIMIZED_DAY) / 366) as usize;
        let mut day_of_year = days_since_epoch - tables.year_start_days[year_index];
        let mut year = year_index as i32 + FIRST_OPTIMIZED_YEAR;
        let days_in_year = gj::days_in_year(is_gregorian_leap_year(year));
        if day_of_year >= days_in_year {
            year += 1;
            day_of_year -= days_in_year;
        }
        gj::year_month_day(year, is_gregorian_leap_year(year), day_of_year + 1)
    }
}

impl YearMonthDayCalculator for GregorianCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32 {
        gj::days_from_start_of_year_to_start_of_month(is_gregorian_leap_year(year), month)
    }

    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        calculate_start_of_year_days(year)
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        gj::MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        gj::days_in_month(is_gregorian_leap_year(year), month)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_gregorian_leap_year(year)
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, gj::MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        gj::year_month_day(year, is_gregorian_leap_year(year), day_of_year)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        gj::days_in_year(is_gregorian_leap_year(year))
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, gj::MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }

    fn start_of_year_in_days(&self, year: i32) -> i32 {
        if (FIRST_OPTIMIZED_YEAR..=LAST_OPTIMIZED_YEAR).contains(&year) {
            return OPTIMIZED.year_start_days[(year - FIRST_OPTIMIZED_YEAR) as usize];
        }
        self.core
            .cache
            .get_or_compute(year, calculate_start_of_year_days)
    }

    fn days_since_epoch(&self, ymd: YearMonthDay) -> i32 {
        let year = ymd.year();
        if (FIRST_OPTIMIZED_YEAR..=LAST_OPTIMIZED_YEAR).contains(&year) {
            let index = (year - FIRST_OPTIMIZED_YEAR) as usize * 12 + ymd.month() as usize;
            return OPTIMIZED.month_start_days[index] + ymd.day();
        }
        self.start_of_year_in_days(year)
            + self.days_from_start_of_year_to_start_of_month(year, ymd.month())
            + ymd.day()
            - 1
    }

    fn year_month_day(&self, days_since_epoch: i32) -> YearMonthDay {
        if (FIRST_OPTIMIZED_DAY..=LAST_OPTIMIZED_DAY).contains(&days_since_epoch) {
            return Self::optimized_year_month_day(days_since_epoch);
        }
        let (year, zero_based_day) = self.year_and_day_of_year(days_since_epoch);
        self.year_month_day_from_day_of_year(year, zero_based_day + 1)
    }
}
