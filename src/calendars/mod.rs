//! Per-calendar year/month/day arithmetic.
//!
//! Every calendar system delegates its date arithmetic to a
//! [`YearMonthDayCalculator`]. Calculators only deal in absolute years and
//! trust their arguments; range checks happen in `CalendarSystem`.

mod badi;
mod cache;
mod coptic;
mod gj;
mod gregorian;
mod hebrew;
mod islamic;
mod julian;
mod persian;
mod regular;
mod um_al_qura;

use std::cmp::Ordering;
use std::fmt;

use crate::{CalendarError, YearMonthDay, check_range};

pub(crate) use badi::BadiCalculator;
pub(crate) use cache::YearStartCache;
pub(crate) use coptic::CopticCalculator;
pub(crate) use gregorian::GregorianCalculator;
pub(crate) use hebrew::HebrewCalculator;
pub use hebrew::HebrewMonthNumbering;
pub(crate) use islamic::IslamicCalculator;
pub use islamic::{IslamicEpoch, IslamicLeapYearPattern};
pub(crate) use julian::JulianCalculator;
pub(crate) use persian::{PersianCalculator, PersianVariant};
pub(crate) use um_al_qura::UmAlQuraCalculator;

/// State shared by every calculator.
#[derive(Debug)]
pub(crate) struct CalculatorCore {
    min_year: i32,
    max_year: i32,
    /// Stored with one extra day so year estimates from day counts never overshoot.
    average_days_per_10_years: i32,
    days_at_start_of_year_1: i32,
    /// Left cold by calculators that override `start_of_year_in_days` with a
    /// precomputed table (Persian, Um Al Qura).
    cache: YearStartCache,
}

impl CalculatorCore {
    pub(crate) const fn new(
        min_year: i32,
        max_year: i32,
        average_days_per_10_years: i32,
        days_at_start_of_year_1: i32,
    ) -> Self {
        assert!(
            max_year < crate::consts::YEAR_CACHE_INVALID_ENTRY_YEAR,
            "calendar year range would invalidate caching"
        );
        Self {
            min_year,
            max_year,
            average_days_per_10_years: average_days_per_10_years + 1,
            days_at_start_of_year_1,
            cache: YearStartCache::new(),
        }
    }
}

/// The core of date calculations: conversions between year/month/day
/// triples and days since 1970-01-01 ISO, plus month arithmetic.
///
/// All arguments are trusted. Years passed to the year-level methods may be
/// one outside `min_year..=max_year`; everything else is within range.
pub(crate) trait YearMonthDayCalculator: Send + Sync + fmt::Debug {
    fn core(&self) -> &CalculatorCore;

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32;

    /// Start of `year` in days since the epoch. Only called on a cache miss.
    fn calculate_start_of_year_days(&self, year: i32) -> i32;

    fn months_in_year(&self, year: i32) -> i32;

    fn days_in_month(&self, year: i32, month: i32) -> i32;

    fn is_leap_year(&self, year: i32) -> bool;

    /// # Errors
    /// Returns `CalendarError::Overflow` if the result leaves the calendar's year range.
    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError>;

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay;

    fn days_in_year(&self, year: i32) -> i32;

    /// Whole months from `start` to `end`; non-negative when `start` is earlier.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if an intermediate month leaves the calendar's range.
    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError>;

    /// Moves `ymd` to `year`, adjusting month and day where they no longer exist.
    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay;

    fn min_year(&self) -> i32 {
        self.core().min_year
    }

    fn max_year(&self) -> i32 {
        self.core().max_year
    }

    fn start_of_year_in_days(&self, year: i32) -> i32 {
        self.core()
            .cache
            .get_or_compute(year, |y| self.calculate_start_of_year_days(y))
    }

    fn days_since_epoch(&self, ymd: YearMonthDay) -> i32 {
        let year = ymd.year();
        self.start_of_year_in_days(year)
            + self.days_from_start_of_year_to_start_of_month(year, ymd.month())
            + ymd.day()
            - 1
    }

    fn year_month_day(&self, days_since_epoch: i32) -> YearMonthDay {
        let (year, zero_based_day) = self.year_and_day_of_year(days_since_epoch);
        self.year_month_day_from_day_of_year(year, zero_based_day + 1)
    }

    /// Year containing `days_since_epoch` and the zero-based day within it.
    fn year_and_day_of_year(&self, days_since_epoch: i32) -> (i32, i32) {
        let core = self.core();
        let days_since_year_1 = i64::from(days_since_epoch) - i64::from(core.days_at_start_of_year_1);
        let estimate = days_since_year_1 * 10 / i64::from(core.average_days_per_10_years) + 1;
        // Never start outside the calendar; table-driven calendars can't look further.
        let mut candidate = i32::try_from(estimate)
            .unwrap_or(core.max_year)
            .clamp(core.min_year, core.max_year);

        let mut remaining = days_since_epoch - self.start_of_year_in_days(candidate);
        if remaining < 0 {
            while remaining < 0 {
                candidate -= 1;
                remaining += self.days_in_year(candidate);
            }
            return (candidate, remaining);
        }
        let mut candidate_length = self.days_in_year(candidate);
        while remaining >= candidate_length {
            candidate += 1;
            remaining -= candidate_length;
            candidate_length = self.days_in_year(candidate);
        }
        (candidate, remaining)
    }

    /// One-based day of year.
    fn day_of_year(&self, ymd: YearMonthDay) -> i32 {
        self.days_from_start_of_year_to_start_of_month(ymd.year(), ymd.month()) + ymd.day()
    }

    /// Chronological order within this calendar. Naive for calendars whose year starts in month 1.
    fn compare(&self, lhs: YearMonthDay, rhs: YearMonthDay) -> Ordering {
        lhs.cmp(&rhs)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming the first field that is out of range.
    fn validate(&self, year: i32, month: i32, day: i32) -> Result<(), CalendarError> {
        check_range("year", year, self.min_year(), self.max_year())?;
        check_range("month", month, 1, self.months_in_year(year))?;
        check_range("day", day, 1, self.days_in_month(year, month))
    }
}
