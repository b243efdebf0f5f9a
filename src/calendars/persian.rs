use tracing::debug;

use super::{CalculatorCore, YearMonthDayCalculator, regular};
use crate::{CalendarError, YearMonthDay};

const MIN_PERSIAN_YEAR: i32 = 1;
const MAX_PERSIAN_YEAR: i32 = 9377;
const MONTHS_IN_YEAR: i32 = 12;
const DAYS_PER_NON_LEAP_YEAR: i32 = 31 * 6 + 30 * 5 + 29;
const DAYS_PER_LEAP_YEAR: i32 = DAYS_PER_NON_LEAP_YEAR + 1;
/// Eight leap years in every 33
const AVERAGE_DAYS_PER_10_YEARS: i32 = (DAYS_PER_NON_LEAP_YEAR * 25 + DAYS_PER_LEAP_YEAR * 8) * 10 / 33;

/// Days before the start of each month (index 0 unused)
const TOTAL_DAYS_BY_MONTH: [i32; 13] = [0, 0, 31, 62, 93, 124, 155, 186, 216, 246, 276, 306, 336];

const SIMPLE_LEAP_YEAR_PATTERN_BITS: u64 = (1 << 1)
    | (1 << 5)
    | (1 << 9)
    | (1 << 13)
    | (1 << 17)
    | (1 << 22)
    | (1 << 26)
    | (1 << 30);
const SIMPLE_LEAP_YEAR_CYCLE_LENGTH: i32 = 33;

/// One bit per year (bit `year & 7` of byte `year >> 3`), taken from the
/// .NET 4.6 `PersianCalendar` tables.
static ASTRONOMICAL_LEAP_YEAR_BITS: &[u8] = include_bytes!("../data/persian_astronomical.bin");

/// How a Persian calendar decides its leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersianVariant {
    /// Years 1, 5, 9, 13, 17, 22, 26 and 30 of each 33-year cycle
    Simple,
    /// Birashk's 2820-year grand cycle
    Arithmetic,
    /// Leap years from stored astronomical observations
    Astronomical,
}

impl PersianVariant {
    const fn days_at_start_of_year_1(self) -> i32 {
        match self {
            Self::Simple => -492_268,
            Self::Arithmetic | Self::Astronomical => -492_267,
        }
    }

    fn is_leap_year(self, year: i32) -> bool {
        match self {
            Self::Simple => {
                let year_of_cycle = if year >= 0 {
                    year % SIMPLE_LEAP_YEAR_CYCLE_LENGTH
                } else {
                    year % SIMPLE_LEAP_YEAR_CYCLE_LENGTH + SIMPLE_LEAP_YEAR_CYCLE_LENGTH
                };
                SIMPLE_LEAP_YEAR_PATTERN_BITS & (1 << year_of_cycle) != 0
            }
            Self::Arithmetic => {
                let offset_year = if year > 0 { year - 474 } else { year - 473 };
                let cycle_year = offset_year % 2820 + 474;
                ((cycle_year + 38) * 31) % 128 < 31
            }
            Self::Astronomical => usize::try_from(year >> 3)
                .ok()
                .and_then(|index| ASTRONOMICAL_LEAP_YEAR_BITS.get(index))
                .is_some_and(|byte| byte & (1 << (year & 7)) != 0),
        }
    }
}

/// The Persian (Solar Hijri) calendar: six 31-day months, five 30-day
/// months, and a final month of 29 or 30 days.
///
/// Every year start is precomputed at construction, so lookups never touch
/// the shared year-start cache.
#[derive(Debug)]
pub(crate) struct PersianCalculator {
    core: CalculatorCore,
    variant: PersianVariant,
    /// Start of each year from 0 to `MAX_PERSIAN_YEAR + 1`, indexed by year
    start_of_year_days: Vec<i32>,
}

impl PersianCalculator {
    pub(crate) fn new(variant: PersianVariant) -> Self {
        let days_at_start_of_year_1 = variant.days_at_start_of_year_1();
        let mut start_of_year = days_at_start_of_year_1 - days_in_year(variant, 0);
        let start_of_year_days = (0..=MAX_PERSIAN_YEAR + 1)
            .map(|year| {
                let start = start_of_year;
                start_of_year += days_in_year(variant, year);
                start
            })
            .collect::<Vec<_>>();
        debug!(?variant, years = start_of_year_days.len(), "built persian year table");
        Self {
            core: CalculatorCore::new(
                MIN_PERSIAN_YEAR,
                MAX_PERSIAN_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                days_at_start_of_year_1,
            ),
            variant,
            start_of_year_days,
        }
    }
}

fn days_in_year(variant: PersianVariant, year: i32) -> i32 {
    if variant.is_leap_year(year) {
        DAYS_PER_LEAP_YEAR
    } else {
        DAYS_PER_NON_LEAP_YEAR
    }
}

impl YearMonthDayCalculator for PersianCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, _year: i32, month: i32) -> i32 {
        TOTAL_DAYS_BY_MONTH[month as usize]
    }

    /// Table lookup, walking year by year from the nearest end of the table
    /// for years outside it.
    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        if let Some(&days) = usize::try_from(year)
            .ok()
            .and_then(|index| self.start_of_year_days.get(index))
        {
            return days;
        }
        if year < 0 {
            let first = self.start_of_year_days.first().copied().unwrap_or_default();
            (year..0).fold(first, |days, y| days - self.days_in_year(y))
        } else {
            let last_year = MAX_PERSIAN_YEAR + 1;
            let last = self.start_of_year_days.last().copied().unwrap_or_default();
            (last_year..year).fold(last, |days, y| days + self.days_in_year(y))
        }
    }

    fn start_of_year_in_days(&self, year: i32) -> i32 {
        self.calculate_start_of_year_days(year)
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        if month < 7 {
            31
        } else if month < 12 || self.is_leap_year(year) {
            30
        } else {
            29
        }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        self.variant.is_leap_year(year)
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        if day_of_year == DAYS_PER_LEAP_YEAR {
            return YearMonthDay::new(year, 12, 30);
        }
        let zero_based = day_of_year - 1;
        if zero_based < 6 * 31 {
            YearMonthDay::new(year, zero_based / 31 + 1, zero_based % 31 + 1)
        } else {
            let day_of_second_half = zero_based - 6 * 31;
            YearMonthDay::new(year, day_of_second_half / 30 + 7, day_of_second_half % 30 + 1)
        }
    }

    fn days_in_year(&self, year: i32) -> i32 {
        days_in_year(self.variant, year)
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }
}
