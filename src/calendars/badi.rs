use super::{CalculatorCore, YearMonthDayCalculator, gj, gregorian, regular};
use crate::{CalendarError, YearMonthDay};

const MIN_BADI_YEAR: i32 = 1;
const MAX_BADI_YEAR: i32 = 999;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3652;
/// Naw-Ruz 1844-03-21 ISO
const DAYS_AT_START_OF_YEAR_1: i32 = -45_941;

const MONTHS_IN_YEAR: i32 = 19;
const DAYS_IN_MONTH: i32 = 19;
/// Ayyam-i-Ha is appended to this month rather than treated as a month of its own.
const MONTH_18: i32 = 18;
const MONTH_19: i32 = 19;
const DAYS_IN_AYYAMI_HA_IN_NORMAL_YEAR: i32 = 4;
const DAYS_IN_AYYAMI_HA_IN_LEAP_YEAR: i32 = 5;

const GREGORIAN_YEAR_OF_FIRST_BADI_YEAR: i32 = 1844;
const FIRST_YEAR_OF_STANDARDIZED_CALENDAR: i32 = 172;

/// One byte per year from 172 to 1000: the units digit is the offset of
/// Naw-Ruz from March 19th, and values of 10 or more mark a five-day Ayyam-i-Ha.
static YEAR_INFO: &[u8] = include_bytes!("../data/badi.bin");

fn year_info(year: i32) -> Option<u8> {
    let index = usize::try_from(year - FIRST_YEAR_OF_STANDARDIZED_CALENDAR).ok()?;
    YEAR_INFO.get(index).copied()
}

/// Days of Ayyam-i-Ha in `year`. Years before the 2015 standardization
/// follow the Gregorian leap year that ends during them.
fn days_in_ayyami_ha(year: i32) -> i32 {
    match year_info(year) {
        Some(info) if info >= 10 => DAYS_IN_AYYAMI_HA_IN_LEAP_YEAR,
        Some(_) => DAYS_IN_AYYAMI_HA_IN_NORMAL_YEAR,
        None if gregorian::is_gregorian_leap_year(year + GREGORIAN_YEAR_OF_FIRST_BADI_YEAR) => {
            DAYS_IN_AYYAMI_HA_IN_LEAP_YEAR
        }
        None => DAYS_IN_AYYAMI_HA_IN_NORMAL_YEAR,
    }
}

fn naw_ruz_day_in_march(year: i32) -> i32 {
    year_info(year).map_or(21, |info| 19 + i32::from(info % 10))
}

const fn is_in_ayyami_ha(ymd: YearMonthDay) -> bool {
    ymd.month() == MONTH_18 && ymd.day() > DAYS_IN_MONTH
}

/// The Badi calendar: nineteen months of nineteen days, with the
/// intercalary days of Ayyam-i-Ha between months 18 and 19.
///
/// Ayyam-i-Ha is represented as days 20 onwards of month 18.
#[derive(Debug)]
pub(crate) struct BadiCalculator {
    core: CalculatorCore,
}

impl BadiCalculator {
    pub(crate) const fn new() -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_BADI_YEAR,
                MAX_BADI_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                DAYS_AT_START_OF_YEAR_1,
            ),
        }
    }
}

impl YearMonthDayCalculator for BadiCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32 {
        let days = DAYS_IN_MONTH * (month - 1);
        if month == MONTH_19 {
            days + days_in_ayyami_ha(year)
        } else {
            days
        }
    }

    /// Naw-Ruz falls in March of the Gregorian year the Badi year starts in.
    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        let gregorian_year = year + GREGORIAN_YEAR_OF_FIRST_BADI_YEAR - 1;
        let start_of_march = gj::days_from_start_of_year_to_start_of_month(
            gregorian::is_gregorian_leap_year(gregorian_year),
            3,
        );
        gregorian::calculate_start_of_year_days(gregorian_year) + start_of_march + naw_ruz_day_in_march(year)
            - 1
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        if month == MONTH_18 {
            DAYS_IN_MONTH + days_in_ayyami_ha(year)
        } else {
            DAYS_IN_MONTH
        }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        days_in_ayyami_ha(year) != DAYS_IN_AYYAMI_HA_IN_NORMAL_YEAR
    }

    /// A day of Ayyam-i-Ha moves as if it were the same day of month 19
    /// when going backwards, or of month 18 when going forwards.
    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        if months == 0 {
            return Ok(ymd);
        }
        let (mut month, mut day) = (ymd.month(), ymd.day());
        if is_in_ayyami_ha(ymd) {
            day -= DAYS_IN_MONTH;
            if months < 0 {
                month += 1;
            }
        }
        let zero_based_month = i64::from(month - 1) + i64::from(months);
        let year = i64::from(ymd.year()) + zero_based_month.div_euclid(i64::from(MONTHS_IN_YEAR));
        let year = i32::try_from(year)
            .ok()
            .filter(|year| (MIN_BADI_YEAR..=MAX_BADI_YEAR).contains(year))
            .ok_or(CalendarError::Overflow)?;
        let month = zero_based_month.rem_euclid(i64::from(MONTHS_IN_YEAR)) as i32 + 1;
        Ok(YearMonthDay::new(year, month, day))
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        let first_day_of_month_19 = 1 + DAYS_IN_MONTH * MONTH_18 + days_in_ayyami_ha(year);
        if day_of_year >= first_day_of_month_19 {
            return YearMonthDay::new(year, MONTH_19, day_of_year - first_day_of_month_19 + 1);
        }
        let month = (1 + (day_of_year - 1) / DAYS_IN_MONTH).min(MONTH_18);
        YearMonthDay::new(year, month, day_of_year - (month - 1) * DAYS_IN_MONTH)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        361 + days_in_ayyami_ha(year)
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        let (month, day) = (ymd.month(), ymd.day());
        if is_in_ayyami_ha(ymd) {
            return YearMonthDay::new(year, month, day.min(DAYS_IN_MONTH + days_in_ayyami_ha(year)));
        }
        YearMonthDay::new(year, month, day)
    }
}
