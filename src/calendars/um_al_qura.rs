use once_cell::sync::Lazy;
use tracing::debug;

use super::{CalculatorCore, YearMonthDayCalculator, regular};
use crate::{CalendarError, YearMonthDay};

const MIN_UM_AL_QURA_YEAR: i32 = 1318;
const MAX_UM_AL_QURA_YEAR: i32 = 1500;
const AVERAGE_DAYS_PER_10_YEARS: i32 = 3544;
const DAYS_AT_START_OF_MIN_YEAR: i32 = -25_448;
/// Extrapolated back from 1318 at the average year length; only used for estimates.
const DAYS_AT_START_OF_YEAR_1: i32 = -492_192;

const MONTHS_IN_YEAR: i32 = 12;
const DAYS_PER_NON_LEAP_YEAR: i32 = 354;
/// One entry per year, plus a notional 354-day year either side of the range.
const TABLE_YEARS: usize = (MAX_UM_AL_QURA_YEAR - MIN_UM_AL_QURA_YEAR + 3) as usize;

/// Big-endian u16 per table year; bit `month` is set when that month has 30 days.
static MONTH_LENGTH_DATA: &[u8] = include_bytes!("../data/um_al_qura.bin");

struct UmAlQuraTables {
    month_bits: [u16; TABLE_YEARS],
    year_lengths: [i32; TABLE_YEARS],
    year_start_days: [i32; TABLE_YEARS],
}

static TABLES: Lazy<UmAlQuraTables> = Lazy::new(|| {
    let mut tables = UmAlQuraTables {
        month_bits: [0; TABLE_YEARS],
        year_lengths: [DAYS_PER_NON_LEAP_YEAR; TABLE_YEARS],
        year_start_days: [0; TABLE_YEARS],
    };
    for (bits, pair) in tables.month_bits.iter_mut().zip(MONTH_LENGTH_DATA.chunks_exact(2)) {
        *bits = u16::from_be_bytes([pair[0], pair[1]]);
    }
    tables.year_start_days[0] = DAYS_AT_START_OF_MIN_YEAR - DAYS_PER_NON_LEAP_YEAR;
    let mut start = DAYS_AT_START_OF_MIN_YEAR;
    for index in 1..TABLE_YEARS - 1 {
        let bits = tables.month_bits[index];
        let length = (1..=MONTHS_IN_YEAR).fold(29 * MONTHS_IN_YEAR, |length, month| {
            length + i32::from((bits >> month) & 1)
        });
        tables.year_start_days[index] = start;
        tables.year_lengths[index] = length;
        start += length;
    }
    tables.year_start_days[TABLE_YEARS - 1] = start;
    debug!(
        first_year = MIN_UM_AL_QURA_YEAR,
        last_year = MAX_UM_AL_QURA_YEAR,
        "built um al qura month tables"
    );
    tables
});

/// Table index for `year`, if the table covers it.
fn table_index(year: i32) -> Option<usize> {
    usize::try_from(year - MIN_UM_AL_QURA_YEAR + 1)
        .ok()
        .filter(|&index| index < TABLE_YEARS)
}

fn month_bits(year: i32) -> u16 {
    table_index(year).map_or(0, |index| TABLES.month_bits[index])
}

fn month_length(bits: u16, month: i32) -> i32 {
    29 + i32::from((bits >> month) & 1)
}

/// The Um Al Qura calendar of Saudi Arabia, driven by a table of month
/// lengths for 1318 to 1500 AH.
#[derive(Debug)]
pub(crate) struct UmAlQuraCalculator {
    core: CalculatorCore,
}

impl UmAlQuraCalculator {
    pub(crate) const fn new() -> Self {
        Self {
            core: CalculatorCore::new(
                MIN_UM_AL_QURA_YEAR,
                MAX_UM_AL_QURA_YEAR,
                AVERAGE_DAYS_PER_10_YEARS,
                DAYS_AT_START_OF_YEAR_1,
            ),
        }
    }
}

impl YearMonthDayCalculator for UmAlQuraCalculator {
    fn core(&self) -> &CalculatorCore {
        &self.core
    }

    fn days_from_start_of_year_to_start_of_month(&self, year: i32, month: i32) -> i32 {
        let bits = month_bits(year);
        (1..month).fold(0, |days, m| days + month_length(bits, m))
    }

    /// Years beyond the table are treated as 354 days long.
    fn calculate_start_of_year_days(&self, year: i32) -> i32 {
        if let Some(index) = table_index(year) {
            return TABLES.year_start_days[index];
        }
        if year < MIN_UM_AL_QURA_YEAR {
            TABLES.year_start_days[0] - (MIN_UM_AL_QURA_YEAR - 1 - year) * DAYS_PER_NON_LEAP_YEAR
        } else {
            TABLES.year_start_days[TABLE_YEARS - 1]
                + (year - MAX_UM_AL_QURA_YEAR - 1) * DAYS_PER_NON_LEAP_YEAR
        }
    }

    fn start_of_year_in_days(&self, year: i32) -> i32 {
        self.calculate_start_of_year_days(year)
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        month_length(month_bits(year), month)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        self.days_in_year(year) == DAYS_PER_NON_LEAP_YEAR + 1
    }

    fn add_months(&self, ymd: YearMonthDay, months: i32) -> Result<YearMonthDay, CalendarError> {
        regular::add_months(self, MONTHS_IN_YEAR, ymd, months)
    }

    fn year_month_day_from_day_of_year(&self, year: i32, day_of_year: i32) -> YearMonthDay {
        let bits = month_bits(year);
        let mut days_left = day_of_year;
        for month in 1..MONTHS_IN_YEAR {
            let length = month_length(bits, month);
            if days_left <= length {
                return YearMonthDay::new(year, month, days_left);
            }
            days_left -= length;
        }
        YearMonthDay::new(year, MONTHS_IN_YEAR, days_left)
    }

    fn days_in_year(&self, year: i32) -> i32 {
        table_index(year).map_or(DAYS_PER_NON_LEAP_YEAR, |index| TABLES.year_lengths[index])
    }

    fn months_between(&self, start: YearMonthDay, end: YearMonthDay) -> Result<i32, CalendarError> {
        regular::months_between(self, MONTHS_IN_YEAR, start, end)
    }

    fn set_year(&self, ymd: YearMonthDay, year: i32) -> YearMonthDay {
        regular::set_year(self, ymd, year)
    }
}
