/// Bits used for the day component of a packed year/month/day
pub const DAY_BITS: u32 = 6;
/// Bits used for the month component of a packed year/month/day
pub const MONTH_BITS: u32 = 5;
/// Bits used for the year component of a packed year/month/day
pub const YEAR_BITS: u32 = 15;
/// Bits used for the calendar ordinal of a packed year/month/day/calendar
pub const CALENDAR_BITS: u32 = 6;

pub(crate) const DAY_MASK: i32 = (1 << DAY_BITS) - 1;
pub(crate) const MONTH_MASK: i32 = ((1 << MONTH_BITS) - 1) << DAY_BITS;
pub(crate) const CALENDAR_MASK: i32 = (1 << CALENDAR_BITS) - 1;

/// Number of days from 0001-01-01 (proleptic Gregorian) to 1970-01-01
pub const DAYS_AT_START_OF_UNIX_EPOCH_YEAR_1: i32 = -719_162;

/// Field separator of the text form of packed dates
pub const DATE_SEPARATOR: char = '-';

/// Days in a week
pub const DAYS_PER_WEEK: i32 = 7;

/// Year-start cache size (must be a power of two)
pub(crate) const YEAR_CACHE_SIZE_SHIFT: u32 = 10;
pub(crate) const YEAR_CACHE_SIZE: usize = 1 << YEAR_CACHE_SIZE_SHIFT;
pub(crate) const YEAR_CACHE_INDEX_MASK: i32 = (1 << YEAR_CACHE_SIZE_SHIFT) - 1;

/// Bits of the year kept alongside a cached value to detect collisions
pub(crate) const YEAR_CACHE_ENTRY_VALIDATOR_BITS: u32 = 7;
pub(crate) const YEAR_CACHE_ENTRY_VALIDATOR_MASK: i32 = (1 << YEAR_CACHE_ENTRY_VALIDATOR_BITS) - 1;

/// Year whose validator cannot match any supported year (|year| <= 10000)
pub(crate) const YEAR_CACHE_INVALID_ENTRY_YEAR: i32 =
    (YEAR_CACHE_ENTRY_VALIDATOR_MASK >> 1) << YEAR_CACHE_SIZE_SHIFT;
