//! Month structure shared by the Gregorian and Julian calendars.

use crate::YearMonthDay;

pub(super) const MONTHS_IN_YEAR: i32 = 12;

/// Days before the start of each month (index 0 unused, months are 1-indexed)
const NON_LEAP_TOTAL_DAYS_BY_MONTH: [i32; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const LEAP_TOTAL_DAYS_BY_MONTH: [i32; 13] =
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

pub(super) const fn days_in_month(is_leap: bool, month: i32) -> i32 {
    if month == 2 {
        return if is_leap { 29 } else { 28 };
    }
    // Lengths alternate 31/30, skipping a beat at August.
    30 + ((month + (month >> 3)) & 1)
}

pub(super) const fn days_in_year(is_leap: bool) -> i32 {
    if is_leap { 366 } else { 365 }
}

pub(super) const fn days_from_start_of_year_to_start_of_month(is_leap: bool, month: i32) -> i32 {
    if is_leap {
        LEAP_TOTAL_DAYS_BY_MONTH[month as usize]
    } else {
        NON_LEAP_TOTAL_DAYS_BY_MONTH[month as usize]
    }
}

/// Finds the month containing the one-based `day_of_year`.
pub(super) const fn year_month_day(year: i32, is_leap: bool, day_of_year: i32) -> YearMonthDay {
    let totals = if is_leap {
        &LEAP_TOTAL_DAYS_BY_MONTH
    } else {
        &NON_LEAP_TOTAL_DAYS_BY_MONTH
    };
    let mut month = 12;
    while totals[month] >= day_of_year {
        month -= 1;
    }
    YearMonthDay::new(year, month as i32, day_of_year - totals[month])
}
