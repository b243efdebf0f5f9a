//! Shared rules for calendars with a fixed number of months, leap years that
//! are one day longer, and years starting in month 1.

use super::YearMonthDayCalculator;
use crate::{CalendarError, YearMonthDay};

/// Adds `months`, truncating the day to the length of the resulting month.
pub(super) fn add_months<C: YearMonthDayCalculator + ?Sized>(
    calc: &C,
    months_in_year: i32,
    ymd: YearMonthDay,
    months: i32,
) -> Result<YearMonthDay, CalendarError> {
    if months == 0 {
        return Ok(ymd);
    }
    let zero_based_month = i64::from(ymd.month() - 1) + i64::from(months);
    let year = i64::from(ymd.year()) + zero_based_month.div_euclid(i64::from(months_in_year));
    let year = i32::try_from(year)
        .ok()
        .filter(|year| (calc.min_year()..=calc.max_year()).contains(year))
        .ok_or(CalendarError::Overflow)?;
    // rem_euclid of an i32 divisor always fits.
    let month = zero_based_month.rem_euclid(i64::from(months_in_year)) as i32 + 1;
    let day = ymd.day().min(calc.days_in_month(year, month));
    Ok(YearMonthDay::new(year, month, day))
}

/// Guesses from the year and month fields, then corrects by one if adding the
/// guess overshoots `end`.
pub(super) fn months_between<C: YearMonthDayCalculator + ?Sized>(
    calc: &C,
    months_in_year: i32,
    start: YearMonthDay,
    end: YearMonthDay,
) -> Result<i32, CalendarError> {
    let diff = (end.year() - start.year()) * months_in_year + end.month() - start.month();
    let simple_addition = calc.add_months(start, diff)?;
    Ok(if start <= end {
        if simple_addition <= end { diff } else { diff - 1 }
    } else if simple_addition >= end {
        diff
    } else {
        diff + 1
    })
}

/// Keeps the month, truncating the day if the month is shorter in `year`.
pub(super) fn set_year<C: YearMonthDayCalculator + ?Sized>(
    calc: &C,
    ymd: YearMonthDay,
    year: i32,
) -> YearMonthDay {
    let month = ymd.month();
    YearMonthDay::new(year, month, ymd.day().min(calc.days_in_month(year, month)))
}
