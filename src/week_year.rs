//! Week-years: numbering days by (week-year, week, day of week) instead of
//! (year, month, day).

use serde::{Deserialize, Serialize};

use crate::calendars::YearMonthDayCalculator;
use crate::consts::DAYS_PER_WEEK;
use crate::prelude::*;
use crate::{
    CalendarError, CalendarSystem, IsoDayOfWeek, YearMonthDayCalendar, calendar_for_ordinal,
    check_range,
};

/// How the first week of a year is chosen, in the style of .NET's
/// `CalendarWeekRule`. Rules built from these allow short weeks at the
/// start and end of a week-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CalendarWeekRule {
    /// The week containing the first day of the year
    FirstDay,
    /// The first week whose days all fall in the year
    FirstFullWeek,
    /// The first week with at least four days in the year
    FirstFourDayWeek,
}

impl CalendarWeekRule {
    const fn min_days_in_first_week(self) -> i32 {
        match self {
            Self::FirstDay => 1,
            Self::FirstFourDayWeek => 4,
            Self::FirstFullWeek => DAYS_PER_WEEK,
        }
    }
}

/// Maps dates to and from week-year, week of week-year and day of week.
///
/// In a regular rule every week has seven days, so a week-year starts and
/// ends on `first_day_of_week` and can differ from the calendar year by one
/// either way. An irregular rule instead cuts weeks short at the end of the
/// calendar year: a day can belong to the previous week-year but never the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekYearRule {
    min_days_in_first_week: i32,
    first_day_of_week: IsoDayOfWeek,
    irregular_weeks: bool,
}

impl WeekYearRule {
    /// ISO-8601 weeks: Monday first, and week 1 holds the first Thursday.
    pub const fn iso() -> Self {
        Self {
            min_days_in_first_week: 4,
            first_day_of_week: IsoDayOfWeek::Monday,
            irregular_weeks: false,
        }
    }

    /// A regular rule where week 1 is the first week with at least
    /// `min_days_in_first_week` days in the calendar year.
    ///
    /// # Errors
    /// Returns `OutOfRange` unless `min_days_in_first_week` is 1 to 7.
    pub fn for_min_days_in_first_week(
        min_days_in_first_week: i32,
        first_day_of_week: IsoDayOfWeek,
    ) -> Result<Self, CalendarError> {
        check_range("min_days_in_first_week", min_days_in_first_week, 1, DAYS_PER_WEEK)?;
        Ok(Self {
            min_days_in_first_week,
            first_day_of_week,
            irregular_weeks: false,
        })
    }

    /// An irregular rule matching .NET's `Calendar.GetWeekOfYear`.
    pub const fn from_calendar_week_rule(rule: CalendarWeekRule, first_day_of_week: IsoDayOfWeek) -> Self {
        Self {
            min_days_in_first_week: rule.min_days_in_first_week(),
            first_day_of_week,
            irregular_weeks: true,
        }
    }

    pub const fn min_days_in_first_week(&self) -> i32 {
        self.min_days_in_first_week
    }

    pub const fn first_day_of_week(&self) -> IsoDayOfWeek {
        self.first_day_of_week
    }

    pub const fn irregular_weeks(&self) -> bool {
        self.irregular_weeks
    }

    /// The date in `calendar` for a week date.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `week_year` has no days in the calendar or
    /// `week_of_week_year` is not a week of it, and `InvalidWeekDate` if the
    /// day falls outside the calendar or, for irregular rules, outside the week-year.
    pub fn local_date(
        &self,
        week_year: i32,
        week_of_week_year: i32,
        day_of_week: IsoDayOfWeek,
        calendar: &CalendarSystem,
    ) -> Result<YearMonthDayCalendar, CalendarError> {
        let max_weeks = self.weeks_in_week_year(week_year, calendar)?;
        check_range("week_of_week_year", week_of_week_year, 1, max_weeks)?;
        let invalid = CalendarError::InvalidWeekDate {
            week_year,
            week: week_of_week_year,
            day_of_week,
        };

        let calculator = calendar.calculator();
        let start_of_week_year = self.week_year_start_days(calculator, week_year);
        let days_into_week = self.days_into_week(day_of_week);
        let days = start_of_week_year + (week_of_week_year - 1) * DAYS_PER_WEEK + days_into_week;
        if days < calendar.min_days() || days > calendar.max_days() {
            return Err(invalid);
        }
        let date = calculator.year_month_day(days).with_calendar(calendar.ordinal());
        // Near the end of an irregular week-year, later days of a short week belong to the next one.
        if self.irregular_weeks && week_year != date.year() && self.week_year(date)? != week_year {
            return Err(invalid);
        }
        Ok(date)
    }

    /// Week of the week-year containing `date`, starting at 1.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `date` isn't valid in its calendar.
    pub fn week_of_week_year(&self, date: YearMonthDayCalendar) -> Result<i32, CalendarError> {
        let week_year = self.week_year(date)?;
        let calculator = calendar_for_ordinal(date.calendar_ordinal()).calculator();
        let start_of_week_year = self.week_year_start_days(calculator, week_year);
        let days = calculator.days_since_epoch(date.to_year_month_day());
        Ok((days - start_of_week_year) / DAYS_PER_WEEK + 1)
    }

    /// Week-year containing `date`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `date` isn't valid in its calendar.
    pub fn week_year(&self, date: YearMonthDayCalendar) -> Result<i32, CalendarError> {
        let calendar = calendar_for_ordinal(date.calendar_ordinal());
        calendar.validate(date.year(), date.month(), date.day())?;
        let calculator = calendar.calculator();
        let calendar_year = date.year();
        let start_of_week_year = self.week_year_start_days(calculator, calendar_year);
        let days = calculator.days_since_epoch(date.to_year_month_day());
        if days < start_of_week_year {
            return Ok(calendar_year - 1);
        }
        if self.irregular_weeks {
            return Ok(calendar_year);
        }
        let weeks = self.weeks_in_week_year(calendar_year, calendar)?;
        let start_of_next_week_year = start_of_week_year + weeks * DAYS_PER_WEEK;
        Ok(if days < start_of_next_week_year {
            calendar_year
        } else {
            calendar_year + 1
        })
    }

    /// Number of weeks in `week_year`, counting short weeks of irregular rules.
    ///
    /// # Errors
    /// Returns `OutOfRange` if no day of `calendar` falls in `week_year`.
    pub fn weeks_in_week_year(&self, week_year: i32, calendar: &CalendarSystem) -> Result<i32, CalendarError> {
        self.validate_week_year(week_year, calendar)?;
        let calculator = calendar.calculator();
        let start_of_week_year = self.week_year_start_days(calculator, week_year);
        let start_of_calendar_year = calculator.start_of_year_in_days(week_year);
        let extra_days_at_start = start_of_calendar_year - start_of_week_year;
        let extra_days_at_end = if self.irregular_weeks {
            DAYS_PER_WEEK - 1
        } else {
            self.min_days_in_first_week - 1
        };
        let days_in_year = calculator.days_in_year(week_year);
        Ok((days_in_year + extra_days_at_start + extra_days_at_end) / DAYS_PER_WEEK)
    }

    /// Checks that at least one day of `calendar` falls in `week_year`.
    fn validate_week_year(&self, week_year: i32, calendar: &CalendarSystem) -> Result<(), CalendarError> {
        let (min_year, max_year) = (calendar.min_year(), calendar.max_year());
        if week_year > min_year && week_year < max_year {
            return Ok(());
        }
        let calculator = calendar.calculator();
        let min_week_year = if self.week_year_start_days(calculator, min_year) > calendar.min_days() {
            min_year - 1
        } else {
            min_year
        };
        let max_week_year = if self.irregular_weeks
            || self.week_year_start_days(calculator, max_year + 1) > calendar.max_days()
        {
            max_year
        } else {
            max_year + 1
        };
        check_range("week_year", week_year, min_week_year, max_week_year)
    }

    const fn days_into_week(&self, day_of_week: IsoDayOfWeek) -> i32 {
        (day_of_week.number() - self.first_day_of_week.number()).rem_euclid(DAYS_PER_WEEK)
    }

    /// First day of `week_year`, always on `first_day_of_week`. For irregular
    /// rules this is where the week-year would start if its first week were full.
    fn week_year_start_days(&self, calculator: &dyn YearMonthDayCalculator, week_year: i32) -> i32 {
        let start_of_calendar_year = calculator.start_of_year_in_days(week_year);
        let days_into_week = self.days_into_week(IsoDayOfWeek::for_days_since_epoch(start_of_calendar_year));
        let start_of_first_week = start_of_calendar_year - days_into_week;
        if DAYS_PER_WEEK - days_into_week >= self.min_days_in_first_week {
            start_of_first_week
        } else {
            start_of_first_week + DAYS_PER_WEEK
        }
    }
}

impl Default for WeekYearRule {
    fn default() -> Self {
        Self::iso()
    }
}
