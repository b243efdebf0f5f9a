use std::ptr;

use calendar_engine::{
    CalendarError, CalendarOrdinal, CalendarSystem, Era, HebrewMonthNumbering, IsoDayOfWeek,
    WeekYearRule, YearMonthDay, YearMonthDayCalendar, calendar_for_id, calendar_for_ordinal,
};

/// 2016-03-01 ISO
const MARCH_1_2016: i32 = 16_861;

#[test]
fn test_same_day_in_every_calendar() {
    struct TestCase {
        calendar: &'static CalendarSystem,
        expected: YearMonthDay,
    }

    let cases = [
        TestCase {
            calendar: CalendarSystem::iso(),
            expected: YearMonthDay::new(2016, 3, 1),
        },
        TestCase {
            calendar: CalendarSystem::julian(),
            expected: YearMonthDay::new(2016, 2, 17),
        },
        TestCase {
            calendar: CalendarSystem::coptic(),
            expected: YearMonthDay::new(1732, 6, 22),
        },
        TestCase {
            calendar: CalendarSystem::hebrew(HebrewMonthNumbering::Civil),
            expected: YearMonthDay::new(5776, 6, 21),
        },
        TestCase {
            calendar: CalendarSystem::hebrew(HebrewMonthNumbering::Scriptural),
            expected: YearMonthDay::new(5776, 12, 21),
        },
        TestCase {
            calendar: CalendarSystem::islamic_bcl(),
            expected: YearMonthDay::new(1437, 5, 22),
        },
        TestCase {
            calendar: CalendarSystem::um_al_qura(),
            expected: YearMonthDay::new(1437, 5, 21),
        },
        TestCase {
            calendar: CalendarSystem::persian_simple(),
            expected: YearMonthDay::new(1394, 12, 11),
        },
        TestCase {
            calendar: CalendarSystem::persian_arithmetic(),
            expected: YearMonthDay::new(1394, 12, 11),
        },
        TestCase {
            calendar: CalendarSystem::persian_astronomical(),
            expected: YearMonthDay::new(1394, 12, 11),
        },
        TestCase {
            calendar: CalendarSystem::badi(),
            expected: YearMonthDay::new(172, 19, 1),
        },
    ];

    for case in cases {
        assert_eq!(case.calendar.year_month_day(MARCH_1_2016), Ok(case.expected), "{}", case.calendar);
        assert_eq!(case.calendar.days_since_epoch(case.expected), Ok(MARCH_1_2016), "{}", case.calendar);
        assert_eq!(case.calendar.day_of_week(case.expected), Ok(IsoDayOfWeek::Tuesday));
    }
}

#[test]
fn test_badi_intercalary_days() {
    let badi = CalendarSystem::badi();
    assert_eq!(badi.days_in_month(172, 18), Ok(19 + 4));
    assert_eq!(badi.days_in_month(174, 18), Ok(19 + 5));
    assert_eq!(badi.is_leap_year(172), Ok(false));
    assert_eq!(badi.is_leap_year(174), Ok(true));
}

#[test]
fn test_iso_week_of_2005_01_02() {
    let iso = CalendarSystem::iso();
    let date = YearMonthDay::new(2005, 1, 2);
    assert_eq!(iso.day_of_week(date), Ok(IsoDayOfWeek::Sunday));

    let rule = WeekYearRule::iso();
    let tagged = date.with_calendar(CalendarOrdinal::Iso);
    assert_eq!(rule.week_year(tagged), Ok(2004));
    assert_eq!(rule.week_of_week_year(tagged), Ok(53));
    assert_eq!(rule.weeks_in_week_year(2004, iso), Ok(53));
    assert_eq!(rule.local_date(2004, 53, IsoDayOfWeek::Sunday, iso), Ok(tagged));
}

#[test]
fn test_hebrew_5402() {
    let hebrew = CalendarSystem::hebrew(HebrewMonthNumbering::Civil);
    assert_eq!(hebrew.is_leap_year(5402), Ok(true));
    assert_eq!(hebrew.months_in_year(5402), Ok(13));
    let lengths = (1..=13)
        .map(|month| hebrew.days_in_month(5402, month).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(lengths, [30, 30, 30, 29, 30, 30, 29, 30, 29, 30, 29, 30, 29]);
    assert_eq!(hebrew.days_in_year(5402), Ok(lengths.iter().sum()));
    assert_eq!(hebrew.days_in_year(5402), Ok(385));
}

#[test]
fn test_registry_identity() {
    for ordinal in CalendarOrdinal::ALL {
        let calendar = calendar_for_ordinal(ordinal);
        assert_eq!(calendar.ordinal(), ordinal);
        assert!(ptr::eq(calendar, calendar_for_id(calendar.id()).unwrap()));
    }
    assert!(matches!(
        calendar_for_id("Discordian"),
        Err(CalendarError::UnknownCalendarId(_))
    ));
}

#[test]
fn test_tagged_dates_carry_their_calendar() {
    let coptic = CalendarSystem::coptic();
    let date = coptic.year_month_day_calendar(0).unwrap();
    assert_eq!(date, YearMonthDayCalendar::new(1686, 4, 23, CalendarOrdinal::Coptic));
    assert_eq!(date.to_string(), "1686-4-23-Coptic");
    assert_eq!(coptic.era(date.year()), Ok(Era::anno_martyrum()));
    assert!(ptr::eq(calendar_for_ordinal(date.calendar_ordinal()), coptic));
}
