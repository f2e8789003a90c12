// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, PERSIAN_DAY_NAMES, Period, persian_day_name, today_in, weekday_from_index,
    weekday_index,
};
use time::Weekday;
use time::macros::date;

#[test]
fn test_period_new_valid() {
    let period: Period = Period::new(1403, 1).unwrap();
    assert_eq!(period.year(), 1403);
    assert_eq!(period.month(), 1);
    assert_eq!(period.days_in_month(), 31);
    assert_eq!(period.month_name(), "فروردین");
}

#[test]
fn test_period_new_rejects_invalid_month() {
    assert_eq!(Period::new(1403, 0), Err(DomainError::InvalidMonth(0)));
    assert_eq!(Period::new(1403, 13), Err(DomainError::InvalidMonth(13)));
}

#[test]
fn test_period_new_rejects_invalid_year() {
    assert_eq!(Period::new(-5, 1), Err(DomainError::InvalidYear(-5)));
}

#[test]
fn test_esfand_length_depends_on_leap_year() {
    assert_eq!(Period::new(1403, 12).unwrap().days_in_month(), 30);
    assert_eq!(Period::new(1402, 12).unwrap().days_in_month(), 29);
    assert_eq!(Period::new(1403, 12).unwrap().month_name(), "اسفند");
}

#[test]
fn test_period_display_matches_storage_key() {
    let period: Period = Period::new(1403, 7).unwrap();
    assert_eq!(period.to_string(), "1403-7");
}

#[test]
fn test_period_containing_gregorian_date() {
    let period: Period = Period::containing(date!(2024 - 10 - 01)).unwrap();
    assert_eq!(period, Period::new(1403, 7).unwrap());
}

#[test]
fn test_selectable_years_span() {
    let period: Period = Period::new(1403, 1).unwrap();
    let years: Vec<i32> = period.selectable_years(5);
    assert_eq!(years.len(), 11);
    assert_eq!(years.first(), Some(&1398));
    assert_eq!(years.last(), Some(&1408));
}

#[test]
fn test_selectable_years_clamped_at_calendar_start() {
    let period: Period = Period::new(2, 1).unwrap();
    let years: Vec<i32> = period.selectable_years(5);
    assert_eq!(years.first(), Some(&1));
}

#[test]
fn test_weekday_index_starts_on_saturday() {
    assert_eq!(weekday_index(Weekday::Saturday), 0);
    assert_eq!(weekday_index(Weekday::Sunday), 1);
    assert_eq!(weekday_index(Weekday::Friday), 6);
    for index in 0..7 {
        assert_eq!(weekday_index(weekday_from_index(index).unwrap()), index);
    }
    assert_eq!(
        weekday_from_index(7),
        Err(DomainError::InvalidWeekdayIndex(7))
    );
}

#[test]
fn test_persian_day_names() {
    assert_eq!(persian_day_name(Weekday::Saturday), PERSIAN_DAY_NAMES[0]);
    assert_eq!(persian_day_name(Weekday::Friday), "جمعه");
}

#[test]
fn test_today_in_rejects_unknown_zone() {
    assert_eq!(
        today_in("Mars/Olympus"),
        Err(DomainError::InvalidTimezone(String::from("Mars/Olympus")))
    );
}

#[test]
fn test_current_period_in_tehran_is_valid() {
    let period: Period = Period::current("Asia/Tehran").unwrap();
    assert!((1..=12).contains(&period.month()));
}
