// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling periods (a Jalali year and month) and calendar display names.

use crate::error::DomainError;
use crate::jalali::{self, JalaliDate};
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

/// Persian month names, index 0 is Farvardin.
pub const PERSIAN_MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Persian weekday names, index 0 is Saturday (the first day of the week).
pub const PERSIAN_DAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Returns the position of `weekday` in a Saturday-first week (Saturday = 0).
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    (weekday.number_days_from_sunday() + 1) % 7
}

/// Returns the weekday at `index` in a Saturday-first week.
///
/// # Errors
///
/// Returns an error if `index` is not within 0..=6.
pub const fn weekday_from_index(index: u8) -> Result<Weekday, DomainError> {
    match index {
        0 => Ok(Weekday::Saturday),
        1 => Ok(Weekday::Sunday),
        2 => Ok(Weekday::Monday),
        3 => Ok(Weekday::Tuesday),
        4 => Ok(Weekday::Wednesday),
        5 => Ok(Weekday::Thursday),
        6 => Ok(Weekday::Friday),
        _ => Err(DomainError::InvalidWeekdayIndex(index)),
    }
}

/// Returns the Persian name of a weekday.
#[must_use]
pub const fn persian_day_name(weekday: Weekday) -> &'static str {
    PERSIAN_DAY_NAMES[weekday_index(weekday) as usize]
}

/// A validated scheduling period: one month of one Jalali year.
///
/// Schedules are stored and exchanged per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Creates a new `Period`.
    ///
    /// # Arguments
    ///
    /// * `year` - The Jalali year
    /// * `month` - The Jalali month (1-12)
    ///
    /// # Errors
    ///
    /// Returns an error if the year or month is outside the calendar.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        jalali::month_length(year, month)?;
        Ok(Self { year, month })
    }

    /// Returns the Jalali year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the Jalali month (1-based).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the number of days in this period's month.
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        // Validated at construction.
        jalali::month_length(self.year, self.month).unwrap_or(29)
    }

    /// Returns the Persian name of this period's month.
    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        PERSIAN_MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Returns a day of this period as a full date.
    ///
    /// # Errors
    ///
    /// Returns an error if the day does not exist in this month.
    pub fn date(&self, day: u8) -> Result<JalaliDate, DomainError> {
        JalaliDate::new(self.year, self.month, day)
    }

    /// Returns the period containing a Gregorian date.
    ///
    /// # Errors
    ///
    /// Returns an error if the date lies outside the supported Jalali range.
    pub fn containing(date: Date) -> Result<Self, DomainError> {
        let jalali: JalaliDate = JalaliDate::from_gregorian(date)?;
        Ok(Self {
            year: jalali.year(),
            month: jalali.month(),
        })
    }

    /// Returns the current period as observed in an IANA time zone.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA zone name, e.g. `Asia/Tehran`
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is unknown.
    pub fn current(timezone: &str) -> Result<Self, DomainError> {
        Self::containing(today_in(timezone)?)
    }

    /// Returns the years offered for selection around this period's year.
    #[must_use]
    pub fn selectable_years(&self, span: i32) -> Vec<i32> {
        ((self.year - span).max(jalali::MIN_YEAR)..=(self.year + span).min(jalali::MAX_YEAR))
            .collect()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Returns today's Gregorian date in the given IANA time zone.
///
/// # Errors
///
/// Returns an error if the zone is unknown.
pub fn today_in(timezone: &str) -> Result<Date, DomainError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
    let now = Utc::now().with_timezone(&tz);

    let overflow = || DomainError::DateArithmeticOverflow {
        operation: String::from("reading the current date"),
    };
    let month: Month = u8::try_from(now.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(overflow)?;
    let day: u8 = u8::try_from(now.day()).map_err(|_| overflow())?;

    Date::from_calendar_date(now.year(), month, day).map_err(|_| overflow())
}
