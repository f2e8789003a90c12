// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Jalali (Solar Hijri) calendar arithmetic.
//!
//! Leap years follow the 33-year cycle table with the historical break
//! points used by the Iranian calendar authority. The Gregorian side of every
//! conversion goes through `time::Date` Julian day numbers, so weekday
//! derivation is exact for the whole supported range.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

/// Smallest Jalali year accepted by the calendar.
pub const MIN_YEAR: i32 = 1;

/// Largest Jalali year accepted by the calendar.
pub const MAX_YEAR: i32 = 3177;

/// Years at which the 33-year leap cycle shifts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Per-year facts derived from the break table.
struct YearInfo {
    /// Years since the last leap year; zero means `year` itself is leap.
    leap: i32,
    /// Gregorian year in which Farvardin 1st falls.
    gregorian_year: i32,
    /// Day of March on which Farvardin 1st falls.
    march: i32,
}

fn year_info(year: i32) -> Result<YearInfo, DomainError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DomainError::InvalidYear(year));
    }

    let gregorian_year: i32 = year + 621;
    let mut leap_jalali: i32 = -14;
    let mut previous: i32 = BREAKS[0];
    let mut jump: i32 = 0;

    for &next in &BREAKS[1..] {
        jump = next - previous;
        if year < next {
            break;
        }
        leap_jalali += (jump / 33) * 8 + (jump % 33) / 4;
        previous = next;
    }

    let mut n: i32 = year - previous;
    leap_jalali += (n / 33) * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_jalali += 1;
    }

    let leap_gregorian: i32 =
        gregorian_year / 4 - ((gregorian_year / 100 + 1) * 3) / 4 - 150;
    let march: i32 = 20 + leap_jalali - leap_gregorian;

    if jump - n < 6 {
        n = n - jump + ((jump + 4) / 33) * 33;
    }
    let mut leap: i32 = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo {
        leap,
        gregorian_year,
        march,
    })
}

/// Julian day number of Farvardin 1st for the given year info.
fn new_year_julian_day(info: &YearInfo) -> Result<i32, DomainError> {
    let march_day: u8 =
        u8::try_from(info.march).map_err(|_| DomainError::DateArithmeticOverflow {
            operation: String::from("locating Farvardin 1st"),
        })?;
    let date: Date = Date::from_calendar_date(info.gregorian_year, Month::March, march_day)
        .map_err(|err| DomainError::DateArithmeticOverflow {
            operation: format!("locating Farvardin 1st: {err}"),
        })?;
    Ok(date.to_julian_day())
}

/// Returns whether the Jalali year is a leap year (Esfand has 30 days).
///
/// # Errors
///
/// Returns `DomainError::InvalidYear` if the year is outside 1..=3177.
pub fn is_leap_year(year: i32) -> Result<bool, DomainError> {
    Ok(year_info(year)?.leap == 0)
}

/// Returns the number of days in a Jalali month.
///
/// Months 1-6 have 31 days, 7-11 have 30, and Esfand has 30 in leap years
/// and 29 otherwise.
///
/// # Errors
///
/// Returns an error if the year or month is out of range.
pub fn month_length(year: i32, month: u8) -> Result<u8, DomainError> {
    match month {
        1..=6 => {
            year_info(year)?;
            Ok(31)
        }
        7..=11 => {
            year_info(year)?;
            Ok(30)
        }
        12 => {
            if is_leap_year(year)? {
                Ok(30)
            } else {
                Ok(29)
            }
        }
        _ => Err(DomainError::InvalidMonth(month)),
    }
}

/// Returns whether `(year, month, day)` names an existing Jalali date.
#[must_use]
pub fn is_valid_date(year: i32, month: u8, day: u8) -> bool {
    month_length(year, month).is_ok_and(|length| (1..=length).contains(&day))
}

/// A validated date in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JalaliDate {
    year: i32,
    month: u8,
    day: u8,
}

impl JalaliDate {
    /// Creates a new `JalaliDate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year, month or day does not exist.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DomainError> {
        let length: u8 = month_length(year, month)?;
        if !(1..=length).contains(&day) {
            return Err(DomainError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
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

    /// Returns the day of month (1-based).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Converts this date to the Gregorian calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn to_gregorian(&self) -> Result<Date, DomainError> {
        let info: YearInfo = year_info(self.year)?;
        let month: i32 = i32::from(self.month);
        let julian_day: i32 = new_year_julian_day(&info)? + (month - 1) * 31
            - (month / 7) * (month - 7)
            + i32::from(self.day)
            - 1;

        Date::from_julian_day(julian_day).map_err(|err| DomainError::DateArithmeticOverflow {
            operation: format!("converting {self} to Gregorian: {err}"),
        })
    }

    /// Converts a Gregorian date to the Jalali calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting Jalali year is out of range.
    pub fn from_gregorian(date: Date) -> Result<Self, DomainError> {
        let julian_day: i32 = date.to_julian_day();
        let mut year: i32 = date.year() - 621;
        let info: YearInfo = year_info(year)?;
        let mut offset: i32 = julian_day - new_year_julian_day(&info)?;

        if offset >= 0 {
            if offset <= 185 {
                return Self::from_parts(year, 1 + offset / 31, offset % 31 + 1);
            }
            offset -= 186;
        } else {
            year -= 1;
            offset += 179;
            if info.leap == 1 {
                offset += 1;
            }
        }

        Self::from_parts(year, 7 + offset / 30, offset % 30 + 1)
    }

    fn from_parts(year: i32, month: i32, day: i32) -> Result<Self, DomainError> {
        let overflow = || DomainError::DateArithmeticOverflow {
            operation: String::from("converting Gregorian date to Jalali"),
        };
        let month: u8 = u8::try_from(month).map_err(|_| overflow())?;
        let day: u8 = u8::try_from(day).map_err(|_| overflow())?;
        Self::new(year, month, day)
    }

    /// Returns the weekday of this date.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gregorian conversion fails.
    pub fn weekday(&self) -> Result<Weekday, DomainError> {
        Ok(self.to_gregorian()?.weekday())
    }
}

impl std::fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
