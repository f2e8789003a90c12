// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The Jalali year is outside the range the calendar can represent.
    InvalidYear(i32),
    /// The month is not within 1..=12.
    InvalidMonth(u8),
    /// The day does not exist in the given Jalali month.
    InvalidDay {
        /// The Jalali year.
        year: i32,
        /// The Jalali month.
        month: u8,
        /// The offending day.
        day: u8,
    },
    /// A shift key or index could not be parsed.
    InvalidShift(String),
    /// Engineer name is empty or invalid.
    InvalidEngineerName(String),
    /// Engineer has no workplace assigned.
    NoWorkplaceSelected {
        /// The engineer's name.
        engineer: String,
    },
    /// Workplace name is empty or invalid.
    InvalidWorkplace(String),
    /// The minimum shift quota is above the maximum.
    InvalidShiftQuota {
        /// The engineer's name.
        engineer: String,
        /// The configured minimum.
        min: u32,
        /// The configured maximum.
        max: u32,
    },
    /// Weekday index outside 0..=6.
    InvalidWeekdayIndex(u8),
    /// The configured time zone is not a known IANA zone.
    InvalidTimezone(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYear(year) => {
                write!(f, "Invalid Jalali year: {year}. Must be between 1 and 3177")
            }
            Self::InvalidMonth(month) => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidDay { year, month, day } => {
                write!(f, "Invalid Jalali date: {year}-{month}-{day}")
            }
            Self::InvalidShift(msg) => write!(f, "Invalid shift: {msg}"),
            Self::InvalidEngineerName(msg) => write!(f, "Invalid engineer name: {msg}"),
            Self::NoWorkplaceSelected { engineer } => {
                write!(f, "Engineer '{engineer}' must have at least one workplace")
            }
            Self::InvalidWorkplace(msg) => write!(f, "Invalid workplace: {msg}"),
            Self::InvalidShiftQuota { engineer, min, max } => {
                write!(
                    f,
                    "Engineer '{engineer}' has minShifts {min} greater than maxShifts {max}"
                )
            }
            Self::InvalidWeekdayIndex(index) => {
                write!(f, "Invalid weekday index: {index}. Must be between 0 and 6")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid time zone: {tz}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
