// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftboard_domain::{DomainError, Shift};

/// Errors that can occur while building or editing a schedule board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No calendar grid has been generated yet.
    NoGrid,
    /// The roster has no engineers.
    NoEngineers,
    /// The workplace is not part of the current grid.
    UnknownWorkplace(String),
    /// The day is not part of the current month.
    DayOutOfRange {
        /// The requested day.
        day: u8,
        /// Number of days in the current month.
        days_in_month: u8,
    },
    /// The engineer is not eligible for the slot's workplace.
    NotAnOption {
        /// The workplace of the slot.
        workplace: String,
        /// The requested engineer.
        engineer: String,
    },
    /// The engineer is not on the roster.
    UnknownEngineer(String),
    /// The engineer may not work the slot.
    Limited {
        /// The engineer.
        engineer: String,
        /// The day of the month.
        day: u8,
        /// The shift.
        shift: Shift,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoGrid => write!(f, "Please generate a schedule first"),
            Self::NoEngineers => write!(f, "Please add engineers before auto-assigning shifts"),
            Self::UnknownWorkplace(name) => write!(f, "Could not find schedule for {name}"),
            Self::DayOutOfRange { day, days_in_month } => {
                write!(f, "Day {day} is outside this month (1-{days_in_month})")
            }
            Self::NotAnOption {
                workplace,
                engineer,
            } => write!(f, "Engineer '{engineer}' does not work at {workplace}"),
            Self::UnknownEngineer(name) => write!(f, "Engineer '{name}' not found"),
            Self::Limited {
                engineer,
                day,
                shift,
            } => write!(
                f,
                "Engineer '{engineer}' is not available for {} on day {day}",
                shift.label()
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
