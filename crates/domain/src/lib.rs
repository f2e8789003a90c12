// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
pub mod jalali;
mod period;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use jalali::JalaliDate;
pub use period::{
    PERSIAN_DAY_NAMES, PERSIAN_MONTH_NAMES, Period, persian_day_name, today_in, weekday_from_index,
    weekday_index,
};
pub use types::{
    DEFAULT_MAX_SHIFTS, DEFAULT_MIN_SHIFTS, DayAssignments, Engineer, Limitations, Pattern,
    Schedule, Shift, Workplace,
};
pub use validation::{validate_engineer, validate_workplace};
