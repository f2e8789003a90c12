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

mod assign;
mod error;
mod grid;
mod highlight;
mod pattern;
mod roster;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use assign::{
    AssignmentDecision, AssignmentSummary, AutoAssigner, auto_assign, auto_assign_in_batches,
};
pub use error::CoreError;
pub use grid::{CalendarGrid, CalendarSettings, DayRow, Slot, SlotKey, SlotWarning, WorkplaceGrid};
pub use highlight::{DEFAULT_MAX_CONSECUTIVE_DAYS, HighlightReport, HighlightRules, highlight};
pub use pattern::{PatternOptions, PatternReport, apply_pattern};
pub use roster::Roster;
pub use state::{BoardState, LoadOutcome};
