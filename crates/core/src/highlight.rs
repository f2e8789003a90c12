// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::grid::{CalendarGrid, SlotWarning};
use shiftboard_domain::Shift;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Default longest run of consecutive working days before a warning.
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u8 = 5;

/// Which patterns are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRules {
    /// Flag days where one engineer holds all three shifts of a workplace.
    pub three_shifts: bool,
    /// Flag runs of working days longer than this; `None` disables the rule.
    pub max_consecutive_days: Option<u8>,
}

impl Default for HighlightRules {
    fn default() -> Self {
        Self {
            three_shifts: true,
            max_consecutive_days: Some(DEFAULT_MAX_CONSECUTIVE_DAYS),
        }
    }
}

/// What a highlight pass found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Workplace days held entirely by one engineer.
    pub three_shift_days: usize,
    /// Over-long runs of consecutive working days.
    pub consecutive_runs: usize,
}

impl HighlightReport {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.three_shift_days == 0 && self.consecutive_runs == 0
    }
}

/// Recomputes slot warnings for the whole grid.
///
/// Existing warnings are removed first, so the result depends only on the
/// current slot values.
pub fn highlight(grid: &mut CalendarGrid, rules: &HighlightRules) -> HighlightReport {
    grid.clear_warnings();
    let mut report: HighlightReport = HighlightReport::default();

    if rules.three_shifts {
        let mut flagged: Vec<(usize, u8)> = Vec::new();
        for (index, section) in grid.workplaces().iter().enumerate() {
            for row in grid.rows() {
                let day: u8 = row.day();
                let values: Vec<Option<&str>> = Shift::ALL
                    .iter()
                    .map(|&shift| section.slot(day, shift).and_then(|s| s.value()))
                    .collect();
                let first: Option<&str> = values.first().copied().flatten();
                if first.is_some() && values.iter().all(|v| *v == first) {
                    flagged.push((index, day));
                }
            }
        }
        for &(index, day) in &flagged {
            for shift in Shift::ALL {
                grid.add_warning(index, day, shift, SlotWarning::ThreeShifts);
            }
        }
        report.three_shift_days = flagged.len();
    }

    if let Some(limit) = rules.max_consecutive_days {
        // engineer -> day -> slots worked that day
        let mut worked: BTreeMap<String, BTreeMap<u8, Vec<(usize, Shift)>>> = BTreeMap::new();
        for (index, section) in grid.workplaces().iter().enumerate() {
            for (day, shift, slot) in section.slots() {
                if let Some(name) = slot.value() {
                    worked
                        .entry(name.to_string())
                        .or_default()
                        .entry(day)
                        .or_default()
                        .push((index, shift));
                }
            }
        }

        for (engineer, days) in &worked {
            for run in consecutive_runs(&days.keys().copied().collect()) {
                if run.len() <= usize::from(limit) {
                    continue;
                }
                debug!(engineer = %engineer, start = run[0], length = run.len(), "Consecutive-day run");
                report.consecutive_runs += 1;
                for day in run {
                    for &(index, shift) in days.get(&day).into_iter().flatten() {
                        grid.add_warning(index, day, shift, SlotWarning::ConsecutiveDays);
                    }
                }
            }
        }
    }

    report
}

/// Splits a set of days into maximal runs of consecutive days.
fn consecutive_runs(days: &BTreeSet<u8>) -> Vec<Vec<u8>> {
    let mut runs: Vec<Vec<u8>> = Vec::new();
    for &day in days {
        match runs.last_mut() {
            Some(run) if run.last().is_some_and(|&last| last + 1 == day) => run.push(day),
            _ => runs.push(vec![day]),
        }
    }
    runs
}
