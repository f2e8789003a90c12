// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::BoardState;
use shiftboard_domain::{Engineer, Pattern, Workplace};
use tracing::{debug, info};

/// How a pattern is applied to a workplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Replace slots that already hold an engineer.
    pub override_existing: bool,
    /// Skip entries whose engineer is limited on the slot.
    pub respect_limitations: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            override_existing: false,
            respect_limitations: true,
        }
    }
}

/// Counters reported after applying a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternReport {
    pub applied: usize,
    pub skipped_limitations: usize,
    pub skipped_existing: usize,
    /// Entries naming an engineer who is not an option for the workplace.
    pub skipped_unknown: usize,
    /// Entries for days past the end of the month.
    pub skipped_out_of_range: usize,
}

impl PatternReport {
    /// Returns the user-facing result message.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message: String = format!(
            "Applied {} assignments from the pattern.",
            self.applied
        );
        if self.skipped_limitations > 0 {
            message.push_str(&format!(
                " Skipped {} due to limitations.",
                self.skipped_limitations
            ));
        }
        if self.skipped_existing > 0 {
            message.push_str(&format!(
                " Skipped {} due to existing assignments.",
                self.skipped_existing
            ));
        }
        message
    }
}

/// Applies a pattern to one workplace of the open grid.
///
/// Pattern days map directly onto days of the month. For each entry:
/// 1. the engineer must be an option of the workplace, otherwise the entry
///    is skipped silently
/// 2. an occupied slot is kept unless `override_existing` is set
/// 3. a limited engineer is skipped when `respect_limitations` is set
///
/// # Errors
///
/// Returns an error if no period is open or the workplace is not part of the
/// grid.
pub fn apply_pattern(
    state: &mut BoardState,
    pattern: &Pattern,
    workplace: &Workplace,
    options: PatternOptions,
) -> Result<PatternReport, CoreError> {
    let (roster, grid) = state.parts_mut()?;
    let section_options: Vec<String> = grid.workplace(workplace)?.options().to_vec();
    let days_in_month: u8 = grid.days_in_month();

    let mut report: PatternReport = PatternReport::default();
    for (day, shift, name) in pattern.entries() {
        if day == 0 || day > days_in_month {
            report.skipped_out_of_range += 1;
            continue;
        }
        if !section_options.iter().any(|o| o == name) {
            debug!(%workplace, day, engineer = name, "Pattern engineer is not an option");
            report.skipped_unknown += 1;
            continue;
        }
        if !options.override_existing && grid.value(workplace, day, shift).is_some() {
            report.skipped_existing += 1;
            continue;
        }
        if options.respect_limitations
            && roster
                .find(name)
                .is_some_and(|e: &Engineer| e.is_limited(day, shift))
        {
            report.skipped_limitations += 1;
            continue;
        }
        grid.set_value(workplace, day, shift, Some(name))?;
        report.applied += 1;
    }

    info!(
        %workplace,
        applied = report.applied,
        skipped_limitations = report.skipped_limitations,
        skipped_existing = report.skipped_existing,
        "Applied pattern"
    );
    Ok(report)
}
