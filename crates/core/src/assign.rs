// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Greedy auto-assignment of empty slots.
//!
//! Empty slots are visited workplace by workplace, then day by day, then
//! shift by shift. For each slot the eligible engineers are those who work
//! at the workplace, are not limited on the slot, and are below their
//! maximum. Engineers below their minimum come first, then engineers with
//! fewer assignments so far; ties keep roster order. Only assignments made
//! during the run are counted.

use crate::error::CoreError;
use crate::grid::{CalendarGrid, SlotKey};
use crate::roster::Roster;
use crate::state::BoardState;
use shiftboard_domain::{Engineer, Workplace};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info};

/// The decision taken for one empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDecision {
    pub slot: SlotKey,
    /// Position of the slot's workplace in the grid.
    pub workplace_index: usize,
    /// The chosen engineer, or `None` if nobody was eligible.
    pub engineer: Option<String>,
}

impl AssignmentDecision {
    /// Returns the batch this decision belongs to when days are processed in
    /// groups of `batch_days`.
    #[must_use]
    pub fn batch(&self, batch_days: u8) -> (usize, u8) {
        (
            self.workplace_index,
            self.slot.day.saturating_sub(1) / batch_days.max(1),
        )
    }
}

/// Totals of an auto-assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentSummary {
    /// Empty slots that were considered.
    pub considered: usize,
    /// Slots that received an engineer.
    pub assigned: usize,
    /// Assignments per engineer, highest first; ties in roster order.
    pub per_engineer: Vec<(String, u32)>,
}

impl AssignmentSummary {
    /// Number of engineers who received at least one shift.
    #[must_use]
    pub fn engineers_used(&self) -> usize {
        self.per_engineer.iter().filter(|(_, n)| *n > 0).count()
    }

    /// Returns a reminder to persist the run, if anything was assigned.
    #[must_use]
    pub const fn save_hint(&self) -> Option<&'static str> {
        if self.assigned == 0 {
            None
        } else {
            Some("Remember to save the schedule to persist these assignments!")
        }
    }

    /// Returns the user-facing result message.
    #[must_use]
    pub fn message(&self) -> String {
        if self.assigned == 0 {
            String::from(
                "No shifts could be assigned. This may be due to limitations or workplace eligibility issues.",
            )
        } else {
            format!(
                "Successfully assigned {} shifts to {} engineers!",
                self.assigned,
                self.engineers_used()
            )
        }
    }
}

/// Iterator over auto-assignment decisions.
///
/// The empty slots are captured when the assigner is created; the grid is
/// not borrowed afterwards, so decisions can be applied while iterating.
#[derive(Debug)]
pub struct AutoAssigner<'a> {
    roster: &'a Roster,
    queue: std::vec::IntoIter<(usize, SlotKey)>,
    eligible: HashMap<Workplace, Vec<&'a Engineer>>,
    counts: HashMap<&'a str, u32>,
    considered: usize,
    assigned: usize,
}

impl<'a> AutoAssigner<'a> {
    /// Prepares a run over the empty slots of `grid`.
    ///
    /// Workplaces without eligible engineers are skipped entirely.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoEngineers` if the roster is empty.
    pub fn new(grid: &CalendarGrid, roster: &'a Roster) -> Result<Self, CoreError> {
        if roster.is_empty() {
            return Err(CoreError::NoEngineers);
        }

        let mut eligible: HashMap<Workplace, Vec<&'a Engineer>> = HashMap::new();
        let mut queue: Vec<(usize, SlotKey)> = Vec::new();
        for (index, section) in grid.workplaces().iter().enumerate() {
            let engineers: Vec<&'a Engineer> = roster.eligible_for(section.workplace());
            if engineers.is_empty() {
                debug!(workplace = %section.workplace(), "No eligible engineers, skipping");
                continue;
            }
            queue.extend(
                section
                    .slots()
                    .filter(|(_, _, slot)| slot.is_empty())
                    .map(|(day, shift, _)| (index, SlotKey::new(section.workplace(), day, shift))),
            );
            eligible.insert(section.workplace().clone(), engineers);
        }

        Ok(Self {
            roster,
            queue: queue.into_iter(),
            eligible,
            counts: HashMap::new(),
            considered: 0,
            assigned: 0,
        })
    }

    /// Number of slots still to be decided.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    fn count(&self, engineer: &Engineer) -> u32 {
        self.counts.get(engineer.name.as_str()).copied().unwrap_or(0)
    }

    fn choose(&self, slot: &SlotKey) -> Option<&'a Engineer> {
        let mut candidates: Vec<&'a Engineer> = self
            .eligible
            .get(&slot.workplace)?
            .iter()
            .copied()
            .filter(|e| !e.is_limited(slot.day, slot.shift))
            .filter(|e| self.count(e) < e.effective_max_shifts())
            .collect();

        // Stable: equal keys keep roster order.
        candidates.sort_by_key(|e| {
            let count: u32 = self.count(e);
            (count >= e.effective_min_shifts(), count)
        });
        candidates.first().copied()
    }

    /// Consumes the assigner and returns the run's totals.
    #[must_use]
    pub fn into_summary(self) -> AssignmentSummary {
        let mut per_engineer: Vec<(String, u32)> = self
            .roster
            .engineers()
            .iter()
            .filter_map(|e| {
                self.counts
                    .get(e.name.as_str())
                    .map(|&n| (e.name.clone(), n))
            })
            .collect();
        per_engineer.sort_by(|a, b| b.1.cmp(&a.1));

        AssignmentSummary {
            considered: self.considered,
            assigned: self.assigned,
            per_engineer,
        }
    }
}

impl Iterator for AutoAssigner<'_> {
    type Item = AssignmentDecision;

    fn next(&mut self) -> Option<Self::Item> {
        let (workplace_index, slot) = self.queue.next()?;
        self.considered += 1;

        let chosen: Option<&Engineer> = self.choose(&slot);
        if let Some(engineer) = chosen {
            *self.counts.entry(engineer.name.as_str()).or_insert(0) += 1;
            self.assigned += 1;
        }

        Some(AssignmentDecision {
            slot,
            workplace_index,
            engineer: chosen.map(|e| e.name.clone()),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.queue.size_hint()
    }
}

fn apply_decision(grid: &mut CalendarGrid, decision: &AssignmentDecision) -> Result<(), CoreError> {
    if let Some(engineer) = decision.engineer.as_deref() {
        grid.set_value(
            &decision.slot.workplace,
            decision.slot.day,
            decision.slot.shift,
            Some(engineer),
        )?;
    }
    Ok(())
}

fn log_summary(summary: &AssignmentSummary) {
    info!(
        considered = summary.considered,
        assigned = summary.assigned,
        engineers = summary.engineers_used(),
        "Auto-assignment finished"
    );
}

/// Fills every empty slot of the open grid in one pass.
///
/// Existing assignments are never changed.
///
/// # Errors
///
/// Returns an error if no period is open or the roster is empty.
pub fn auto_assign(state: &mut BoardState) -> Result<AssignmentSummary, CoreError> {
    let (roster, grid) = state.parts_mut()?;
    let mut assigner: AutoAssigner<'_> = AutoAssigner::new(grid, roster)?;
    for decision in assigner.by_ref() {
        apply_decision(grid, &decision)?;
    }
    let summary: AssignmentSummary = assigner.into_summary();
    log_summary(&summary);
    Ok(summary)
}

/// Fills every empty slot of the open grid, awaiting `pause` between
/// batches of `batch_days` days.
///
/// Decisions are identical to [`auto_assign`]; only the scheduling differs.
/// The pause lets the caller's runtime make progress on other work while a
/// large month is being filled.
///
/// # Errors
///
/// Returns an error if no period is open or the roster is empty.
pub async fn auto_assign_in_batches<P, F>(
    state: &mut BoardState,
    batch_days: u8,
    mut pause: P,
) -> Result<AssignmentSummary, CoreError>
where
    P: FnMut() -> F + Send,
    F: Future<Output = ()> + Send,
{
    let (roster, grid) = state.parts_mut()?;
    let mut assigner: AutoAssigner<'_> = AutoAssigner::new(grid, roster)?;
    let mut current: Option<(usize, u8)> = None;
    for decision in assigner.by_ref() {
        let batch: (usize, u8) = decision.batch(batch_days);
        if current.is_some_and(|c| c != batch) {
            pause().await;
        }
        current = Some(batch);
        apply_decision(grid, &decision)?;
    }
    let summary: AssignmentSummary = assigner.into_summary();
    log_summary(&summary);
    Ok(summary)
}
