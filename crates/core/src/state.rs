// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::grid::{CalendarGrid, CalendarSettings, Slot};
use crate::roster::Roster;
use shiftboard_domain::{Engineer, Period, Schedule, Shift, Workplace};
use tracing::{debug, warn};

/// Outcome of loading a stored schedule into the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Assignments placed into the grid.
    pub applied: usize,
    /// Assignments dropped because they do not fit the grid.
    pub dropped: usize,
}

/// The editable schedule board: the roster plus the grid of the open period.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    roster: Roster,
    grid: Option<CalendarGrid>,
}

impl BoardState {
    /// Creates a board with no open period.
    #[must_use]
    pub const fn new(roster: Roster) -> Self {
        Self { roster, grid: None }
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Replaces the roster.
    ///
    /// The grid keeps the options it was built with; callers rebuild it with
    /// [`Self::open`] to pick up roster changes.
    pub fn set_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    #[must_use]
    pub const fn grid(&self) -> Option<&CalendarGrid> {
        self.grid.as_ref()
    }

    /// Returns the grid or an error if none has been generated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoGrid` if no period is open.
    pub fn require_grid(&self) -> Result<&CalendarGrid, CoreError> {
        self.grid.as_ref().ok_or(CoreError::NoGrid)
    }

    /// Returns the open period, if any.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.grid.as_ref().map(CalendarGrid::period)
    }

    /// Splits the board into the roster and the mutable grid.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoGrid` if no period is open.
    pub fn parts_mut(&mut self) -> Result<(&Roster, &mut CalendarGrid), CoreError> {
        let grid: &mut CalendarGrid = self.grid.as_mut().ok_or(CoreError::NoGrid)?;
        Ok((&self.roster, grid))
    }

    /// Builds a fresh, empty grid for a period and makes it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is not a valid Jalali month. The
    /// previous grid is kept in that case.
    pub fn open(
        &mut self,
        year: i32,
        month: u8,
        workplaces: &[Workplace],
        settings: &CalendarSettings,
    ) -> Result<&CalendarGrid, CoreError> {
        let grid: CalendarGrid =
            CalendarGrid::build(year, month, workplaces, &self.roster, settings)?;
        Ok(&*self.grid.insert(grid))
    }

    /// Replaces the grid contents with a stored schedule.
    ///
    /// Every slot is cleared first; then each stored assignment is placed if
    /// its workplace, day and engineer fit the grid. Assignments that do not
    /// fit are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoGrid` if no period is open.
    pub fn apply_schedule(&mut self, schedule: &Schedule) -> Result<LoadOutcome, CoreError> {
        let grid: &mut CalendarGrid = self.grid.as_mut().ok_or(CoreError::NoGrid)?;
        grid.clear();

        let mut outcome: LoadOutcome = LoadOutcome::default();
        for (workplace, day, shift, engineer) in schedule.assignments() {
            match grid.set_value(workplace, day, shift, Some(engineer)) {
                Ok(_) => outcome.applied += 1,
                Err(err) => {
                    debug!(%workplace, day, %shift, engineer, error = %err, "Dropping stored assignment");
                    outcome.dropped += 1;
                }
            }
        }

        if outcome.dropped > 0 {
            warn!(
                dropped = outcome.dropped,
                "Stored schedule contained assignments that do not fit the grid"
            );
        }
        Ok(outcome)
    }

    /// Collects the grid into a schedule.
    ///
    /// Every workplace of the grid is present in the result, including
    /// workplaces without assignments.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoGrid` if no period is open.
    pub fn collect_schedule(&self) -> Result<Schedule, CoreError> {
        let grid: &CalendarGrid = self.require_grid()?;
        let mut schedule: Schedule = Schedule::new();
        for section in grid.workplaces() {
            schedule.ensure_workplace(section.workplace());
            for (day, shift, slot) in section.slots() {
                if let Some(engineer) = slot.value() {
                    schedule.assign(section.workplace(), day, shift, engineer);
                }
            }
        }
        Ok(schedule)
    }

    /// Empties every slot of the grid.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoGrid` if no period is open.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.grid.as_mut().ok_or(CoreError::NoGrid)?.clear();
        Ok(())
    }

    /// Manually sets or clears a slot.
    ///
    /// # Arguments
    ///
    /// * `workplace` - The slot's workplace
    /// * `day` - The day of the month
    /// * `shift` - The shift
    /// * `engineer` - The engineer, or `None` to clear the slot
    /// * `respect_limitations` - Reject engineers who are limited on the slot
    ///
    /// # Returns
    ///
    /// The previous value of the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist, the engineer is not
    /// eligible, or the engineer is limited and `respect_limitations` is set.
    pub fn set_slot(
        &mut self,
        workplace: &Workplace,
        day: u8,
        shift: Shift,
        engineer: Option<&str>,
        respect_limitations: bool,
    ) -> Result<Option<String>, CoreError> {
        let (roster, grid) = self.parts_mut()?;
        if let Some(name) = engineer {
            let found: &Engineer = roster
                .find(name)
                .ok_or_else(|| CoreError::UnknownEngineer(name.to_string()))?;
            if respect_limitations && found.is_limited(day, shift) {
                return Err(CoreError::Limited {
                    engineer: name.to_string(),
                    day,
                    shift,
                });
            }
        }
        grid.set_value(workplace, day, shift, engineer)
    }

    /// Returns a slot of the open grid.
    #[must_use]
    pub fn slot(&self, workplace: &Workplace, day: u8, shift: Shift) -> Option<&Slot> {
        self.grid
            .as_ref()
            .and_then(|g| g.workplace(workplace).ok())
            .and_then(|s| s.slot(day, shift))
    }
}
