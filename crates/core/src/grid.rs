// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The month calendar grid: one row per day, three shift slots per row,
//! one grid section per workplace.

use crate::error::CoreError;
use crate::roster::Roster;
use shiftboard_domain::{JalaliDate, Period, Shift, Workplace, persian_day_name};
use std::collections::{BTreeMap, BTreeSet};
use time::Weekday;
use tracing::debug;

/// Calendar presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    /// Gregorian weekdays rendered as weekend.
    pub weekend: Vec<Weekday>,
    /// The weekday shown in the first calendar column.
    pub week_start: Weekday,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            weekend: vec![Weekday::Saturday, Weekday::Sunday],
            week_start: Weekday::Saturday,
        }
    }
}

/// Identifies one shift slot on the board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub workplace: Workplace,
    pub day: u8,
    pub shift: Shift,
}

impl SlotKey {
    #[must_use]
    pub fn new(workplace: &Workplace, day: u8, shift: Shift) -> Self {
        Self {
            workplace: workplace.clone(),
            day,
            shift,
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} day {} {}", self.workplace, self.day, self.shift.label())
    }
}

/// Visual warnings a slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotWarning {
    /// One engineer holds all three shifts of the day at this workplace.
    ThreeShifts,
    /// The engineer works too many consecutive days.
    ConsecutiveDays,
}

impl SlotWarning {
    /// Returns the style class name used when rendering the warning.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::ThreeShifts => "three-shifts-warning",
            Self::ConsecutiveDays => "consecutive-days-warning",
        }
    }
}

/// The state of one shift slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    value: Option<String>,
    warnings: BTreeSet<SlotWarning>,
}

impl Slot {
    /// Returns the assigned engineer, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    #[must_use]
    pub const fn warnings(&self) -> &BTreeSet<SlotWarning> {
        &self.warnings
    }
}

/// One day row of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub date: JalaliDate,
    pub weekday: Weekday,
    /// Display label, e.g. `1 (چهارشنبه)`.
    pub label: String,
    pub is_weekend: bool,
}

impl DayRow {
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.date.day()
    }
}

/// The grid section of a single workplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkplaceGrid {
    workplace: Workplace,
    options: Vec<String>,
    slots: BTreeMap<(u8, Shift), Slot>,
}

impl WorkplaceGrid {
    fn new(workplace: &Workplace, options: Vec<String>, days: u8) -> Self {
        let slots: BTreeMap<(u8, Shift), Slot> = (1..=days)
            .flat_map(|day| Shift::ALL.into_iter().map(move |shift| (day, shift)))
            .map(|key| (key, Slot::default()))
            .collect();
        Self {
            workplace: workplace.clone(),
            options,
            slots,
        }
    }

    #[must_use]
    pub const fn workplace(&self) -> &Workplace {
        &self.workplace
    }

    /// Returns the engineer names selectable in this workplace's slots.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o == name)
    }

    #[must_use]
    pub fn slot(&self, day: u8, shift: Shift) -> Option<&Slot> {
        self.slots.get(&(day, shift))
    }

    /// Iterates over slots in day-then-shift order.
    pub fn slots(&self) -> impl Iterator<Item = (u8, Shift, &Slot)> {
        self.slots.iter().map(|(&(day, shift), slot)| (day, shift, slot))
    }
}

/// The calendar grid for one period.
///
/// Slot values are restricted to the options of their workplace; a slot is
/// either empty or names an eligible engineer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    period: Period,
    first_column: u8,
    rows: Vec<DayRow>,
    workplaces: Vec<WorkplaceGrid>,
}

impl CalendarGrid {
    /// Builds an empty grid for a Jalali month.
    ///
    /// # Arguments
    ///
    /// * `year` - The Jalali year
    /// * `month` - The Jalali month (1-12)
    /// * `workplaces` - The workplaces to lay out, in display order
    /// * `roster` - The engineers used to populate slot options
    /// * `settings` - Weekend and week-start settings
    ///
    /// # Errors
    ///
    /// Returns an error if the year and month do not form a valid Jalali
    /// month.
    pub fn build(
        year: i32,
        month: u8,
        workplaces: &[Workplace],
        roster: &Roster,
        settings: &CalendarSettings,
    ) -> Result<Self, CoreError> {
        let period: Period = Period::new(year, month)?;
        let days: u8 = period.days_in_month();

        let mut rows: Vec<DayRow> = Vec::with_capacity(usize::from(days));
        for day in 1..=days {
            let date: JalaliDate = period.date(day)?;
            let weekday: Weekday = date.weekday()?;
            rows.push(DayRow {
                date,
                weekday,
                label: format!("{day} ({})", persian_day_name(weekday)),
                is_weekend: settings.weekend.contains(&weekday),
            });
        }

        let first_column: u8 = rows.first().map_or(0, |row| {
            (row.weekday.number_days_from_sunday() + 7
                - settings.week_start.number_days_from_sunday())
                % 7
        });

        let mut sections: Vec<WorkplaceGrid> = Vec::with_capacity(workplaces.len());
        for workplace in workplaces {
            if sections.iter().any(|s| &s.workplace == workplace) {
                continue;
            }
            let options: Vec<String> = roster
                .eligible_for(workplace)
                .into_iter()
                .map(|e| e.name.clone())
                .collect();
            sections.push(WorkplaceGrid::new(workplace, options, days));
        }

        debug!(
            period = %period,
            days,
            workplaces = sections.len(),
            "Built calendar grid"
        );

        Ok(Self {
            period,
            first_column,
            rows,
            workplaces: sections,
        })
    }

    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        self.period.days_in_month()
    }

    /// Returns the column (0-6) of day 1 relative to the configured week start.
    #[must_use]
    pub const fn first_column(&self) -> u8 {
        self.first_column
    }

    #[must_use]
    pub fn rows(&self) -> &[DayRow] {
        &self.rows
    }

    #[must_use]
    pub fn workplaces(&self) -> &[WorkplaceGrid] {
        &self.workplaces
    }

    /// Returns the section of a workplace.
    ///
    /// # Errors
    ///
    /// Returns an error if the workplace is not in this grid.
    pub fn workplace(&self, workplace: &Workplace) -> Result<&WorkplaceGrid, CoreError> {
        self.workplaces
            .iter()
            .find(|s| &s.workplace == workplace)
            .ok_or_else(|| CoreError::UnknownWorkplace(workplace.to_string()))
    }

    fn workplace_mut(&mut self, workplace: &Workplace) -> Result<&mut WorkplaceGrid, CoreError> {
        self.workplaces
            .iter_mut()
            .find(|s| &s.workplace == workplace)
            .ok_or_else(|| CoreError::UnknownWorkplace(workplace.to_string()))
    }

    /// Returns the engineer in a slot, if any.
    #[must_use]
    pub fn value(&self, workplace: &Workplace, day: u8, shift: Shift) -> Option<&str> {
        self.workplace(workplace)
            .ok()
            .and_then(|s| s.slot(day, shift))
            .and_then(Slot::value)
    }

    /// Sets or clears a slot.
    ///
    /// # Arguments
    ///
    /// * `workplace` - The slot's workplace
    /// * `day` - The day of the month
    /// * `shift` - The shift
    /// * `engineer` - The engineer to place, or `None` to clear
    ///
    /// # Returns
    ///
    /// The previous value of the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workplace is not part of the grid
    /// - The day is outside the month
    /// - The engineer is not an option for the workplace
    pub fn set_value(
        &mut self,
        workplace: &Workplace,
        day: u8,
        shift: Shift,
        engineer: Option<&str>,
    ) -> Result<Option<String>, CoreError> {
        let days_in_month: u8 = self.days_in_month();
        let section: &mut WorkplaceGrid = self.workplace_mut(workplace)?;

        if let Some(name) = engineer.filter(|name| !section.has_option(name)) {
            return Err(CoreError::NotAnOption {
                workplace: workplace.to_string(),
                engineer: name.to_string(),
            });
        }

        let slot: &mut Slot = section
            .slots
            .get_mut(&(day, shift))
            .ok_or(CoreError::DayOutOfRange { day, days_in_month })?;
        Ok(std::mem::replace(&mut slot.value, engineer.map(str::to_string)))
    }

    /// Returns the number of filled slots.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.workplaces
            .iter()
            .flat_map(WorkplaceGrid::slots)
            .filter(|(_, _, slot)| !slot.is_empty())
            .count()
    }

    /// Empties every slot and removes all warnings.
    pub fn clear(&mut self) {
        for slot in self.workplaces.iter_mut().flat_map(|s| s.slots.values_mut()) {
            slot.value = None;
            slot.warnings.clear();
        }
    }

    pub(crate) fn clear_warnings(&mut self) {
        for slot in self.workplaces.iter_mut().flat_map(|s| s.slots.values_mut()) {
            slot.warnings.clear();
        }
    }

    pub(crate) fn add_warning(
        &mut self,
        workplace_index: usize,
        day: u8,
        shift: Shift,
        warning: SlotWarning,
    ) {
        if let Some(slot) = self
            .workplaces
            .get_mut(workplace_index)
            .and_then(|s| s.slots.get_mut(&(day, shift)))
        {
            slot.warnings.insert(warning);
        }
    }
}
