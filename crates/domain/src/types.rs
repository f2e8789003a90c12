// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Minimum shift quota applied when an engineer has none configured.
pub const DEFAULT_MIN_SHIFTS: u32 = 10;

/// Maximum shift quota applied when an engineer has none configured.
pub const DEFAULT_MAX_SHIFTS: u32 = 30;

/// One of the three daily work periods.
///
/// On the wire a shift is identified by its key (`shift1`..`shift3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// The first shift of the day.
    #[serde(rename = "shift1")]
    First,
    /// The second shift of the day.
    #[serde(rename = "shift2")]
    Second,
    /// The third shift of the day.
    #[serde(rename = "shift3")]
    Third,
}

impl Shift {
    /// All shifts in day order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Returns the 1-based shift index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Returns the shift for a 1-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not 1, 2 or 3.
    pub fn from_index(index: u8) -> Result<Self, DomainError> {
        match index {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            _ => Err(DomainError::InvalidShift(format!(
                "index {index} is not between 1 and 3"
            ))),
        }
    }

    /// Returns the wire key (`shift1`, `shift2` or `shift3`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::First => "shift1",
            Self::Second => "shift2",
            Self::Third => "shift3",
        }
    }

    /// Returns the column label used in tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "Shift 1",
            Self::Second => "Shift 2",
            Self::Third => "Shift 3",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    /// Accepts either the wire key (`shift2`) or the bare index (`2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let digits: &str = trimmed.strip_prefix("shift").unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidShift(format!("'{s}' is not a shift key")))
            .and_then(Self::from_index)
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A named work site. Every shift slot belongs to exactly one workplace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workplace(String);

impl Workplace {
    /// Creates a new `Workplace` from a display name.
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Workplace {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Workplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-day shifts an engineer must not be assigned to.
///
/// Keyed by day of month; serialized with string day keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Limitations(BTreeMap<u8, BTreeSet<Shift>>);

impl Limitations {
    /// Creates an empty set of limitations.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns whether `shift` on `day` is excluded.
    #[must_use]
    pub fn is_limited(&self, day: u8, shift: Shift) -> bool {
        self.0.get(&day).is_some_and(|shifts| shifts.contains(&shift))
    }

    /// Excludes `shift` on `day`.
    pub fn add(&mut self, day: u8, shift: Shift) {
        self.0.entry(day).or_default().insert(shift);
    }

    /// Lifts the exclusion of `shift` on `day`. Returns whether it existed.
    pub fn remove(&mut self, day: u8, shift: Shift) -> bool {
        let Some(shifts) = self.0.get_mut(&day) else {
            return false;
        };
        let removed: bool = shifts.remove(&shift);
        if shifts.is_empty() {
            self.0.remove(&day);
        }
        removed
    }

    /// Lifts every exclusion on `day`.
    pub fn clear_day(&mut self, day: u8) {
        self.0.remove(&day);
    }

    /// Returns the excluded shifts for `day`, if any.
    #[must_use]
    pub fn shifts_on(&self, day: u8) -> Option<&BTreeSet<Shift>> {
        self.0.get(&day)
    }

    /// Iterates over `(day, shifts)` in day order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BTreeSet<Shift>)> {
        self.0.iter().map(|(day, shifts)| (*day, shifts))
    }

    /// Returns whether no limitation is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}

/// An engineer that can be assigned to shifts.
///
/// The name is the engineer's unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    /// The unique engineer name.
    pub name: String,
    /// Workplaces the engineer may be assigned to.
    pub workplaces: Vec<Workplace>,
    /// Per-day shift exclusions.
    #[serde(default)]
    pub limitations: Limitations,
    /// Minimum number of shifts per month, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_shifts: Option<u32>,
    /// Maximum number of shifts per month, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shifts: Option<u32>,
}

impl Engineer {
    /// Creates a new `Engineer` with no limitations and default quotas.
    ///
    /// # Arguments
    ///
    /// * `name` - The unique engineer name
    /// * `workplaces` - Workplaces the engineer may work in
    #[must_use]
    pub fn new(name: &str, workplaces: Vec<Workplace>) -> Self {
        Self {
            name: name.trim().to_string(),
            workplaces,
            limitations: Limitations::new(),
            min_shifts: Some(DEFAULT_MIN_SHIFTS),
            max_shifts: Some(DEFAULT_MAX_SHIFTS),
        }
    }

    /// Returns a copy with the given shift quotas.
    #[must_use]
    pub const fn with_quota(mut self, min_shifts: u32, max_shifts: u32) -> Self {
        self.min_shifts = Some(min_shifts);
        self.max_shifts = Some(max_shifts);
        self
    }

    /// Returns a copy that may not work `shift` on `day`.
    #[must_use]
    pub fn with_limitation(mut self, day: u8, shift: Shift) -> Self {
        self.limitations.add(day, shift);
        self
    }

    /// Returns whether the engineer may work in `workplace`.
    #[must_use]
    pub fn works_at(&self, workplace: &Workplace) -> bool {
        self.workplaces.contains(workplace)
    }

    /// Returns whether the engineer is excluded from `shift` on `day`.
    #[must_use]
    pub fn is_limited(&self, day: u8, shift: Shift) -> bool {
        self.limitations.is_limited(day, shift)
    }

    /// Returns the minimum quota, treating an unset or zero value as the default.
    #[must_use]
    pub fn effective_min_shifts(&self) -> u32 {
        self.min_shifts
            .filter(|min| *min > 0)
            .unwrap_or(DEFAULT_MIN_SHIFTS)
    }

    /// Returns the maximum quota, treating an unset or zero value as the default.
    #[must_use]
    pub fn effective_max_shifts(&self) -> u32 {
        self.max_shifts
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_SHIFTS)
    }
}

/// Assignments of a single day: shift to engineer name.
pub type DayAssignments = BTreeMap<Shift, String>;

/// A sparse month schedule: workplace to day to shift to engineer name.
///
/// Only filled slots are present. A workplace may map to an empty set of
/// days, which is how a cleared workplace is represented on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<Workplace, BTreeMap<u8, DayAssignments>>);

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the engineer assigned to a slot, if any.
    #[must_use]
    pub fn get(&self, workplace: &Workplace, day: u8, shift: Shift) -> Option<&str> {
        self.0
            .get(workplace)
            .and_then(|days| days.get(&day))
            .and_then(|shifts| shifts.get(&shift))
            .map(String::as_str)
    }

    /// Assigns an engineer to a slot, replacing any previous assignment.
    pub fn assign(&mut self, workplace: &Workplace, day: u8, shift: Shift, engineer: &str) {
        self.0
            .entry(workplace.clone())
            .or_default()
            .entry(day)
            .or_default()
            .insert(shift, engineer.to_string());
    }

    /// Records a workplace without requiring any assignment in it.
    pub fn ensure_workplace(&mut self, workplace: &Workplace) {
        self.0.entry(workplace.clone()).or_default();
    }

    /// Returns the workplaces present in this schedule.
    pub fn workplaces(&self) -> impl Iterator<Item = &Workplace> {
        self.0.keys()
    }

    /// Iterates over all filled slots as `(workplace, day, shift, engineer)`.
    pub fn assignments(&self) -> impl Iterator<Item = (&Workplace, u8, Shift, &str)> {
        self.0.iter().flat_map(|(workplace, days)| {
            days.iter().flat_map(move |(day, shifts)| {
                shifts
                    .iter()
                    .map(move |(shift, name)| (workplace, *day, *shift, name.as_str()))
            })
        })
    }

    /// Returns the number of filled slots.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignments().count()
    }

    /// Returns whether no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0
    }
}

/// A reusable day to shift to engineer template, independent of any month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern(BTreeMap<u8, DayAssignments>);

impl Pattern {
    /// Creates an empty pattern.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets the engineer for a day and shift.
    pub fn insert(&mut self, day: u8, shift: Shift, engineer: &str) {
        self.0
            .entry(day)
            .or_default()
            .insert(shift, engineer.to_string());
    }

    /// Returns the engineer for a day and shift, if any.
    #[must_use]
    pub fn get(&self, day: u8, shift: Shift) -> Option<&str> {
        self.0
            .get(&day)
            .and_then(|shifts| shifts.get(&shift))
            .map(String::as_str)
    }

    /// Iterates over all entries as `(day, shift, engineer)` in day/shift order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, Shift, &str)> {
        self.0.iter().flat_map(|(day, shifts)| {
            shifts
                .iter()
                .map(move |(shift, name)| (*day, *shift, name.as_str()))
        })
    }

    /// Returns the highest day carrying a row in the pattern.
    #[must_use]
    pub fn last_day(&self) -> Option<u8> {
        self.0.keys().next_back().copied()
    }

    /// Returns the number of non-empty entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Returns whether the pattern has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of days carrying at least one entry.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.0.values().filter(|shifts| !shifts.is_empty()).count()
    }
}
