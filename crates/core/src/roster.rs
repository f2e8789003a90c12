// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftboard_domain::{Engineer, Workplace};

/// The engineers available for scheduling, in roster order.
///
/// Roster order is significant: it is the order in which options are offered
/// and the tie-breaker during auto-assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    engineers: Vec<Engineer>,
}

impl Roster {
    /// Creates a roster from engineers in the order given.
    #[must_use]
    pub const fn new(engineers: Vec<Engineer>) -> Self {
        Self { engineers }
    }

    #[must_use]
    pub fn engineers(&self) -> &[Engineer] {
        &self.engineers
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.engineers.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.engineers.is_empty()
    }

    /// Finds an engineer by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Engineer> {
        self.engineers.iter().find(|e| e.name == name)
    }

    /// Returns the engineers who work at `workplace`, in roster order.
    #[must_use]
    pub fn eligible_for(&self, workplace: &Workplace) -> Vec<&Engineer> {
        self.engineers
            .iter()
            .filter(|e| e.works_at(workplace))
            .collect()
    }

    /// Inserts or replaces an engineer, matched by name.
    ///
    /// A replaced engineer keeps its roster position.
    ///
    /// # Returns
    ///
    /// `true` if an existing engineer was replaced.
    pub fn upsert(&mut self, engineer: Engineer) -> bool {
        if let Some(existing) = self.engineers.iter_mut().find(|e| e.name == engineer.name) {
            *existing = engineer;
            true
        } else {
            self.engineers.push(engineer);
            false
        }
    }

    /// Removes an engineer by name.
    ///
    /// # Returns
    ///
    /// `true` if an engineer was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before: usize = self.engineers.len();
        self.engineers.retain(|e| e.name != name);
        self.engineers.len() != before
    }
}

impl From<Vec<Engineer>> for Roster {
    fn from(engineers: Vec<Engineer>) -> Self {
        Self::new(engineers)
    }
}
