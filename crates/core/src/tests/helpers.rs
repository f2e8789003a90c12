// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BoardState, CalendarSettings, Roster};
use shiftboard_domain::{Engineer, Shift, Workplace};

pub fn lab() -> Workplace {
    Workplace::new("Lab")
}

pub fn nodal() -> Workplace {
    Workplace::new("Nodal")
}

/// Engineer A: works at Lab, 10-12 shifts, unavailable on day 5 shift 2.
pub fn create_engineer_a() -> Engineer {
    Engineer::new("A", vec![lab()])
        .with_quota(10, 12)
        .with_limitation(5, Shift::Second)
}

pub fn create_engineer(name: &str, min: u32, max: u32) -> Engineer {
    Engineer::new(name, vec![lab()]).with_quota(min, max)
}

/// Opens Farvardin 1403 (31 days, starting on a Wednesday).
pub fn create_open_state(engineers: Vec<Engineer>, workplaces: &[Workplace]) -> BoardState {
    let mut state: BoardState = BoardState::new(Roster::new(engineers));
    state
        .open(1403, 1, workplaces, &CalendarSettings::default())
        .unwrap();
    state
}

/// Returns the three shift values of a day at a workplace.
pub fn day_values(state: &BoardState, workplace: &Workplace, day: u8) -> Vec<Option<String>> {
    let grid = state.grid().unwrap();
    Shift::ALL
        .iter()
        .map(|&shift| grid.value(workplace, day, shift).map(str::to_string))
        .collect()
}

pub fn some(names: [&str; 3]) -> Vec<Option<String>> {
    names.iter().map(|n| Some((*n).to_string())).collect()
}
