// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_MAX_SHIFTS, DEFAULT_MIN_SHIFTS, DomainError, Engineer, Limitations, Pattern, Schedule,
    Shift, Workplace,
};
use std::str::FromStr;

fn create_test_engineer() -> Engineer {
    Engineer::new("A", vec![Workplace::new("Lab")])
        .with_quota(10, 12)
        .with_limitation(5, Shift::Second)
}

#[test]
fn test_shift_keys_and_indices() {
    assert_eq!(Shift::First.key(), "shift1");
    assert_eq!(Shift::Third.index(), 3);
    assert_eq!(Shift::Second.label(), "Shift 2");
    assert_eq!(Shift::from_index(2).unwrap(), Shift::Second);
    assert!(matches!(
        Shift::from_index(4).unwrap_err(),
        DomainError::InvalidShift(_)
    ));
}

#[test]
fn test_shift_from_str_accepts_key_and_index() {
    assert_eq!(Shift::from_str("shift3").unwrap(), Shift::Third);
    assert_eq!(Shift::from_str(" 1 ").unwrap(), Shift::First);
    assert!(Shift::from_str("night").is_err());
    assert!(Shift::from_str("shift0").is_err());
}

#[test]
fn test_workplace_is_trimmed_and_case_preserved() {
    let workplace: Workplace = Workplace::new("  Studio Press ");
    assert_eq!(workplace.name(), "Studio Press");
    assert_ne!(workplace, Workplace::new("studio press"));
}

#[test]
fn test_engineer_defaults() {
    let engineer: Engineer = Engineer::new(" Sara ", vec![Workplace::new("Nodal")]);
    assert_eq!(engineer.name, "Sara");
    assert_eq!(engineer.effective_min_shifts(), DEFAULT_MIN_SHIFTS);
    assert_eq!(engineer.effective_max_shifts(), DEFAULT_MAX_SHIFTS);
    assert!(engineer.limitations.is_empty());
}

#[test]
fn test_engineer_zero_quota_falls_back_to_default() {
    let mut engineer: Engineer = Engineer::new("Sara", vec![Workplace::new("Nodal")]);
    engineer.min_shifts = Some(0);
    engineer.max_shifts = None;
    assert_eq!(engineer.effective_min_shifts(), DEFAULT_MIN_SHIFTS);
    assert_eq!(engineer.effective_max_shifts(), DEFAULT_MAX_SHIFTS);
}

#[test]
fn test_engineer_deserializes_wire_format() {
    let json: &str = r#"{
        "name": "A",
        "workplaces": ["Lab"],
        "limitations": {"5": ["shift2"]},
        "minShifts": 10,
        "maxShifts": 12
    }"#;
    let engineer: Engineer = serde_json::from_str(json).unwrap();
    assert_eq!(engineer, create_test_engineer());
    assert!(engineer.is_limited(5, Shift::Second));
    assert!(!engineer.is_limited(5, Shift::First));
    assert!(!engineer.is_limited(6, Shift::Second));
    assert!(engineer.works_at(&Workplace::new("Lab")));
    assert!(!engineer.works_at(&Workplace::new("Nodal")));
}

#[test]
fn test_engineer_without_optional_fields() {
    let json: &str = r#"{"name": "B", "workplaces": ["Nodal"]}"#;
    let engineer: Engineer = serde_json::from_str(json).unwrap();
    assert!(engineer.limitations.is_empty());
    assert_eq!(engineer.min_shifts, None);
    assert_eq!(engineer.effective_max_shifts(), DEFAULT_MAX_SHIFTS);
}

#[test]
fn test_engineer_serializes_camel_case() {
    let value: serde_json::Value = serde_json::to_value(create_test_engineer()).unwrap();
    assert_eq!(value["minShifts"], 10);
    assert_eq!(value["maxShifts"], 12);
    assert_eq!(value["limitations"]["5"][0], "shift2");
}

#[test]
fn test_limitations_add_remove() {
    let mut limitations: Limitations = Limitations::new();
    limitations.add(3, Shift::First);
    limitations.add(3, Shift::Third);
    assert!(limitations.is_limited(3, Shift::Third));
    assert!(limitations.remove(3, Shift::Third));
    assert!(!limitations.remove(3, Shift::Third));
    assert!(limitations.remove(3, Shift::First));
    assert!(limitations.shifts_on(3).is_none());
    assert!(limitations.is_empty());
}

#[test]
fn test_limitations_clear_day() {
    let mut limitations: Limitations = Limitations::new();
    limitations.add(9, Shift::First);
    limitations.add(9, Shift::Second);
    limitations.clear_day(9);
    assert!(!limitations.is_limited(9, Shift::First));
}

#[test]
fn test_schedule_wire_format() {
    let json: &str = r#"{"Lab": {"1": {"shift1": "A"}}, "Nodal": {}}"#;
    let schedule: Schedule = serde_json::from_str(json).unwrap();
    let lab: Workplace = Workplace::new("Lab");
    assert_eq!(schedule.get(&lab, 1, Shift::First), Some("A"));
    assert_eq!(schedule.get(&lab, 1, Shift::Second), None);
    assert_eq!(schedule.assignment_count(), 1);
    assert_eq!(schedule.workplaces().count(), 2);

    let back: serde_json::Value = serde_json::to_value(&schedule).unwrap();
    assert_eq!(
        back,
        serde_json::json!({"Lab": {"1": {"shift1": "A"}}, "Nodal": {}})
    );
}

#[test]
fn test_schedule_assign_and_iterate() {
    let mut schedule: Schedule = Schedule::new();
    let lab: Workplace = Workplace::new("Lab");
    schedule.assign(&lab, 2, Shift::Third, "B");
    schedule.assign(&lab, 1, Shift::First, "A");
    schedule.assign(&lab, 1, Shift::First, "C");

    let assignments: Vec<(u8, Shift, String)> = schedule
        .assignments()
        .map(|(_, day, shift, name)| (day, shift, name.to_string()))
        .collect();
    assert_eq!(
        assignments,
        vec![
            (1, Shift::First, String::from("C")),
            (2, Shift::Third, String::from("B")),
        ]
    );
}

#[test]
fn test_empty_schedule_with_workplaces_is_empty() {
    let mut schedule: Schedule = Schedule::new();
    schedule.ensure_workplace(&Workplace::new("Lab"));
    assert!(schedule.is_empty());
    assert_eq!(schedule.workplaces().count(), 1);
}

#[test]
fn test_pattern_wire_format_with_empty_rows() {
    let json: &str = r#"{"1": {"shift1": "A", "shift3": "B"}, "2": {}, "3": {"shift2": "C"}}"#;
    let pattern: Pattern = serde_json::from_str(json).unwrap();
    assert_eq!(pattern.len(), 3);
    assert_eq!(pattern.last_day(), Some(3));
    assert_eq!(pattern.get(1, Shift::Third), Some("B"));
    let entries: Vec<(u8, Shift)> = pattern.entries().map(|(d, s, _)| (d, s)).collect();
    assert_eq!(
        entries,
        vec![(1, Shift::First), (1, Shift::Third), (3, Shift::Second)]
    );
}

#[test]
fn test_pattern_day_count_ignores_empty_rows() {
    let json: &str = r#"{"1": {"shift1": "A", "shift2": "A", "shift3": "A"}, "2": {}, "3": {"shift1": "B"}}"#;
    let pattern: Pattern = serde_json::from_str(json).unwrap();
    assert_eq!(pattern.len(), 4);
    assert_eq!(pattern.day_count(), 2);
    assert_eq!(Pattern::new().day_count(), 0);
}
