// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, check_pattern_upload_name, parse_csv_pattern};
use shiftboard_domain::{Pattern, Shift};

#[test]
fn test_rows_are_days_and_columns_are_shifts() {
    let pattern: Pattern = parse_csv_pattern(b"A,B,C\nD,,E\n").unwrap();
    assert_eq!(pattern.get(1, Shift::First), Some("A"));
    assert_eq!(pattern.get(1, Shift::Third), Some("C"));
    assert_eq!(pattern.get(2, Shift::Second), None);
    assert_eq!(pattern.get(2, Shift::Third), Some("E"));
    assert_eq!(pattern.entries().count(), 5);
}

#[test]
fn test_cells_are_trimmed_and_extra_columns_ignored() {
    let pattern: Pattern = parse_csv_pattern(b"  A  ,   , B ,Extra\n").unwrap();
    assert_eq!(pattern.get(1, Shift::First), Some("A"));
    assert_eq!(pattern.get(1, Shift::Second), None);
    assert_eq!(pattern.get(1, Shift::Third), Some("B"));
    assert_eq!(pattern.entries().count(), 2);
}

#[test]
fn test_blank_lines_are_empty_days() {
    let pattern: Pattern = parse_csv_pattern(b"A\n\n\nB\n").unwrap();
    assert_eq!(pattern.get(1, Shift::First), Some("A"));
    assert_eq!(pattern.get(4, Shift::First), Some("B"));
    assert_eq!(pattern.entries().count(), 2);
}

#[test]
fn test_rows_past_day_31_are_ignored() {
    let content: String = (1..=40).map(|day| format!("E{day}\n")).collect();
    let pattern: Pattern = parse_csv_pattern(content.as_bytes()).unwrap();
    assert_eq!(pattern.last_day(), Some(31));
    assert_eq!(pattern.get(31, Shift::First), Some("E31"));
}

#[test]
fn test_invalid_utf8_rejects_whole_file() {
    let err: ApiError = parse_csv_pattern(b"A,B,C\n\xff\xfe,x\n").unwrap_err();
    assert!(matches!(err, ApiError::InvalidCsvPattern { .. }));
}

#[test]
fn test_empty_file_is_empty_pattern() {
    assert!(parse_csv_pattern(b"").unwrap().is_empty());
}

#[test]
fn test_upload_name_check() {
    assert!(check_pattern_upload_name("rota.xlsx").is_ok());
    assert!(check_pattern_upload_name("ROTA.XLS").is_ok());
    assert!(check_pattern_upload_name("rota.csv").is_err());
    assert!(check_pattern_upload_name("xlsx").is_err());
}
