// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_engineer_a, create_engineer_b, create_open_session, has_notice, lab, nodal, value,
};
use crate::{NoticeLevel, SessionError};
use shiftboard::{PatternOptions, PatternReport};
use shiftboard_api::ApiError;
use shiftboard_domain::{Pattern, Shift, Workplace};
use std::path::PathBuf;

#[tokio::test]
async fn test_import_csv_and_apply() {
    let (mut session, _api) =
        create_open_session(vec![create_engineer_a(), create_engineer_b()]).await;
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("pattern.csv");
    std::fs::write(&path, "A,,B\n,,\nA, , \n").unwrap();

    let pattern: Pattern = session.import_pattern(&path).await.unwrap();
    assert_eq!(pattern.get(1, Shift::Third), Some("B"));
    assert_eq!(pattern.get(3, Shift::First), Some("A"));

    let report: PatternReport = session
        .apply_pattern(&pattern, &lab(), PatternOptions::default())
        .unwrap();
    assert_eq!(report.applied, 3);
    assert_eq!(value(&session, &lab(), 1, Shift::Third), Some(String::from("B")));
    assert_eq!(value(&session, &lab(), 3, Shift::First), Some(String::from("A")));
    assert!(has_notice(
        session.notices(),
        NoticeLevel::Success,
        "Applied 3 assignments from the pattern."
    ));
}

#[tokio::test]
async fn test_import_notice_counts_days_and_assignments() {
    let (mut session, _api) = create_open_session(vec![create_engineer_a()]).await;
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("pattern.csv");
    std::fs::write(&path, "A,A,A\nA,A,A\n").unwrap();

    let pattern: Pattern = session.import_pattern(&path).await.unwrap();
    assert_eq!(pattern.len(), 6);
    assert_eq!(pattern.day_count(), 2);
    assert!(session.notices().iter().any(|n| n.level == NoticeLevel::Info
        && n.message == "Loaded pattern with 6 assignments over 2 days."));
}

#[tokio::test]
async fn test_import_spreadsheet_is_uploaded() {
    let (mut session, api) = create_open_session(vec![create_engineer_b()]).await;
    let mut expected: Pattern = Pattern::new();
    expected.insert(2, Shift::Second, "B");
    api.register_pattern("month.XLSX", expected.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("month.XLSX");
    std::fs::write(&path, b"not really a workbook").unwrap();

    let pattern: Pattern = session.import_pattern(&path).await.unwrap();
    assert_eq!(pattern, expected);
}

#[tokio::test]
async fn test_import_rejects_other_extensions_before_reading() {
    let (mut session, _api) = create_open_session(vec![create_engineer_b()]).await;
    // The file does not exist; the extension check comes first.
    let err: SessionError = session
        .import_pattern(std::path::Path::new("/nonexistent/pattern.txt"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Api(ApiError::UnsupportedPatternFile(_))
    ));
}

#[tokio::test]
async fn test_import_missing_csv_is_io_error() {
    let (mut session, _api) = create_open_session(vec![create_engineer_b()]).await;
    let err: SessionError = session
        .import_pattern(std::path::Path::new("/nonexistent/pattern.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Io { .. }));
}

#[tokio::test]
async fn test_apply_keeps_existing_and_limited_slots() {
    let (mut session, _api) =
        create_open_session(vec![create_engineer_a(), create_engineer_b()]).await;
    session
        .set_slot(&lab(), 1, Shift::First, Some("B"), false)
        .unwrap();

    let mut pattern: Pattern = Pattern::new();
    pattern.insert(1, Shift::First, "A");
    pattern.insert(5, Shift::Second, "A");
    pattern.insert(6, Shift::Second, "A");

    let report: PatternReport = session
        .apply_pattern(&pattern, &lab(), PatternOptions::default())
        .unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped_existing, 1);
    assert_eq!(report.skipped_limitations, 1);
    assert_eq!(value(&session, &lab(), 1, Shift::First), Some(String::from("B")));
    assert_eq!(value(&session, &lab(), 5, Shift::Second), None);
}

#[tokio::test]
async fn test_apply_empty_pattern_warns() {
    let (mut session, _api) = create_open_session(vec![create_engineer_b()]).await;
    let report: PatternReport = session
        .apply_pattern(&Pattern::new(), &nodal(), PatternOptions::default())
        .unwrap();
    assert_eq!(report, PatternReport::default());
    assert!(has_notice(
        session.notices(),
        NoticeLevel::Warning,
        "No pattern data available to apply."
    ));
}

#[tokio::test]
async fn test_apply_to_unknown_workplace() {
    let (mut session, _api) = create_open_session(vec![create_engineer_b()]).await;
    let mut pattern: Pattern = Pattern::new();
    pattern.insert(1, Shift::First, "B");

    let err: SessionError = session
        .apply_pattern(&pattern, &Workplace::new("Annex"), PatternOptions::default())
        .unwrap_err();
    assert!(matches!(err, SessionError::Core(_)));
    assert!(has_notice(
        session.notices(),
        NoticeLevel::Danger,
        "Could not find schedule for Annex"
    ));
}
