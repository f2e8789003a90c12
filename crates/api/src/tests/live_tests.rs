// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests against a running schedule service.
//!
//! All tests here are `#[ignore]`d and run only via `cargo xtask test-live`,
//! which sets `SHIFTBOARD_TEST_BASE_URL`. They fail fast when it is missing.
//!
//! The tests use the period 1350/12 and an engineer named
//! `shiftboard-live-test`, and delete that engineer again.

use crate::{ApiError, HttpScheduleApi, ScheduleApi};
use shiftboard_domain::{Engineer, Period, Schedule, Shift, Workplace};
use std::env;
use std::time::Duration;

const TEST_ENGINEER: &str = "shiftboard-live-test";

fn live_client() -> HttpScheduleApi {
    let url: String = env::var("SHIFTBOARD_TEST_BASE_URL").expect(
        "SHIFTBOARD_TEST_BASE_URL not set - live tests must be run via `cargo xtask test-live`",
    );
    HttpScheduleApi::new(&url, Some(Duration::from_secs(10))).unwrap()
}

fn live_period() -> Period {
    Period::new(1350, 12).unwrap()
}

#[tokio::test]
#[ignore = "requires a schedule service via cargo xtask test-live"]
async fn test_live_engineer_lifecycle() {
    let api: HttpScheduleApi = live_client();
    let engineer: Engineer = Engineer::new(TEST_ENGINEER, vec![Workplace::new("Nodal")])
        .with_quota(1, 2)
        .with_limitation(3, Shift::Third);

    api.upsert_engineer(&engineer).await.unwrap();
    let listed: Vec<Engineer> = api.list_engineers().await.unwrap();
    let stored: &Engineer = listed
        .iter()
        .find(|e| e.name == TEST_ENGINEER)
        .expect("upserted engineer is listed");
    assert!(stored.is_limited(3, Shift::Third));
    assert_eq!(stored.max_shifts, Some(2));

    api.delete_engineer(TEST_ENGINEER).await.unwrap();
    let listed: Vec<Engineer> = api.list_engineers().await.unwrap();
    assert!(listed.iter().all(|e| e.name != TEST_ENGINEER));
}

#[tokio::test]
#[ignore = "requires a schedule service via cargo xtask test-live"]
async fn test_live_schedule_round_trip_and_export() {
    let api: HttpScheduleApi = live_client();
    let nodal: Workplace = Workplace::new("Nodal");
    let mut schedule: Schedule = Schedule::new();
    schedule.assign(&nodal, 1, Shift::First, TEST_ENGINEER);
    schedule.assign(&nodal, 29, Shift::Third, TEST_ENGINEER);

    api.save_schedule(live_period(), &schedule).await.unwrap();
    let loaded: Schedule = api.load_schedule(live_period()).await.unwrap();
    assert_eq!(loaded.get(&nodal, 1, Shift::First), Some(TEST_ENGINEER));
    assert_eq!(loaded.get(&nodal, 29, Shift::Third), Some(TEST_ENGINEER));

    let files: Vec<String> = api.generate_excel(live_period()).await.unwrap();
    assert!(files.contains(&String::from("Nodal_1350_12.xlsx")));
    let bytes: Vec<u8> = api.download("Nodal_1350_12.xlsx").await.unwrap();
    assert!(!bytes.is_empty());

    api.save_schedule(live_period(), &Schedule::new()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a schedule service via cargo xtask test-live"]
async fn test_live_missing_download() {
    let api: HttpScheduleApi = live_client();
    let err: ApiError = api
        .download("shiftboard-live-test-missing.xlsx")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::FileNotFound(_)));
}
