// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process `ScheduleApi` with the backend's storage rules.

use crate::error::ApiError;
use crate::request_response::export_file_name;
use crate::{ScheduleApi, check_pattern_upload_name};
use shiftboard_domain::{
    DEFAULT_MAX_SHIFTS, DEFAULT_MIN_SHIFTS, Engineer, Pattern, Period, Schedule, Shift, Workplace,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    engineers: Vec<Engineer>,
    /// Keyed by `"{year}-{month}"`.
    schedules: BTreeMap<String, Schedule>,
    files: BTreeMap<String, Vec<u8>>,
    /// Spreadsheets the store can "parse", keyed by file name.
    patterns: BTreeMap<String, Pattern>,
}

/// A [`ScheduleApi`] that keeps everything in memory.
///
/// Clones share the same store. Generated spreadsheets are rendered as CSV
/// text; uploads succeed only for file names registered with
/// [`InMemoryApi::register_pattern`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryApi {
    store: Arc<Mutex<Store>>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with engineers.
    #[must_use]
    pub fn with_engineers(engineers: Vec<Engineer>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                engineers,
                ..Store::default()
            })),
        }
    }

    /// Makes `file_name` parse to `pattern` on upload.
    pub async fn register_pattern(&self, file_name: &str, pattern: Pattern) {
        self.store
            .lock()
            .await
            .patterns
            .insert(file_name.to_string(), pattern);
    }

    /// Returns the stored schedule of a period, if one was saved.
    pub async fn stored_schedule(&self, period: Period) -> Option<Schedule> {
        self.store
            .lock()
            .await
            .schedules
            .get(&period.to_string())
            .cloned()
    }
}

/// Renders one workplace of a schedule as `day,shift1,shift2,shift3` rows.
fn render_export(schedule: &Schedule, workplace: &Workplace, days: u8) -> Vec<u8> {
    let mut out: String = String::from("day,shift1,shift2,shift3\n");
    for day in 1..=days {
        let cells: Vec<&str> = Shift::ALL
            .iter()
            .map(|&shift| schedule.get(workplace, day, shift).unwrap_or(""))
            .collect();
        out.push_str(&format!("{day},{}\n", cells.join(",")));
    }
    out.into_bytes()
}

impl ScheduleApi for InMemoryApi {
    async fn list_engineers(&self) -> Result<Vec<Engineer>, ApiError> {
        Ok(self.store.lock().await.engineers.clone())
    }

    async fn upsert_engineer(&self, engineer: &Engineer) -> Result<(), ApiError> {
        let mut stored: Engineer = engineer.clone();
        stored.min_shifts = stored.min_shifts.or(Some(DEFAULT_MIN_SHIFTS));
        stored.max_shifts = stored.max_shifts.or(Some(DEFAULT_MAX_SHIFTS));

        let mut store: MutexGuard<'_, Store> = self.store.lock().await;
        if let Some(existing) = store.engineers.iter_mut().find(|e| e.name == stored.name) {
            *existing = stored;
        } else {
            store.engineers.push(stored);
        }
        Ok(())
    }

    async fn delete_engineer(&self, name: &str) -> Result<(), ApiError> {
        self.store.lock().await.engineers.retain(|e| e.name != name);
        Ok(())
    }

    async fn load_schedule(&self, period: Period) -> Result<Schedule, ApiError> {
        Ok(self.stored_schedule(period).await.unwrap_or_default())
    }

    async fn save_schedule(&self, period: Period, schedule: &Schedule) -> Result<(), ApiError> {
        debug!(%period, "Storing schedule in memory");
        self.store
            .lock()
            .await
            .schedules
            .insert(period.to_string(), schedule.clone());
        Ok(())
    }

    async fn generate_excel(&self, period: Period) -> Result<Vec<String>, ApiError> {
        let mut store: MutexGuard<'_, Store> = self.store.lock().await;
        let schedule: Schedule = store
            .schedules
            .get(&period.to_string())
            .cloned()
            .ok_or(ApiError::NoScheduleData)?;

        let mut files: Vec<String> = Vec::new();
        for workplace in schedule.workplaces() {
            let name: String = export_file_name(workplace.name(), period);
            let contents: Vec<u8> = render_export(&schedule, workplace, period.days_in_month());
            store.files.insert(name.clone(), contents);
            files.push(name);
        }
        Ok(files)
    }

    async fn download(&self, file: &str) -> Result<Vec<u8>, ApiError> {
        self.store
            .lock()
            .await
            .files
            .get(file)
            .cloned()
            .ok_or_else(|| ApiError::FileNotFound(file.to_string()))
    }

    async fn upload_pattern(&self, file_name: &str, _contents: Vec<u8>) -> Result<Pattern, ApiError> {
        check_pattern_upload_name(file_name)?;
        self.store
            .lock()
            .await
            .patterns
            .get(file_name)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                endpoint: String::from("pattern/upload"),
                message: format!("Error processing Excel file: {file_name}"),
            })
    }
}
