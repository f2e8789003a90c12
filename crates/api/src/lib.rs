// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod http;
mod memory;
mod pattern_csv;
pub mod request_response;

#[cfg(test)]
mod tests;

use shiftboard_domain::{Engineer, Pattern, Period, Schedule};
use std::future::Future;

pub use error::ApiError;
pub use http::{DEFAULT_BASE_URL, HttpScheduleApi};
pub use memory::InMemoryApi;
pub use pattern_csv::{MAX_PATTERN_DAYS, parse_csv_pattern};

/// File extensions accepted by the pattern upload endpoint.
pub const PATTERN_UPLOAD_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// The remote operations a schedule session depends on.
///
/// Engineers are identified by name. Schedules are stored per period and
/// replaced wholesale on save.
pub trait ScheduleApi {
    /// Fetches all engineers in roster order.
    fn list_engineers(&self) -> impl Future<Output = Result<Vec<Engineer>, ApiError>> + Send;

    /// Inserts or replaces an engineer, matched by name.
    fn upsert_engineer(
        &self,
        engineer: &Engineer,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Removes an engineer by name.
    fn delete_engineer(&self, name: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Fetches the stored schedule of a period; an unknown period yields an
    /// empty schedule.
    fn load_schedule(
        &self,
        period: Period,
    ) -> impl Future<Output = Result<Schedule, ApiError>> + Send;

    /// Replaces the stored schedule of a period.
    fn save_schedule(
        &self,
        period: Period,
        schedule: &Schedule,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Generates one spreadsheet per workplace for a saved period and
    /// returns the generated file names.
    fn generate_excel(
        &self,
        period: Period,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// Downloads a generated file.
    fn download(&self, file: &str) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;

    /// Uploads a spreadsheet and returns the pattern parsed from it.
    fn upload_pattern(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<Pattern, ApiError>> + Send;
}

/// Checks that a pattern file can be uploaded.
///
/// # Errors
///
/// Returns `ApiError::UnsupportedPatternFile` unless the name ends in
/// `.xlsx` or `.xls` (case-insensitive).
pub fn check_pattern_upload_name(file_name: &str) -> Result<(), ApiError> {
    let supported: bool = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PATTERN_UPLOAD_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if supported {
        Ok(())
    } else {
        Err(ApiError::UnsupportedPatternFile(file_name.to_string()))
    }
}
