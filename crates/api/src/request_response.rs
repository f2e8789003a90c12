// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response bodies exchanged with the schedule backend.

use serde::{Deserialize, Serialize};
use shiftboard_domain::{Pattern, Period, Schedule};

/// The envelope status value that marks success.
pub const STATUS_SUCCESS: &str = "success";

/// Query string of `GET schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub year: i32,
    pub month: u8,
}

impl From<Period> for ScheduleQuery {
    fn from(period: Period) -> Self {
        Self {
            year: period.year(),
            month: period.month(),
        }
    }
}

/// Body of `POST schedule`: a full replacement of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    pub year: i32,
    pub month: u8,
    pub workplaces: Schedule,
}

/// Body of `POST generate_excel`.
pub type GenerateExcelRequest = ScheduleQuery;

/// A bare `{status}` envelope, optionally carrying an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: String::from(STATUS_SUCCESS),
            error: None,
        }
    }
}

/// Response of `POST generate_excel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateExcelResponse {
    pub status: String,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Response of `POST pattern/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPatternResponse {
    pub status: String,
    #[serde(default)]
    pub pattern: Pattern,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returns the file name the backend uses for a workplace export.
///
/// Spaces in the workplace name become underscores, e.g.
/// `Studio_Press_1403_1.xlsx`.
#[must_use]
pub fn export_file_name(workplace: &str, period: Period) -> String {
    format!(
        "{}_{}_{}.xlsx",
        workplace.replace(' ', "_"),
        period.year(),
        period.month()
    )
}
