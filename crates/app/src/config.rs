// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session configuration.

use crate::error::SessionError;
use shiftboard::{CalendarSettings, HighlightRules};
use shiftboard_api::DEFAULT_BASE_URL;
use shiftboard_domain::{Workplace, today_in, validate_workplace};
use std::time::Duration;

/// Workplaces laid out when none are configured.
pub const DEFAULT_WORKPLACES: [&str; 4] = ["Studio Hispan", "Studio Press", "Nodal", "Engineer Room"];

/// Zone used to determine the current period.
pub const DEFAULT_TIMEZONE: &str = "Asia/Tehran";

/// Days per auto-assignment batch.
pub const DEFAULT_BATCH_DAYS: u8 = 5;

/// Everything a session needs besides the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root URL of the schedule API.
    pub base_url: String,
    /// Workplaces in display order.
    pub workplaces: Vec<Workplace>,
    pub calendar: CalendarSettings,
    /// IANA zone used for "today".
    pub timezone: String,
    /// Days filled between yields during auto-assignment.
    pub batch_days: u8,
    pub highlight: HighlightRules,
    /// Per-request timeout; `None` leaves the HTTP client's default.
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            workplaces: DEFAULT_WORKPLACES.iter().map(|w| Workplace::new(w)).collect(),
            calendar: CalendarSettings::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            batch_days: DEFAULT_BATCH_DAYS,
            highlight: HighlightRules::default(),
            request_timeout: None,
        }
    }
}

impl AppConfig {
    /// Checks the configuration before a session is created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No workplace is configured, or a workplace name is empty
    /// - The batch size is zero
    /// - The time zone is unknown
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.workplaces.is_empty() {
            return Err(SessionError::Config(String::from(
                "at least one workplace is required",
            )));
        }
        for workplace in &self.workplaces {
            validate_workplace(workplace)?;
        }
        if self.batch_days == 0 {
            return Err(SessionError::Config(String::from(
                "batch size must be at least one day",
            )));
        }
        today_in(&self.timezone)?;
        Ok(())
    }
}

/// Parses a comma-separated workplace list, dropping empty entries.
#[must_use]
pub fn parse_workplaces(list: &str) -> Vec<Workplace> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Workplace::new)
        .collect()
}
