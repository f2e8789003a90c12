// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The session pipeline.
//!
//! A [`Session`] owns the board (roster and grid) and is the only place it
//! is mutated. Every operation reports its outcome as a [`Notice`]; the
//! highlighter runs after each change to the grid.

use crate::busy::{BusyGuard, BusyIndicator};
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::notice::{Notice, NoticeLevel};
use futures::future::try_join_all;
use shiftboard::{
    AssignmentSummary, BoardState, CalendarGrid, CoreError, HighlightReport, LoadOutcome,
    PatternOptions, PatternReport, Roster, auto_assign_in_batches, highlight,
};
use shiftboard_api::{
    ApiError, HttpScheduleApi, ScheduleApi, check_pattern_upload_name, parse_csv_pattern,
};
use shiftboard_domain::{Engineer, Pattern, Period, Schedule, Shift, Workplace, validate_engineer};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Changes to an engineer. Fields left as `None` keep their stored value
/// (or the default, for a new engineer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineerUpdate {
    pub name: String,
    pub workplaces: Option<Vec<Workplace>>,
    pub min_shifts: Option<u32>,
    pub max_shifts: Option<u32>,
}

/// An editing session against one schedule backend.
#[derive(Debug)]
pub struct Session<A> {
    api: A,
    config: AppConfig,
    board: BoardState,
    notices: Vec<Notice>,
    busy: BusyIndicator,
    highlights: HighlightReport,
}

impl Session<HttpScheduleApi> {
    /// Creates a session talking HTTP to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn connect(config: AppConfig) -> Result<Self, SessionError> {
        let api: HttpScheduleApi =
            HttpScheduleApi::new(&config.base_url, config.request_timeout)?;
        Self::new(api, config)
    }
}

impl<A> Session<A>
where
    A: ScheduleApi + Send + Sync,
{
    /// Creates a session with an empty roster and no open period.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(api: A, config: AppConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            api,
            config,
            board: BoardState::default(),
            notices: Vec::new(),
            busy: BusyIndicator::new(),
            highlights: HighlightReport::default(),
        })
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        self.board.roster()
    }

    #[must_use]
    pub const fn grid(&self) -> Option<&CalendarGrid> {
        self.board.grid()
    }

    /// Returns the result of the latest highlight pass.
    #[must_use]
    pub const fn highlights(&self) -> HighlightReport {
        self.highlights
    }

    /// Returns a handle observing the busy state.
    #[must_use]
    pub fn busy(&self) -> BusyIndicator {
        self.busy.clone()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Removes and returns all pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let notice: Notice = Notice::new(level, message);
        match level {
            NoticeLevel::Success | NoticeLevel::Info => info!(%notice, "Notice"),
            NoticeLevel::Warning => warn!(%notice, "Notice"),
            NoticeLevel::Danger => error!(%notice, "Notice"),
        }
        self.notices.push(notice);
    }

    /// Pushes a notice for a failed result and passes the result through.
    fn report<T>(
        &mut self,
        context: &str,
        result: Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        if let Err(err) = &result {
            let level: NoticeLevel = err.notice_level();
            let message: String = if level == NoticeLevel::Danger {
                format!("{context}: {err}")
            } else {
                err.to_string()
            };
            self.notify(level, message);
        }
        result
    }

    fn begin(&self, operation: &'static str) -> BusyGuard {
        self.busy.begin(operation)
    }

    /// Recomputes slot warnings for the open grid.
    pub fn rehighlight(&mut self) -> HighlightReport {
        if let Ok((_, grid)) = self.board.parts_mut() {
            self.highlights = highlight(grid, &self.config.highlight);
            if !self.highlights.is_clean() {
                debug!(
                    three_shift_days = self.highlights.three_shift_days,
                    consecutive_runs = self.highlights.consecutive_runs,
                    "Challenging patterns highlighted"
                );
            }
        }
        self.highlights
    }

    // ------------------------------------------------------------------
    // Engineers
    // ------------------------------------------------------------------

    /// Reloads the roster from the backend.
    ///
    /// If a period is open, its grid is rebuilt with the new options and
    /// the stored schedule is reloaded; unsaved edits are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn refresh_engineers(&mut self) -> Result<usize, SessionError> {
        let result: Result<usize, SessionError> = self.refresh_engineers_inner().await;
        self.report("Failed to load engineers", result)
    }

    async fn refresh_engineers_inner(&mut self) -> Result<usize, SessionError> {
        let _busy: BusyGuard = self.begin("refresh_engineers");
        let engineers: Vec<Engineer> = self.api.list_engineers().await?;
        let count: usize = engineers.len();
        self.board.set_roster(Roster::new(engineers));
        debug!(count, "Roster refreshed");

        if let Some(period) = self.board.period() {
            self.board.open(
                period.year(),
                period.month(),
                &self.config.workplaces,
                &self.config.calendar,
            )?;
            self.load_inner().await?;
        }
        Ok(count)
    }

    /// Creates or edits an engineer.
    ///
    /// Editing keeps the engineer's limitations, and any quota or workplace
    /// not given in `update`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result fails validation (nothing is sent) or
    /// the backend rejects it.
    pub async fn save_engineer(&mut self, update: EngineerUpdate) -> Result<Engineer, SessionError> {
        let result: Result<Engineer, SessionError> = self.save_engineer_inner(update).await;
        if result.is_ok() {
            self.notify(NoticeLevel::Success, "Engineer saved successfully!");
        }
        self.report("Failed to save engineer", result)
    }

    async fn save_engineer_inner(&mut self, update: EngineerUpdate) -> Result<Engineer, SessionError> {
        let name: &str = update.name.trim();
        let mut engineer: Engineer = self
            .board
            .roster()
            .find(name)
            .cloned()
            .unwrap_or_else(|| Engineer::new(name, Vec::new()));

        if let Some(workplaces) = update.workplaces {
            engineer.workplaces = workplaces;
        }
        if let Some(min) = update.min_shifts {
            engineer.min_shifts = Some(min);
        }
        if let Some(max) = update.max_shifts {
            engineer.max_shifts = Some(max);
        }
        validate_engineer(&engineer)?;

        self.api.upsert_engineer(&engineer).await?;
        self.refresh_engineers_inner().await?;
        Ok(engineer)
    }

    /// Deletes an engineer by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request.
    pub async fn delete_engineer(&mut self, name: &str) -> Result<(), SessionError> {
        let result: Result<(), SessionError> = async {
            self.api.delete_engineer(name).await?;
            self.refresh_engineers_inner().await?;
            Ok::<(), SessionError>(())
        }
        .await;
        if result.is_ok() {
            self.notify(
                NoticeLevel::Success,
                format!("Engineer \"{name}\" deleted successfully"),
            );
        }
        self.report("Failed to delete engineer", result)
    }

    /// Marks an engineer as unavailable (or available again) for one shift
    /// on one day of the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is outside 1..=31, the engineer is
    /// unknown, or the backend rejects the update.
    pub async fn set_limitation(
        &mut self,
        name: &str,
        day: u8,
        shift: Shift,
        limited: bool,
    ) -> Result<Engineer, SessionError> {
        let result: Result<Engineer, SessionError> = self
            .edit_limitations(name, day, |engineer| {
                if limited {
                    engineer.limitations.add(day, shift);
                } else {
                    engineer.limitations.remove(day, shift);
                }
            })
            .await;
        self.report("Failed to update limitations", result)
    }

    /// Removes every limitation an engineer has on one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is outside 1..=31, the engineer is
    /// unknown, or the backend rejects the update.
    pub async fn clear_limitation_day(
        &mut self,
        name: &str,
        day: u8,
    ) -> Result<Engineer, SessionError> {
        let result: Result<Engineer, SessionError> = self
            .edit_limitations(name, day, |engineer| engineer.limitations.clear_day(day))
            .await;
        self.report("Failed to update limitations", result)
    }

    async fn edit_limitations<F>(
        &mut self,
        name: &str,
        day: u8,
        edit: F,
    ) -> Result<Engineer, SessionError>
    where
        F: FnOnce(&mut Engineer) + Send,
    {
        if !(1..=31).contains(&day) {
            return Err(SessionError::InvalidLimitationDay(day));
        }
        let mut engineer: Engineer = self
            .board
            .roster()
            .find(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownEngineer(name.to_string()))?;
        edit(&mut engineer);

        self.api.upsert_engineer(&engineer).await?;
        self.refresh_engineers_inner().await?;
        Ok(engineer)
    }

    // ------------------------------------------------------------------
    // Periods and persistence
    // ------------------------------------------------------------------

    /// Builds the grid for a period and loads its stored schedule.
    ///
    /// An invalid period is rejected before any request, and the previous
    /// grid stays open.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is invalid or the schedule cannot be
    /// loaded.
    pub async fn open_period(&mut self, year: i32, month: u8) -> Result<LoadOutcome, SessionError> {
        let opened: Result<(), SessionError> = self
            .board
            .open(year, month, &self.config.workplaces, &self.config.calendar)
            .map(|_| ())
            .map_err(SessionError::from);
        if let Err(err) = opened {
            self.notify(
                NoticeLevel::Danger,
                format!("Invalid Jalali date selected. Please check year and month. ({err})"),
            );
            return Err(err);
        }
        info!(year, month, "Opened period");
        self.load().await
    }

    /// Opens the period containing today in the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone is unknown or loading fails.
    pub async fn open_current(&mut self) -> Result<LoadOutcome, SessionError> {
        let current: Result<Period, SessionError> =
            Period::current(&self.config.timezone).map_err(SessionError::from);
        let period: Period = self.report("Failed to determine the current period", current)?;
        self.open_period(period.year(), period.month()).await
    }

    /// Replaces the grid contents with the stored schedule of the open
    /// period. On failure the grid is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open or the backend fails.
    pub async fn load(&mut self) -> Result<LoadOutcome, SessionError> {
        let result: Result<LoadOutcome, SessionError> = self.load_inner().await;
        self.report("Failed to load schedule data", result)
    }

    async fn load_inner(&mut self) -> Result<LoadOutcome, SessionError> {
        let _busy: BusyGuard = self.begin("load");
        let period: Period = self.board.require_grid()?.period();
        let schedule: Schedule = self.api.load_schedule(period).await?;
        let outcome: LoadOutcome = self.board.apply_schedule(&schedule)?;
        self.rehighlight();
        info!(
            %period,
            applied = outcome.applied,
            dropped = outcome.dropped,
            "Loaded schedule"
        );
        Ok(outcome)
    }

    /// Saves the grid as the full schedule of the open period, then reloads
    /// it.
    ///
    /// # Returns
    ///
    /// The number of saved assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open or the backend fails.
    pub async fn save(&mut self) -> Result<usize, SessionError> {
        let result: Result<usize, SessionError> = self.save_inner().await;
        if result.is_ok() {
            self.notify(NoticeLevel::Success, "Schedule saved successfully!");
        }
        self.report("Failed to save schedule", result)
    }

    async fn save_inner(&mut self) -> Result<usize, SessionError> {
        let _busy: BusyGuard = self.begin("save");
        let period: Period = self.board.require_grid()?.period();
        let schedule: Schedule = self.board.collect_schedule()?;
        self.api.save_schedule(period, &schedule).await?;
        self.load_inner().await?;
        Ok(schedule.assignment_count())
    }

    /// Empties every slot and saves the empty schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open or the backend fails. The grid
    /// is already cleared in that case.
    pub async fn clear_all(&mut self) -> Result<(), SessionError> {
        let result: Result<usize, SessionError> = async {
            self.board.clear()?;
            self.rehighlight();
            self.save_inner().await
        }
        .await;
        if result.is_ok() {
            self.notify(
                NoticeLevel::Success,
                "All shifts have been cleared successfully.",
            );
        }
        self.report("Failed to clear shifts", result).map(|_| ())
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Sets or clears one slot by hand.
    ///
    /// # Arguments
    ///
    /// * `workplace` - The slot's workplace
    /// * `day` - The day of the month
    /// * `shift` - The shift
    /// * `engineer` - The engineer, or `None` to clear
    /// * `force` - Allow an engineer who is limited on the slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist or the engineer cannot
    /// be placed there.
    pub fn set_slot(
        &mut self,
        workplace: &Workplace,
        day: u8,
        shift: Shift,
        engineer: Option<&str>,
        force: bool,
    ) -> Result<Option<String>, SessionError> {
        let result: Result<Option<String>, SessionError> = self
            .board
            .set_slot(workplace, day, shift, engineer, !force)
            .map_err(SessionError::from);
        if result.is_ok() {
            self.rehighlight();
        }
        self.report("Failed to update slot", result)
    }

    /// Fills every empty slot, yielding to the runtime between batches of
    /// days.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open or there are no engineers.
    pub async fn auto_assign(&mut self) -> Result<AssignmentSummary, SessionError> {
        let result: Result<AssignmentSummary, SessionError> = async {
            let _busy: BusyGuard = self.begin("auto_assign");
            let summary: AssignmentSummary = auto_assign_in_batches(
                &mut self.board,
                self.config.batch_days,
                tokio::task::yield_now,
            )
            .await?;
            self.rehighlight();
            Ok::<AssignmentSummary, SessionError>(summary)
        }
        .await;

        if let Ok(summary) = &result {
            let level: NoticeLevel = if summary.assigned > 0 {
                NoticeLevel::Success
            } else {
                NoticeLevel::Warning
            };
            self.notify(level, summary.message());
            if let Some(hint) = summary.save_hint() {
                self.notify(NoticeLevel::Info, hint);
            }
        }
        self.report("Auto-assign failed", result)
    }

    /// Reads a pattern from a local file.
    ///
    /// CSV files are parsed locally; `.xlsx` and `.xls` files are uploaded
    /// to the backend for parsing. Other extensions are rejected before the
    /// file is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file type is unsupported, the file cannot be
    /// read, or it cannot be parsed.
    pub async fn import_pattern(&mut self, path: &Path) -> Result<Pattern, SessionError> {
        let result: Result<Pattern, SessionError> = self.import_pattern_inner(path).await;
        if let Ok(pattern) = &result {
            if pattern.is_empty() {
                self.notify(NoticeLevel::Warning, "No pattern data available to apply.");
            } else {
                self.notify(
                    NoticeLevel::Info,
                    format!(
                        "Loaded pattern with {} assignments over {} days.",
                        pattern.len(),
                        pattern.day_count()
                    ),
                );
            }
        }
        self.report("Failed to process pattern file", result)
    }

    async fn import_pattern_inner(&self, path: &Path) -> Result<Pattern, SessionError> {
        let file_name: &str = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let is_csv: bool = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            check_pattern_upload_name(file_name)?;
        }

        let _busy: BusyGuard = self.begin("import_pattern");
        let contents: Vec<u8> =
            tokio::fs::read(path)
                .await
                .map_err(|source| SessionError::Io {
                    action: "Failed to read",
                    path: path.to_path_buf(),
                    source,
                })?;

        let pattern: Pattern = if is_csv {
            parse_csv_pattern(&contents)?
        } else {
            self.api.upload_pattern(file_name, contents).await?
        };
        debug!(file = file_name, days = pattern.day_count(), "Pattern imported");
        Ok(pattern)
    }

    /// Applies a pattern to one workplace of the open grid.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open or the workplace is not part of
    /// the grid.
    pub fn apply_pattern(
        &mut self,
        pattern: &Pattern,
        workplace: &Workplace,
        options: PatternOptions,
    ) -> Result<PatternReport, SessionError> {
        if pattern.is_empty() {
            self.notify(NoticeLevel::Warning, "No pattern data available to apply.");
            return Ok(PatternReport::default());
        }
        let result: Result<PatternReport, SessionError> =
            shiftboard::apply_pattern(&mut self.board, pattern, workplace, options)
                .map_err(SessionError::from);
        if let Ok(report) = &result {
            self.rehighlight();
            self.notify(NoticeLevel::Success, report.message());
        }
        self.report("Failed to apply pattern", result)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Generates the spreadsheets of the open period on the backend and
    /// downloads them into `dir`.
    ///
    /// # Returns
    ///
    /// The paths written.
    ///
    /// # Errors
    ///
    /// Returns an error if no period is open, nothing has been saved for
    /// it, a download fails, or a file cannot be written.
    pub async fn export_excel(&mut self, dir: &Path) -> Result<Vec<PathBuf>, SessionError> {
        let result: Result<Vec<PathBuf>, SessionError> = self.export_excel_inner(dir).await;
        if let Ok(paths) = &result {
            self.notify(
                NoticeLevel::Success,
                format!("Downloaded {} spreadsheet(s) to {}", paths.len(), dir.display()),
            );
        }
        self.report("Failed to generate Excel files", result)
    }

    async fn export_excel_inner(&self, dir: &Path) -> Result<Vec<PathBuf>, SessionError> {
        let period: Period = self.board.require_grid()?.period();
        let _busy: BusyGuard = self.begin("export_excel");

        let files: Vec<String> = self.api.generate_excel(period).await?;
        let mut names: Vec<PathBuf> = Vec::with_capacity(files.len());
        for file in &files {
            let name: &std::ffi::OsStr =
                Path::new(file)
                    .file_name()
                    .ok_or_else(|| ApiError::MalformedResponse {
                        endpoint: String::from("generate_excel"),
                        reason: format!("invalid file name '{file}'"),
                    })?;
            names.push(dir.join(name));
        }

        let downloads: Vec<Vec<u8>> =
            try_join_all(files.iter().map(|file| self.api.download(file))).await?;

        let io_error = |action: &'static str, path: &Path| {
            let path: PathBuf = path.to_path_buf();
            move |source: std::io::Error| SessionError::Io {
                action,
                path,
                source,
            }
        };
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(io_error("Failed to create", dir))?;
        for (path, bytes) in names.iter().zip(downloads) {
            tokio::fs::write(path, bytes)
                .await
                .map_err(io_error("Failed to write", path.as_path()))?;
        }
        info!(%period, files = names.len(), dir = %dir.display(), "Exported spreadsheets");
        Ok(names)
    }
}
