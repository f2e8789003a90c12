// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments.

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use shiftboard::{DEFAULT_MAX_CONSECUTIVE_DAYS, HighlightRules};
use shiftboard_api::DEFAULT_BASE_URL;
use shiftboard_app::{AppConfig, DEFAULT_TIMEZONE, parse_workplaces};
use shiftboard_domain::{Shift, Workplace};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Shiftboard - plan monthly engineer shifts on the Jalali calendar
#[derive(Debug, Parser)]
#[command(name = "shiftboard", author, version, about, long_about = None)]
pub struct Args {
    /// Root URL of the schedule API
    #[arg(long, env = "SHIFTBOARD_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub url: String,

    /// Comma-separated workplaces, in display order
    #[arg(long, env = "SHIFTBOARD_WORKPLACES", global = true)]
    pub workplaces: Option<String>,

    /// IANA time zone used to find the current month
    #[arg(long = "tz", env = "SHIFTBOARD_TZ", default_value = DEFAULT_TIMEZONE, global = true)]
    pub timezone: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Longest allowed run of consecutive working days (0 disables the check)
    #[arg(long, default_value_t = DEFAULT_MAX_CONSECUTIVE_DAYS, global = true)]
    pub max_consecutive_days: u8,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    /// Builds the session configuration from the flags.
    pub fn config(&self) -> AppConfig {
        let defaults: AppConfig = AppConfig::default();
        let workplaces: Vec<Workplace> = self
            .workplaces
            .as_deref()
            .map_or_else(|| defaults.workplaces.clone(), parse_workplaces);
        AppConfig {
            base_url: self.url.clone(),
            workplaces,
            timezone: self.timezone.clone(),
            request_timeout: self.timeout.map(Duration::from_secs),
            highlight: HighlightRules {
                max_consecutive_days: Some(self.max_consecutive_days).filter(|&days| days > 0),
                ..defaults.highlight
            },
            ..defaults
        }
    }
}

/// A Jalali month. Both flags are needed; without them the current month
/// is used.
#[derive(Debug, Clone, Copy, Default, ClapArgs)]
pub struct PeriodArgs {
    /// Jalali year, e.g. 1403
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Jalali month (1-12)
    #[arg(long, requires = "year")]
    pub month: Option<u8>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the current Jalali month and the selectable years
    Today,

    /// Show the schedule of a month
    #[command(visible_alias = "s")]
    Show(PeriodArgs),

    /// Fill empty slots automatically
    #[command(visible_alias = "auto")]
    AutoAssign {
        #[command(flatten)]
        period: PeriodArgs,

        /// Save the result
        #[arg(long)]
        save: bool,
    },

    /// Set or clear one slot, then save
    Set(SetArgs),

    /// Clear every slot of a month and save the empty schedule
    Clear(PeriodArgs),

    /// Read and apply shift patterns
    #[command(subcommand)]
    Pattern(PatternCommand),

    /// Generate the month's spreadsheets and download them
    Export {
        #[command(flatten)]
        period: PeriodArgs,

        /// Directory to write the files to
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Manage engineers
    #[command(subcommand, visible_alias = "eng")]
    Engineers(EngineerCommand),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SetArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[arg(long)]
    pub workplace: String,

    /// Day of the month
    #[arg(long)]
    pub day: u8,

    /// `shift1`..`shift3` or `1`..`3`
    #[arg(long)]
    pub shift: Shift,

    /// Engineer to assign; omit to clear the slot
    #[arg(long)]
    pub engineer: Option<String>,

    /// Assign even if the engineer is limited on this slot
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PatternCommand {
    /// Print a pattern file without applying it
    Preview {
        /// `.csv`, `.xlsx` or `.xls` file
        file: PathBuf,
    },

    /// Apply a pattern file to one workplace
    Apply {
        /// `.csv`, `.xlsx` or `.xls` file
        file: PathBuf,

        #[command(flatten)]
        period: PeriodArgs,

        #[arg(long)]
        workplace: String,

        /// Replace existing assignments
        #[arg(long = "override")]
        override_existing: bool,

        /// Assign engineers even on their limited shifts
        #[arg(long)]
        ignore_limitations: bool,

        /// Save the result
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EngineerCommand {
    /// List engineers
    #[command(visible_alias = "ls")]
    List,

    /// Create an engineer or edit one
    Save {
        name: String,

        /// Workplace the engineer can work at (repeatable)
        #[arg(long = "workplace")]
        workplaces: Vec<String>,

        /// Minimum shifts per month
        #[arg(long)]
        min: Option<u32>,

        /// Maximum shifts per month
        #[arg(long)]
        max: Option<u32>,
    },

    /// Delete an engineer
    #[command(visible_alias = "rm")]
    Delete { name: String },

    /// Mark an engineer unavailable for a shift (or available with --remove)
    Limit {
        name: String,

        #[arg(long)]
        day: u8,

        #[arg(long)]
        shift: Shift,

        #[arg(long)]
        remove: bool,
    },

    /// Remove all of an engineer's limitations on one day
    ClearDay {
        name: String,

        #[arg(long)]
        day: u8,
    },
}
