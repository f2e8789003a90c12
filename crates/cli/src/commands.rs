// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand dispatch.
//!
//! Each command drives the session and returns the text to print. Notices
//! are left on the session for the caller to show.

use crate::args::{Command, EngineerCommand, PatternCommand, PeriodArgs, SetArgs};
use crate::render;
use shiftboard::{LoadOutcome, PatternOptions};
use shiftboard_api::ScheduleApi;
use shiftboard_app::{EngineerUpdate, Session, SessionError};
use shiftboard_domain::{Pattern, Period, Workplace};
use std::path::PathBuf;

/// Years offered on either side of the current one.
const SELECTABLE_YEAR_SPAN: i32 = 5;

/// Runs one command.
///
/// # Errors
///
/// Returns the first session error the command hits.
pub async fn run<A>(session: &mut Session<A>, command: Command) -> Result<String, SessionError>
where
    A: ScheduleApi + Send + Sync,
{
    match command {
        Command::Today => {
            let current: Period = Period::current(&session.config().timezone)?;
            Ok(render::today(current, &current.selectable_years(SELECTABLE_YEAR_SPAN)))
        }
        Command::Show(period) => {
            open(session, period).await?;
            Ok(grid_output(session))
        }
        Command::AutoAssign { period, save } => {
            open(session, period).await?;
            session.auto_assign().await?;
            if save {
                session.save().await?;
            }
            Ok(grid_output(session))
        }
        Command::Set(args) => set(session, args).await,
        Command::Clear(period) => {
            open(session, period).await?;
            session.clear_all().await?;
            Ok(String::new())
        }
        Command::Pattern(command) => pattern(session, command).await,
        Command::Export { period, dir } => {
            open(session, period).await?;
            let written: Vec<PathBuf> = session.export_excel(&dir).await?;
            Ok(written
                .iter()
                .map(|path| format!("{}\n", path.display()))
                .collect())
        }
        Command::Engineers(command) => engineers(session, command).await,
    }
}

/// Loads the roster and opens the requested (or current) month.
async fn open<A>(session: &mut Session<A>, period: PeriodArgs) -> Result<LoadOutcome, SessionError>
where
    A: ScheduleApi + Send + Sync,
{
    session.refresh_engineers().await?;
    match (period.year, period.month) {
        (Some(year), Some(month)) => session.open_period(year, month).await,
        _ => session.open_current().await,
    }
}

fn grid_output<A>(session: &Session<A>) -> String
where
    A: ScheduleApi + Send + Sync,
{
    session.grid().map_or_else(String::new, |grid| {
        render::grid(grid, &session.highlights())
    })
}

async fn set<A>(session: &mut Session<A>, args: SetArgs) -> Result<String, SessionError>
where
    A: ScheduleApi + Send + Sync,
{
    open(session, args.period).await?;
    session.set_slot(
        &Workplace::new(&args.workplace),
        args.day,
        args.shift,
        args.engineer.as_deref(),
        args.force,
    )?;
    session.save().await?;
    Ok(grid_output(session))
}

async fn pattern<A>(session: &mut Session<A>, command: PatternCommand) -> Result<String, SessionError>
where
    A: ScheduleApi + Send + Sync,
{
    match command {
        PatternCommand::Preview { file } => {
            let pattern: Pattern = session.import_pattern(&file).await?;
            Ok(render::pattern(&pattern))
        }
        PatternCommand::Apply {
            file,
            period,
            workplace,
            override_existing,
            ignore_limitations,
            save,
        } => {
            open(session, period).await?;
            let pattern: Pattern = session.import_pattern(&file).await?;
            let options: PatternOptions = PatternOptions {
                override_existing,
                respect_limitations: !ignore_limitations,
            };
            session.apply_pattern(&pattern, &Workplace::new(&workplace), options)?;
            if save {
                session.save().await?;
            }
            Ok(grid_output(session))
        }
    }
}

async fn engineers<A>(
    session: &mut Session<A>,
    command: EngineerCommand,
) -> Result<String, SessionError>
where
    A: ScheduleApi + Send + Sync,
{
    match command {
        EngineerCommand::List => {
            session.refresh_engineers().await?;
            Ok(render::roster(session.roster().engineers()))
        }
        EngineerCommand::Save {
            name,
            workplaces,
            min,
            max,
        } => {
            session.refresh_engineers().await?;
            let workplaces: Option<Vec<Workplace>> = (!workplaces.is_empty())
                .then(|| workplaces.iter().map(|w| Workplace::new(w)).collect());
            session
                .save_engineer(EngineerUpdate {
                    name,
                    workplaces,
                    min_shifts: min,
                    max_shifts: max,
                })
                .await?;
            Ok(String::new())
        }
        EngineerCommand::Delete { name } => {
            session.delete_engineer(&name).await?;
            Ok(String::new())
        }
        EngineerCommand::Limit {
            name,
            day,
            shift,
            remove,
        } => {
            session.refresh_engineers().await?;
            session.set_limitation(&name, day, shift, !remove).await?;
            Ok(String::new())
        }
        EngineerCommand::ClearDay { name, day } => {
            session.refresh_engineers().await?;
            session.clear_limitation_day(&name, day).await?;
            Ok(String::new())
        }
    }
}
