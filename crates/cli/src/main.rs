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
#![allow(clippy::multiple_crate_versions)]

mod args;
mod commands;
mod render;

#[cfg(test)]
mod tests;

use args::Args;
use clap::Parser;
use color_eyre::Result;
use shiftboard_api::HttpScheduleApi;
use shiftboard_app::Session;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    debug!(url = %args.url, "Starting shiftboard");
    let mut session: Session<HttpScheduleApi> = Session::connect(args.config())?;
    let result = commands::run(&mut session, args.command).await;

    let notices: String = render::notices(&session.take_notices());
    if !notices.is_empty() {
        print!("{notices}");
    }
    match result {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

/// Sets up logging to stderr. `RUST_LOG` overrides the verbosity flags.
fn init_tracing(level: LevelFilter) {
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
