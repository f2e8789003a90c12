// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the Shiftboard workspace.
//!
//! `cargo test` runs everything that needs no infrastructure: the HTTP
//! client is exercised against an in-process fake backend. Tests that talk
//! to a real schedule service are `#[ignore]`d and only run through
//! `cargo xtask test-live`, which passes the service URL in
//! `SHIFTBOARD_TEST_BASE_URL`.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Environment variable carrying the live backend URL to the ignored tests.
const LIVE_URL_ENV: &str = "SHIFTBOARD_TEST_BASE_URL";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, deny, build, test)
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check that README.md matches the crate docs
    #[command(visible_alias = "cr")]
    CheckReadme,

    /// Generate an lcov coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependency licenses and advisories
    #[command(visible_alias = "cd")]
    Deny,

    /// Check for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply clippy fixes
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Format the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run unit and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run unit tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Run the ignored tests against a running schedule service
    #[command(visible_alias = "tv")]
    TestLive {
        /// Root URL of the service, e.g. `http://127.0.0.1:8000/api/`
        #[arg(long, env = LIVE_URL_ENV)]
        url: String,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::CheckReadme => {
                run_cargo(&["rdme", "--workspace-project", "shiftboard", "--check"])
            }
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Deny => run_cargo(&["deny", "check"]),
            Self::Machete => {
                cmd!("cargo-machete").run_with_trace()?;
                Ok(())
            }
            Self::Lint => lint(),
            Self::LintClippy => clippy(false),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::LintMarkdown => {
                cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;
                Ok(())
            }
            Self::LintTypos => {
                cmd!("typos").run_with_trace()?;
                Ok(())
            }
            Self::FixClippy => clippy(true),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::FixTypos => {
                cmd!("typos", "-w").run_with_trace()?;
                Ok(())
            }
            Self::Test => test(),
            Self::TestDocs => run_cargo(&["test", "--doc", "--all-features"]),
            Self::TestLibs => run_cargo(&["test", "--all-targets", "--all-features"]),
            Self::TestLive { url } => test_live(&url),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    Command::Deny.run()?;
    Command::Machete.run()?;
    Command::Build.run()?;
    test()
}

/// Markdown lint failures are reported but do not fail the run.
fn lint() -> Result<()> {
    clippy(false)?;
    lint_docs()?;
    Command::LintFormatting.run()?;
    Command::LintTypos.run()?;
    if let Err(err) = Command::LintMarkdown.run() {
        tracing::warn!("markdownlint reported issues: {err}");
    }
    Ok(())
}

fn clippy(fix: bool) -> Result<()> {
    let mut args: Vec<&str> = vec!["clippy", "--all-targets", "--all-features"];
    if fix {
        args.extend(["--fix", "--allow-dirty", "--allow-staged"]);
    }
    args.extend(["--", "-D", "warnings"]);
    run_cargo(&args)
}

/// Builds each default package's docs the way docs.rs would.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

/// Doc tests run last because they are slow.
fn test() -> Result<()> {
    Command::TestLibs.run()?;
    Command::TestDocs.run()
}

/// Runs the ignored live tests of the HTTP client against `url`.
///
/// The tests write to a period far in the past and remove the engineer they
/// create, but they do modify the target service. Point this at a test
/// instance.
fn test_live(url: &str) -> Result<()> {
    tracing::info!("Running live tests against {url}");
    cmd!(
        "cargo",
        "test",
        "--package",
        "shiftboard-api",
        "live_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env(LIVE_URL_ENV, url)
    .run_with_trace()
    .wrap_err("live tests failed")?;
    tracing::info!("Live tests passed");
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // Set by cargo when running a subcommand; it would pin the stable toolchain.
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Logs each `duct` command before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // Repeat the command; it may have scrolled away.
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
