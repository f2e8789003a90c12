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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod busy;
mod config;
mod error;
mod notice;
mod session;

#[cfg(test)]
mod tests;

pub use busy::{BusyGuard, BusyIndicator};
pub use config::{
    AppConfig, DEFAULT_BATCH_DAYS, DEFAULT_TIMEZONE, DEFAULT_WORKPLACES, parse_workplaces,
};
pub use error::SessionError;
pub use notice::{Notice, NoticeLevel};
pub use session::{EngineerUpdate, Session};
