// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notice::NoticeLevel;
use shiftboard::CoreError;
use shiftboard_api::ApiError;
use shiftboard_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A local file could not be read or written.
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration cannot be used.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// A limitation day outside 1..=31.
    #[error("Invalid limitation day {0}. Must be between 1 and 31")]
    InvalidLimitationDay(u8),
}

impl SessionError {
    /// Returns the notice level used when reporting this error.
    ///
    /// Input problems are warnings; failures of the backend or of the grid
    /// are dangers.
    #[must_use]
    pub const fn notice_level(&self) -> NoticeLevel {
        match self {
            Self::Domain(_) | Self::InvalidLimitationDay(_) => NoticeLevel::Warning,
            Self::Core(CoreError::NoEngineers | CoreError::NoGrid) => NoticeLevel::Warning,
            Self::Api(e) if e.is_validation() => NoticeLevel::Warning,
            Self::Core(_) | Self::Api(_) | Self::Io { .. } | Self::Config(_) => NoticeLevel::Danger,
        }
    }
}
