// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftboard_domain::DomainError;
use thiserror::Error;

/// Errors raised while talking to the schedule backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be used.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The request could not be sent or the response could not be read.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        /// The endpoint that was called.
        endpoint: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        /// The endpoint that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The error message reported by the backend, if any.
        message: String,
    },
    /// The backend answered 2xx but reported a failure status.
    #[error("{endpoint} reported failure: {message}")]
    Rejected {
        /// The endpoint that was called.
        endpoint: String,
        /// The reported failure.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// The endpoint that was called.
        endpoint: String,
        /// The decoding failure.
        reason: String,
    },
    /// No schedule has been saved for the requested period.
    #[error("No schedule data found for the selected period. Please save your schedule first.")]
    NoScheduleData,
    /// A generated file is not available for download.
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// A pattern upload was attempted with an unsupported file type.
    #[error("Invalid file format '{0}'. Only Excel files (.xlsx, .xls) are supported.")]
    UnsupportedPatternFile(String),
    /// A local CSV pattern could not be read.
    #[error("Invalid CSV pattern: {reason}")]
    InvalidCsvPattern {
        /// The parse failure.
        reason: String,
    },
    /// A value failed domain validation before any request was made.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Returns whether the error came from the network or the backend's
    /// transport-level response, as opposed to a semantic or validation
    /// failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::MalformedResponse { .. }
        )
    }

    /// Returns whether the error was raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidBaseUrl { .. }
                | Self::UnsupportedPatternFile(_)
                | Self::InvalidCsvPattern { .. }
                | Self::Domain(_)
        )
    }
}
