// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local CSV pattern files.
//!
//! The layout matches the spreadsheets the backend accepts: row `n` is day
//! `n`, the first three columns are shifts 1 to 3, there is no header row.

use csv::StringRecord;
use shiftboard_domain::{Pattern, Shift};

use crate::error::ApiError;

/// Rows beyond this are ignored.
pub const MAX_PATTERN_DAYS: u8 = 31;

/// Parses a CSV pattern.
///
/// Line `n` of the file is day `n`, so blank lines count as empty days.
/// Cells are trimmed and empty cells are omitted. Columns past the third
/// and lines past the 31st are ignored.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvPattern` if any row cannot be read (for
/// example invalid UTF-8); no partial pattern is returned.
pub fn parse_csv_pattern(csv_content: &[u8]) -> Result<Pattern, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_content);

    let mut pattern: Pattern = Pattern::new();
    for result in reader.records() {
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvPattern {
            reason: e.to_string(),
        })?;
        let line: u64 = record.position().map_or(0, csv::Position::line);
        let day: u8 = match u8::try_from(line) {
            Ok(day) if (1..=MAX_PATTERN_DAYS).contains(&day) => day,
            _ => break,
        };

        for (shift, cell) in Shift::ALL.into_iter().zip(record.iter()) {
            let name: &str = cell.trim();
            if !name.is_empty() {
                pattern.insert(day, shift, name);
            }
        }
    }

    Ok(pattern)
}
