// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Engineer, Workplace};

/// Validates an engineer before it is submitted for upsert.
///
/// This function checks field constraints only. Uniqueness is not checked
/// because engineers are upserted by name.
///
/// # Arguments
///
/// * `engineer` - The engineer to validate
///
/// # Returns
///
/// * `Ok(())` if the engineer's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - No workplace is selected
/// - A workplace name is empty
/// - `minShifts` is greater than `maxShifts`
pub fn validate_engineer(engineer: &Engineer) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if engineer.name.trim().is_empty() {
        return Err(DomainError::InvalidEngineerName(String::from(
            "Please enter engineer name",
        )));
    }

    // Rule: at least one workplace
    if engineer.workplaces.is_empty() {
        return Err(DomainError::NoWorkplaceSelected {
            engineer: engineer.name.clone(),
        });
    }

    for workplace in &engineer.workplaces {
        validate_workplace(workplace)?;
    }

    let min: u32 = engineer.effective_min_shifts();
    let max: u32 = engineer.effective_max_shifts();
    if min > max {
        return Err(DomainError::InvalidShiftQuota {
            engineer: engineer.name.clone(),
            min,
            max,
        });
    }

    Ok(())
}

/// Validates a workplace name.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_workplace(workplace: &Workplace) -> Result<(), DomainError> {
    if workplace.name().is_empty() {
        return Err(DomainError::InvalidWorkplace(String::from(
            "Workplace name cannot be empty",
        )));
    }
    Ok(())
}
