// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by the hierarchy and event operations.

use time::Date;

use crate::error::DomainError;
use crate::types::{LeadershipRole, LeadershipSlots};

/// Maximum length accepted for entity names.
const MAX_NAME_LEN: usize = 255;

/// Validates an entity name: non-empty after trimming, bounded length.
///
/// # Errors
///
/// Returns [`DomainError::InvalidName`] if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from("must not be empty")));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a capacity field (camp sites, people).
///
/// # Errors
///
/// Returns [`DomainError::InvalidCapacity`] if the value is not positive.
pub const fn validate_capacity(field: &'static str, value: i32) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidCapacity { field, value });
    }
    Ok(())
}

/// Validates that an event's date range is ordered.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDateRange`] if the end precedes the start.
pub fn validate_event_dates(start: Date, end: Date) -> Result<(), DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Checks the enable-flag/slot consistency invariant: a slot must be null
/// whenever its enable flag is false.
///
/// Update paths uphold this by clearing the value in the same write that
/// disables the flag; this check guards loaded state and tests.
#[must_use]
pub const fn validate_slot_flag_consistency(slots: &LeadershipSlots) -> bool {
    let lead_ok: bool = slots.enable_lead || slots.lead_id.is_none();
    let backup_ok: bool = slots.enable_backup_lead || slots.backup_lead_id.is_none();
    lead_ok && backup_ok
}

/// Checks the mutual-exclusion invariant for a proposed assignment: the
/// candidate must not already hold the opposite slot in the same scope.
#[must_use]
pub const fn violates_mutual_exclusion(
    slots: &LeadershipSlots,
    role: LeadershipRole,
    candidate: i64,
) -> bool {
    match slots.holder(role.opposite()) {
        Some(holder) => holder == candidate,
        None => false,
    }
}
