// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{
    DomainError, LeadershipRole, LeadershipSlots, validate_capacity, validate_event_dates,
    validate_name, validate_slot_flag_consistency, violates_mutual_exclusion,
};

#[test]
fn test_validate_name_accepts_ordinary_names() {
    assert!(validate_name("Dust Bunnies").is_ok());
}

#[test]
fn test_validate_name_rejects_empty_and_whitespace() {
    assert!(matches!(
        validate_name(""),
        Err(DomainError::InvalidName(_))
    ));
    assert!(matches!(
        validate_name("   "),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_name_rejects_overlong_names() {
    let long: String = "x".repeat(300);
    assert!(matches!(
        validate_name(&long),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_capacity_rejects_non_positive() {
    assert!(validate_capacity("max_sites", 10).is_ok());
    assert!(matches!(
        validate_capacity("max_sites", 0),
        Err(DomainError::InvalidCapacity { .. })
    ));
    assert!(matches!(
        validate_capacity("max_people", -3),
        Err(DomainError::InvalidCapacity { .. })
    ));
}

#[test]
fn test_validate_event_dates_rejects_inverted_range() {
    assert!(validate_event_dates(date!(2026 - 06 - 01), date!(2026 - 06 - 07)).is_ok());
    assert!(validate_event_dates(date!(2026 - 06 - 01), date!(2026 - 06 - 01)).is_ok());
    assert!(matches!(
        validate_event_dates(date!(2026 - 06 - 07), date!(2026 - 06 - 01)),
        Err(DomainError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_slot_flag_consistency() {
    let consistent: LeadershipSlots = LeadershipSlots {
        enable_lead: true,
        enable_backup_lead: false,
        lead_id: Some(1),
        backup_lead_id: None,
    };
    assert!(validate_slot_flag_consistency(&consistent));

    let inconsistent: LeadershipSlots = LeadershipSlots {
        enable_lead: false,
        enable_backup_lead: false,
        lead_id: Some(1),
        backup_lead_id: None,
    };
    assert!(!validate_slot_flag_consistency(&inconsistent));
}

#[test]
fn test_mutual_exclusion_detects_opposite_slot() {
    let slots: LeadershipSlots = LeadershipSlots {
        enable_lead: true,
        enable_backup_lead: true,
        lead_id: Some(4),
        backup_lead_id: None,
    };
    // User 4 holds lead; claiming backup lead would double-assign.
    assert!(violates_mutual_exclusion(
        &slots,
        LeadershipRole::BackupLead,
        4
    ));
    assert!(!violates_mutual_exclusion(
        &slots,
        LeadershipRole::BackupLead,
        5
    ));
    assert!(!violates_mutual_exclusion(&slots, LeadershipRole::Lead, 4));
}
