// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{
    AssociationStatus, CampRole, DomainError, EventStatus, GlobalRole, LeadershipRole,
    LeadershipScope, LeadershipSlots, MemberApprovalMode, MembershipStatus, ScopeKind,
};

#[test]
fn test_global_role_round_trips_through_strings() {
    for role in [
        GlobalRole::GlobalAdmin,
        GlobalRole::SiteAdmin,
        GlobalRole::EventManager,
        GlobalRole::CampManager,
        GlobalRole::Member,
    ] {
        let parsed: GlobalRole = GlobalRole::from_str(role.as_str()).unwrap();
        assert_eq!(parsed, role);
    }
}

#[test]
fn test_global_role_rejects_unknown_string() {
    let result: Result<GlobalRole, DomainError> = GlobalRole::from_str("superuser");
    assert!(matches!(result, Err(DomainError::InvalidRole(_))));
}

#[test]
fn test_global_role_hierarchy_ordering() {
    assert!(GlobalRole::GlobalAdmin.is_site_admin_or_higher());
    assert!(GlobalRole::SiteAdmin.is_site_admin_or_higher());
    assert!(!GlobalRole::EventManager.is_site_admin_or_higher());
    assert!(GlobalRole::EventManager.is_event_manager_or_higher());
    assert!(!GlobalRole::CampManager.is_event_manager_or_higher());
    assert!(GlobalRole::Member.at_least(GlobalRole::Member));
    assert!(!GlobalRole::Member.at_least(GlobalRole::CampManager));
}

#[test]
fn test_membership_status_terminality() {
    assert!(!MembershipStatus::Pending.is_terminal());
    assert!(MembershipStatus::Approved.is_terminal());
    assert!(MembershipStatus::Rejected.is_terminal());
}

#[test]
fn test_event_status_valid_transitions() {
    assert!(EventStatus::Pending.can_transition_to(EventStatus::Approved));
    assert!(EventStatus::Pending.can_transition_to(EventStatus::Rejected));
    assert!(EventStatus::Approved.can_transition_to(EventStatus::Cancelled));
}

#[test]
fn test_event_status_invalid_transitions() {
    assert!(!EventStatus::Pending.can_transition_to(EventStatus::Cancelled));
    assert!(!EventStatus::Rejected.can_transition_to(EventStatus::Approved));
    assert!(!EventStatus::Cancelled.can_transition_to(EventStatus::Approved));
    assert!(!EventStatus::Approved.can_transition_to(EventStatus::Pending));
    assert!(!EventStatus::Approved.can_transition_to(EventStatus::Rejected));
}

#[test]
fn test_leadership_role_opposite_is_involutive() {
    assert_eq!(LeadershipRole::Lead.opposite(), LeadershipRole::BackupLead);
    assert_eq!(LeadershipRole::BackupLead.opposite(), LeadershipRole::Lead);
}

#[test]
fn test_leadership_scope_kind_and_id() {
    let scope: LeadershipScope = LeadershipScope::Cluster(7);
    assert_eq!(scope.kind(), ScopeKind::Cluster);
    assert_eq!(scope.id(), 7);
    assert_eq!(scope.to_string(), "cluster 7");
}

#[test]
fn test_slots_holder_and_set() {
    let mut slots: LeadershipSlots = LeadershipSlots {
        enable_lead: true,
        enable_backup_lead: true,
        lead_id: None,
        backup_lead_id: Some(9),
    };
    assert_eq!(slots.holder(LeadershipRole::Lead), None);
    assert_eq!(slots.holder(LeadershipRole::BackupLead), Some(9));
    assert!(slots.holds_any(9));
    assert!(!slots.holds_any(4));

    slots.set(LeadershipRole::Lead, Some(4));
    assert_eq!(slots.holder(LeadershipRole::Lead), Some(4));
    assert!(slots.holds_any(4));
}

#[test]
fn test_status_strings_parse() {
    assert_eq!(
        AssociationStatus::from_str("approved").unwrap(),
        AssociationStatus::Approved
    );
    assert_eq!(CampRole::from_str("manager").unwrap(), CampRole::Manager);
    assert_eq!(
        MemberApprovalMode::from_str("all_members").unwrap(),
        MemberApprovalMode::AllMembers
    );
    assert!(matches!(
        MemberApprovalMode::from_str("everyone"),
        Err(DomainError::InvalidApprovalMode(_))
    ));
}
