// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campstead_domain::{
    CampRole, DomainError, GlobalRole, LeadershipRole, LeadershipScope, MembershipStatus,
};
use campstead_persistence::Persistence;

use crate::tests::{
    camp_spec, create_test_persistence, join_and_approve, seed_user, subgroup_spec,
};
use crate::{CoreError, Decision, approval, hierarchy, leadership, roster};

/// Camp managed by user 1, with users 2 and 3 known to the directory.
fn setup() -> (Persistence, i64) {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);
    seed_user(&mut p, 2, "Bob", GlobalRole::Member);
    seed_user(&mut p, 3, "Cara", GlobalRole::Member);
    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    (p, camp.id)
}

#[test]
fn test_membership_request_starts_pending() {
    let (mut p, camp_id) = setup();

    let membership = roster::request_membership(&mut p, 2, camp_id).unwrap();
    assert_eq!(membership.status, MembershipStatus::Pending);
    assert_eq!(membership.role, CampRole::Member);
    assert!(membership.approved_at.is_none());
}

#[test]
fn test_pending_and_approved_requests_cannot_be_reissued() {
    let (mut p, camp_id) = setup();

    roster::request_membership(&mut p, 2, camp_id).unwrap();
    let err = roster::request_membership(&mut p, 2, camp_id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::DuplicateRequest {
            subject: "membership",
            ..
        })
    ));

    join_and_approve(&mut p, camp_id, 3, 1);
    let err = roster::request_membership(&mut p, 3, camp_id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::DuplicateRequest { .. })
    ));
}

#[test]
fn test_rejected_request_can_be_reissued() {
    let (mut p, camp_id) = setup();

    let first = roster::request_membership(&mut p, 2, camp_id).unwrap();
    approval::decide_membership(&mut p, 1, first.id, Decision::Reject).unwrap();

    let second = roster::request_membership(&mut p, 2, camp_id).unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(second.status, MembershipStatus::Pending);
}

#[test]
fn test_manager_promotes_and_demotes_members() {
    let (mut p, camp_id) = setup();
    join_and_approve(&mut p, camp_id, 2, 1);

    let promoted =
        roster::set_membership_role(&mut p, 1, camp_id, 2, CampRole::Manager).unwrap();
    assert_eq!(promoted.role, CampRole::Manager);

    let demoted = roster::set_membership_role(&mut p, 2, camp_id, 1, CampRole::Member).unwrap();
    assert_eq!(demoted.role, CampRole::Member);
}

#[test]
fn test_demoting_the_last_manager_is_permitted() {
    let (mut p, camp_id) = setup();

    // The creator demotes themselves; site admins can still reach the camp.
    let demoted = roster::set_membership_role(&mut p, 1, camp_id, 1, CampRole::Member).unwrap();
    assert_eq!(demoted.role, CampRole::Member);

    seed_user(&mut p, 9, "Sam", GlobalRole::SiteAdmin);
    let restored = roster::set_membership_role(&mut p, 9, camp_id, 1, CampRole::Manager).unwrap();
    assert_eq!(restored.role, CampRole::Manager);
}

#[test]
fn test_role_changes_require_an_approved_target() {
    let (mut p, camp_id) = setup();
    roster::request_membership(&mut p, 2, camp_id).unwrap();

    let err = roster::set_membership_role(&mut p, 1, camp_id, 2, CampRole::Manager).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotEligible { user_id: 2, .. })
    ));
}

#[test]
fn test_members_cannot_change_roles() {
    let (mut p, camp_id) = setup();
    join_and_approve(&mut p, camp_id, 2, 1);

    let err = roster::set_membership_role(&mut p, 2, camp_id, 2, CampRole::Manager).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::Forbidden { user_id: 2, .. })
    ));
}

#[test]
fn test_team_roster_requires_approved_camp_membership() {
    let (mut p, camp_id) = setup();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp_id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();

    let err = roster::add_team_member(&mut p, 1, team.id, 2).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotEligible { user_id: 2, .. })
    ));

    join_and_approve(&mut p, camp_id, 2, 1);
    let added = roster::add_team_member(&mut p, 1, team.id, 2).unwrap();
    assert_eq!(added.team_id, team.id);
    assert_eq!(added.user_id, 2);
}

#[test]
fn test_members_join_teams_themselves_but_not_others() {
    let (mut p, camp_id) = setup();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp_id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();
    join_and_approve(&mut p, camp_id, 2, 1);
    join_and_approve(&mut p, camp_id, 3, 1);

    roster::add_team_member(&mut p, 2, team.id, 2).unwrap();

    let err = roster::add_team_member(&mut p, 2, team.id, 3).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::Forbidden { user_id: 2, .. })
    ));
}

#[test]
fn test_double_rostering_is_rejected() {
    let (mut p, camp_id) = setup();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp_id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();
    join_and_approve(&mut p, camp_id, 2, 1);

    roster::add_team_member(&mut p, 2, team.id, 2).unwrap();
    let err = roster::add_team_member(&mut p, 2, team.id, 2).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::DuplicateRequest {
            subject: "team roster",
            ..
        })
    ));
}

#[test]
fn test_slot_holders_cannot_leave_the_roster() {
    let (mut p, camp_id) = setup();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp_id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();
    join_and_approve(&mut p, camp_id, 2, 1);

    leadership::assign(
        &mut p,
        2,
        LeadershipScope::Team(team.id),
        LeadershipRole::Lead,
        Some(2),
    )
    .unwrap();

    let err = roster::remove_team_member(&mut p, 2, team.id, 2).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::LeadershipHeld { user_id: 2, .. })
    ));

    // After clearing the slot, leaving works.
    leadership::assign(
        &mut p,
        2,
        LeadershipScope::Team(team.id),
        LeadershipRole::Lead,
        None,
    )
    .unwrap();
    roster::remove_team_member(&mut p, 2, team.id, 2).unwrap();
}

#[test]
fn test_removing_an_unrostered_user_is_not_found() {
    let (mut p, camp_id) = setup();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp_id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();
    join_and_approve(&mut p, camp_id, 2, 1);

    let err = roster::remove_team_member(&mut p, 1, team.id, 2).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotFound {
            resource: "team member",
            ..
        })
    ));
}
