// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campstead_domain::{
    CampRole, DomainError, GlobalRole, LeadershipRole, LeadershipScope, MembershipStatus,
};

use crate::tests::{camp_spec, create_test_persistence, seed_user, subgroup_spec};
use crate::{CoreError, hierarchy, leadership, views};

#[test]
fn test_create_camp_admits_creator_as_manager() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    assert_eq!(camp.creator_id, 1);

    let detail = views::camp_detail(&mut p, camp.id).unwrap();
    assert_eq!(detail.members.len(), 1);
    let creator = &detail.members[0];
    assert_eq!(creator.membership.user_id, 1);
    assert_eq!(creator.membership.status, MembershipStatus::Approved);
    assert_eq!(creator.membership.role, CampRole::Manager);
    assert!(creator.membership.approved_at.is_some());
}

#[test]
fn test_create_camp_rejects_blank_name() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let mut spec = camp_spec("  ");
    let err = hierarchy::create_camp(&mut p, 1, &spec).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::InvalidName(_))
    ));

    spec = camp_spec("Dust Bunnies");
    spec.max_sites = 0;
    let err = hierarchy::create_camp(&mut p, 1, &spec).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::InvalidCapacity {
            field: "max_sites",
            value: 0
        })
    ));
}

#[test]
fn test_non_manager_cannot_update_camp() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);
    seed_user(&mut p, 2, "Bob", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let err = hierarchy::update_camp(&mut p, 2, camp.id, &camp_spec("Renamed")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::Forbidden { user_id: 2, .. })
    ));
}

#[test]
fn test_site_admin_can_manage_any_camp() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);
    seed_user(&mut p, 2, "Sam", GlobalRole::SiteAdmin);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let updated = hierarchy::update_camp(&mut p, 2, camp.id, &camp_spec("Renamed")).unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[test]
fn test_disabling_lead_flag_clears_the_slot() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    leadership::assign(
        &mut p,
        1,
        LeadershipScope::Camp(camp.id),
        LeadershipRole::Lead,
        Some(1),
    )
    .unwrap();

    let mut spec = camp_spec("Dust Bunnies");
    spec.enable_lead = false;
    let updated = hierarchy::update_camp(&mut p, 1, camp.id, &spec).unwrap();
    assert!(!updated.leadership.enable_lead);
    assert_eq!(updated.leadership.lead_id, None);

    // Re-enabling brings the flag back but not the holder.
    spec.enable_lead = true;
    let updated = hierarchy::update_camp(&mut p, 1, camp.id, &spec).unwrap();
    assert!(updated.leadership.enable_lead);
    assert_eq!(updated.leadership.lead_id, None);
}

#[test]
fn test_cluster_names_unique_within_camp_only() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp_a = hierarchy::create_camp(&mut p, 1, &camp_spec("Camp A")).unwrap();
    let camp_b = hierarchy::create_camp(&mut p, 1, &camp_spec("Camp B")).unwrap();

    hierarchy::create_cluster(&mut p, 1, camp_a.id, &subgroup_spec("Kitchen")).unwrap();
    let err =
        hierarchy::create_cluster(&mut p, 1, camp_a.id, &subgroup_spec("Kitchen")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::InvalidName(_))
    ));

    // The same name is fine in a different camp.
    hierarchy::create_cluster(&mut p, 1, camp_b.id, &subgroup_spec("Kitchen")).unwrap();
}

#[test]
fn test_team_names_unique_within_cluster_only() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let kitchen = hierarchy::create_cluster(&mut p, 1, camp.id, &subgroup_spec("Kitchen")).unwrap();
    let build = hierarchy::create_cluster(&mut p, 1, camp.id, &subgroup_spec("Build")).unwrap();

    hierarchy::create_team(&mut p, 1, kitchen.id, &subgroup_spec("Morning")).unwrap();
    let err =
        hierarchy::create_team(&mut p, 1, kitchen.id, &subgroup_spec("Morning")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::InvalidName(_))
    ));

    hierarchy::create_team(&mut p, 1, build.id, &subgroup_spec("Morning")).unwrap();
}

#[test]
fn test_rename_to_own_name_is_allowed() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp.id, &subgroup_spec("Kitchen")).unwrap();

    // Updating without renaming must not trip the uniqueness check.
    let updated = hierarchy::update_cluster(&mut p, 1, cluster.id, &subgroup_spec("Kitchen"));
    assert!(updated.is_ok());
}

#[test]
fn test_delete_cluster_cascades_to_teams_and_rosters() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp.id, &subgroup_spec("Kitchen")).unwrap();
    let team = hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();
    crate::roster::add_team_member(&mut p, 1, team.id, 1).unwrap();

    hierarchy::delete_cluster(&mut p, 1, cluster.id).unwrap();

    let err = views::team_detail(&mut p, team.id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotFound {
            resource: "team",
            ..
        })
    ));

    // The camp and its roster are untouched.
    let detail = views::camp_detail(&mut p, camp.id).unwrap();
    assert!(detail.clusters.is_empty());
    assert_eq!(detail.members.len(), 1);
}

#[test]
fn test_delete_camp_removes_everything() {
    let mut p = create_test_persistence();
    seed_user(&mut p, 1, "Alice", GlobalRole::Member);

    let camp = hierarchy::create_camp(&mut p, 1, &camp_spec("Dust Bunnies")).unwrap();
    let cluster = hierarchy::create_cluster(&mut p, 1, camp.id, &subgroup_spec("Kitchen")).unwrap();
    hierarchy::create_team(&mut p, 1, cluster.id, &subgroup_spec("Morning")).unwrap();

    hierarchy::delete_camp(&mut p, 1, camp.id).unwrap();

    let err = views::camp_detail(&mut p, camp.id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotFound {
            resource: "camp",
            ..
        })
    ));
    assert!(views::my_memberships(&mut p, 1).unwrap().is_empty());
}

#[test]
fn test_unknown_actor_is_rejected() {
    let mut p = create_test_persistence();
    let err = hierarchy::create_camp(&mut p, 99, &camp_spec("Ghost Camp")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::NotFound {
            resource: "user",
            id: 99
        })
    ));
}
