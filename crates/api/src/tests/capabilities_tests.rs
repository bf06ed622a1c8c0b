// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campstead_domain::GlobalRole;

use crate::capabilities::capabilities_for;
use crate::error::ApiError;
use crate::handlers;
use crate::tests::helpers::{camp_request, create_test_persistence, sync_test_user};

#[test]
fn test_member_capabilities_are_minimal() {
    let mut p = create_test_persistence();
    sync_test_user(&mut p, 1, "Alice", "member");

    let caps = capabilities_for(&mut p, 1).unwrap();
    assert_eq!(caps.global_role, GlobalRole::Member);
    assert!(!caps.can_create_events);
    assert!(!caps.can_publish_events);
    assert!(!caps.can_manage_any_camp);
    assert!(caps.managed_camp_ids.is_empty());
}

#[test]
fn test_camp_creator_lists_their_managed_camp() {
    let mut p = create_test_persistence();
    sync_test_user(&mut p, 1, "Alice", "member");
    let camp = handlers::create_camp(&mut p, 1, camp_request("Dust Bunnies")).unwrap();

    let caps = capabilities_for(&mut p, 1).unwrap();
    assert_eq!(caps.managed_camp_ids, vec![camp.id]);
    assert!(!caps.can_manage_any_camp);
}

#[test]
fn test_site_admin_capabilities() {
    let mut p = create_test_persistence();
    sync_test_user(&mut p, 9, "Sam", "site_admin");

    let caps = capabilities_for(&mut p, 9).unwrap();
    assert!(caps.can_create_events);
    assert!(caps.can_publish_events);
    assert!(caps.can_manage_any_camp);
}

#[test]
fn test_unknown_actor_is_not_found() {
    let mut p = create_test_persistence();
    let err = capabilities_for(&mut p, 42).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
