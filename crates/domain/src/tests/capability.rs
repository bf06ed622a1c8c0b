// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, CampRole, Capability, DomainError, GlobalRole, MemberApprovalMode, authorize};

fn member_actor(user_id: i64) -> Actor {
    Actor::new(user_id, GlobalRole::Member)
}

#[test]
fn test_global_admin_holds_every_capability() {
    let actor: Actor = Actor::new(1, GlobalRole::GlobalAdmin);
    for capability in [
        Capability::ManageCamp { camp_id: 1 },
        Capability::ApproveMembers {
            camp_id: 1,
            mode: MemberApprovalMode::ManagerOnly,
        },
        Capability::DecideAssociation {
            event_creator_id: 99,
        },
        Capability::CreateEvent,
        Capability::PublishEvent,
        Capability::ManageEvent {
            event_creator_id: 99,
        },
    ] {
        assert!(authorize(&actor, &capability).is_ok());
    }
}

#[test]
fn test_camp_manager_may_manage_camp() {
    let actor: Actor = member_actor(5).with_camp_role(Some(CampRole::Manager));
    assert!(authorize(&actor, &Capability::ManageCamp { camp_id: 1 }).is_ok());
}

#[test]
fn test_plain_member_may_not_manage_camp() {
    let actor: Actor = member_actor(5).with_camp_role(Some(CampRole::Member));
    let result: Result<(), DomainError> =
        authorize(&actor, &Capability::ManageCamp { camp_id: 1 });
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
}

#[test]
fn test_site_admin_may_manage_any_camp() {
    let actor: Actor = Actor::new(5, GlobalRole::SiteAdmin);
    assert!(authorize(&actor, &Capability::ManageCamp { camp_id: 1 }).is_ok());
}

#[test]
fn test_manager_only_mode_requires_manager() {
    let capability: Capability = Capability::ApproveMembers {
        camp_id: 1,
        mode: MemberApprovalMode::ManagerOnly,
    };
    let manager: Actor = member_actor(5).with_camp_role(Some(CampRole::Manager));
    let member: Actor = member_actor(6).with_camp_role(Some(CampRole::Member));
    assert!(authorize(&manager, &capability).is_ok());
    assert!(matches!(
        authorize(&member, &capability),
        Err(DomainError::Forbidden { .. })
    ));
}

#[test]
fn test_all_members_mode_admits_any_approved_member() {
    let capability: Capability = Capability::ApproveMembers {
        camp_id: 1,
        mode: MemberApprovalMode::AllMembers,
    };
    let member: Actor = member_actor(6).with_camp_role(Some(CampRole::Member));
    let outsider: Actor = member_actor(7);
    assert!(authorize(&member, &capability).is_ok());
    assert!(matches!(
        authorize(&outsider, &capability),
        Err(DomainError::Forbidden { .. })
    ));
}

#[test]
fn test_association_decision_allows_event_creator() {
    let creator: Actor = member_actor(42);
    let capability: Capability = Capability::DecideAssociation {
        event_creator_id: 42,
    };
    assert!(authorize(&creator, &capability).is_ok());
}

#[test]
fn test_association_decision_allows_event_manager_role() {
    let manager: Actor = Actor::new(8, GlobalRole::EventManager);
    let capability: Capability = Capability::DecideAssociation {
        event_creator_id: 42,
    };
    assert!(authorize(&manager, &capability).is_ok());
}

#[test]
fn test_association_decision_denies_unrelated_member() {
    let other: Actor = member_actor(8);
    let capability: Capability = Capability::DecideAssociation {
        event_creator_id: 42,
    };
    assert!(matches!(
        authorize(&other, &capability),
        Err(DomainError::Forbidden { .. })
    ));
}

#[test]
fn test_event_creation_requires_event_manager_role() {
    assert!(
        authorize(
            &Actor::new(1, GlobalRole::EventManager),
            &Capability::CreateEvent
        )
        .is_ok()
    );
    assert!(matches!(
        authorize(
            &Actor::new(2, GlobalRole::CampManager),
            &Capability::CreateEvent
        ),
        Err(DomainError::Forbidden { .. })
    ));
}

#[test]
fn test_publication_requires_site_admin() {
    assert!(authorize(&Actor::new(1, GlobalRole::SiteAdmin), &Capability::PublishEvent).is_ok());
    assert!(matches!(
        authorize(
            &Actor::new(2, GlobalRole::EventManager),
            &Capability::PublishEvent
        ),
        Err(DomainError::Forbidden { .. })
    ));
}

#[test]
fn test_event_management_allows_creator_and_site_admin() {
    let capability: Capability = Capability::ManageEvent {
        event_creator_id: 42,
    };
    assert!(authorize(&member_actor(42), &capability).is_ok());
    assert!(authorize(&Actor::new(3, GlobalRole::SiteAdmin), &capability).is_ok());
    assert!(matches!(
        authorize(&Actor::new(3, GlobalRole::EventManager), &capability),
        Err(DomainError::Forbidden { .. })
    ));
}
