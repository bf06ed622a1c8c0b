// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod hierarchy_tests;
mod roster_tests;

use time::macros::date;

use campstead_domain::{
    CampAmenities, EventContacts, EventOptions, GlobalRole, MemberApprovalMode, Membership, UserRef,
};
use campstead_persistence::Persistence;

use crate::approval::{self, Decision, EventDraft};
use crate::hierarchy::{CampSpec, SubgroupSpec};
use crate::{directory, roster};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn seed_user(p: &mut Persistence, id: i64, display_name: &str, role: GlobalRole) {
    directory::sync_user(
        p,
        &UserRef {
            id,
            display_name: display_name.to_string(),
            pronouns: None,
            global_role: role,
        },
    )
    .unwrap();
}

pub fn camp_spec(name: &str) -> CampSpec {
    CampSpec {
        name: name.to_string(),
        description: String::from("A test camp"),
        max_sites: 10,
        max_people: 40,
        amenities: CampAmenities {
            has_communal_kitchen: true,
            ..CampAmenities::default()
        },
        custom_amenities: None,
        member_approval_mode: MemberApprovalMode::ManagerOnly,
        enable_lead: true,
        enable_backup_lead: true,
    }
}

pub fn camp_spec_with_mode(name: &str, mode: MemberApprovalMode) -> CampSpec {
    CampSpec {
        member_approval_mode: mode,
        ..camp_spec(name)
    }
}

pub fn subgroup_spec(name: &str) -> SubgroupSpec {
    SubgroupSpec {
        name: name.to_string(),
        description: None,
        enable_lead: true,
        enable_backup_lead: true,
    }
}

pub fn event_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: String::from("A test event"),
        location: Some(String::from("High desert")),
        start_date: date!(2026 - 08 - 20),
        end_date: date!(2026 - 08 - 28),
        contacts: EventContacts {
            event_manager_email: Some(String::from("manager@example.org")),
            ..EventContacts::default()
        },
        options: EventOptions {
            has_early_arrival: true,
            early_arrival_days: Some(2),
            has_drinking_water: true,
            ..EventOptions::default()
        },
    }
}

/// Requests membership as `user_id` and approves it as `approver_id`.
pub fn join_and_approve(
    p: &mut Persistence,
    camp_id: i64,
    user_id: i64,
    approver_id: i64,
) -> Membership {
    let pending = roster::request_membership(p, user_id, camp_id).unwrap();
    approval::decide_membership(p, approver_id, pending.id, Decision::Approve).unwrap()
}
