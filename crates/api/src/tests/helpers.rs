// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for API boundary tests.

use campstead::Decision;
use campstead_persistence::Persistence;

use crate::handlers;
use crate::request_response::{
    CampRequest, DecisionRequest, EventRequest, SubgroupRequest, SyncUserRequest,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn sync_test_user(p: &mut Persistence, id: i64, display_name: &str, global_role: &str) {
    handlers::sync_user(
        p,
        SyncUserRequest {
            id,
            display_name: display_name.to_string(),
            pronouns: None,
            global_role: global_role.to_string(),
        },
    )
    .unwrap();
}

pub fn camp_request(name: &str) -> CampRequest {
    CampRequest {
        name: name.to_string(),
        description: String::from("A test camp"),
        max_sites: 10,
        max_people: 40,
        amenities: campstead_domain::CampAmenities::default(),
        custom_amenities: None,
        member_approval_mode: String::from("manager_only"),
        enable_lead: true,
        enable_backup_lead: true,
    }
}

pub fn subgroup_request(name: &str) -> SubgroupRequest {
    SubgroupRequest {
        name: name.to_string(),
        description: None,
        enable_lead: true,
        enable_backup_lead: true,
    }
}

pub fn event_request(title: &str) -> EventRequest {
    EventRequest {
        title: title.to_string(),
        description: String::from("A test event"),
        location: Some(String::from("High desert")),
        start_date: String::from("2026-08-20"),
        end_date: String::from("2026-08-28"),
        contacts: campstead_domain::EventContacts::default(),
        options: campstead_domain::EventOptions::default(),
    }
}

pub const fn approve() -> DecisionRequest {
    DecisionRequest {
        decision: Decision::Approve,
    }
}
