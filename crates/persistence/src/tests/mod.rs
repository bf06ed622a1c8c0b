// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use diesel::SqliteConnection;

use crate::data_models::{NewCampRow, NewClusterRow, NewEventRow, NewTeamRow, UserRow};
use crate::{Persistence, mutations};

pub const TEST_TIMESTAMP: &str = "2026-06-01T00:00:00Z";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn seed_user(conn: &mut SqliteConnection, user_id: i64, display_name: &str, role: &str) {
    let row = UserRow {
        user_id,
        display_name: display_name.to_string(),
        pronouns: None,
        global_role: role.to_string(),
    };
    mutations::upsert_user(conn, &row).unwrap();
}

pub fn seed_camp(conn: &mut SqliteConnection, name: &str, creator_id: i64) -> i64 {
    let row = NewCampRow {
        name: name.to_string(),
        description: String::from("A test camp"),
        max_sites: 10,
        max_people: 40,
        has_communal_kitchen: true,
        has_communal_space: false,
        has_art_exhibits: false,
        has_member_activities: false,
        has_non_member_activities: false,
        custom_amenities: None,
        member_approval_mode: String::from("manager_only"),
        enable_camp_lead: true,
        enable_backup_camp_lead: true,
        creator_id,
        created_at: TEST_TIMESTAMP.to_string(),
        updated_at: TEST_TIMESTAMP.to_string(),
    };
    mutations::insert_camp(conn, &row).unwrap()
}

pub fn seed_cluster(conn: &mut SqliteConnection, camp_id: i64, name: &str) -> i64 {
    let row = NewClusterRow {
        camp_id,
        name: name.to_string(),
        description: None,
        enable_cluster_lead: true,
        enable_backup_cluster_lead: false,
        created_at: TEST_TIMESTAMP.to_string(),
        updated_at: TEST_TIMESTAMP.to_string(),
    };
    mutations::insert_cluster(conn, &row).unwrap()
}

pub fn seed_team(conn: &mut SqliteConnection, cluster_id: i64, name: &str) -> i64 {
    let row = NewTeamRow {
        cluster_id,
        name: name.to_string(),
        description: None,
        enable_team_lead: true,
        enable_backup_team_lead: true,
        created_at: TEST_TIMESTAMP.to_string(),
        updated_at: TEST_TIMESTAMP.to_string(),
    };
    mutations::insert_team(conn, &row).unwrap()
}

pub fn seed_event(conn: &mut SqliteConnection, title: &str, creator_id: i64, status: &str) -> i64 {
    let row = NewEventRow {
        title: title.to_string(),
        description: String::from("A test event"),
        location: Some(String::from("High desert")),
        start_date: String::from("2026-08-20"),
        end_date: String::from("2026-08-28"),
        event_manager_email: Some(String::from("manager@example.org")),
        event_manager_phone: None,
        safety_manager_email: None,
        safety_manager_phone: None,
        business_manager_email: None,
        business_manager_phone: None,
        board_email: None,
        status: status.to_string(),
        creator_id,
        has_early_arrival: true,
        early_arrival_days: Some(2),
        has_late_departure: false,
        late_departure_days: None,
        has_accessibility_assistance: true,
        has_drinking_water: true,
        has_ice_available: false,
        has_vehicle_access: false,
        custom_event_options: None,
        created_at: TEST_TIMESTAMP.to_string(),
        updated_at: TEST_TIMESTAMP.to_string(),
    };
    mutations::insert_event(conn, &row).unwrap()
}
