// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity snapshots exchanged between the engine and its callers.
//!
//! These are plain data. Timestamps are ISO-8601 strings as stored; event
//! dates are calendar dates. Invariants over these entities are enforced by
//! the engine operations, never by the structs themselves.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::{
    AssociationStatus, CampRole, EventStatus, GlobalRole, LeadershipSlots, MemberApprovalMode,
    MembershipStatus,
};

/// A user as supplied by the identity directory.
///
/// Consumed for display resolution and eligibility checks, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub display_name: String,
    pub pronouns: Option<String>,
    pub global_role: GlobalRole,
}

/// Amenity flags advertised by a camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CampAmenities {
    pub has_communal_kitchen: bool,
    pub has_communal_space: bool,
    pub has_art_exhibits: bool,
    pub has_member_activities: bool,
    pub has_non_member_activities: bool,
}

/// Top-level organizational unit. Owns clusters and a membership roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camp {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub max_sites: i32,
    pub max_people: i32,
    pub amenities: CampAmenities,
    pub custom_amenities: Option<String>,
    pub member_approval_mode: MemberApprovalMode,
    pub leadership: LeadershipSlots,
    pub creator_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Mid-level grouping within a camp. Owns teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: i64,
    pub camp_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub leadership: LeadershipSlots,
    pub created_at: String,
    pub updated_at: String,
}

/// Leaf-level grouping within a cluster. Owns a member roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub cluster_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub leadership: LeadershipSlots,
    pub created_at: String,
    pub updated_at: String,
}

/// A user's admission record into a camp. Unique per (camp, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub camp_id: i64,
    pub user_id: i64,
    pub status: MembershipStatus,
    pub role: CampRole,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

/// A user's membership of a team. Existence implies approval; there is no
/// status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub joined_at: String,
}

/// A camp's request to participate in an event. Unique per (camp, event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: i64,
    pub camp_id: i64,
    pub event_id: i64,
    pub status: AssociationStatus,
    /// Camp location override at this specific event.
    pub location: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

/// Contact fields carried on an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventContacts {
    pub event_manager_email: Option<String>,
    pub event_manager_phone: Option<String>,
    pub safety_manager_email: Option<String>,
    pub safety_manager_phone: Option<String>,
    pub business_manager_email: Option<String>,
    pub business_manager_phone: Option<String>,
    pub board_email: Option<String>,
}

/// Option flags offered to event attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventOptions {
    pub has_early_arrival: bool,
    pub early_arrival_days: Option<i32>,
    pub has_late_departure: bool,
    pub late_departure_days: Option<i32>,
    pub has_accessibility_assistance: bool,
    pub has_drinking_water: bool,
    pub has_ice_available: bool,
    pub has_vehicle_access: bool,
    pub custom_event_options: Option<String>,
}

/// An event. Created pending and published through the approval workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub contacts: EventContacts,
    pub status: EventStatus,
    pub creator_id: i64,
    pub options: EventOptions,
    pub created_at: String,
    pub updated_at: String,
}

/// A user's registration for an event. Simple attendee record; not part of
/// the approval engine. Unique per (event, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub has_ticket: bool,
    pub opted_early_arrival: bool,
    pub opted_late_departure: bool,
    pub opted_vehicle_access: bool,
    pub created_at: String,
}
