// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping the Diesel schema, and their conversions into the
//! domain entity snapshots. Status and role columns are stored as text;
//! a row that fails to parse is treated as a serialization error, never
//! silently coerced.

use std::str::FromStr;

use diesel::prelude::*;
use time::Date;
use time::macros::format_description;

use campstead_domain::{
    Association, AssociationStatus, Camp, CampAmenities, CampRole, Cluster, Event, EventContacts,
    EventOptions, EventRegistration, EventStatus, GlobalRole, LeadershipSlots, MemberApprovalMode,
    Membership, MembershipStatus, Team, TeamMembership, UserRef,
};

use crate::diesel_schema::{
    camp_event_associations, camp_members, camps, clusters, event_registrations, events,
    team_members, teams, users,
};
use crate::error::PersistenceError;

/// Storage format for calendar dates.
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
#[must_use]
pub fn format_date(date: Date) -> String {
    // The year/month/day description cannot fail for in-range dates.
    date.format(&DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns an error if the stored text is not a valid ISO-8601 date.
pub fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, &DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid date '{text}': {e}")))
}

fn parse_enum<T: FromStr>(text: &str, what: &str) -> Result<T, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(text)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid {what} '{text}': {e}")))
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub display_name: String,
    pub pronouns: Option<String>,
    pub global_role: String,
}

impl UserRow {
    /// Converts this row into the domain user reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role does not parse.
    pub fn into_domain(self) -> Result<UserRef, PersistenceError> {
        let global_role: GlobalRole = parse_enum(&self.global_role, "global role")?;
        Ok(UserRef {
            id: self.user_id,
            display_name: self.display_name,
            pronouns: self.pronouns,
            global_role,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = camps)]
pub struct CampRow {
    pub camp_id: i64,
    pub name: String,
    pub description: String,
    pub max_sites: i32,
    pub max_people: i32,
    pub has_communal_kitchen: bool,
    pub has_communal_space: bool,
    pub has_art_exhibits: bool,
    pub has_member_activities: bool,
    pub has_non_member_activities: bool,
    pub custom_amenities: Option<String>,
    pub member_approval_mode: String,
    pub enable_camp_lead: bool,
    pub enable_backup_camp_lead: bool,
    pub camp_lead_id: Option<i64>,
    pub backup_camp_lead_id: Option<i64>,
    pub creator_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl CampRow {
    /// Converts this row into the domain camp snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored approval mode does not parse.
    pub fn into_domain(self) -> Result<Camp, PersistenceError> {
        let member_approval_mode: MemberApprovalMode =
            parse_enum(&self.member_approval_mode, "member approval mode")?;
        Ok(Camp {
            id: self.camp_id,
            name: self.name,
            description: self.description,
            max_sites: self.max_sites,
            max_people: self.max_people,
            amenities: CampAmenities {
                has_communal_kitchen: self.has_communal_kitchen,
                has_communal_space: self.has_communal_space,
                has_art_exhibits: self.has_art_exhibits,
                has_member_activities: self.has_member_activities,
                has_non_member_activities: self.has_non_member_activities,
            },
            custom_amenities: self.custom_amenities,
            member_approval_mode,
            leadership: LeadershipSlots {
                enable_lead: self.enable_camp_lead,
                enable_backup_lead: self.enable_backup_camp_lead,
                lead_id: self.camp_lead_id,
                backup_lead_id: self.backup_camp_lead_id,
            },
            creator_id: self.creator_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = camps)]
pub struct NewCampRow {
    pub name: String,
    pub description: String,
    pub max_sites: i32,
    pub max_people: i32,
    pub has_communal_kitchen: bool,
    pub has_communal_space: bool,
    pub has_art_exhibits: bool,
    pub has_member_activities: bool,
    pub has_non_member_activities: bool,
    pub custom_amenities: Option<String>,
    pub member_approval_mode: String,
    pub enable_camp_lead: bool,
    pub enable_backup_camp_lead: bool,
    pub creator_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clusters)]
pub struct ClusterRow {
    pub cluster_id: i64,
    pub camp_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enable_cluster_lead: bool,
    pub enable_backup_cluster_lead: bool,
    pub cluster_lead_id: Option<i64>,
    pub backup_cluster_lead_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl ClusterRow {
    /// Converts this row into the domain cluster snapshot.
    #[must_use]
    pub fn into_domain(self) -> Cluster {
        Cluster {
            id: self.cluster_id,
            camp_id: self.camp_id,
            name: self.name,
            description: self.description,
            leadership: LeadershipSlots {
                enable_lead: self.enable_cluster_lead,
                enable_backup_lead: self.enable_backup_cluster_lead,
                lead_id: self.cluster_lead_id,
                backup_lead_id: self.backup_cluster_lead_id,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clusters)]
pub struct NewClusterRow {
    pub camp_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enable_cluster_lead: bool,
    pub enable_backup_cluster_lead: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teams)]
pub struct TeamRow {
    pub team_id: i64,
    pub cluster_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enable_team_lead: bool,
    pub enable_backup_team_lead: bool,
    pub team_lead_id: Option<i64>,
    pub backup_team_lead_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl TeamRow {
    /// Converts this row into the domain team snapshot.
    #[must_use]
    pub fn into_domain(self) -> Team {
        Team {
            id: self.team_id,
            cluster_id: self.cluster_id,
            name: self.name,
            description: self.description,
            leadership: LeadershipSlots {
                enable_lead: self.enable_team_lead,
                enable_backup_lead: self.enable_backup_team_lead,
                lead_id: self.team_lead_id,
                backup_lead_id: self.backup_team_lead_id,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    pub cluster_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enable_team_lead: bool,
    pub enable_backup_team_lead: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = camp_members)]
pub struct MembershipRow {
    pub membership_id: i64,
    pub camp_id: i64,
    pub user_id: i64,
    pub status: String,
    pub role: String,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

impl MembershipRow {
    /// Converts this row into the domain membership snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or role does not parse.
    pub fn into_domain(self) -> Result<Membership, PersistenceError> {
        let status: MembershipStatus = parse_enum(&self.status, "membership status")?;
        let role: CampRole = parse_enum(&self.role, "camp role")?;
        Ok(Membership {
            id: self.membership_id,
            camp_id: self.camp_id,
            user_id: self.user_id,
            status,
            role,
            requested_at: self.requested_at,
            approved_at: self.approved_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = camp_members)]
pub struct NewMembershipRow {
    pub camp_id: i64,
    pub user_id: i64,
    pub status: String,
    pub role: String,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = team_members)]
pub struct TeamMemberRow {
    pub team_member_id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub joined_at: String,
}

impl TeamMemberRow {
    /// Converts this row into the domain team membership snapshot.
    #[must_use]
    pub fn into_domain(self) -> TeamMembership {
        TeamMembership {
            id: self.team_member_id,
            team_id: self.team_id,
            user_id: self.user_id,
            joined_at: self.joined_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team_members)]
pub struct NewTeamMemberRow {
    pub team_id: i64,
    pub user_id: i64,
    pub joined_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
pub struct EventRow {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub event_manager_email: Option<String>,
    pub event_manager_phone: Option<String>,
    pub safety_manager_email: Option<String>,
    pub safety_manager_phone: Option<String>,
    pub business_manager_email: Option<String>,
    pub business_manager_phone: Option<String>,
    pub board_email: Option<String>,
    pub status: String,
    pub creator_id: i64,
    pub has_early_arrival: bool,
    pub early_arrival_days: Option<i32>,
    pub has_late_departure: bool,
    pub late_departure_days: Option<i32>,
    pub has_accessibility_assistance: bool,
    pub has_drinking_water: bool,
    pub has_ice_available: bool,
    pub has_vehicle_access: bool,
    pub custom_event_options: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl EventRow {
    /// Converts this row into the domain event snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or a date does not parse.
    pub fn into_domain(self) -> Result<Event, PersistenceError> {
        let status: EventStatus = parse_enum(&self.status, "event status")?;
        let start_date: Date = parse_date(&self.start_date)?;
        let end_date: Date = parse_date(&self.end_date)?;
        Ok(Event {
            id: self.event_id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_date,
            end_date,
            contacts: EventContacts {
                event_manager_email: self.event_manager_email,
                event_manager_phone: self.event_manager_phone,
                safety_manager_email: self.safety_manager_email,
                safety_manager_phone: self.safety_manager_phone,
                business_manager_email: self.business_manager_email,
                business_manager_phone: self.business_manager_phone,
                board_email: self.board_email,
            },
            status,
            creator_id: self.creator_id,
            options: EventOptions {
                has_early_arrival: self.has_early_arrival,
                early_arrival_days: self.early_arrival_days,
                has_late_departure: self.has_late_departure,
                late_departure_days: self.late_departure_days,
                has_accessibility_assistance: self.has_accessibility_assistance,
                has_drinking_water: self.has_drinking_water,
                has_ice_available: self.has_ice_available,
                has_vehicle_access: self.has_vehicle_access,
                custom_event_options: self.custom_event_options,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub event_manager_email: Option<String>,
    pub event_manager_phone: Option<String>,
    pub safety_manager_email: Option<String>,
    pub safety_manager_phone: Option<String>,
    pub business_manager_email: Option<String>,
    pub business_manager_phone: Option<String>,
    pub board_email: Option<String>,
    pub status: String,
    pub creator_id: i64,
    pub has_early_arrival: bool,
    pub early_arrival_days: Option<i32>,
    pub has_late_departure: bool,
    pub late_departure_days: Option<i32>,
    pub has_accessibility_assistance: bool,
    pub has_drinking_water: bool,
    pub has_ice_available: bool,
    pub has_vehicle_access: bool,
    pub custom_event_options: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = camp_event_associations)]
pub struct AssociationRow {
    pub association_id: i64,
    pub camp_id: i64,
    pub event_id: i64,
    pub status: String,
    pub location: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

impl AssociationRow {
    /// Converts this row into the domain association snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status does not parse.
    pub fn into_domain(self) -> Result<Association, PersistenceError> {
        let status: AssociationStatus = parse_enum(&self.status, "association status")?;
        Ok(Association {
            id: self.association_id,
            camp_id: self.camp_id,
            event_id: self.event_id,
            status,
            location: self.location,
            requested_at: self.requested_at,
            approved_at: self.approved_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = camp_event_associations)]
pub struct NewAssociationRow {
    pub camp_id: i64,
    pub event_id: i64,
    pub status: String,
    pub location: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = event_registrations)]
pub struct RegistrationRow {
    pub registration_id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub has_ticket: bool,
    pub opted_early_arrival: bool,
    pub opted_late_departure: bool,
    pub opted_vehicle_access: bool,
    pub created_at: String,
}

impl RegistrationRow {
    /// Converts this row into the domain registration snapshot.
    #[must_use]
    pub fn into_domain(self) -> EventRegistration {
        EventRegistration {
            id: self.registration_id,
            event_id: self.event_id,
            user_id: self.user_id,
            has_ticket: self.has_ticket,
            opted_early_arrival: self.opted_early_arrival,
            opted_late_departure: self.opted_late_departure,
            opted_vehicle_access: self.opted_vehicle_access,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = event_registrations)]
pub struct NewRegistrationRow {
    pub event_id: i64,
    pub user_id: i64,
    pub has_ticket: bool,
    pub opted_early_arrival: bool,
    pub opted_late_departure: bool,
    pub opted_vehicle_access: bool,
    pub created_at: String,
}
