// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry loosely typed fields (role strings, ISO-8601 date
//! strings) and convert into the engine's typed inputs, so a malformed
//! value is rejected as [`ApiError::InvalidInput`] before the engine ever
//! sees it. Responses reuse the serializable domain entities and view
//! structs directly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use campstead::Decision;
use campstead::hierarchy::{CampSpec, SubgroupSpec};
use campstead::registration::RegistrationOptions;
use campstead_domain::{
    CampAmenities, CampRole, EventContacts, EventOptions, GlobalRole, LeadershipRole,
    LeadershipScope, MemberApprovalMode, UserRef,
};

use crate::error::{ApiError, translate_domain_error};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

fn parse_date(field: &'static str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT).map_err(|_| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{value}' is not a YYYY-MM-DD date"),
    })
}

/// API request to create or fully update a camp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampRequest {
    pub name: String,
    pub description: String,
    pub max_sites: i32,
    pub max_people: i32,
    #[serde(default)]
    pub amenities: CampAmenities,
    #[serde(default)]
    pub custom_amenities: Option<String>,
    /// One of `manager_only` or `all_members`.
    pub member_approval_mode: String,
    pub enable_lead: bool,
    pub enable_backup_lead: bool,
}

impl CampRequest {
    /// Converts this request into the engine's camp spec.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the approval mode string fails to parse.
    pub fn into_spec(self) -> Result<CampSpec, ApiError> {
        let member_approval_mode: MemberApprovalMode =
            MemberApprovalMode::from_str(&self.member_approval_mode)
                .map_err(translate_domain_error)?;
        Ok(CampSpec {
            name: self.name,
            description: self.description,
            max_sites: self.max_sites,
            max_people: self.max_people,
            amenities: self.amenities,
            custom_amenities: self.custom_amenities,
            member_approval_mode,
            enable_lead: self.enable_lead,
            enable_backup_lead: self.enable_backup_lead,
        })
    }
}

/// API request to create or fully update a cluster or team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub enable_lead: bool,
    pub enable_backup_lead: bool,
}

impl SubgroupRequest {
    /// Converts this request into the engine's subgroup spec.
    #[must_use]
    pub fn into_spec(self) -> SubgroupSpec {
        SubgroupSpec {
            name: self.name,
            description: self.description,
            enable_lead: self.enable_lead,
            enable_backup_lead: self.enable_backup_lead,
        }
    }
}

/// API request to create or fully update an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    /// ISO-8601 calendar date (YYYY-MM-DD).
    pub start_date: String,
    /// ISO-8601 calendar date (YYYY-MM-DD).
    pub end_date: String,
    #[serde(default)]
    pub contacts: EventContacts,
    #[serde(default)]
    pub options: EventOptions,
}

impl EventRequest {
    /// Converts this request into the engine's event draft.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either date string fails to parse.
    pub fn into_draft(self) -> Result<campstead::approval::EventDraft, ApiError> {
        let start_date: Date = parse_date("start_date", &self.start_date)?;
        let end_date: Date = parse_date("end_date", &self.end_date)?;
        Ok(campstead::approval::EventDraft {
            title: self.title,
            description: self.description,
            location: self.location,
            start_date,
            end_date,
            contacts: self.contacts,
            options: self.options,
        })
    }
}

/// API request to assign or clear a leadership slot.
///
/// `user_id: None` clears the slot; `Some(id)` claims it for that user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignLeadershipRequest {
    /// One of `camp`, `cluster`, or `team`.
    pub scope: String,
    pub scope_id: i64,
    /// One of `lead` or `backup_lead`.
    pub role: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl AssignLeadershipRequest {
    /// Parses the scope and role strings into their typed forms.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either string fails to parse.
    pub fn parse(&self) -> Result<(LeadershipScope, LeadershipRole), ApiError> {
        let scope: LeadershipScope = match self.scope.as_str() {
            "camp" => LeadershipScope::Camp(self.scope_id),
            "cluster" => LeadershipScope::Cluster(self.scope_id),
            "team" => LeadershipScope::Team(self.scope_id),
            other => {
                return Err(ApiError::InvalidInput {
                    field: String::from("scope"),
                    message: format!("'{other}' is not one of camp, cluster, team"),
                });
            }
        };
        let role: LeadershipRole =
            LeadershipRole::from_str(&self.role).map_err(translate_domain_error)?;
        Ok((scope, role))
    }
}

/// API request to set a member's camp-scoped role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRoleRequest {
    pub user_id: i64,
    /// One of `manager` or `member`.
    pub role: String,
}

impl MembershipRoleRequest {
    /// Parses the role string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the role string fails to parse.
    pub fn parse_role(&self) -> Result<CampRole, ApiError> {
        CampRole::from_str(&self.role).map_err(translate_domain_error)
    }
}

/// API request to roster a user onto a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberRequest {
    pub user_id: i64,
}

/// API request carrying an approve/reject decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}

/// API request for a camp to ask for association with an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRequest {
    pub camp_id: i64,
    /// Camp location override at this event, if any.
    #[serde(default)]
    pub location: Option<String>,
}

/// API request to set or clear a camp's location override on an
/// association. A missing or blank location clears the override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest {
    #[serde(default)]
    pub location: Option<String>,
}

/// API request to register for an event or update an existing registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub has_ticket: bool,
    #[serde(default)]
    pub opted_early_arrival: bool,
    #[serde(default)]
    pub opted_late_departure: bool,
    #[serde(default)]
    pub opted_vehicle_access: bool,
}

impl RegistrationRequest {
    /// Converts this request into the engine's registration options.
    #[must_use]
    pub const fn into_options(self) -> RegistrationOptions {
        RegistrationOptions {
            has_ticket: self.has_ticket,
            opted_early_arrival: self.opted_early_arrival,
            opted_late_departure: self.opted_late_departure,
            opted_vehicle_access: self.opted_vehicle_access,
        }
    }
}

/// API request to upsert a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncUserRequest {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub pronouns: Option<String>,
    /// One of `global_admin`, `site_admin`, `event_manager`,
    /// `camp_manager`, or `member`.
    pub global_role: String,
}

impl SyncUserRequest {
    /// Converts this request into a directory user reference.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the role string fails to parse.
    pub fn into_user(self) -> Result<UserRef, ApiError> {
        let global_role: GlobalRole =
            GlobalRole::from_str(&self.global_role).map_err(translate_domain_error)?;
        Ok(UserRef {
            id: self.id,
            display_name: self.display_name,
            pronouns: self.pronouns,
            global_role,
        })
    }
}

/// API response for operations with no entity payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
