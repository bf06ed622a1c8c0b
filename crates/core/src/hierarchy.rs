// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural operations on the camp / cluster / team hierarchy.
//!
//! Deletes cascade inside a single immediate transaction: a cluster takes
//! its teams and their rosters with it, a camp takes everything. Updates
//! are full replacements; disabling a leadership flag clears the slot in
//! the same transaction so a slot is never non-null while disabled.

use diesel::SqliteConnection;
use tracing::info;

use campstead_domain::{
    Actor, Camp, CampAmenities, Capability, Cluster, DomainError, MemberApprovalMode, Team,
    authorize, validate_capacity, validate_name,
};
use campstead_persistence::data_models::{NewCampRow, NewClusterRow, NewMembershipRow, NewTeamRow};
use campstead_persistence::mutations::{self, CampChanges, ClusterChanges, TeamChanges};
use campstead_persistence::{Persistence, queries};

use crate::error::CoreError;
use crate::{actor, now_timestamp};

/// Full set of caller-editable camp fields, used for create and update.
#[derive(Debug, Clone)]
pub struct CampSpec {
    pub name: String,
    pub description: String,
    pub max_sites: i32,
    pub max_people: i32,
    pub amenities: CampAmenities,
    pub custom_amenities: Option<String>,
    pub member_approval_mode: MemberApprovalMode,
    pub enable_lead: bool,
    pub enable_backup_lead: bool,
}

/// Caller-editable fields shared by clusters and teams.
#[derive(Debug, Clone)]
pub struct SubgroupSpec {
    pub name: String,
    pub description: Option<String>,
    pub enable_lead: bool,
    pub enable_backup_lead: bool,
}

pub(crate) fn require_camp(conn: &mut SqliteConnection, camp_id: i64) -> Result<Camp, CoreError> {
    queries::get_camp_opt(conn, camp_id)?.ok_or(CoreError::not_found("camp", camp_id))
}

pub(crate) fn require_cluster(
    conn: &mut SqliteConnection,
    cluster_id: i64,
) -> Result<Cluster, CoreError> {
    queries::get_cluster_opt(conn, cluster_id)?.ok_or(CoreError::not_found("cluster", cluster_id))
}

pub(crate) fn require_team(conn: &mut SqliteConnection, team_id: i64) -> Result<Team, CoreError> {
    queries::get_team_opt(conn, team_id)?.ok_or(CoreError::not_found("team", team_id))
}

fn validate_camp_spec(spec: &CampSpec) -> Result<(), DomainError> {
    validate_name(&spec.name)?;
    validate_capacity("max_sites", spec.max_sites)?;
    validate_capacity("max_people", spec.max_people)?;
    Ok(())
}

/// Creates a camp.
///
/// Any known user may create a camp; the creator is admitted in the same
/// transaction as an approved manager, so a fresh camp is never without
/// one.
///
/// # Errors
///
/// Returns an error if the actor is unknown, a field fails validation,
/// or the insert fails.
pub fn create_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    spec: &CampSpec,
) -> Result<Camp, CoreError> {
    persistence.immediate_transaction(|conn| {
        let acting: Actor = actor::resolve(conn, actor_id)?;
        validate_camp_spec(spec)?;

        let now: String = now_timestamp();
        let camp_id: i64 = mutations::insert_camp(
            conn,
            &NewCampRow {
                name: spec.name.trim().to_string(),
                description: spec.description.clone(),
                max_sites: spec.max_sites,
                max_people: spec.max_people,
                has_communal_kitchen: spec.amenities.has_communal_kitchen,
                has_communal_space: spec.amenities.has_communal_space,
                has_art_exhibits: spec.amenities.has_art_exhibits,
                has_member_activities: spec.amenities.has_member_activities,
                has_non_member_activities: spec.amenities.has_non_member_activities,
                custom_amenities: spec.custom_amenities.clone(),
                member_approval_mode: spec.member_approval_mode.as_str().to_string(),
                enable_camp_lead: spec.enable_lead,
                enable_backup_camp_lead: spec.enable_backup_lead,
                creator_id: acting.user_id,
                created_at: now.clone(),
                updated_at: now.clone(),
            },
        )?;

        mutations::insert_membership(
            conn,
            &NewMembershipRow {
                camp_id,
                user_id: acting.user_id,
                status: String::from("approved"),
                role: String::from("manager"),
                requested_at: now.clone(),
                approved_at: Some(now),
            },
        )?;

        info!(camp_id, actor_id, "Created camp");
        queries::get_camp(conn, camp_id).map_err(CoreError::from)
    })
}

/// Updates a camp's editable fields.
///
/// Disabling a leadership flag clears the corresponding slot in the same
/// transaction.
///
/// # Errors
///
/// Returns an error if the camp is missing, the actor may not manage it,
/// or a field fails validation.
pub fn update_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    spec: &CampSpec,
) -> Result<Camp, CoreError> {
    persistence.immediate_transaction(|conn| {
        let camp: Camp = require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;
        validate_camp_spec(spec)?;

        if !spec.enable_lead && camp.leadership.lead_id.is_some() {
            mutations::clear_camp_slot(conn, camp_id, campstead_domain::LeadershipRole::Lead)?;
        }
        if !spec.enable_backup_lead && camp.leadership.backup_lead_id.is_some() {
            mutations::clear_camp_slot(
                conn,
                camp_id,
                campstead_domain::LeadershipRole::BackupLead,
            )?;
        }

        mutations::update_camp(
            conn,
            camp_id,
            &CampChanges {
                name: spec.name.trim().to_string(),
                description: spec.description.clone(),
                max_sites: spec.max_sites,
                max_people: spec.max_people,
                has_communal_kitchen: spec.amenities.has_communal_kitchen,
                has_communal_space: spec.amenities.has_communal_space,
                has_art_exhibits: spec.amenities.has_art_exhibits,
                has_member_activities: spec.amenities.has_member_activities,
                has_non_member_activities: spec.amenities.has_non_member_activities,
                custom_amenities: spec.custom_amenities.clone(),
                member_approval_mode: spec.member_approval_mode.as_str().to_string(),
                enable_camp_lead: spec.enable_lead,
                enable_backup_camp_lead: spec.enable_backup_lead,
                updated_at: now_timestamp(),
            },
        )?;

        info!(camp_id, actor_id, "Updated camp");
        queries::get_camp(conn, camp_id).map_err(CoreError::from)
    })
}

/// Deletes a camp. Clusters, teams, rosters, and associations go with it.
///
/// # Errors
///
/// Returns an error if the camp is missing or the actor may not manage it.
pub fn delete_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;

        mutations::delete_camp(conn, camp_id)?;
        info!(camp_id, actor_id, "Deleted camp");
        Ok(())
    })
}

fn ensure_unique_cluster_name(
    conn: &mut SqliteConnection,
    camp_id: i64,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<(), CoreError> {
    let clash: bool = queries::list_clusters_for_camp(conn, camp_id)?
        .iter()
        .any(|c| c.name == name && Some(c.id) != exclude_id);
    if clash {
        return Err(
            DomainError::InvalidName(format!("'{name}' is already used in this camp")).into(),
        );
    }
    Ok(())
}

fn ensure_unique_team_name(
    conn: &mut SqliteConnection,
    cluster_id: i64,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<(), CoreError> {
    let clash: bool = queries::list_teams_for_cluster(conn, cluster_id)?
        .iter()
        .any(|t| t.name == name && Some(t.id) != exclude_id);
    if clash {
        return Err(
            DomainError::InvalidName(format!("'{name}' is already used in this cluster")).into(),
        );
    }
    Ok(())
}

/// Creates a cluster within a camp.
///
/// # Errors
///
/// Returns an error if the camp is missing, the actor may not manage it,
/// or the name is invalid or already used in the camp.
pub fn create_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    spec: &SubgroupSpec,
) -> Result<Cluster, CoreError> {
    persistence.immediate_transaction(|conn| {
        require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;
        validate_name(&spec.name)?;
        let name: String = spec.name.trim().to_string();
        ensure_unique_cluster_name(conn, camp_id, &name, None)?;

        let now: String = now_timestamp();
        let cluster_id: i64 = mutations::insert_cluster(
            conn,
            &NewClusterRow {
                camp_id,
                name,
                description: spec.description.clone(),
                enable_cluster_lead: spec.enable_lead,
                enable_backup_cluster_lead: spec.enable_backup_lead,
                created_at: now.clone(),
                updated_at: now,
            },
        )?;

        info!(camp_id, cluster_id, actor_id, "Created cluster");
        queries::get_cluster(conn, cluster_id).map_err(CoreError::from)
    })
}

/// Updates a cluster's editable fields.
///
/// Disabling a leadership flag clears the corresponding slot in the same
/// transaction.
///
/// # Errors
///
/// Returns an error if the cluster is missing, the actor may not manage
/// the owning camp, or the name is invalid or already used.
pub fn update_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
    spec: &SubgroupSpec,
) -> Result<Cluster, CoreError> {
    persistence.immediate_transaction(|conn| {
        let cluster: Cluster = require_cluster(conn, cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;
        validate_name(&spec.name)?;
        let name: String = spec.name.trim().to_string();
        ensure_unique_cluster_name(conn, camp_id, &name, Some(cluster_id))?;

        if !spec.enable_lead && cluster.leadership.lead_id.is_some() {
            mutations::clear_cluster_slot(
                conn,
                cluster_id,
                campstead_domain::LeadershipRole::Lead,
            )?;
        }
        if !spec.enable_backup_lead && cluster.leadership.backup_lead_id.is_some() {
            mutations::clear_cluster_slot(
                conn,
                cluster_id,
                campstead_domain::LeadershipRole::BackupLead,
            )?;
        }

        mutations::update_cluster(
            conn,
            cluster_id,
            &ClusterChanges {
                name,
                description: spec.description.clone(),
                enable_cluster_lead: spec.enable_lead,
                enable_backup_cluster_lead: spec.enable_backup_lead,
                updated_at: now_timestamp(),
            },
        )?;

        info!(cluster_id, actor_id, "Updated cluster");
        queries::get_cluster(conn, cluster_id).map_err(CoreError::from)
    })
}

/// Deletes a cluster and, through it, its teams and their rosters.
///
/// The whole cascade commits or none of it does; a partially-deleted
/// cluster is never observable.
///
/// # Errors
///
/// Returns an error if the cluster is missing or the actor may not
/// manage the owning camp.
pub fn delete_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        let cluster: Cluster = require_cluster(conn, cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;

        mutations::delete_cluster(conn, cluster_id)?;
        info!(cluster_id, actor_id, "Deleted cluster");
        Ok(())
    })
}

/// Creates a team within a cluster.
///
/// # Errors
///
/// Returns an error if the cluster is missing, the actor may not manage
/// the owning camp, or the name is invalid or already used in the
/// cluster.
pub fn create_team(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
    spec: &SubgroupSpec,
) -> Result<Team, CoreError> {
    persistence.immediate_transaction(|conn| {
        let cluster: Cluster = require_cluster(conn, cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;
        validate_name(&spec.name)?;
        let name: String = spec.name.trim().to_string();
        ensure_unique_team_name(conn, cluster_id, &name, None)?;

        let now: String = now_timestamp();
        let team_id: i64 = mutations::insert_team(
            conn,
            &NewTeamRow {
                cluster_id,
                name,
                description: spec.description.clone(),
                enable_team_lead: spec.enable_lead,
                enable_backup_team_lead: spec.enable_backup_lead,
                created_at: now.clone(),
                updated_at: now,
            },
        )?;

        info!(cluster_id, team_id, actor_id, "Created team");
        queries::get_team(conn, team_id).map_err(CoreError::from)
    })
}

/// Updates a team's editable fields.
///
/// Disabling a leadership flag clears the corresponding slot in the same
/// transaction. The team roster is untouched.
///
/// # Errors
///
/// Returns an error if the team is missing, the actor may not manage the
/// owning camp, or the name is invalid or already used.
pub fn update_team(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    spec: &SubgroupSpec,
) -> Result<Team, CoreError> {
    persistence.immediate_transaction(|conn| {
        let team: Team = require_team(conn, team_id)?;
        let cluster: Cluster = require_cluster(conn, team.cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;
        validate_name(&spec.name)?;
        let name: String = spec.name.trim().to_string();
        ensure_unique_team_name(conn, team.cluster_id, &name, Some(team_id))?;

        if !spec.enable_lead && team.leadership.lead_id.is_some() {
            mutations::clear_team_slot(conn, team_id, campstead_domain::LeadershipRole::Lead)?;
        }
        if !spec.enable_backup_lead && team.leadership.backup_lead_id.is_some() {
            mutations::clear_team_slot(
                conn,
                team_id,
                campstead_domain::LeadershipRole::BackupLead,
            )?;
        }

        mutations::update_team(
            conn,
            team_id,
            &TeamChanges {
                name,
                description: spec.description.clone(),
                enable_team_lead: spec.enable_lead,
                enable_backup_team_lead: spec.enable_backup_lead,
                updated_at: now_timestamp(),
            },
        )?;

        info!(team_id, actor_id, "Updated team");
        queries::get_team(conn, team_id).map_err(CoreError::from)
    })
}

/// Deletes a team. Its roster rows and both slots go with the row;
/// camp and cluster slots are unaffected.
///
/// # Errors
///
/// Returns an error if the team is missing or the actor may not manage
/// the owning camp.
pub fn delete_team(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        let team: Team = require_team(conn, team_id)?;
        let cluster: Cluster = require_cluster(conn, team.cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;

        mutations::delete_team(conn, team_id)?;
        info!(team_id, actor_id, "Deleted team");
        Ok(())
    })
}
