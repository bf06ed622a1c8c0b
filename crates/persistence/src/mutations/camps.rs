// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for the camp / cluster / team hierarchy, including the
//! compare-and-set leadership slot claims.

use diesel::prelude::*;

use campstead_domain::LeadershipRole;

use crate::data_models::{NewCampRow, NewClusterRow, NewTeamRow};
use crate::diesel_schema::{camps, clusters, teams};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Full-replacement changeset for a camp's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = camps)]
#[diesel(treat_none_as_null = true)]
pub struct CampChanges {
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
    pub updated_at: String,
}

/// Full-replacement changeset for a cluster's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clusters)]
#[diesel(treat_none_as_null = true)]
pub struct ClusterChanges {
    pub name: String,
    pub description: Option<String>,
    pub enable_cluster_lead: bool,
    pub enable_backup_cluster_lead: bool,
    pub updated_at: String,
}

/// Full-replacement changeset for a team's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = teams)]
#[diesel(treat_none_as_null = true)]
pub struct TeamChanges {
    pub name: String,
    pub description: Option<String>,
    pub enable_team_lead: bool,
    pub enable_backup_team_lead: bool,
    pub updated_at: String,
}

/// Inserts a camp and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_camp(conn: &mut SqliteConnection, row: &NewCampRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(camps::table).values(row).execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Applies a full-replacement update to a camp.
///
/// # Returns
///
/// The number of rows updated (0 if the camp does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_camp(
    conn: &mut SqliteConnection,
    camp_id: i64,
    changes: &CampChanges,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(camps::table.filter(camps::camp_id.eq(camp_id)))
        .set(changes)
        .execute(conn)?)
}

/// Deletes a camp. Clusters, teams, rosters, and associations cascade.
///
/// # Returns
///
/// The number of rows deleted (0 if the camp does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_camp(conn: &mut SqliteConnection, camp_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(camps::table.filter(camps::camp_id.eq(camp_id))).execute(conn)?)
}

/// Claims an empty camp leadership slot for a user.
///
/// Compare-and-set: the `WHERE` clause requires the slot to still be
/// empty, so a concurrent claim loses with a row count of 0.
///
/// # Returns
///
/// The number of rows updated (0 if the slot was already occupied or the
/// camp does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn claim_camp_slot(
    conn: &mut SqliteConnection,
    camp_id: i64,
    role: LeadershipRole,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => diesel::update(
            camps::table
                .filter(camps::camp_id.eq(camp_id))
                .filter(camps::camp_lead_id.is_null()),
        )
        .set(camps::camp_lead_id.eq(Some(user_id)))
        .execute(conn)?,
        LeadershipRole::BackupLead => diesel::update(
            camps::table
                .filter(camps::camp_id.eq(camp_id))
                .filter(camps::backup_camp_lead_id.is_null()),
        )
        .set(camps::backup_camp_lead_id.eq(Some(user_id)))
        .execute(conn)?,
    };
    Ok(rows)
}

/// Clears a camp leadership slot.
///
/// # Returns
///
/// The number of rows updated (0 if the camp does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_camp_slot(
    conn: &mut SqliteConnection,
    camp_id: i64,
    role: LeadershipRole,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => {
            diesel::update(camps::table.filter(camps::camp_id.eq(camp_id)))
                .set(camps::camp_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
        LeadershipRole::BackupLead => {
            diesel::update(camps::table.filter(camps::camp_id.eq(camp_id)))
                .set(camps::backup_camp_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
    };
    Ok(rows)
}

/// Inserts a cluster and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate name
/// within the camp).
pub fn insert_cluster(
    conn: &mut SqliteConnection,
    row: &NewClusterRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(clusters::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Applies a full-replacement update to a cluster.
///
/// # Returns
///
/// The number of rows updated (0 if the cluster does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_cluster(
    conn: &mut SqliteConnection,
    cluster_id: i64,
    changes: &ClusterChanges,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::update(clusters::table.filter(clusters::cluster_id.eq(cluster_id)))
            .set(changes)
            .execute(conn)?,
    )
}

/// Deletes a cluster. Teams and their rosters cascade.
///
/// # Returns
///
/// The number of rows deleted (0 if the cluster does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_cluster(
    conn: &mut SqliteConnection,
    cluster_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(clusters::table.filter(clusters::cluster_id.eq(cluster_id))).execute(conn)?)
}

/// Claims an empty cluster leadership slot for a user.
///
/// Compare-and-set, same contract as [`claim_camp_slot`].
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn claim_cluster_slot(
    conn: &mut SqliteConnection,
    cluster_id: i64,
    role: LeadershipRole,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => diesel::update(
            clusters::table
                .filter(clusters::cluster_id.eq(cluster_id))
                .filter(clusters::cluster_lead_id.is_null()),
        )
        .set(clusters::cluster_lead_id.eq(Some(user_id)))
        .execute(conn)?,
        LeadershipRole::BackupLead => diesel::update(
            clusters::table
                .filter(clusters::cluster_id.eq(cluster_id))
                .filter(clusters::backup_cluster_lead_id.is_null()),
        )
        .set(clusters::backup_cluster_lead_id.eq(Some(user_id)))
        .execute(conn)?,
    };
    Ok(rows)
}

/// Clears a cluster leadership slot.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_cluster_slot(
    conn: &mut SqliteConnection,
    cluster_id: i64,
    role: LeadershipRole,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => {
            diesel::update(clusters::table.filter(clusters::cluster_id.eq(cluster_id)))
                .set(clusters::cluster_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
        LeadershipRole::BackupLead => {
            diesel::update(clusters::table.filter(clusters::cluster_id.eq(cluster_id)))
                .set(clusters::backup_cluster_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
    };
    Ok(rows)
}

/// Inserts a team and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate name
/// within the cluster).
pub fn insert_team(conn: &mut SqliteConnection, row: &NewTeamRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table).values(row).execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Applies a full-replacement update to a team.
///
/// # Returns
///
/// The number of rows updated (0 if the team does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_team(
    conn: &mut SqliteConnection,
    team_id: i64,
    changes: &TeamChanges,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set(changes)
        .execute(conn)?)
}

/// Deletes a team. Its roster cascades.
///
/// # Returns
///
/// The number of rows deleted (0 if the team does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_team(conn: &mut SqliteConnection, team_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(teams::table.filter(teams::team_id.eq(team_id))).execute(conn)?)
}

/// Claims an empty team leadership slot for a user.
///
/// Compare-and-set, same contract as [`claim_camp_slot`].
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn claim_team_slot(
    conn: &mut SqliteConnection,
    team_id: i64,
    role: LeadershipRole,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => diesel::update(
            teams::table
                .filter(teams::team_id.eq(team_id))
                .filter(teams::team_lead_id.is_null()),
        )
        .set(teams::team_lead_id.eq(Some(user_id)))
        .execute(conn)?,
        LeadershipRole::BackupLead => diesel::update(
            teams::table
                .filter(teams::team_id.eq(team_id))
                .filter(teams::backup_team_lead_id.is_null()),
        )
        .set(teams::backup_team_lead_id.eq(Some(user_id)))
        .execute(conn)?,
    };
    Ok(rows)
}

/// Clears a team leadership slot.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_team_slot(
    conn: &mut SqliteConnection,
    team_id: i64,
    role: LeadershipRole,
) -> Result<usize, PersistenceError> {
    let rows: usize = match role {
        LeadershipRole::Lead => {
            diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
                .set(teams::team_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
        LeadershipRole::BackupLead => {
            diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
                .set(teams::backup_team_lead_id.eq(None::<i64>))
                .execute(conn)?
        }
    };
    Ok(rows)
}
