// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for the camp / cluster / team hierarchy.

use diesel::prelude::*;

use campstead_domain::{Camp, Cluster, Team};

use crate::data_models::{CampRow, ClusterRow, TeamRow};
use crate::diesel_schema::{camps, clusters, teams};
use crate::error::PersistenceError;

/// Retrieves a camp by ID.
///
/// # Errors
///
/// Returns an error if the camp does not exist or the query fails.
pub fn get_camp(conn: &mut SqliteConnection, camp_id: i64) -> Result<Camp, PersistenceError> {
    let row: CampRow = camps::table
        .filter(camps::camp_id.eq(camp_id))
        .select(CampRow::as_select())
        .first(conn)?;
    row.into_domain()
}

/// Retrieves a camp by ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_camp_opt(
    conn: &mut SqliteConnection,
    camp_id: i64,
) -> Result<Option<Camp>, PersistenceError> {
    let row: Option<CampRow> = camps::table
        .filter(camps::camp_id.eq(camp_id))
        .select(CampRow::as_select())
        .first(conn)
        .optional()?;
    row.map(CampRow::into_domain).transpose()
}

/// Lists all camps ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_camps(conn: &mut SqliteConnection) -> Result<Vec<Camp>, PersistenceError> {
    let rows: Vec<CampRow> = camps::table
        .order(camps::name.asc())
        .select(CampRow::as_select())
        .load(conn)?;
    rows.into_iter().map(CampRow::into_domain).collect()
}

/// Retrieves a cluster by ID.
///
/// # Errors
///
/// Returns an error if the cluster does not exist or the query fails.
pub fn get_cluster(
    conn: &mut SqliteConnection,
    cluster_id: i64,
) -> Result<Cluster, PersistenceError> {
    let row: ClusterRow = clusters::table
        .filter(clusters::cluster_id.eq(cluster_id))
        .select(ClusterRow::as_select())
        .first(conn)?;
    Ok(row.into_domain())
}

/// Retrieves a cluster by ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_cluster_opt(
    conn: &mut SqliteConnection,
    cluster_id: i64,
) -> Result<Option<Cluster>, PersistenceError> {
    let row: Option<ClusterRow> = clusters::table
        .filter(clusters::cluster_id.eq(cluster_id))
        .select(ClusterRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(ClusterRow::into_domain))
}

/// Lists the clusters of a camp ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clusters_for_camp(
    conn: &mut SqliteConnection,
    camp_id: i64,
) -> Result<Vec<Cluster>, PersistenceError> {
    let rows: Vec<ClusterRow> = clusters::table
        .filter(clusters::camp_id.eq(camp_id))
        .order(clusters::name.asc())
        .select(ClusterRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(ClusterRow::into_domain).collect())
}

/// Retrieves a team by ID.
///
/// # Errors
///
/// Returns an error if the team does not exist or the query fails.
pub fn get_team(conn: &mut SqliteConnection, team_id: i64) -> Result<Team, PersistenceError> {
    let row: TeamRow = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn)?;
    Ok(row.into_domain())
}

/// Retrieves a team by ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_team_opt(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(TeamRow::into_domain))
}

/// Lists the teams of a cluster ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_teams_for_cluster(
    conn: &mut SqliteConnection,
    cluster_id: i64,
) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::cluster_id.eq(cluster_id))
        .order(teams::name.asc())
        .select(TeamRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(TeamRow::into_domain).collect())
}
