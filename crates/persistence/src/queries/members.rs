// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for camp rosters and team rosters.

use diesel::prelude::*;

use campstead_domain::{Membership, MembershipStatus, TeamMembership};

use crate::data_models::{MembershipRow, TeamMemberRow};
use crate::diesel_schema::{camp_members, team_members};
use crate::error::PersistenceError;

/// Retrieves the membership of a user in a camp, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_membership_opt(
    conn: &mut SqliteConnection,
    camp_id: i64,
    user_id: i64,
) -> Result<Option<Membership>, PersistenceError> {
    let row: Option<MembershipRow> = camp_members::table
        .filter(camp_members::camp_id.eq(camp_id))
        .filter(camp_members::user_id.eq(user_id))
        .select(MembershipRow::as_select())
        .first(conn)
        .optional()?;
    row.map(MembershipRow::into_domain).transpose()
}

/// Retrieves a membership by its row ID.
///
/// # Errors
///
/// Returns an error if the membership does not exist or the query fails.
pub fn get_membership_by_id(
    conn: &mut SqliteConnection,
    membership_id: i64,
) -> Result<Membership, PersistenceError> {
    let row: MembershipRow = camp_members::table
        .filter(camp_members::membership_id.eq(membership_id))
        .select(MembershipRow::as_select())
        .first(conn)?;
    row.into_domain()
}

/// Retrieves a membership by its row ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_membership_by_id_opt(
    conn: &mut SqliteConnection,
    membership_id: i64,
) -> Result<Option<Membership>, PersistenceError> {
    let row: Option<MembershipRow> = camp_members::table
        .filter(camp_members::membership_id.eq(membership_id))
        .select(MembershipRow::as_select())
        .first(conn)
        .optional()?;
    row.map(MembershipRow::into_domain).transpose()
}

/// Lists the memberships of a camp with the given status, oldest request first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_members_by_status(
    conn: &mut SqliteConnection,
    camp_id: i64,
    status: MembershipStatus,
) -> Result<Vec<Membership>, PersistenceError> {
    let rows: Vec<MembershipRow> = camp_members::table
        .filter(camp_members::camp_id.eq(camp_id))
        .filter(camp_members::status.eq(status.as_str()))
        .order(camp_members::requested_at.asc())
        .select(MembershipRow::as_select())
        .load(conn)?;
    rows.into_iter().map(MembershipRow::into_domain).collect()
}

/// Lists every membership a user holds across all camps.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_memberships_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Membership>, PersistenceError> {
    let rows: Vec<MembershipRow> = camp_members::table
        .filter(camp_members::user_id.eq(user_id))
        .order(camp_members::camp_id.asc())
        .select(MembershipRow::as_select())
        .load(conn)?;
    rows.into_iter().map(MembershipRow::into_domain).collect()
}

/// Retrieves the team roster entry of a user, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_team_member_opt(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<Option<TeamMembership>, PersistenceError> {
    let row: Option<TeamMemberRow> = team_members::table
        .filter(team_members::team_id.eq(team_id))
        .filter(team_members::user_id.eq(user_id))
        .select(TeamMemberRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(TeamMemberRow::into_domain))
}

/// Lists the roster of a team, oldest joiner first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_team_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<TeamMembership>, PersistenceError> {
    let rows: Vec<TeamMemberRow> = team_members::table
        .filter(team_members::team_id.eq(team_id))
        .order(team_members::joined_at.asc())
        .select(TeamMemberRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(TeamMemberRow::into_domain).collect())
}
