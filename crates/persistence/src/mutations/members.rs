// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for camp rosters and team rosters.

use diesel::prelude::*;

use campstead_domain::{CampRole, MembershipStatus};

use crate::data_models::{NewMembershipRow, NewTeamMemberRow};
use crate::diesel_schema::{camp_members, team_members};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a camp membership row and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// `(camp_id, user_id)` pair).
pub fn insert_membership(
    conn: &mut SqliteConnection,
    row: &NewMembershipRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(camp_members::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Deletes a camp membership row.
///
/// # Returns
///
/// The number of rows deleted (0 if the membership does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_membership(
    conn: &mut SqliteConnection,
    membership_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(camp_members::table.filter(camp_members::membership_id.eq(membership_id)))
            .execute(conn)?,
    )
}

/// Decides a pending membership request.
///
/// Compare-and-set: the `WHERE` clause requires the row to still be
/// pending, so a concurrent decision loses with a row count of 0.
///
/// # Returns
///
/// The number of rows updated (0 if the request was already decided or
/// does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn decide_membership(
    conn: &mut SqliteConnection,
    membership_id: i64,
    new_status: MembershipStatus,
    approved_at: Option<&str>,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        camp_members::table
            .filter(camp_members::membership_id.eq(membership_id))
            .filter(camp_members::status.eq(MembershipStatus::Pending.as_str())),
    )
    .set((
        camp_members::status.eq(new_status.as_str()),
        camp_members::approved_at.eq(approved_at),
    ))
    .execute(conn)?)
}

/// Sets the camp role of a membership.
///
/// # Returns
///
/// The number of rows updated (0 if the membership does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_membership_role(
    conn: &mut SqliteConnection,
    membership_id: i64,
    role: CampRole,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::update(camp_members::table.filter(camp_members::membership_id.eq(membership_id)))
            .set(camp_members::role.eq(role.as_str()))
            .execute(conn)?,
    )
}

/// Inserts a team roster row and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// `(team_id, user_id)` pair).
pub fn insert_team_member(
    conn: &mut SqliteConnection,
    row: &NewTeamMemberRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(team_members::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Removes a user from a team roster.
///
/// # Returns
///
/// The number of rows deleted (0 if the user was not on the roster).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        team_members::table
            .filter(team_members::team_id.eq(team_id))
            .filter(team_members::user_id.eq(user_id)),
    )
    .execute(conn)?)
}
