// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries against the identity directory mirror.

use diesel::prelude::*;

use campstead_domain::UserRef;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the user does not exist or the query fails.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserRef, PersistenceError> {
    let row: UserRow = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)?;
    row.into_domain()
}

/// Retrieves a user by ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_user_opt(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserRef>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;
    row.map(UserRow::into_domain).transpose()
}

/// Retrieves a batch of users by ID, in no particular order.
///
/// Missing IDs are silently skipped; callers that care about absence
/// should use [`get_user`] per ID instead.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_users_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<UserRef>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::user_id.eq_any(ids))
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_domain).collect()
}
