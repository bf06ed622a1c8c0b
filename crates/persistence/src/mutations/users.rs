// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for the identity directory mirror.

use diesel::prelude::*;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Inserts or refreshes a directory entry.
///
/// User identities are owned by the external directory; this mirror only
/// records what the directory last told us, so conflicts on `user_id`
/// always resolve in favor of the incoming row.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_user(conn: &mut SqliteConnection, row: &UserRow) -> Result<(), PersistenceError> {
    diesel::insert_into(users::table)
        .values(row)
        .on_conflict(users::user_id)
        .do_update()
        .set((
            users::display_name.eq(&row.display_name),
            users::pronouns.eq(&row.pronouns),
            users::global_role.eq(&row.global_role),
        ))
        .execute(conn)?;
    Ok(())
}
