// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity directory synchronization.
//!
//! User identities and global roles are owned by an external directory;
//! the engine only mirrors them. Sync is an unconditional upsert keyed
//! on the user ID.

use tracing::debug;

use campstead_domain::UserRef;
use campstead_persistence::data_models::UserRow;
use campstead_persistence::{Persistence, mutations, queries};

use crate::error::CoreError;

/// Inserts or refreshes a directory mirror entry.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn sync_user(persistence: &mut Persistence, user: &UserRef) -> Result<UserRef, CoreError> {
    persistence.immediate_transaction(|conn| {
        mutations::upsert_user(
            conn,
            &UserRow {
                user_id: user.id,
                display_name: user.display_name.clone(),
                pronouns: user.pronouns.clone(),
                global_role: user.global_role.as_str().to_string(),
            },
        )?;
        debug!(user_id = user.id, "Synced directory entry");
        queries::get_user(conn, user.id).map_err(CoreError::from)
    })
}

/// Looks up a mirrored directory entry.
///
/// # Errors
///
/// Returns `NotFound` if the user is unknown to the mirror.
pub fn get_user(persistence: &mut Persistence, user_id: i64) -> Result<UserRef, CoreError> {
    let conn = persistence.connection();
    queries::get_user_opt(conn, user_id)?.ok_or(CoreError::not_found("user", user_id))
}
