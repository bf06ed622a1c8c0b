// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor resolution against the identity directory mirror.

use diesel::SqliteConnection;

use campstead_domain::{Actor, DomainError, MembershipStatus, UserRef};
use campstead_persistence::queries;

use crate::error::CoreError;

/// Resolves the acting user from the directory mirror.
///
/// # Errors
///
/// Returns `NotFound` if the user is unknown to the mirror.
pub(crate) fn resolve(conn: &mut SqliteConnection, user_id: i64) -> Result<Actor, CoreError> {
    let user: UserRef = queries::get_user_opt(conn, user_id)?
        .ok_or(DomainError::NotFound {
            resource: "user",
            id: user_id,
        })?;
    Ok(Actor::new(user.id, user.global_role))
}

/// Resolves the acting user and attaches their approved role in `camp_id`.
///
/// A pending or rejected membership confers no camp role.
///
/// # Errors
///
/// Returns `NotFound` if the user is unknown to the mirror.
pub(crate) fn resolve_for_camp(
    conn: &mut SqliteConnection,
    user_id: i64,
    camp_id: i64,
) -> Result<Actor, CoreError> {
    let actor: Actor = resolve(conn, user_id)?;
    let camp_role = queries::get_membership_opt(conn, camp_id, user_id)?
        .filter(|m| m.status == MembershipStatus::Approved)
        .map(|m| m.role);
    Ok(actor.with_camp_role(camp_role))
}
