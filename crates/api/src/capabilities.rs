// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Advisory capability read model.
//!
//! Tells a UI what the actor could do so it can show or hide controls.
//! This is purely informational; the engine re-authorizes every mutation,
//! so a stale or optimistic answer here cannot grant authority.

use serde::Serialize;

use campstead::{directory, views};
use campstead_domain::{CampRole, GlobalRole, MembershipStatus, UserRef};
use campstead_persistence::Persistence;

use crate::error::{ApiError, translate_core_error};

/// What the actor is currently permitted to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCapabilities {
    /// The actor's site-wide role.
    pub global_role: GlobalRole,
    /// May create events (event manager or higher).
    pub can_create_events: bool,
    /// May approve or reject pending events (site admin or higher).
    pub can_publish_events: bool,
    /// May manage every camp regardless of membership (site admin or
    /// higher).
    pub can_manage_any_camp: bool,
    /// Camps where the actor holds an approved manager membership.
    pub managed_camp_ids: Vec<i64>,
}

/// Resolves the capability summary for an actor.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown actor, or `Internal` on a
/// storage failure.
pub fn capabilities_for(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<ActorCapabilities, ApiError> {
    let user: UserRef = directory::get_user(persistence, actor_id).map_err(translate_core_error)?;
    let role: GlobalRole = user.global_role;

    let managed_camp_ids: Vec<i64> = views::my_memberships(persistence, actor_id)
        .map_err(translate_core_error)?
        .into_iter()
        .filter(|m| m.status == MembershipStatus::Approved && m.role == CampRole::Manager)
        .map(|m| m.camp_id)
        .collect();

    Ok(ActorCapabilities {
        global_role: role,
        can_create_events: role.is_event_manager_or_higher(),
        can_publish_events: role.is_site_admin_or_higher(),
        can_manage_any_camp: role.is_site_admin_or_higher(),
        managed_camp_ids,
    })
}
