// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The single leadership slot assignment path.
//!
//! Camps, clusters, and teams all carry the same lead/backup-lead slot
//! pair, so one operation serves all three scopes. Claims on an empty
//! slot are compare-and-set against the store; a racing claimant loses
//! with a row count of 0 and is reported the observed holder.

use diesel::SqliteConnection;
use tracing::info;

use campstead_domain::{
    Actor, Capability, DomainError, LeadershipRole, LeadershipScope, LeadershipSlots,
    MembershipStatus, authorize, violates_mutual_exclusion,
};
use campstead_persistence::data_models::NewTeamMemberRow;
use campstead_persistence::{Persistence, mutations, queries};

use crate::error::CoreError;
use crate::{actor, hierarchy, now_timestamp};

/// A scope's slot pair together with the camp that owns the scope.
struct ScopeState {
    slots: LeadershipSlots,
    camp_id: i64,
}

fn load_scope(conn: &mut SqliteConnection, scope: LeadershipScope) -> Result<ScopeState, CoreError> {
    match scope {
        LeadershipScope::Camp(camp_id) => {
            let camp = hierarchy::require_camp(conn, camp_id)?;
            Ok(ScopeState {
                slots: camp.leadership,
                camp_id,
            })
        }
        LeadershipScope::Cluster(cluster_id) => {
            let cluster = hierarchy::require_cluster(conn, cluster_id)?;
            Ok(ScopeState {
                slots: cluster.leadership,
                camp_id: cluster.camp_id,
            })
        }
        LeadershipScope::Team(team_id) => {
            let team = hierarchy::require_team(conn, team_id)?;
            let cluster = hierarchy::require_cluster(conn, team.cluster_id)?;
            Ok(ScopeState {
                slots: team.leadership,
                camp_id: cluster.camp_id,
            })
        }
    }
}

fn clear_slot(
    conn: &mut SqliteConnection,
    scope: LeadershipScope,
    role: LeadershipRole,
) -> Result<usize, CoreError> {
    let rows: usize = match scope {
        LeadershipScope::Camp(id) => mutations::clear_camp_slot(conn, id, role)?,
        LeadershipScope::Cluster(id) => mutations::clear_cluster_slot(conn, id, role)?,
        LeadershipScope::Team(id) => mutations::clear_team_slot(conn, id, role)?,
    };
    Ok(rows)
}

fn claim_slot(
    conn: &mut SqliteConnection,
    scope: LeadershipScope,
    role: LeadershipRole,
    user_id: i64,
) -> Result<usize, CoreError> {
    let rows: usize = match scope {
        LeadershipScope::Camp(id) => mutations::claim_camp_slot(conn, id, role, user_id)?,
        LeadershipScope::Cluster(id) => mutations::claim_cluster_slot(conn, id, role, user_id)?,
        LeadershipScope::Team(id) => mutations::claim_team_slot(conn, id, role, user_id)?,
    };
    Ok(rows)
}

/// Assigns or clears a leadership slot at any scope.
///
/// `candidate` of `Some(user)` assigns the slot; `None` clears it.
/// Managers of the owning camp (and site admins up) may assign anyone
/// eligible and may reassign an occupied slot. Any approved camp member
/// may self-claim an empty slot or clear their own; they cannot displace
/// another holder.
///
/// Assigning a team slot to a user not yet on the team roster adds them
/// to it; clearing a slot never removes the roster row.
///
/// # Errors
///
/// In precedence order: `NotFound` (scope), `RoleDisabled`, `Forbidden`,
/// `NotFound` (candidate), `NotEligible`, `SlotOccupied`,
/// `MutualExclusion`.
pub fn assign(
    persistence: &mut Persistence,
    actor_id: i64,
    scope: LeadershipScope,
    role: LeadershipRole,
    candidate: Option<i64>,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        let state: ScopeState = load_scope(conn, scope)?;
        if !state.slots.is_enabled(role) {
            return Err(DomainError::RoleDisabled {
                scope: scope.kind(),
                scope_id: scope.id(),
                role,
            }
            .into());
        }

        let acting: Actor = actor::resolve_for_camp(conn, actor_id, state.camp_id)?;
        let manage: Result<(), DomainError> = authorize(
            &acting,
            &Capability::ManageCamp {
                camp_id: state.camp_id,
            },
        );

        let can_reassign: bool = manage.is_ok();

        let Some(user_id) = candidate else {
            // Clearing. Allowed for managers, and for the holder themselves.
            if !can_reassign && state.slots.holder(role) != Some(actor_id) {
                manage?;
            }
            clear_slot(conn, scope, role)?;
            info!(%scope, %role, actor_id, "Cleared leadership slot");
            return Ok(());
        };

        // Self-claims proceed without manage authority; the occupied-slot
        // check below stops them from displacing anyone.
        if !can_reassign && user_id != actor_id {
            manage?;
        }

        if queries::get_user_opt(conn, user_id)?.is_none() {
            return Err(CoreError::not_found("user", user_id));
        }

        let eligible: bool = queries::get_membership_opt(conn, state.camp_id, user_id)?
            .is_some_and(|m| m.status == MembershipStatus::Approved);
        if !eligible {
            return Err(DomainError::NotEligible {
                user_id,
                camp_id: state.camp_id,
            }
            .into());
        }

        match state.slots.holder(role) {
            Some(holder_id) if holder_id == user_id => return Ok(()),
            Some(holder_id) if !can_reassign => {
                return Err(DomainError::SlotOccupied {
                    scope: scope.kind(),
                    scope_id: scope.id(),
                    role,
                    holder_id,
                }
                .into());
            }
            Some(_) => {
                clear_slot(conn, scope, role)?;
            }
            None => {}
        }

        if violates_mutual_exclusion(&state.slots, role, user_id) {
            return Err(DomainError::MutualExclusion {
                scope: scope.kind(),
                scope_id: scope.id(),
                user_id,
            }
            .into());
        }

        if let LeadershipScope::Team(team_id) = scope
            && queries::get_team_member_opt(conn, team_id, user_id)?.is_none()
        {
            mutations::insert_team_member(
                conn,
                &NewTeamMemberRow {
                    team_id,
                    user_id,
                    joined_at: now_timestamp(),
                },
            )?;
        }

        let rows: usize = claim_slot(conn, scope, role, user_id)?;
        if rows == 0 {
            // Lost a race for the slot; report whoever got there first.
            let observed: ScopeState = load_scope(conn, scope)?;
            let holder_id: i64 = observed.slots.holder(role).unwrap_or(user_id);
            return Err(DomainError::SlotOccupied {
                scope: scope.kind(),
                scope_id: scope.id(),
                role,
                holder_id,
            }
            .into());
        }

        info!(%scope, %role, user_id, actor_id, "Assigned leadership slot");
        Ok(())
    })
}
