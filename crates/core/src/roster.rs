// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Camp membership admission requests, camp roles, and team rosters.

use tracing::info;

use campstead_domain::{
    Actor, CampRole, Capability, Cluster, DomainError, Membership, MembershipStatus, Team,
    TeamMembership, authorize,
};
use campstead_persistence::data_models::{NewMembershipRow, NewTeamMemberRow};
use campstead_persistence::{Persistence, mutations, queries};

use crate::error::CoreError;
use crate::{actor, hierarchy, now_timestamp};

/// Requests admission into a camp on behalf of the actor.
///
/// A rejected request does not block forever: the old row is replaced by
/// a fresh pending one. A pending or approved membership does.
///
/// # Errors
///
/// Returns `NotFound` if the camp or actor is unknown, or
/// `DuplicateRequest` if a pending or approved membership already exists.
pub fn request_membership(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
) -> Result<Membership, CoreError> {
    persistence.immediate_transaction(|conn| {
        hierarchy::require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve(conn, actor_id)?;

        if let Some(existing) = queries::get_membership_opt(conn, camp_id, acting.user_id)? {
            match existing.status {
                MembershipStatus::Pending | MembershipStatus::Approved => {
                    return Err(DomainError::DuplicateRequest {
                        subject: "membership",
                        detail: format!(
                            "user {} in camp {camp_id} (status: {})",
                            acting.user_id, existing.status
                        ),
                    }
                    .into());
                }
                MembershipStatus::Rejected => {
                    mutations::delete_membership(conn, existing.id)?;
                }
            }
        }

        let membership_id: i64 = mutations::insert_membership(
            conn,
            &NewMembershipRow {
                camp_id,
                user_id: acting.user_id,
                status: MembershipStatus::Pending.as_str().to_string(),
                role: CampRole::Member.as_str().to_string(),
                requested_at: now_timestamp(),
                approved_at: None,
            },
        )?;

        info!(camp_id, user_id = acting.user_id, "Requested camp membership");
        queries::get_membership_by_id(conn, membership_id).map_err(CoreError::from)
    })
}

/// Promotes or demotes an approved camp member.
///
/// Demoting the last manager is permitted; site admins can still reach
/// the camp afterwards.
///
/// # Errors
///
/// Returns `Forbidden` if the actor may not manage the camp, or
/// `NotEligible` if the target holds no approved membership there.
pub fn set_membership_role(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    user_id: i64,
    role: CampRole,
) -> Result<Membership, CoreError> {
    persistence.immediate_transaction(|conn| {
        hierarchy::require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;

        let membership: Membership = queries::get_membership_opt(conn, camp_id, user_id)?
            .filter(|m| m.status == MembershipStatus::Approved)
            .ok_or(DomainError::NotEligible { user_id, camp_id })?;

        mutations::set_membership_role(conn, membership.id, role)?;
        info!(camp_id, user_id, role = %role, actor_id, "Set camp role");
        queries::get_membership_by_id(conn, membership.id).map_err(CoreError::from)
    })
}

/// Adds an approved camp member to a team roster.
///
/// Camp managers may add anyone eligible; members may add themselves.
///
/// # Errors
///
/// Returns `NotEligible` if the target holds no approved membership in
/// the owning camp, or `DuplicateRequest` if they are already rostered.
pub fn add_team_member(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    user_id: i64,
) -> Result<TeamMembership, CoreError> {
    persistence.immediate_transaction(|conn| {
        let team: Team = hierarchy::require_team(conn, team_id)?;
        let cluster: Cluster = hierarchy::require_cluster(conn, team.cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        if user_id != actor_id {
            authorize(&acting, &Capability::ManageCamp { camp_id })?;
        }

        if queries::get_user_opt(conn, user_id)?.is_none() {
            return Err(CoreError::not_found("user", user_id));
        }
        let eligible: bool = queries::get_membership_opt(conn, camp_id, user_id)?
            .is_some_and(|m| m.status == MembershipStatus::Approved);
        if !eligible {
            return Err(DomainError::NotEligible { user_id, camp_id }.into());
        }

        if queries::get_team_member_opt(conn, team_id, user_id)?.is_some() {
            return Err(DomainError::DuplicateRequest {
                subject: "team roster",
                detail: format!("user {user_id} on team {team_id}"),
            }
            .into());
        }

        mutations::insert_team_member(
            conn,
            &NewTeamMemberRow {
                team_id,
                user_id,
                joined_at: now_timestamp(),
            },
        )?;

        info!(team_id, user_id, actor_id, "Added team member");
        queries::get_team_member_opt(conn, team_id, user_id)?
            .ok_or(CoreError::not_found("team member", user_id))
    })
}

/// Removes a user from a team roster.
///
/// Camp managers may remove anyone; members may remove themselves. A
/// user holding a leadership slot on the team must have it cleared
/// first.
///
/// # Errors
///
/// Returns `LeadershipHeld` if the user holds a slot on the team, or
/// `NotFound` if they are not on the roster.
pub fn remove_team_member(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    user_id: i64,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        let team: Team = hierarchy::require_team(conn, team_id)?;
        let cluster: Cluster = hierarchy::require_cluster(conn, team.cluster_id)?;
        let camp_id: i64 = cluster.camp_id;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        if user_id != actor_id {
            authorize(&acting, &Capability::ManageCamp { camp_id })?;
        }

        if team.leadership.holds_any(user_id) {
            return Err(DomainError::LeadershipHeld { team_id, user_id }.into());
        }

        let rows: usize = mutations::delete_team_member(conn, team_id, user_id)?;
        if rows == 0 {
            return Err(CoreError::not_found("team member", user_id));
        }

        info!(team_id, user_id, actor_id, "Removed team member");
        Ok(())
    })
}
