// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read models with leadership slots and rosters resolved to users.
//!
//! Detail views are public reads. The pending queues are actor-scoped:
//! each returns only the requests the actor is entitled to decide, using
//! the same capability checks as the decision paths themselves.

use diesel::SqliteConnection;
use serde::Serialize;

use campstead_domain::{
    Actor, Association, AssociationStatus, Camp, Capability, Cluster, Event, EventRegistration,
    EventStatus, LeadershipSlots, Membership, MembershipStatus, Team, UserRef, authorize,
};
use campstead_persistence::{Persistence, queries};

use crate::actor;
use crate::error::CoreError;

/// A scope's slot pair with holders resolved to directory entries.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSlots {
    pub enable_lead: bool,
    pub enable_backup_lead: bool,
    pub lead: Option<UserRef>,
    pub backup_lead: Option<UserRef>,
}

/// A team with leadership and roster resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    pub team: Team,
    pub leadership: ResolvedSlots,
    pub members: Vec<UserRef>,
}

/// A cluster with leadership and its teams resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterDetail {
    pub cluster: Cluster,
    pub leadership: ResolvedSlots,
    pub teams: Vec<TeamDetail>,
}

/// An approved camp member with their directory entry.
#[derive(Debug, Clone, Serialize)]
pub struct CampMemberView {
    pub membership: Membership,
    pub user: UserRef,
}

/// A camp with leadership, structure, and the approved roster resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CampDetail {
    pub camp: Camp,
    pub leadership: ResolvedSlots,
    pub clusters: Vec<ClusterDetail>,
    pub members: Vec<CampMemberView>,
}

/// A camp's presence at an event.
#[derive(Debug, Clone, Serialize)]
pub struct AssociatedCampView {
    pub camp: Camp,
    /// Camp location override at this event, if any.
    pub location: Option<String>,
}

/// An event with its approved camps resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub associated_camps: Vec<AssociatedCampView>,
}

/// A camp's association with an event, in any status.
#[derive(Debug, Clone, Serialize)]
pub struct CampAssociationView {
    pub association: Association,
    pub event_title: String,
}

/// An attendee registration resolved to its directory entry.
#[derive(Debug, Clone, Serialize)]
pub struct EventRosterEntry {
    pub registration: EventRegistration,
    pub user: UserRef,
}

/// A pending membership request awaiting the actor's decision.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipQueueEntry {
    pub camp_id: i64,
    pub camp_name: String,
    pub membership: Membership,
    pub user: UserRef,
}

/// A pending association request awaiting the actor's decision.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationQueueEntry {
    pub association: Association,
    pub camp_name: String,
    pub event_title: String,
}

fn resolve_slots(
    conn: &mut SqliteConnection,
    slots: &LeadershipSlots,
) -> Result<ResolvedSlots, CoreError> {
    let lead: Option<UserRef> = match slots.lead_id {
        Some(id) if slots.enable_lead => queries::get_user_opt(conn, id)?,
        _ => None,
    };
    let backup_lead: Option<UserRef> = match slots.backup_lead_id {
        Some(id) if slots.enable_backup_lead => queries::get_user_opt(conn, id)?,
        _ => None,
    };
    Ok(ResolvedSlots {
        enable_lead: slots.enable_lead,
        enable_backup_lead: slots.enable_backup_lead,
        lead,
        backup_lead,
    })
}

fn team_detail_inner(conn: &mut SqliteConnection, team: Team) -> Result<TeamDetail, CoreError> {
    let leadership: ResolvedSlots = resolve_slots(conn, &team.leadership)?;
    let roster = queries::list_team_members(conn, team.id)?;
    let ids: Vec<i64> = roster.iter().map(|m| m.user_id).collect();
    let members: Vec<UserRef> = queries::get_users_by_ids(conn, &ids)?;
    Ok(TeamDetail {
        team,
        leadership,
        members,
    })
}

fn cluster_detail_inner(
    conn: &mut SqliteConnection,
    cluster: Cluster,
) -> Result<ClusterDetail, CoreError> {
    let leadership: ResolvedSlots = resolve_slots(conn, &cluster.leadership)?;
    let teams: Vec<TeamDetail> = queries::list_teams_for_cluster(conn, cluster.id)?
        .into_iter()
        .map(|team| team_detail_inner(conn, team))
        .collect::<Result<_, _>>()?;
    Ok(ClusterDetail {
        cluster,
        leadership,
        teams,
    })
}

/// Lists all camps.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_camps(persistence: &mut Persistence) -> Result<Vec<Camp>, CoreError> {
    queries::list_camps(persistence.connection()).map_err(CoreError::from)
}

/// Resolves the full detail view of a camp.
///
/// # Errors
///
/// Returns `NotFound` if the camp is unknown.
pub fn camp_detail(persistence: &mut Persistence, camp_id: i64) -> Result<CampDetail, CoreError> {
    let conn = persistence.connection();
    let camp: Camp =
        queries::get_camp_opt(conn, camp_id)?.ok_or(CoreError::not_found("camp", camp_id))?;
    let leadership: ResolvedSlots = resolve_slots(conn, &camp.leadership)?;
    let clusters: Vec<ClusterDetail> = queries::list_clusters_for_camp(conn, camp_id)?
        .into_iter()
        .map(|cluster| cluster_detail_inner(conn, cluster))
        .collect::<Result<_, _>>()?;

    let approved: Vec<Membership> =
        queries::list_members_by_status(conn, camp_id, MembershipStatus::Approved)?;
    let mut members: Vec<CampMemberView> = Vec::with_capacity(approved.len());
    for membership in approved {
        let user: UserRef = queries::get_user(conn, membership.user_id)?;
        members.push(CampMemberView { membership, user });
    }

    Ok(CampDetail {
        camp,
        leadership,
        clusters,
        members,
    })
}

/// Resolves the detail view of a cluster.
///
/// # Errors
///
/// Returns `NotFound` if the cluster is unknown.
pub fn cluster_detail(
    persistence: &mut Persistence,
    cluster_id: i64,
) -> Result<ClusterDetail, CoreError> {
    let conn = persistence.connection();
    let cluster: Cluster = queries::get_cluster_opt(conn, cluster_id)?
        .ok_or(CoreError::not_found("cluster", cluster_id))?;
    cluster_detail_inner(conn, cluster)
}

/// Resolves the detail view of a team.
///
/// # Errors
///
/// Returns `NotFound` if the team is unknown.
pub fn team_detail(persistence: &mut Persistence, team_id: i64) -> Result<TeamDetail, CoreError> {
    let conn = persistence.connection();
    let team: Team =
        queries::get_team_opt(conn, team_id)?.ok_or(CoreError::not_found("team", team_id))?;
    team_detail_inner(conn, team)
}

/// Lists publicly visible (approved) events.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_public_events(persistence: &mut Persistence) -> Result<Vec<Event>, CoreError> {
    queries::list_events_by_status(persistence.connection(), EventStatus::Approved)
        .map_err(CoreError::from)
}

/// Resolves an event with its approved camps.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown.
pub fn event_detail(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<EventDetail, CoreError> {
    let conn = persistence.connection();
    let event: Event =
        queries::get_event_opt(conn, event_id)?.ok_or(CoreError::not_found("event", event_id))?;

    let associations: Vec<Association> = queries::list_associations_for_event(conn, event_id)?;
    let mut associated_camps: Vec<AssociatedCampView> = Vec::new();
    for association in associations {
        if association.status != AssociationStatus::Approved {
            continue;
        }
        let camp: Camp = queries::get_camp(conn, association.camp_id)?;
        associated_camps.push(AssociatedCampView {
            camp,
            location: association.location,
        });
    }

    Ok(EventDetail {
        event,
        associated_camps,
    })
}

/// Lists a camp's event associations with event titles resolved, oldest
/// request first.
///
/// # Errors
///
/// Returns `NotFound` if the camp is unknown.
pub fn camp_associations(
    persistence: &mut Persistence,
    camp_id: i64,
) -> Result<Vec<CampAssociationView>, CoreError> {
    let conn = persistence.connection();
    queries::get_camp_opt(conn, camp_id)?.ok_or(CoreError::not_found("camp", camp_id))?;

    let mut entries: Vec<CampAssociationView> = Vec::new();
    for association in queries::list_associations_for_camp(conn, camp_id)? {
        let event: Event = queries::get_event(conn, association.event_id)?;
        entries.push(CampAssociationView {
            association,
            event_title: event.title,
        });
    }
    Ok(entries)
}

/// Lists an event's registrations with attendees resolved, oldest first.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown, or `Forbidden` unless the
/// actor created the event or is a site admin.
pub fn event_roster(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<Vec<EventRosterEntry>, CoreError> {
    let conn = persistence.connection();
    let event: Event =
        queries::get_event_opt(conn, event_id)?.ok_or(CoreError::not_found("event", event_id))?;
    let acting: Actor = actor::resolve(conn, actor_id)?;
    authorize(
        &acting,
        &Capability::ManageEvent {
            event_creator_id: event.creator_id,
        },
    )?;

    let mut entries: Vec<EventRosterEntry> = Vec::new();
    for registration in queries::list_registrations_for_event(conn, event_id)? {
        let user: UserRef = queries::get_user(conn, registration.user_id)?;
        entries.push(EventRosterEntry { registration, user });
    }
    Ok(entries)
}

/// Lists every membership the actor holds across camps.
///
/// # Errors
///
/// Returns `NotFound` if the actor is unknown.
pub fn my_memberships(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<Membership>, CoreError> {
    let conn = persistence.connection();
    actor::resolve(conn, actor_id)?;
    queries::list_memberships_for_user(conn, actor_id).map_err(CoreError::from)
}

/// Lists the pending membership requests the actor may decide, oldest
/// first within each camp.
///
/// # Errors
///
/// Returns `NotFound` if the actor is unknown.
pub fn pending_membership_requests(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<MembershipQueueEntry>, CoreError> {
    let conn = persistence.connection();
    actor::resolve(conn, actor_id)?;

    let mut entries: Vec<MembershipQueueEntry> = Vec::new();
    for camp in queries::list_camps(conn)? {
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp.id)?;
        let allowed: bool = authorize(
            &acting,
            &Capability::ApproveMembers {
                camp_id: camp.id,
                mode: camp.member_approval_mode,
            },
        )
        .is_ok();
        if !allowed {
            continue;
        }
        for membership in
            queries::list_members_by_status(conn, camp.id, MembershipStatus::Pending)?
        {
            let user: UserRef = queries::get_user(conn, membership.user_id)?;
            entries.push(MembershipQueueEntry {
                camp_id: camp.id,
                camp_name: camp.name.clone(),
                membership,
                user,
            });
        }
    }
    Ok(entries)
}

/// Lists the pending association requests the actor may decide, oldest
/// first.
///
/// # Errors
///
/// Returns `NotFound` if the actor is unknown.
pub fn pending_associations(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<AssociationQueueEntry>, CoreError> {
    let conn = persistence.connection();
    let acting: Actor = actor::resolve(conn, actor_id)?;

    let mut entries: Vec<AssociationQueueEntry> = Vec::new();
    for association in queries::list_pending_associations(conn)? {
        let event: Event = queries::get_event(conn, association.event_id)?;
        let allowed: bool = authorize(
            &acting,
            &Capability::DecideAssociation {
                event_creator_id: event.creator_id,
            },
        )
        .is_ok();
        if !allowed {
            continue;
        }
        let camp: Camp = queries::get_camp(conn, association.camp_id)?;
        entries.push(AssociationQueueEntry {
            association,
            camp_name: camp.name,
            event_title: event.title,
        });
    }
    Ok(entries)
}

/// Lists the pending events awaiting publication, if the actor may
/// decide them.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is a site admin or higher.
pub fn pending_events(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<Event>, CoreError> {
    let conn = persistence.connection();
    let acting: Actor = actor::resolve(conn, actor_id)?;
    authorize(&acting, &Capability::PublishEvent)?;
    queries::list_events_by_status(conn, EventStatus::Pending).map_err(CoreError::from)
}
