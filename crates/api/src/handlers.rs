// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler converts its request DTO into the engine's typed inputs,
//! delegates to the engine, and translates any error. Handlers add no
//! authority checks of their own; the engine authorizes every mutation
//! against the resolved actor.

use campstead::views::{
    AssociationQueueEntry, CampAssociationView, CampDetail, ClusterDetail, EventDetail,
    EventRosterEntry, MembershipQueueEntry, TeamDetail,
};
use campstead::{approval, directory, hierarchy, leadership, registration, roster, views};
use campstead_domain::{
    Association, Camp, CampRole, Cluster, Event, EventRegistration, LeadershipRole,
    LeadershipScope, Membership, Team, TeamMembership, UserRef,
};
use campstead_persistence::Persistence;

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{
    AssignLeadershipRequest, AssociationRequest, CampRequest, DecisionRequest, EventRequest,
    LocationRequest, MembershipRoleRequest, RegistrationRequest, SubgroupRequest, SyncUserRequest,
    TeamMemberRequest,
};

/// Upserts a directory user from the identity provider.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown role string, or `Internal` on a
/// storage failure.
pub fn sync_user(
    persistence: &mut Persistence,
    request: SyncUserRequest,
) -> Result<UserRef, ApiError> {
    let user: UserRef = request.into_user()?;
    directory::sync_user(persistence, &user).map_err(translate_core_error)
}

/// Creates a camp with the actor admitted as its first manager.
///
/// # Errors
///
/// Returns `InvalidInput` for a bad spec, `ResourceNotFound` for an
/// unknown actor, or `Internal` on a storage failure.
pub fn create_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    request: CampRequest,
) -> Result<Camp, ApiError> {
    let spec = request.into_spec()?;
    hierarchy::create_camp(persistence, actor_id, &spec).map_err(translate_core_error)
}

/// Fully replaces a camp's profile.
///
/// # Errors
///
/// Returns `Unauthorized` if the actor cannot manage the camp, plus the
/// same classes as [`create_camp`].
pub fn update_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    request: CampRequest,
) -> Result<Camp, ApiError> {
    let spec = request.into_spec()?;
    hierarchy::update_camp(persistence, actor_id, camp_id, &spec).map_err(translate_core_error)
}

/// Deletes a camp and everything beneath it.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, or `Internal`.
pub fn delete_camp(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
) -> Result<(), ApiError> {
    hierarchy::delete_camp(persistence, actor_id, camp_id).map_err(translate_core_error)
}

/// Creates a cluster within a camp.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, `InvalidInput`, or
/// `Internal`.
pub fn create_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    request: SubgroupRequest,
) -> Result<Cluster, ApiError> {
    hierarchy::create_cluster(persistence, actor_id, camp_id, &request.into_spec())
        .map_err(translate_core_error)
}

/// Fully replaces a cluster's profile.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, `InvalidInput`, or
/// `Internal`.
pub fn update_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
    request: SubgroupRequest,
) -> Result<Cluster, ApiError> {
    hierarchy::update_cluster(persistence, actor_id, cluster_id, &request.into_spec())
        .map_err(translate_core_error)
}

/// Deletes a cluster and its teams.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, or `Internal`.
pub fn delete_cluster(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
) -> Result<(), ApiError> {
    hierarchy::delete_cluster(persistence, actor_id, cluster_id).map_err(translate_core_error)
}

/// Creates a team within a cluster.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, `InvalidInput`, or
/// `Internal`.
pub fn create_team(
    persistence: &mut Persistence,
    actor_id: i64,
    cluster_id: i64,
    request: SubgroupRequest,
) -> Result<Team, ApiError> {
    hierarchy::create_team(persistence, actor_id, cluster_id, &request.into_spec())
        .map_err(translate_core_error)
}

/// Fully replaces a team's profile.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, `InvalidInput`, or
/// `Internal`.
pub fn update_team(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    request: SubgroupRequest,
) -> Result<Team, ApiError> {
    hierarchy::update_team(persistence, actor_id, team_id, &request.into_spec())
        .map_err(translate_core_error)
}

/// Deletes a team and its roster.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, or `Internal`.
pub fn delete_team(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
) -> Result<(), ApiError> {
    hierarchy::delete_team(persistence, actor_id, team_id).map_err(translate_core_error)
}

/// Assigns, reassigns, or clears a leadership slot.
///
/// # Errors
///
/// Returns `InvalidInput` for bad scope/role strings, `Unauthorized` for
/// a disallowed assignment, or `DomainRuleViolation` for disabled roles,
/// occupied slots, mutual exclusion, and ineligibility.
pub fn assign_leadership(
    persistence: &mut Persistence,
    actor_id: i64,
    request: &AssignLeadershipRequest,
) -> Result<(), ApiError> {
    let (scope, role): (LeadershipScope, LeadershipRole) = request.parse()?;
    leadership::assign(persistence, actor_id, scope, role, request.user_id)
        .map_err(translate_core_error)
}

/// Files the actor's membership request for a camp.
///
/// # Errors
///
/// Returns `DomainRuleViolation` (`duplicate_request`) if a live request
/// already exists.
pub fn request_membership(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
) -> Result<Membership, ApiError> {
    roster::request_membership(persistence, actor_id, camp_id).map_err(translate_core_error)
}

/// Decides a pending membership request.
///
/// # Errors
///
/// Returns `Unauthorized` if the camp's approval mode excludes the actor,
/// or `DomainRuleViolation` (`single_decision`) if already decided.
pub fn decide_membership(
    persistence: &mut Persistence,
    actor_id: i64,
    membership_id: i64,
    request: DecisionRequest,
) -> Result<Membership, ApiError> {
    approval::decide_membership(persistence, actor_id, membership_id, request.decision)
        .map_err(translate_core_error)
}

/// Sets a member's camp-scoped role.
///
/// # Errors
///
/// Returns `Unauthorized`, `InvalidInput`, or `DomainRuleViolation`
/// (`membership_eligibility`) for a non-approved target.
pub fn set_membership_role(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    request: &MembershipRoleRequest,
) -> Result<Membership, ApiError> {
    let role: CampRole = request.parse_role()?;
    roster::set_membership_role(persistence, actor_id, camp_id, request.user_id, role)
        .map_err(translate_core_error)
}

/// Rosters a user onto a team.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor adds themselves or manages the
/// camp, or `DomainRuleViolation` for ineligible or duplicate rostering.
pub fn add_team_member(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    request: TeamMemberRequest,
) -> Result<TeamMembership, ApiError> {
    roster::add_team_member(persistence, actor_id, team_id, request.user_id)
        .map_err(translate_core_error)
}

/// Removes a user from a team's roster.
///
/// # Errors
///
/// Returns `DomainRuleViolation` (`leadership_held`) while the user holds
/// a slot on that team.
pub fn remove_team_member(
    persistence: &mut Persistence,
    actor_id: i64,
    team_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    roster::remove_team_member(persistence, actor_id, team_id, user_id)
        .map_err(translate_core_error)
}

/// Creates an event in pending status.
///
/// # Errors
///
/// Returns `Unauthorized` below event manager, or `InvalidInput` for bad
/// dates or title.
pub fn create_event(
    persistence: &mut Persistence,
    actor_id: i64,
    request: EventRequest,
) -> Result<Event, ApiError> {
    let draft = request.into_draft()?;
    approval::create_event(persistence, actor_id, &draft).map_err(translate_core_error)
}

/// Fully replaces an event's editable fields.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor created the event or is a site
/// admin.
pub fn update_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    request: EventRequest,
) -> Result<Event, ApiError> {
    let draft = request.into_draft()?;
    approval::update_event(persistence, actor_id, event_id, &draft).map_err(translate_core_error)
}

/// Decides a pending event's publication.
///
/// # Errors
///
/// Returns `Unauthorized` below site admin, or `DomainRuleViolation`
/// (`single_decision`) if already decided.
pub fn decide_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    request: DecisionRequest,
) -> Result<Event, ApiError> {
    approval::decide_event(persistence, actor_id, event_id, request.decision)
        .map_err(translate_core_error)
}

/// Cancels an approved event.
///
/// # Errors
///
/// Returns `InvalidInput` (`status`) unless the event is approved.
pub fn cancel_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<Event, ApiError> {
    approval::cancel_event(persistence, actor_id, event_id).map_err(translate_core_error)
}

/// Files a camp's association request for an approved event.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor manages the camp, or
/// `DomainRuleViolation` for duplicate or mistimed requests.
pub fn request_association(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    request: AssociationRequest,
) -> Result<Association, ApiError> {
    approval::request_association(
        persistence,
        actor_id,
        request.camp_id,
        event_id,
        request.location,
    )
    .map_err(translate_core_error)
}

/// Sets or clears a camp's location override on an association.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor manages the camp, or
/// `InvalidInput` (`status`) for a rejected association.
pub fn update_association_location(
    persistence: &mut Persistence,
    actor_id: i64,
    association_id: i64,
    request: LocationRequest,
) -> Result<Association, ApiError> {
    approval::update_association_location(persistence, actor_id, association_id, request.location)
        .map_err(translate_core_error)
}

/// Decides a pending association request.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor created the event or holds
/// event manager or higher.
pub fn decide_association(
    persistence: &mut Persistence,
    actor_id: i64,
    association_id: i64,
    request: DecisionRequest,
) -> Result<Association, ApiError> {
    approval::decide_association(persistence, actor_id, association_id, request.decision)
        .map_err(translate_core_error)
}

/// Registers the actor for an approved event.
///
/// # Errors
///
/// Returns `InvalidInput` (`status`) for a non-approved event, or
/// `DomainRuleViolation` (`duplicate_request`) if already registered.
pub fn register_for_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    request: RegistrationRequest,
) -> Result<EventRegistration, ApiError> {
    registration::register_for_event(persistence, actor_id, event_id, request.into_options())
        .map_err(translate_core_error)
}

/// Updates the actor's registration flags for an event.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the actor holds no registration.
pub fn update_registration(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    request: RegistrationRequest,
) -> Result<EventRegistration, ApiError> {
    registration::update_registration(persistence, actor_id, event_id, request.into_options())
        .map_err(translate_core_error)
}

/// Removes the actor's registration for an event.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the actor holds no registration.
pub fn unregister_from_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<(), ApiError> {
    registration::unregister_from_event(persistence, actor_id, event_id)
        .map_err(translate_core_error)
}

/// Lists all camps.
///
/// # Errors
///
/// Returns `Internal` on a storage failure.
pub fn list_camps(persistence: &mut Persistence) -> Result<Vec<Camp>, ApiError> {
    views::list_camps(persistence).map_err(translate_core_error)
}

/// Resolves a camp's full detail view.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown camp.
pub fn camp_detail(persistence: &mut Persistence, camp_id: i64) -> Result<CampDetail, ApiError> {
    views::camp_detail(persistence, camp_id).map_err(translate_core_error)
}

/// Resolves a cluster with its teams.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown cluster.
pub fn cluster_detail(
    persistence: &mut Persistence,
    cluster_id: i64,
) -> Result<ClusterDetail, ApiError> {
    views::cluster_detail(persistence, cluster_id).map_err(translate_core_error)
}

/// Resolves a team with its roster.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown team.
pub fn team_detail(persistence: &mut Persistence, team_id: i64) -> Result<TeamDetail, ApiError> {
    views::team_detail(persistence, team_id).map_err(translate_core_error)
}

/// Lists a camp's event associations in any status.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown camp.
pub fn camp_associations(
    persistence: &mut Persistence,
    camp_id: i64,
) -> Result<Vec<CampAssociationView>, ApiError> {
    views::camp_associations(persistence, camp_id).map_err(translate_core_error)
}

/// Lists publicly visible (approved) events.
///
/// # Errors
///
/// Returns `Internal` on a storage failure.
pub fn list_public_events(persistence: &mut Persistence) -> Result<Vec<Event>, ApiError> {
    views::list_public_events(persistence).map_err(translate_core_error)
}

/// Lists an event's registrations with attendees resolved.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor created the event or is a site
/// admin.
pub fn event_roster(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<Vec<EventRosterEntry>, ApiError> {
    views::event_roster(persistence, actor_id, event_id).map_err(translate_core_error)
}

/// Resolves an event with its approved camps.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown event.
pub fn event_detail(persistence: &mut Persistence, event_id: i64) -> Result<EventDetail, ApiError> {
    views::event_detail(persistence, event_id).map_err(translate_core_error)
}

/// Lists the actor's memberships across all camps.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown actor.
pub fn my_memberships(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<Membership>, ApiError> {
    views::my_memberships(persistence, actor_id).map_err(translate_core_error)
}

/// Lists pending membership requests the actor may decide.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown actor.
pub fn pending_membership_requests(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<MembershipQueueEntry>, ApiError> {
    views::pending_membership_requests(persistence, actor_id).map_err(translate_core_error)
}

/// Lists pending association requests the actor may decide.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown actor.
pub fn pending_associations(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<AssociationQueueEntry>, ApiError> {
    views::pending_associations(persistence, actor_id).map_err(translate_core_error)
}

/// Lists events awaiting publication review.
///
/// # Errors
///
/// Returns `Unauthorized` below site admin.
pub fn pending_events(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Vec<Event>, ApiError> {
    views::pending_events(persistence, actor_id).map_err(translate_core_error)
}
