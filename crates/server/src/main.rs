// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use campstead::views::{
    AssociationQueueEntry, CampAssociationView, CampDetail, ClusterDetail, EventDetail,
    EventRosterEntry, MembershipQueueEntry, TeamDetail,
};
use campstead_api::capabilities::{ActorCapabilities, capabilities_for};
use campstead_api::request_response::{
    AssignLeadershipRequest, AssociationRequest, CampRequest, DecisionRequest, EventRequest,
    LocationRequest, MembershipRoleRequest, MessageResponse, RegistrationRequest, SubgroupRequest,
    SyncUserRequest, TeamMemberRequest,
};
use campstead_api::{ApiError, handlers};
use campstead_domain::{
    Association, Camp, Cluster, Event, EventRegistration, Membership, Team, TeamMembership, UserRef,
};
use campstead_persistence::Persistence;

/// Campstead Server - HTTP server for the Campstead organization system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the organization store.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Extracts the acting user from the `x-actor-id` header.
///
/// Identity is established by the upstream identity proxy; this server
/// trusts the header and the engine authorizes every operation against
/// the directory entry it names.
fn actor_from_headers(headers: &HeaderMap) -> Result<i64, HttpError> {
    let value = headers.get("x-actor-id").ok_or_else(|| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing x-actor-id header"),
    })?;
    value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Invalid x-actor-id header"),
        })
}

/// Handler for POST `/users/sync` endpoint.
///
/// Upserts a directory user from the identity provider.
async fn handle_sync_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SyncUserRequest>,
) -> Result<Json<UserRef>, HttpError> {
    info!(user_id = req.id, "Handling sync_user request");
    let mut persistence = app_state.persistence.lock().await;
    let user: UserRef = handlers::sync_user(&mut persistence, req)?;
    Ok(Json(user))
}

/// Handler for GET `/camps` endpoint.
async fn handle_list_camps(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Camp>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let camps: Vec<Camp> = handlers::list_camps(&mut persistence)?;
    Ok(Json(camps))
}

/// Handler for POST `/camps` endpoint.
///
/// Creates a camp with the actor admitted as its first manager.
async fn handle_create_camp(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CampRequest>,
) -> Result<Json<Camp>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, name = %req.name, "Handling create_camp request");
    let mut persistence = app_state.persistence.lock().await;
    let camp: Camp = handlers::create_camp(&mut persistence, actor_id, req)?;
    Ok(Json(camp))
}

/// Handler for GET `/camps/{camp_id}` endpoint.
async fn handle_camp_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
) -> Result<Json<CampDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: CampDetail = handlers::camp_detail(&mut persistence, camp_id)?;
    Ok(Json(detail))
}

/// Handler for PUT `/camps/{camp_id}` endpoint.
async fn handle_update_camp(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<CampRequest>,
) -> Result<Json<Camp>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, camp_id, "Handling update_camp request");
    let mut persistence = app_state.persistence.lock().await;
    let camp: Camp = handlers::update_camp(&mut persistence, actor_id, camp_id, req)?;
    Ok(Json(camp))
}

/// Handler for DELETE `/camps/{camp_id}` endpoint.
async fn handle_delete_camp(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, camp_id, "Handling delete_camp request");
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_camp(&mut persistence, actor_id, camp_id)?;
    Ok(Json(MessageResponse {
        message: format!("Deleted camp {camp_id}"),
    }))
}

/// Handler for POST `/camps/{camp_id}/clusters` endpoint.
async fn handle_create_cluster(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubgroupRequest>,
) -> Result<Json<Cluster>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, camp_id, name = %req.name, "Handling create_cluster request");
    let mut persistence = app_state.persistence.lock().await;
    let cluster: Cluster = handlers::create_cluster(&mut persistence, actor_id, camp_id, req)?;
    Ok(Json(cluster))
}

/// Handler for GET `/clusters/{cluster_id}` endpoint.
async fn handle_cluster_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(cluster_id): Path<i64>,
) -> Result<Json<ClusterDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: ClusterDetail = handlers::cluster_detail(&mut persistence, cluster_id)?;
    Ok(Json(detail))
}

/// Handler for PUT `/clusters/{cluster_id}` endpoint.
async fn handle_update_cluster(
    AxumState(app_state): AxumState<AppState>,
    Path(cluster_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubgroupRequest>,
) -> Result<Json<Cluster>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, cluster_id, "Handling update_cluster request");
    let mut persistence = app_state.persistence.lock().await;
    let cluster: Cluster = handlers::update_cluster(&mut persistence, actor_id, cluster_id, req)?;
    Ok(Json(cluster))
}

/// Handler for DELETE `/clusters/{cluster_id}` endpoint.
async fn handle_delete_cluster(
    AxumState(app_state): AxumState<AppState>,
    Path(cluster_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, cluster_id, "Handling delete_cluster request");
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_cluster(&mut persistence, actor_id, cluster_id)?;
    Ok(Json(MessageResponse {
        message: format!("Deleted cluster {cluster_id}"),
    }))
}

/// Handler for POST `/clusters/{cluster_id}/teams` endpoint.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Path(cluster_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubgroupRequest>,
) -> Result<Json<Team>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, cluster_id, name = %req.name, "Handling create_team request");
    let mut persistence = app_state.persistence.lock().await;
    let team: Team = handlers::create_team(&mut persistence, actor_id, cluster_id, req)?;
    Ok(Json(team))
}

/// Handler for GET `/teams/{team_id}` endpoint.
async fn handle_team_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: TeamDetail = handlers::team_detail(&mut persistence, team_id)?;
    Ok(Json(detail))
}

/// Handler for PUT `/teams/{team_id}` endpoint.
async fn handle_update_team(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubgroupRequest>,
) -> Result<Json<Team>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, team_id, "Handling update_team request");
    let mut persistence = app_state.persistence.lock().await;
    let team: Team = handlers::update_team(&mut persistence, actor_id, team_id, req)?;
    Ok(Json(team))
}

/// Handler for DELETE `/teams/{team_id}` endpoint.
async fn handle_delete_team(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, team_id, "Handling delete_team request");
    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_team(&mut persistence, actor_id, team_id)?;
    Ok(Json(MessageResponse {
        message: format!("Deleted team {team_id}"),
    }))
}

/// Handler for POST `/leadership` endpoint.
///
/// Assigns, reassigns, or clears a leadership slot at any scope.
async fn handle_assign_leadership(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<AssignLeadershipRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        scope = %req.scope,
        scope_id = req.scope_id,
        role = %req.role,
        user_id = ?req.user_id,
        "Handling assign_leadership request"
    );
    let mut persistence = app_state.persistence.lock().await;
    handlers::assign_leadership(&mut persistence, actor_id, &req)?;
    let message: String = match req.user_id {
        Some(user_id) => format!(
            "Assigned {} on {} {} to user {user_id}",
            req.role, req.scope, req.scope_id
        ),
        None => format!("Cleared {} on {} {}", req.role, req.scope, req.scope_id),
    };
    Ok(Json(MessageResponse { message }))
}

/// Handler for POST `/camps/{camp_id}/memberships` endpoint.
///
/// Files the actor's membership request for the camp.
async fn handle_request_membership(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Membership>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, camp_id, "Handling request_membership request");
    let mut persistence = app_state.persistence.lock().await;
    let membership: Membership = handlers::request_membership(&mut persistence, actor_id, camp_id)?;
    Ok(Json(membership))
}

/// Handler for POST `/memberships/{membership_id}/decision` endpoint.
async fn handle_decide_membership(
    AxumState(app_state): AxumState<AppState>,
    Path(membership_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<Membership>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        membership_id,
        decision = %req.decision,
        "Handling decide_membership request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let membership: Membership =
        handlers::decide_membership(&mut persistence, actor_id, membership_id, req)?;
    Ok(Json(membership))
}

/// Handler for PUT `/camps/{camp_id}/members/role` endpoint.
async fn handle_set_membership_role(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<MembershipRoleRequest>,
) -> Result<Json<Membership>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        camp_id,
        user_id = req.user_id,
        role = %req.role,
        "Handling set_membership_role request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let membership: Membership =
        handlers::set_membership_role(&mut persistence, actor_id, camp_id, &req)?;
    Ok(Json(membership))
}

/// Handler for POST `/teams/{team_id}/members` endpoint.
async fn handle_add_team_member(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<TeamMemberRequest>,
) -> Result<Json<TeamMembership>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, team_id, user_id = req.user_id, "Handling add_team_member request");
    let mut persistence = app_state.persistence.lock().await;
    let rostered: TeamMembership =
        handlers::add_team_member(&mut persistence, actor_id, team_id, req)?;
    Ok(Json(rostered))
}

/// Handler for DELETE `/teams/{team_id}/members/{user_id}` endpoint.
async fn handle_remove_team_member(
    AxumState(app_state): AxumState<AppState>,
    Path((team_id, user_id)): Path<(i64, i64)>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, team_id, user_id, "Handling remove_team_member request");
    let mut persistence = app_state.persistence.lock().await;
    handlers::remove_team_member(&mut persistence, actor_id, team_id, user_id)?;
    Ok(Json(MessageResponse {
        message: format!("Removed user {user_id} from team {team_id}"),
    }))
}

/// Handler for GET `/events` endpoint.
///
/// Lists publicly visible (approved) events.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Event>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<Event> = handlers::list_public_events(&mut persistence)?;
    Ok(Json(events))
}

/// Handler for POST `/events` endpoint.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<EventRequest>,
) -> Result<Json<Event>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, title = %req.title, "Handling create_event request");
    let mut persistence = app_state.persistence.lock().await;
    let event: Event = handlers::create_event(&mut persistence, actor_id, req)?;
    Ok(Json(event))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_event_detail(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: EventDetail = handlers::event_detail(&mut persistence, event_id)?;
    Ok(Json(detail))
}

/// Handler for PUT `/events/{event_id}` endpoint.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<EventRequest>,
) -> Result<Json<Event>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, "Handling update_event request");
    let mut persistence = app_state.persistence.lock().await;
    let event: Event = handlers::update_event(&mut persistence, actor_id, event_id, req)?;
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/decision` endpoint.
async fn handle_decide_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<Event>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, decision = %req.decision, "Handling decide_event request");
    let mut persistence = app_state.persistence.lock().await;
    let event: Event = handlers::decide_event(&mut persistence, actor_id, event_id, req)?;
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/cancel` endpoint.
async fn handle_cancel_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Event>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, "Handling cancel_event request");
    let mut persistence = app_state.persistence.lock().await;
    let event: Event = handlers::cancel_event(&mut persistence, actor_id, event_id)?;
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/associations` endpoint.
async fn handle_request_association(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<AssociationRequest>,
) -> Result<Json<Association>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        event_id,
        camp_id = req.camp_id,
        "Handling request_association request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let association: Association =
        handlers::request_association(&mut persistence, actor_id, event_id, req)?;
    Ok(Json(association))
}

/// Handler for POST `/associations/{association_id}/decision` endpoint.
async fn handle_decide_association(
    AxumState(app_state): AxumState<AppState>,
    Path(association_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<Association>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        association_id,
        decision = %req.decision,
        "Handling decide_association request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let association: Association =
        handlers::decide_association(&mut persistence, actor_id, association_id, req)?;
    Ok(Json(association))
}

/// Handler for PUT `/associations/{association_id}/location` endpoint.
///
/// Sets or clears a camp's location override for an event.
async fn handle_update_association_location(
    AxumState(app_state): AxumState<AppState>,
    Path(association_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<LocationRequest>,
) -> Result<Json<Association>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(
        actor_id,
        association_id, "Handling update_association_location request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let association: Association =
        handlers::update_association_location(&mut persistence, actor_id, association_id, req)?;
    Ok(Json(association))
}

/// Handler for GET `/camps/{camp_id}/associations` endpoint.
async fn handle_camp_associations(
    AxumState(app_state): AxumState<AppState>,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<CampAssociationView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let associations: Vec<CampAssociationView> =
        handlers::camp_associations(&mut persistence, camp_id)?;
    Ok(Json(associations))
}

/// Handler for GET `/events/{event_id}/registrations` endpoint.
///
/// Lists the event's registrations. Creator or site admin only.
async fn handle_event_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Vec<EventRosterEntry>>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let roster: Vec<EventRosterEntry> =
        handlers::event_roster(&mut persistence, actor_id, event_id)?;
    Ok(Json(roster))
}

/// Handler for POST `/events/{event_id}/registration` endpoint.
async fn handle_register_for_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<RegistrationRequest>,
) -> Result<Json<EventRegistration>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, "Handling register_for_event request");
    let mut persistence = app_state.persistence.lock().await;
    let registration: EventRegistration =
        handlers::register_for_event(&mut persistence, actor_id, event_id, req)?;
    Ok(Json(registration))
}

/// Handler for PUT `/events/{event_id}/registration` endpoint.
async fn handle_update_registration(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<RegistrationRequest>,
) -> Result<Json<EventRegistration>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, "Handling update_registration request");
    let mut persistence = app_state.persistence.lock().await;
    let registration: EventRegistration =
        handlers::update_registration(&mut persistence, actor_id, event_id, req)?;
    Ok(Json(registration))
}

/// Handler for DELETE `/events/{event_id}/registration` endpoint.
async fn handle_unregister_from_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, event_id, "Handling unregister_from_event request");
    let mut persistence = app_state.persistence.lock().await;
    handlers::unregister_from_event(&mut persistence, actor_id, event_id)?;
    Ok(Json(MessageResponse {
        message: format!("Unregistered from event {event_id}"),
    }))
}

/// Handler for GET `/me/memberships` endpoint.
async fn handle_my_memberships(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Membership>>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let memberships: Vec<Membership> = handlers::my_memberships(&mut persistence, actor_id)?;
    Ok(Json(memberships))
}

/// Handler for GET `/me/capabilities` endpoint.
async fn handle_my_capabilities(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ActorCapabilities>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let capabilities: ActorCapabilities = capabilities_for(&mut persistence, actor_id)?;
    Ok(Json(capabilities))
}

/// Handler for GET `/queues/memberships` endpoint.
///
/// Lists pending membership requests the actor may decide.
async fn handle_membership_queue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<MembershipQueueEntry>>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let queue: Vec<MembershipQueueEntry> =
        handlers::pending_membership_requests(&mut persistence, actor_id)?;
    Ok(Json(queue))
}

/// Handler for GET `/queues/associations` endpoint.
///
/// Lists pending association requests the actor may decide.
async fn handle_association_queue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AssociationQueueEntry>>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let queue: Vec<AssociationQueueEntry> =
        handlers::pending_associations(&mut persistence, actor_id)?;
    Ok(Json(queue))
}

/// Handler for GET `/queues/events` endpoint.
///
/// Lists events awaiting publication review. Site admin only.
async fn handle_event_queue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let queue: Vec<Event> = handlers::pending_events(&mut persistence, actor_id)?;
    Ok(Json(queue))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users/sync", post(handle_sync_user))
        .route("/camps", get(handle_list_camps))
        .route("/camps", post(handle_create_camp))
        .route("/camps/{camp_id}", get(handle_camp_detail))
        .route("/camps/{camp_id}", put(handle_update_camp))
        .route("/camps/{camp_id}", delete(handle_delete_camp))
        .route("/camps/{camp_id}/clusters", post(handle_create_cluster))
        .route("/clusters/{cluster_id}", get(handle_cluster_detail))
        .route("/clusters/{cluster_id}", put(handle_update_cluster))
        .route("/clusters/{cluster_id}", delete(handle_delete_cluster))
        .route("/clusters/{cluster_id}/teams", post(handle_create_team))
        .route("/teams/{team_id}", get(handle_team_detail))
        .route("/teams/{team_id}", put(handle_update_team))
        .route("/teams/{team_id}", delete(handle_delete_team))
        .route("/leadership", post(handle_assign_leadership))
        .route(
            "/camps/{camp_id}/memberships",
            post(handle_request_membership),
        )
        .route(
            "/memberships/{membership_id}/decision",
            post(handle_decide_membership),
        )
        .route(
            "/camps/{camp_id}/members/role",
            put(handle_set_membership_role),
        )
        .route("/teams/{team_id}/members", post(handle_add_team_member))
        .route(
            "/teams/{team_id}/members/{user_id}",
            delete(handle_remove_team_member),
        )
        .route("/events", get(handle_list_events))
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", get(handle_event_detail))
        .route("/events/{event_id}", put(handle_update_event))
        .route("/events/{event_id}/decision", post(handle_decide_event))
        .route("/events/{event_id}/cancel", post(handle_cancel_event))
        .route(
            "/events/{event_id}/associations",
            post(handle_request_association),
        )
        .route(
            "/associations/{association_id}/decision",
            post(handle_decide_association),
        )
        .route(
            "/associations/{association_id}/location",
            put(handle_update_association_location),
        )
        .route(
            "/camps/{camp_id}/associations",
            get(handle_camp_associations),
        )
        .route(
            "/events/{event_id}/registrations",
            get(handle_event_roster),
        )
        .route(
            "/events/{event_id}/registration",
            post(handle_register_for_event),
        )
        .route(
            "/events/{event_id}/registration",
            put(handle_update_registration),
        )
        .route(
            "/events/{event_id}/registration",
            delete(handle_unregister_from_event),
        )
        .route("/me/memberships", get(handle_my_memberships))
        .route("/me/capabilities", get(handle_my_capabilities))
        .route("/queues/memberships", get(handle_membership_queue))
        .route("/queues/associations", get(handle_association_queue))
        .route("/queues/events", get(handle_event_queue))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campstead Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Helper to POST a JSON body as the given actor.
    async fn post_as(
        app: &Router,
        actor_id: i64,
        uri: &str,
        body: &impl serde::Serialize,
    ) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .header("x-actor-id", actor_id.to_string())
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Helper to PUT a JSON body as the given actor.
    async fn put_as(
        app: &Router,
        actor_id: i64,
        uri: &str,
        body: &impl serde::Serialize,
    ) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .header("x-actor-id", actor_id.to_string())
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Helper to GET a URI, optionally as the given actor.
    async fn get_as(app: &Router, actor_id: Option<i64>, uri: &str) -> axum::response::Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(id) = actor_id {
            builder = builder.header("x-actor-id", id.to_string());
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Helper to sync a directory user through the endpoint.
    async fn sync_user(app: &Router, id: i64, display_name: &str, global_role: &str) {
        let req: SyncUserRequest = SyncUserRequest {
            id,
            display_name: display_name.to_string(),
            pronouns: None,
            global_role: global_role.to_string(),
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/sync")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    fn camp_request(name: &str) -> CampRequest {
        CampRequest {
            name: name.to_string(),
            description: String::from("A test camp"),
            max_sites: 10,
            max_people: 40,
            amenities: campstead_domain::CampAmenities::default(),
            custom_amenities: None,
            member_approval_mode: String::from("manager_only"),
            enable_lead: true,
            enable_backup_lead: true,
        }
    }

    #[tokio::test]
    async fn test_mutations_require_the_actor_header() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/camps")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&camp_request("Dust Bunnies")).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_camp_and_fetch_detail() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 1, "Alice", "member").await;

        let response = post_as(&app, 1, "/camps", &camp_request("Dust Bunnies")).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let camp: Camp = body_json(response).await;
        assert_eq!(camp.name, "Dust Bunnies");

        let response = get_as(&app, None, &format!("/camps/{}", camp.id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let detail: serde_json::Value = body_json(response).await;
        assert_eq!(detail["camp"]["name"], "Dust Bunnies");
        // The creator is admitted as the first manager.
        assert_eq!(detail["members"][0]["membership"]["role"], "Manager");
    }

    #[tokio::test]
    async fn test_membership_decision_round_trip() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 1, "Alice", "member").await;
        sync_user(&app, 2, "Bob", "member").await;

        let camp: Camp =
            body_json(post_as(&app, 1, "/camps", &camp_request("Dust Bunnies")).await).await;

        let response = post_as(
            &app,
            2,
            &format!("/camps/{}/memberships", camp.id),
            &serde_json::json!({}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let pending: Membership = body_json(response).await;

        let response = post_as(
            &app,
            1,
            &format!("/memberships/{}/decision", pending.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        // A second decision on the same request is rejected.
        let response = post_as(
            &app,
            1,
            &format!("/memberships/{}/decision", pending.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unauthorized_decision_is_forbidden() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 2, "Eve", "event_manager").await;

        let event: Event = body_json(
            post_as(
                &app,
                2,
                "/events",
                &serde_json::json!({
                    "title": "Spring Burn",
                    "description": "A test event",
                    "start_date": "2026-08-20",
                    "end_date": "2026-08-28",
                }),
            )
            .await,
        )
        .await;

        // Creators cannot publish their own events.
        let response = post_as(
            &app,
            2,
            &format!("/events/{}/decision", event.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_event_publication_makes_it_public() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 2, "Eve", "event_manager").await;
        sync_user(&app, 9, "Sam", "site_admin").await;

        let event: Event = body_json(
            post_as(
                &app,
                2,
                "/events",
                &serde_json::json!({
                    "title": "Spring Burn",
                    "description": "A test event",
                    "start_date": "2026-08-20",
                    "end_date": "2026-08-28",
                }),
            )
            .await,
        )
        .await;

        let response = get_as(&app, None, "/events").await;
        let events: Vec<Event> = body_json(response).await;
        assert!(events.is_empty());

        let response = post_as(
            &app,
            9,
            &format!("/events/{}/decision", event.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = get_as(&app, None, "/events").await;
        let events: Vec<Event> = body_json(response).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Spring Burn");
    }

    #[tokio::test]
    async fn test_association_location_round_trip() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 1, "Alice", "member").await;
        sync_user(&app, 2, "Eve", "event_manager").await;
        sync_user(&app, 9, "Sam", "site_admin").await;

        let camp: Camp =
            body_json(post_as(&app, 1, "/camps", &camp_request("Dust Bunnies")).await).await;
        let event: Event = body_json(
            post_as(
                &app,
                2,
                "/events",
                &serde_json::json!({
                    "title": "Spring Burn",
                    "description": "A test event",
                    "start_date": "2026-08-20",
                    "end_date": "2026-08-28",
                }),
            )
            .await,
        )
        .await;
        post_as(
            &app,
            9,
            &format!("/events/{}/decision", event.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;

        let association: Association = body_json(
            post_as(
                &app,
                1,
                &format!("/events/{}/associations", event.id),
                &serde_json::json!({"camp_id": camp.id}),
            )
            .await,
        )
        .await;

        // The camp manager sets their camp's spot for the event.
        let response = put_as(
            &app,
            1,
            &format!("/associations/{}/location", association.id),
            &serde_json::json!({"location": "9:00 & B"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let moved: Association = body_json(response).await;
        assert_eq!(moved.location.as_deref(), Some("9:00 & B"));

        // A non-manager cannot.
        sync_user(&app, 3, "Bob", "member").await;
        let response = put_as(
            &app,
            3,
            &format!("/associations/{}/location", association.id),
            &serde_json::json!({"location": "3:00 & E"}),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        // The camp's association list shows the override.
        let response = get_as(&app, None, &format!("/camps/{}/associations", camp.id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let listed: serde_json::Value = body_json(response).await;
        assert_eq!(listed[0]["association"]["location"], "9:00 & B");
        assert_eq!(listed[0]["event_title"], "Spring Burn");
    }

    #[tokio::test]
    async fn test_event_roster_is_creator_gated() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 1, "Alice", "member").await;
        sync_user(&app, 2, "Eve", "event_manager").await;
        sync_user(&app, 9, "Sam", "site_admin").await;

        let event: Event = body_json(
            post_as(
                &app,
                2,
                "/events",
                &serde_json::json!({
                    "title": "Spring Burn",
                    "description": "A test event",
                    "start_date": "2026-08-20",
                    "end_date": "2026-08-28",
                }),
            )
            .await,
        )
        .await;
        post_as(
            &app,
            9,
            &format!("/events/{}/decision", event.id),
            &serde_json::json!({"decision": "approve"}),
        )
        .await;
        post_as(
            &app,
            1,
            &format!("/events/{}/registration", event.id),
            &serde_json::json!({"has_ticket": true}),
        )
        .await;

        let response = get_as(&app, Some(2), &format!("/events/{}/registrations", event.id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let roster: serde_json::Value = body_json(response).await;
        assert_eq!(roster[0]["user"]["display_name"], "Alice");

        let response = get_as(&app, Some(1), &format!("/events/{}/registrations", event.id)).await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_input_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 2, "Eve", "event_manager").await;

        let response = post_as(
            &app,
            2,
            "/events",
            &serde_json::json!({
                "title": "Spring Burn",
                "description": "A test event",
                "start_date": "August 20th",
                "end_date": "2026-08-28",
            }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error: ErrorResponse = body_json(response).await;
        assert!(error.error);
        assert!(error.message.contains("start_date"));
    }

    #[tokio::test]
    async fn test_unknown_camp_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = get_as(&app, None, "/camps/999").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_capabilities_reflect_directory_role() {
        let app: Router = build_router(create_test_app_state());
        sync_user(&app, 9, "Sam", "site_admin").await;

        let response = get_as(&app, Some(9), "/me/capabilities").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let capabilities: serde_json::Value = body_json(response).await;
        assert_eq!(capabilities["can_publish_events"], true);
    }
}
