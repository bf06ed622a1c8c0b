// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The three approval workflows and the event lifecycle.
//!
//! Membership admission, camp/event association, and event publication
//! all follow the same shape: a requester creates a pending row, a
//! deciding actor approves or rejects it exactly once. Every decision is
//! compare-and-set against the pending status, so the second of two
//! racing deciders observes `NotPending` instead of overwriting the
//! first.

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::info;

use campstead_domain::{
    Actor, Association, AssociationStatus, Camp, Capability, DomainError, Event, EventContacts,
    EventOptions, EventStatus, Membership, MembershipStatus, authorize, validate_event_dates,
    validate_name,
};
use campstead_persistence::data_models::{NewAssociationRow, NewEventRow, format_date};
use campstead_persistence::mutations::{self, EventChanges};
use campstead_persistence::{Persistence, queries};

use crate::error::CoreError;
use crate::{actor, hierarchy, now_timestamp};

/// The outcome chosen by a deciding actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    const fn membership_status(self) -> MembershipStatus {
        match self {
            Self::Approve => MembershipStatus::Approved,
            Self::Reject => MembershipStatus::Rejected,
        }
    }

    const fn association_status(self) -> AssociationStatus {
        match self {
            Self::Approve => AssociationStatus::Approved,
            Self::Reject => AssociationStatus::Rejected,
        }
    }

    const fn event_status(self) -> EventStatus {
        match self {
            Self::Approve => EventStatus::Approved,
            Self::Reject => EventStatus::Rejected,
        }
    }

    const fn is_approve(self) -> bool {
        matches!(self, Self::Approve)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Caller-editable event fields, used for create and update.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub contacts: EventContacts,
    pub options: EventOptions,
}

fn validate_event_draft(draft: &EventDraft) -> Result<(), DomainError> {
    validate_name(&draft.title)?;
    validate_event_dates(draft.start_date, draft.end_date)?;
    Ok(())
}

/// Decides a pending membership admission request.
///
/// Who may decide depends on the camp's approval mode: managers only, or
/// any approved member. Site admins and up may always decide.
///
/// # Errors
///
/// Returns `NotFound` if the request is unknown, `Forbidden` if the
/// actor may not decide for this camp, or `NotPending` if the request
/// was already decided.
pub fn decide_membership(
    persistence: &mut Persistence,
    actor_id: i64,
    membership_id: i64,
    decision: Decision,
) -> Result<Membership, CoreError> {
    persistence.immediate_transaction(|conn| {
        let membership: Membership = queries::get_membership_by_id_opt(conn, membership_id)?
            .ok_or(CoreError::not_found("membership", membership_id))?;
        let camp: Camp = hierarchy::require_camp(conn, membership.camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp.id)?;
        authorize(
            &acting,
            &Capability::ApproveMembers {
                camp_id: camp.id,
                mode: camp.member_approval_mode,
            },
        )?;

        let approved_at: Option<String> = decision.is_approve().then(now_timestamp);
        let rows: usize = mutations::decide_membership(
            conn,
            membership_id,
            decision.membership_status(),
            approved_at.as_deref(),
        )?;
        if rows == 0 {
            let observed: Membership = queries::get_membership_by_id(conn, membership_id)?;
            return Err(DomainError::NotPending {
                subject: "membership",
                id: membership_id,
                status: observed.status.to_string(),
            }
            .into());
        }

        info!(membership_id, %decision, actor_id, "Decided membership request");
        queries::get_membership_by_id(conn, membership_id).map_err(CoreError::from)
    })
}

/// Creates an event in pending status.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor is an event manager or higher,
/// or a validation error for a bad title or date range.
pub fn create_event(
    persistence: &mut Persistence,
    actor_id: i64,
    draft: &EventDraft,
) -> Result<Event, CoreError> {
    persistence.immediate_transaction(|conn| {
        let acting: Actor = actor::resolve(conn, actor_id)?;
        authorize(&acting, &Capability::CreateEvent)?;
        validate_event_draft(draft)?;

        let now: String = now_timestamp();
        let event_id: i64 = mutations::insert_event(
            conn,
            &NewEventRow {
                title: draft.title.trim().to_string(),
                description: draft.description.clone(),
                location: draft.location.clone(),
                start_date: format_date(draft.start_date),
                end_date: format_date(draft.end_date),
                event_manager_email: draft.contacts.event_manager_email.clone(),
                event_manager_phone: draft.contacts.event_manager_phone.clone(),
                safety_manager_email: draft.contacts.safety_manager_email.clone(),
                safety_manager_phone: draft.contacts.safety_manager_phone.clone(),
                business_manager_email: draft.contacts.business_manager_email.clone(),
                business_manager_phone: draft.contacts.business_manager_phone.clone(),
                board_email: draft.contacts.board_email.clone(),
                status: EventStatus::Pending.as_str().to_string(),
                creator_id: acting.user_id,
                has_early_arrival: draft.options.has_early_arrival,
                early_arrival_days: draft.options.early_arrival_days,
                has_late_departure: draft.options.has_late_departure,
                late_departure_days: draft.options.late_departure_days,
                has_accessibility_assistance: draft.options.has_accessibility_assistance,
                has_drinking_water: draft.options.has_drinking_water,
                has_ice_available: draft.options.has_ice_available,
                has_vehicle_access: draft.options.has_vehicle_access,
                custom_event_options: draft.options.custom_event_options.clone(),
                created_at: now.clone(),
                updated_at: now,
            },
        )?;

        info!(event_id, actor_id, "Created event");
        queries::get_event(conn, event_id).map_err(CoreError::from)
    })
}

/// Updates an event's editable fields. Status and creator are not
/// touchable through this path.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown, `Forbidden` unless the
/// actor is the creator or a site admin, or a validation error.
pub fn update_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    draft: &EventDraft,
) -> Result<Event, CoreError> {
    persistence.immediate_transaction(|conn| {
        let event: Event = queries::get_event_opt(conn, event_id)?
            .ok_or(CoreError::not_found("event", event_id))?;
        let acting: Actor = actor::resolve(conn, actor_id)?;
        authorize(
            &acting,
            &Capability::ManageEvent {
                event_creator_id: event.creator_id,
            },
        )?;
        validate_event_draft(draft)?;

        mutations::update_event(
            conn,
            event_id,
            &EventChanges {
                title: draft.title.trim().to_string(),
                description: draft.description.clone(),
                location: draft.location.clone(),
                start_date: format_date(draft.start_date),
                end_date: format_date(draft.end_date),
                event_manager_email: draft.contacts.event_manager_email.clone(),
                event_manager_phone: draft.contacts.event_manager_phone.clone(),
                safety_manager_email: draft.contacts.safety_manager_email.clone(),
                safety_manager_phone: draft.contacts.safety_manager_phone.clone(),
                business_manager_email: draft.contacts.business_manager_email.clone(),
                business_manager_phone: draft.contacts.business_manager_phone.clone(),
                board_email: draft.contacts.board_email.clone(),
                has_early_arrival: draft.options.has_early_arrival,
                early_arrival_days: draft.options.early_arrival_days,
                has_late_departure: draft.options.has_late_departure,
                late_departure_days: draft.options.late_departure_days,
                has_accessibility_assistance: draft.options.has_accessibility_assistance,
                has_drinking_water: draft.options.has_drinking_water,
                has_ice_available: draft.options.has_ice_available,
                has_vehicle_access: draft.options.has_vehicle_access,
                custom_event_options: draft.options.custom_event_options.clone(),
                updated_at: now_timestamp(),
            },
        )?;

        info!(event_id, actor_id, "Updated event");
        queries::get_event(conn, event_id).map_err(CoreError::from)
    })
}

/// Decides a pending event's publication.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown, `Forbidden` unless the
/// actor is a site admin or higher, or `NotPending` if the event was
/// already decided.
pub fn decide_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    decision: Decision,
) -> Result<Event, CoreError> {
    persistence.immediate_transaction(|conn| {
        if queries::get_event_opt(conn, event_id)?.is_none() {
            return Err(CoreError::not_found("event", event_id));
        }
        let acting: Actor = actor::resolve(conn, actor_id)?;
        authorize(&acting, &Capability::PublishEvent)?;

        let rows: usize = mutations::set_event_status(
            conn,
            event_id,
            EventStatus::Pending,
            decision.event_status(),
            &now_timestamp(),
        )?;
        if rows == 0 {
            let observed: Event = queries::get_event(conn, event_id)?;
            return Err(DomainError::NotPending {
                subject: "event",
                id: event_id,
                status: observed.status.to_string(),
            }
            .into());
        }

        info!(event_id, %decision, actor_id, "Decided event publication");
        queries::get_event(conn, event_id).map_err(CoreError::from)
    })
}

/// Cancels an approved event.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown, `Forbidden` unless the
/// actor is the creator or a site admin, or `InvalidStatus` if the
/// event is not in a cancellable state.
pub fn cancel_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<Event, CoreError> {
    persistence.immediate_transaction(|conn| {
        let event: Event = queries::get_event_opt(conn, event_id)?
            .ok_or(CoreError::not_found("event", event_id))?;
        let acting: Actor = actor::resolve(conn, actor_id)?;
        authorize(
            &acting,
            &Capability::ManageEvent {
                event_creator_id: event.creator_id,
            },
        )?;

        if !event.status.can_transition_to(EventStatus::Cancelled) {
            return Err(DomainError::InvalidStatus(format!(
                "event {event_id} cannot be cancelled from {}",
                event.status
            ))
            .into());
        }

        let rows: usize = mutations::set_event_status(
            conn,
            event_id,
            EventStatus::Approved,
            EventStatus::Cancelled,
            &now_timestamp(),
        )?;
        if rows == 0 {
            let observed: Event = queries::get_event(conn, event_id)?;
            return Err(DomainError::InvalidStatus(format!(
                "event {event_id} cannot be cancelled from {}",
                observed.status
            ))
            .into());
        }

        info!(event_id, actor_id, "Cancelled event");
        queries::get_event(conn, event_id).map_err(CoreError::from)
    })
}

/// Requests a camp's participation in an approved event.
///
/// A rejected request may be re-issued; the old row is replaced by a
/// fresh pending one.
///
/// # Errors
///
/// Returns `Forbidden` unless the actor manages the camp,
/// `InvalidStatus` if the event is not approved, or `DuplicateRequest`
/// if a pending or approved association already exists.
pub fn request_association(
    persistence: &mut Persistence,
    actor_id: i64,
    camp_id: i64,
    event_id: i64,
    location: Option<String>,
) -> Result<Association, CoreError> {
    persistence.immediate_transaction(|conn| {
        hierarchy::require_camp(conn, camp_id)?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, camp_id)?;
        authorize(&acting, &Capability::ManageCamp { camp_id })?;

        let event: Event = queries::get_event_opt(conn, event_id)?
            .ok_or(CoreError::not_found("event", event_id))?;
        if event.status != EventStatus::Approved {
            return Err(DomainError::InvalidStatus(format!(
                "event {event_id} is not approved (status: {})",
                event.status
            ))
            .into());
        }

        if let Some(existing) = queries::get_association_opt(conn, camp_id, event_id)? {
            match existing.status {
                AssociationStatus::Pending | AssociationStatus::Approved => {
                    return Err(DomainError::DuplicateRequest {
                        subject: "association",
                        detail: format!(
                            "camp {camp_id} and event {event_id} (status: {})",
                            existing.status
                        ),
                    }
                    .into());
                }
                AssociationStatus::Rejected => {
                    mutations::delete_association(conn, existing.id)?;
                }
            }
        }

        let association_id: i64 = mutations::insert_association(
            conn,
            &NewAssociationRow {
                camp_id,
                event_id,
                status: AssociationStatus::Pending.as_str().to_string(),
                location,
                requested_at: now_timestamp(),
                approved_at: None,
            },
        )?;

        info!(camp_id, event_id, actor_id, "Requested camp/event association");
        queries::get_association_by_id(conn, association_id).map_err(CoreError::from)
    })
}

/// Sets or clears the camp's location override for an event it has asked
/// to join. A blank location clears the override.
///
/// # Errors
///
/// Returns `NotFound` if the association is unknown, `Forbidden` unless
/// the actor manages the camp, or `InvalidStatus` for a rejected
/// association.
pub fn update_association_location(
    persistence: &mut Persistence,
    actor_id: i64,
    association_id: i64,
    location: Option<String>,
) -> Result<Association, CoreError> {
    persistence.immediate_transaction(|conn| {
        let association: Association = queries::get_association_by_id_opt(conn, association_id)?
            .ok_or(CoreError::not_found("association", association_id))?;
        let acting: Actor = actor::resolve_for_camp(conn, actor_id, association.camp_id)?;
        authorize(
            &acting,
            &Capability::ManageCamp {
                camp_id: association.camp_id,
            },
        )?;

        if association.status == AssociationStatus::Rejected {
            return Err(DomainError::InvalidStatus(format!(
                "association {association_id} was rejected and cannot be edited"
            ))
            .into());
        }

        let location: Option<String> = location
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        mutations::set_association_location(conn, association_id, location.as_deref())?;

        info!(association_id, actor_id, "Updated association location");
        queries::get_association_by_id(conn, association_id).map_err(CoreError::from)
    })
}

/// Decides a pending camp/event association request.
///
/// The event's creator decides, as may event managers and up.
///
/// # Errors
///
/// Returns `NotFound` if the request is unknown, `Forbidden` if the
/// actor may not decide for this event, or `NotPending` if the request
/// was already decided.
pub fn decide_association(
    persistence: &mut Persistence,
    actor_id: i64,
    association_id: i64,
    decision: Decision,
) -> Result<Association, CoreError> {
    persistence.immediate_transaction(|conn| {
        let association: Association = queries::get_association_by_id_opt(conn, association_id)?
            .ok_or(CoreError::not_found("association", association_id))?;
        let event: Event = queries::get_event_opt(conn, association.event_id)?
            .ok_or(CoreError::not_found("event", association.event_id))?;
        let acting: Actor = actor::resolve(conn, actor_id)?;
        authorize(
            &acting,
            &Capability::DecideAssociation {
                event_creator_id: event.creator_id,
            },
        )?;

        let approved_at: Option<String> = decision.is_approve().then(now_timestamp);
        let rows: usize = mutations::decide_association(
            conn,
            association_id,
            decision.association_status(),
            approved_at.as_deref(),
        )?;
        if rows == 0 {
            let observed: Association = queries::get_association_by_id(conn, association_id)?;
            return Err(DomainError::NotPending {
                subject: "association",
                id: association_id,
                status: observed.status.to_string(),
            }
            .into());
        }

        info!(association_id, %decision, actor_id, "Decided association request");
        queries::get_association_by_id(conn, association_id).map_err(CoreError::from)
    })
}
