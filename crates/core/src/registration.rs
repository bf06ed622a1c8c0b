// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendee registrations for approved events.
//!
//! Registration is self-service and sits outside the approval engine:
//! no pending state, no deciding actor.

use tracing::info;

use campstead_domain::{
    Actor, DomainError, Event, EventRegistration, EventStatus,
};
use campstead_persistence::data_models::NewRegistrationRow;
use campstead_persistence::{Persistence, mutations, queries};

use crate::error::CoreError;
use crate::{actor, now_timestamp};

/// Attendee option flags carried on a registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationOptions {
    pub has_ticket: bool,
    pub opted_early_arrival: bool,
    pub opted_late_departure: bool,
    pub opted_vehicle_access: bool,
}

fn require_approved_event(
    conn: &mut diesel::SqliteConnection,
    event_id: i64,
) -> Result<Event, CoreError> {
    let event: Event = queries::get_event_opt(conn, event_id)?
        .ok_or(CoreError::not_found("event", event_id))?;
    if event.status != EventStatus::Approved {
        return Err(DomainError::InvalidStatus(format!(
            "event {event_id} is not open for registration (status: {})",
            event.status
        ))
        .into());
    }
    Ok(event)
}

/// Registers the actor for an approved event.
///
/// # Errors
///
/// Returns `NotFound` if the event or actor is unknown, `InvalidStatus`
/// if the event is not approved, or `DuplicateRequest` if the actor is
/// already registered.
pub fn register_for_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    options: RegistrationOptions,
) -> Result<EventRegistration, CoreError> {
    persistence.immediate_transaction(|conn| {
        require_approved_event(conn, event_id)?;
        let acting: Actor = actor::resolve(conn, actor_id)?;

        if queries::get_registration_opt(conn, event_id, acting.user_id)?.is_some() {
            return Err(DomainError::DuplicateRequest {
                subject: "registration",
                detail: format!("user {} for event {event_id}", acting.user_id),
            }
            .into());
        }

        mutations::insert_registration(
            conn,
            &NewRegistrationRow {
                event_id,
                user_id: acting.user_id,
                has_ticket: options.has_ticket,
                opted_early_arrival: options.opted_early_arrival,
                opted_late_departure: options.opted_late_departure,
                opted_vehicle_access: options.opted_vehicle_access,
                created_at: now_timestamp(),
            },
        )?;

        info!(event_id, user_id = acting.user_id, "Registered for event");
        queries::get_registration_opt(conn, event_id, acting.user_id)?
            .ok_or(CoreError::not_found("registration", event_id))
    })
}

/// Updates the actor's registration flags for an event.
///
/// # Errors
///
/// Returns `NotFound` if the actor is not registered for the event.
pub fn update_registration(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
    options: RegistrationOptions,
) -> Result<EventRegistration, CoreError> {
    persistence.immediate_transaction(|conn| {
        let acting: Actor = actor::resolve(conn, actor_id)?;
        let existing: EventRegistration =
            queries::get_registration_opt(conn, event_id, acting.user_id)?
                .ok_or(CoreError::not_found("registration", event_id))?;

        mutations::update_registration(
            conn,
            existing.id,
            options.has_ticket,
            options.opted_early_arrival,
            options.opted_late_departure,
            options.opted_vehicle_access,
        )?;

        info!(event_id, user_id = acting.user_id, "Updated registration");
        queries::get_registration_opt(conn, event_id, acting.user_id)?
            .ok_or(CoreError::not_found("registration", event_id))
    })
}

/// Withdraws the actor's registration for an event.
///
/// # Errors
///
/// Returns `NotFound` if the actor is not registered for the event.
pub fn unregister_from_event(
    persistence: &mut Persistence,
    actor_id: i64,
    event_id: i64,
) -> Result<(), CoreError> {
    persistence.immediate_transaction(|conn| {
        let acting: Actor = actor::resolve(conn, actor_id)?;
        let rows: usize = mutations::delete_registration(conn, event_id, acting.user_id)?;
        if rows == 0 {
            return Err(CoreError::not_found("registration", event_id));
        }
        info!(event_id, user_id = acting.user_id, "Withdrew registration");
        Ok(())
    })
}
