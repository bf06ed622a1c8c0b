// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for events, camp/event associations, and registrations.

use diesel::prelude::*;

use campstead_domain::{Association, AssociationStatus, Event, EventRegistration, EventStatus};

use crate::data_models::{AssociationRow, EventRow, RegistrationRow};
use crate::diesel_schema::{camp_event_associations, event_registrations, events};
use crate::error::PersistenceError;

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the event does not exist or the query fails.
pub fn get_event(conn: &mut SqliteConnection, event_id: i64) -> Result<Event, PersistenceError> {
    let row: EventRow = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn)?;
    row.into_domain()
}

/// Retrieves an event by ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_event_opt(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<Event>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn)
        .optional()?;
    row.map(EventRow::into_domain).transpose()
}

/// Lists the events with the given status ordered by start date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events_by_status(
    conn: &mut SqliteConnection,
    status: EventStatus,
) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .filter(events::status.eq(status.as_str()))
        .order(events::start_date.asc())
        .select(EventRow::as_select())
        .load(conn)?;
    rows.into_iter().map(EventRow::into_domain).collect()
}

/// Retrieves the association between a camp and an event, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_association_opt(
    conn: &mut SqliteConnection,
    camp_id: i64,
    event_id: i64,
) -> Result<Option<Association>, PersistenceError> {
    let row: Option<AssociationRow> = camp_event_associations::table
        .filter(camp_event_associations::camp_id.eq(camp_id))
        .filter(camp_event_associations::event_id.eq(event_id))
        .select(AssociationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(AssociationRow::into_domain).transpose()
}

/// Retrieves an association by its row ID.
///
/// # Errors
///
/// Returns an error if the association does not exist or the query fails.
pub fn get_association_by_id(
    conn: &mut SqliteConnection,
    association_id: i64,
) -> Result<Association, PersistenceError> {
    let row: AssociationRow = camp_event_associations::table
        .filter(camp_event_associations::association_id.eq(association_id))
        .select(AssociationRow::as_select())
        .first(conn)?;
    row.into_domain()
}

/// Retrieves an association by its row ID, returning `None` if absent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_association_by_id_opt(
    conn: &mut SqliteConnection,
    association_id: i64,
) -> Result<Option<Association>, PersistenceError> {
    let row: Option<AssociationRow> = camp_event_associations::table
        .filter(camp_event_associations::association_id.eq(association_id))
        .select(AssociationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(AssociationRow::into_domain).transpose()
}

/// Lists the associations of a camp, oldest request first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_associations_for_camp(
    conn: &mut SqliteConnection,
    camp_id: i64,
) -> Result<Vec<Association>, PersistenceError> {
    let rows: Vec<AssociationRow> = camp_event_associations::table
        .filter(camp_event_associations::camp_id.eq(camp_id))
        .order(camp_event_associations::requested_at.asc())
        .select(AssociationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AssociationRow::into_domain).collect()
}

/// Lists the associations of an event, oldest request first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_associations_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Association>, PersistenceError> {
    let rows: Vec<AssociationRow> = camp_event_associations::table
        .filter(camp_event_associations::event_id.eq(event_id))
        .order(camp_event_associations::requested_at.asc())
        .select(AssociationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AssociationRow::into_domain).collect()
}

/// Lists every pending association across all camps, oldest request first.
///
/// Used by event managers reviewing the association queue.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_pending_associations(
    conn: &mut SqliteConnection,
) -> Result<Vec<Association>, PersistenceError> {
    let rows: Vec<AssociationRow> = camp_event_associations::table
        .filter(camp_event_associations::status.eq(AssociationStatus::Pending.as_str()))
        .order(camp_event_associations::requested_at.asc())
        .select(AssociationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(AssociationRow::into_domain).collect()
}

/// Retrieves the registration of a user for an event, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_registration_opt(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<Option<EventRegistration>, PersistenceError> {
    let row: Option<RegistrationRow> = event_registrations::table
        .filter(event_registrations::event_id.eq(event_id))
        .filter(event_registrations::user_id.eq(user_id))
        .select(RegistrationRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(RegistrationRow::into_domain))
}

/// Lists the registrations for an event, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_registrations_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<EventRegistration>, PersistenceError> {
    let rows: Vec<RegistrationRow> = event_registrations::table
        .filter(event_registrations::event_id.eq(event_id))
        .order(event_registrations::created_at.asc())
        .select(RegistrationRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(RegistrationRow::into_domain).collect())
}
