// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for events, camp/event associations, and registrations.

use diesel::prelude::*;

use campstead_domain::{AssociationStatus, EventStatus};

use crate::data_models::{NewAssociationRow, NewEventRow, NewRegistrationRow};
use crate::diesel_schema::{camp_event_associations, event_registrations, events};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Full-replacement changeset for an event's editable fields.
///
/// Status and creator are deliberately excluded; status moves only
/// through [`set_event_status`].
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
pub struct EventChanges {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub event_manager_email: Option<String>,
    pub event_manager_phone: Option<String>,
    pub safety_manager_email: Option<String>,
    pub safety_manager_phone: Option<String>,
    pub business_manager_email: Option<String>,
    pub business_manager_phone: Option<String>,
    pub board_email: Option<String>,
    pub has_early_arrival: bool,
    pub early_arrival_days: Option<i32>,
    pub has_late_departure: bool,
    pub late_departure_days: Option<i32>,
    pub has_accessibility_assistance: bool,
    pub has_drinking_water: bool,
    pub has_ice_available: bool,
    pub has_vehicle_access: bool,
    pub custom_event_options: Option<String>,
    pub updated_at: String,
}

/// Inserts an event and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    row: &NewEventRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(events::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Applies a full-replacement update to an event.
///
/// # Returns
///
/// The number of rows updated (0 if the event does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    changes: &EventChanges,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(events::table.filter(events::event_id.eq(event_id)))
        .set(changes)
        .execute(conn)?)
}

/// Moves an event from one status to another.
///
/// Compare-and-set: the `WHERE` clause requires the event to still be in
/// `from`, so a concurrent transition loses with a row count of 0.
///
/// # Returns
///
/// The number of rows updated (0 if the event was not in `from` or does
/// not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_event_status(
    conn: &mut SqliteConnection,
    event_id: i64,
    from: EventStatus,
    to: EventStatus,
    updated_at: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        events::table
            .filter(events::event_id.eq(event_id))
            .filter(events::status.eq(from.as_str())),
    )
    .set((
        events::status.eq(to.as_str()),
        events::updated_at.eq(updated_at),
    ))
    .execute(conn)?)
}

/// Inserts a camp/event association and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// `(camp_id, event_id)` pair).
pub fn insert_association(
    conn: &mut SqliteConnection,
    row: &NewAssociationRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(camp_event_associations::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Deletes a camp/event association.
///
/// # Returns
///
/// The number of rows deleted (0 if the association does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_association(
    conn: &mut SqliteConnection,
    association_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        camp_event_associations::table
            .filter(camp_event_associations::association_id.eq(association_id)),
    )
    .execute(conn)?)
}

/// Sets or clears the camp's location override on an association.
///
/// # Returns
///
/// The number of rows updated (0 if the association does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_association_location(
    conn: &mut SqliteConnection,
    association_id: i64,
    location: Option<&str>,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        camp_event_associations::table
            .filter(camp_event_associations::association_id.eq(association_id)),
    )
    .set(camp_event_associations::location.eq(location))
    .execute(conn)?)
}

/// Decides a pending camp/event association.
///
/// Compare-and-set: the `WHERE` clause requires the row to still be
/// pending, so a concurrent decision loses with a row count of 0.
///
/// # Returns
///
/// The number of rows updated (0 if the request was already decided or
/// does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn decide_association(
    conn: &mut SqliteConnection,
    association_id: i64,
    new_status: AssociationStatus,
    approved_at: Option<&str>,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        camp_event_associations::table
            .filter(camp_event_associations::association_id.eq(association_id))
            .filter(camp_event_associations::status.eq(AssociationStatus::Pending.as_str())),
    )
    .set((
        camp_event_associations::status.eq(new_status.as_str()),
        camp_event_associations::approved_at.eq(approved_at),
    ))
    .execute(conn)?)
}

/// Inserts an event registration and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate
/// `(event_id, user_id)` pair).
pub fn insert_registration(
    conn: &mut SqliteConnection,
    row: &NewRegistrationRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(event_registrations::table)
        .values(row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Updates the flags of an event registration.
///
/// # Returns
///
/// The number of rows updated (0 if the registration does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_registration(
    conn: &mut SqliteConnection,
    registration_id: i64,
    has_ticket: bool,
    opted_early_arrival: bool,
    opted_late_departure: bool,
    opted_vehicle_access: bool,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        event_registrations::table
            .filter(event_registrations::registration_id.eq(registration_id)),
    )
    .set((
        event_registrations::has_ticket.eq(has_ticket),
        event_registrations::opted_early_arrival.eq(opted_early_arrival),
        event_registrations::opted_late_departure.eq(opted_late_departure),
        event_registrations::opted_vehicle_access.eq(opted_vehicle_access),
    ))
    .execute(conn)?)
}

/// Deletes an event registration.
///
/// # Returns
///
/// The number of rows deleted (0 if the registration does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_registration(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        event_registrations::table
            .filter(event_registrations::event_id.eq(event_id))
            .filter(event_registrations::user_id.eq(user_id)),
    )
    .execute(conn)?)
}
