// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment counts and scoped lookups.
//!
//! Every lookup that targets a single appointment is scoped by event (and,
//! for self-service callers, by client) so that an appointment id alone
//! never grants access to a row outside that scope.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hubbl_domain::{Appointment, parse_date, parse_time};
use time::{Date, Time};
use tracing::debug;

use crate::data_models::AppointmentDetails;
use crate::diesel_schema::{clients, event_appointments, events, persons};
use crate::error::PersistenceError;
use crate::queries::count_to_u32;

/// Diesel Queryable struct for appointment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = event_appointments)]
struct AppointmentRow {
    appointment_id: i64,
    event_id: i64,
    client_id: i64,
    start_time: String,
    end_time: String,
    cancelled: i32,
}

impl AppointmentRow {
    fn into_appointment(self) -> Result<Appointment, PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: "event_appointments",
            id: self.appointment_id,
            reason,
        };
        let start_time: Time = parse_time(&self.start_time).map_err(|e| corrupt(e.to_string()))?;
        let end_time: Time = parse_time(&self.end_time).map_err(|e| corrupt(e.to_string()))?;

        Ok(Appointment::from_parts(
            self.appointment_id,
            self.event_id,
            self.client_id,
            start_time,
            end_time,
            self.cancelled != 0,
        ))
    }
}

type DetailsRow = (AppointmentRow, String, String, String, String, String);

fn details_from_row(row: DetailsRow) -> Result<AppointmentDetails, PersistenceError> {
    let (appointment_row, first_name, last_name, email, event_name, event_date) = row;
    let appointment_id: i64 = appointment_row.appointment_id;
    let event_date: Date = parse_date(&event_date).map_err(|e| PersistenceError::CorruptRecord {
        table: "events",
        id: appointment_row.event_id,
        reason: e.to_string(),
    })?;

    debug!(appointment_id, "Loaded appointment details");

    Ok(AppointmentDetails {
        appointment: appointment_row.into_appointment()?,
        client_first_name: first_name,
        client_last_name: last_name,
        client_email: email,
        event_name,
        event_date,
    })
}

/// Counts the active (non-cancelled) appointments of an event.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_appointments(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<u32, PersistenceError> {
    let count: i64 = event_appointments::table
        .filter(event_appointments::event_id.eq(event_id))
        .filter(event_appointments::cancelled.eq(0))
        .count()
        .get_result(conn)?;

    debug!(event_id, count, "Counted active appointments");
    count_to_u32(count)
}

/// Counts the active appointments a client holds in an event.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_client_appointments(
    conn: &mut SqliteConnection,
    event_id: i64,
    client_id: i64,
) -> Result<u32, PersistenceError> {
    let count: i64 = event_appointments::table
        .filter(event_appointments::event_id.eq(event_id))
        .filter(event_appointments::client_id.eq(client_id))
        .filter(event_appointments::cancelled.eq(0))
        .count()
        .get_result(conn)?;

    count_to_u32(count)
}

/// Counts appointments matching (id, client, event), cancelled or not.
///
/// Used to establish that a client owns an appointment before deleting it.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_matching_appointments(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    client_id: i64,
    event_id: i64,
) -> Result<u32, PersistenceError> {
    let count: i64 = event_appointments::table
        .filter(event_appointments::appointment_id.eq(appointment_id))
        .filter(event_appointments::client_id.eq(client_id))
        .filter(event_appointments::event_id.eq(event_id))
        .count()
        .get_result(conn)?;

    count_to_u32(count)
}

/// Finds an appointment by id within an event, optionally restricted to a client.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `appointment_id` - The appointment ID
/// * `event_id` - The event the appointment must belong to
/// * `client_id` - If set, the client the appointment must belong to
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if no appointment matches the scope.
pub fn find_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    event_id: i64,
    client_id: Option<i64>,
) -> Result<Option<Appointment>, PersistenceError> {
    debug!(appointment_id, event_id, ?client_id, "Looking up appointment");

    let mut query = event_appointments::table
        .filter(event_appointments::appointment_id.eq(appointment_id))
        .filter(event_appointments::event_id.eq(event_id))
        .into_boxed();
    if let Some(client_id) = client_id {
        query = query.filter(event_appointments::client_id.eq(client_id));
    }

    let result: Result<AppointmentRow, diesel::result::Error> =
        query.select(AppointmentRow::as_select()).first(conn);

    match result {
        Ok(row) => row.into_appointment().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an appointment together with its client's person and its event.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
/// Returns `Ok(None)` if the appointment does not exist.
pub fn get_appointment_details(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<AppointmentDetails>, PersistenceError> {
    let result: Result<DetailsRow, diesel::result::Error> = event_appointments::table
        .inner_join(clients::table.inner_join(persons::table))
        .inner_join(events::table)
        .filter(event_appointments::appointment_id.eq(appointment_id))
        .select((
            AppointmentRow::as_select(),
            persons::first_name,
            persons::last_name,
            persons::email,
            events::name,
            events::event_date,
        ))
        .first(conn);

    match result {
        Ok(row) => details_from_row(row).map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every appointment of an event, cancelled ones included, in
/// booking order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_event_appointments(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AppointmentDetails>, PersistenceError> {
    let rows: Vec<DetailsRow> = event_appointments::table
        .inner_join(clients::table.inner_join(persons::table))
        .inner_join(events::table)
        .filter(event_appointments::event_id.eq(event_id))
        .order(event_appointments::appointment_id.asc())
        .select((
            AppointmentRow::as_select(),
            persons::first_name,
            persons::last_name,
            persons::email,
            events::name,
            events::event_date,
        ))
        .load(conn)?;

    rows.into_iter().map(details_from_row).collect()
}
