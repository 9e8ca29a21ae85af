// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use hubbl::Mutation;
use hubbl_domain::{Appointment, format_time};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::event_appointments;
use crate::error::PersistenceError;

/// Inserts a new appointment.
///
/// # Returns
///
/// The ID of the new appointment.
///
/// # Errors
///
/// Returns `PersistenceError::ActiveAppointmentExists` if the client already
/// holds an active appointment in the event, or another error if the insert
/// fails.
pub fn insert_appointment(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<i64, PersistenceError> {
    let result: Result<usize, diesel::result::Error> =
        diesel::insert_into(event_appointments::table)
            .values((
                event_appointments::event_id.eq(appointment.event_id()),
                event_appointments::client_id.eq(appointment.client_id()),
                event_appointments::start_time.eq(format_time(appointment.start_time())),
                event_appointments::end_time.eq(format_time(appointment.end_time())),
                event_appointments::cancelled.eq(i32::from(appointment.is_cancelled())),
            ))
            .execute(conn);

    match result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::ActiveAppointmentExists {
                event_id: appointment.event_id(),
                client_id: appointment.client_id(),
            });
        }
        Err(e) => return Err(PersistenceError::from(e)),
    }

    let appointment_id: i64 = conn.get_last_insert_rowid()?;

    info!(
        appointment_id,
        event_id = appointment.event_id(),
        client_id = appointment.client_id(),
        "Appointment created"
    );

    Ok(appointment_id)
}

/// Marks an appointment as cancelled.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was updated.
pub fn cancel_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        event_appointments::table.filter(event_appointments::appointment_id.eq(appointment_id)),
    )
    .set(event_appointments::cancelled.eq(1))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Appointment {appointment_id}"
        )));
    }

    info!(appointment_id, "Appointment cancelled");
    Ok(())
}

/// Removes an appointment row.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was deleted.
pub fn delete_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        event_appointments::table.filter(event_appointments::appointment_id.eq(appointment_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Appointment {appointment_id}"
        )));
    }

    info!(appointment_id, "Appointment deleted");
    Ok(())
}

/// Persists the mutation produced by `hubbl::apply`.
///
/// # Returns
///
/// The ID of the appointment that was inserted, cancelled, or deleted.
///
/// # Errors
///
/// Returns an error if the underlying write fails.
pub fn persist_mutation(
    conn: &mut SqliteConnection,
    mutation: &Mutation,
) -> Result<i64, PersistenceError> {
    match mutation {
        Mutation::Insert(appointment) => insert_appointment(conn, appointment),
        Mutation::Cancel { appointment_id } => {
            cancel_appointment(conn, *appointment_id)?;
            Ok(*appointment_id)
        }
        Mutation::Delete { appointment_id } => {
            delete_appointment(conn, *appointment_id)?;
            Ok(*appointment_id)
        }
    }
}
