// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BookingSnapshot, Mutation};
use hubbl_domain::{
    Appointment, DomainError, validate_cancellable, validate_capacity_available,
    validate_client_eligible,
};

/// Applies a booking command to a snapshot, producing the mutation to persist.
///
/// Temporal and role checks happen before the snapshot is read; this
/// function only evaluates the rules that depend on stored appointments.
///
/// # Arguments
///
/// * `snapshot` - Facts read for the command's event
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Mutation)` describing the change to persist
/// * `Err(CoreError)` if the command is not admissible
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot describes another event
/// - Create: the event is full, the client is missing or ineligible, or
///   already holds a place
/// - Cancel: the appointment is not in scope or already cancelled
/// - Delete: the appointment is not in scope
pub fn apply(snapshot: &BookingSnapshot, command: Command) -> Result<Mutation, CoreError> {
    if command.event_id() != snapshot.event_id {
        return Err(CoreError::SnapshotMismatch {
            command_event_id: command.event_id(),
            snapshot_event_id: snapshot.event_id,
        });
    }

    match command {
        Command::CreateAppointment {
            event_id,
            client_id,
        } => {
            validate_capacity_available(event_id, &snapshot.event, snapshot.occupied_places)?;
            validate_client_eligible(
                event_id,
                &snapshot.event,
                snapshot.client.as_ref(),
                client_id,
                snapshot.client_active_appointments,
            )?;

            Ok(Mutation::Insert(Appointment::new(
                event_id,
                &snapshot.event,
                client_id,
            )))
        }
        Command::CancelAppointment {
            event_id,
            appointment_id,
        } => {
            validate_cancellable(appointment_id, event_id, snapshot.appointment.as_ref())?;
            Ok(Mutation::Cancel { appointment_id })
        }
        Command::DeleteAppointment {
            event_id,
            appointment_id,
        } => {
            // Cancelled appointments may still be deleted.
            if snapshot.appointment.is_none() {
                return Err(CoreError::DomainViolation(
                    DomainError::AppointmentNotFound {
                        appointment_id,
                        event_id,
                    },
                ));
            }
            Ok(Mutation::Delete { appointment_id })
        }
    }
}
