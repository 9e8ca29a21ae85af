// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{EVENT_ID, create_test_appointment, create_test_snapshot};
use crate::{BookingSnapshot, Command, CoreError, Mutation, apply};
use hubbl_domain::{Client, DomainError};

fn create_command(client_id: i64) -> Command {
    Command::CreateAppointment {
        event_id: EVENT_ID,
        client_id,
    }
}

#[test]
fn test_create_produces_insert_with_event_times() {
    let snapshot: BookingSnapshot =
        create_test_snapshot(5, false).with_client(Some(Client::new(3, false)), 0);

    let mutation: Mutation = apply(&snapshot, create_command(3)).unwrap();

    let Mutation::Insert(appointment) = mutation else {
        panic!("Expected insert, got {mutation:?}");
    };
    assert_eq!(appointment.event_id(), EVENT_ID);
    assert_eq!(appointment.client_id(), 3);
    assert_eq!(
        appointment.start_time(),
        snapshot.event.schedule().start_time()
    );
    assert_eq!(appointment.end_time(), snapshot.event.schedule().end_time());
    assert!(!appointment.is_cancelled());
}

#[test]
fn test_create_rejects_full_event_before_eligibility() {
    // Missing client and full event: capacity is reported.
    let snapshot: BookingSnapshot = create_test_snapshot(1, false).with_occupancy(1);

    let result: Result<Mutation, CoreError> = apply(&snapshot, create_command(3));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NoPlacesLeft {
            event_id: EVENT_ID,
            capacity: 1
        }))
    );
}

#[test]
fn test_create_rejects_missing_client() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false);

    let result: Result<Mutation, CoreError> = apply(&snapshot, create_command(3));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ClientNotFound(3)))
    );
}

#[test]
fn test_create_rejects_active_duplicate() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false)
        .with_occupancy(1)
        .with_client(Some(Client::new(3, false)), 1);

    let result: Result<Mutation, CoreError> = apply(&snapshot, create_command(3));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AlreadyBooked { .. }))
    ));
}

#[test]
fn test_scenario_capacity_two_with_covid_requirement() {
    let mut snapshot: BookingSnapshot = create_test_snapshot(2, true);
    let mut occupied: u32 = 0;

    // Client A holds a passport.
    snapshot = snapshot
        .with_occupancy(occupied)
        .with_client(Some(Client::new(10, true)), 0);
    assert!(apply(&snapshot, create_command(10)).is_ok());
    occupied += 1;

    // Client B does not.
    snapshot = snapshot
        .with_occupancy(occupied)
        .with_client(Some(Client::new(11, false)), 0);
    assert!(matches!(
        apply(&snapshot, create_command(11)),
        Err(CoreError::DomainViolation(
            DomainError::CovidPassportRequired { client_id: 11, .. }
        ))
    ));

    // Client C fills the last place.
    snapshot = snapshot
        .with_occupancy(occupied)
        .with_client(Some(Client::new(12, true)), 0);
    assert!(apply(&snapshot, create_command(12)).is_ok());
    occupied += 1;

    // Client D finds no place left.
    snapshot = snapshot
        .with_occupancy(occupied)
        .with_client(Some(Client::new(13, true)), 0);
    assert!(matches!(
        apply(&snapshot, create_command(13)),
        Err(CoreError::DomainViolation(DomainError::NoPlacesLeft { .. }))
    ));
}

#[test]
fn test_cancel_rejects_missing_appointment() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false);
    let command: Command = Command::CancelAppointment {
        event_id: EVENT_ID,
        appointment_id: 8,
    };

    let result: Result<Mutation, CoreError> = apply(&snapshot, command);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::AppointmentNotFound {
                appointment_id: 8,
                event_id: EVENT_ID
            }
        ))
    );
}

#[test]
fn test_cancel_rejects_already_cancelled() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false)
        .with_appointment(Some(create_test_appointment(8, 3, true)));
    let command: Command = Command::CancelAppointment {
        event_id: EVENT_ID,
        appointment_id: 8,
    };

    let result: Result<Mutation, CoreError> = apply(&snapshot, command);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::AppointmentAlreadyCancelled { appointment_id: 8 }
        ))
    );
}

#[test]
fn test_cancel_active_appointment() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false)
        .with_appointment(Some(create_test_appointment(8, 3, false)));
    let command: Command = Command::CancelAppointment {
        event_id: EVENT_ID,
        appointment_id: 8,
    };

    assert_eq!(
        apply(&snapshot, command),
        Ok(Mutation::Cancel { appointment_id: 8 })
    );
}

#[test]
fn test_delete_allows_cancelled_appointment() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false)
        .with_appointment(Some(create_test_appointment(8, 3, true)));
    let command: Command = Command::DeleteAppointment {
        event_id: EVENT_ID,
        appointment_id: 8,
    };

    assert_eq!(
        apply(&snapshot, command),
        Ok(Mutation::Delete { appointment_id: 8 })
    );
}

#[test]
fn test_snapshot_for_other_event_is_rejected() {
    let snapshot: BookingSnapshot = create_test_snapshot(5, false);
    let command: Command = Command::CreateAppointment {
        event_id: EVENT_ID + 1,
        client_id: 3,
    };

    assert_eq!(
        apply(&snapshot, command),
        Err(CoreError::SnapshotMismatch {
            command_event_id: EVENT_ID + 1,
            snapshot_event_id: EVENT_ID
        })
    );
}
