// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Appointment, DomainError, Event, EventSchedule, Worker, WorkerPermission, WorkerPermissions,
};

fn create_test_schedule() -> EventSchedule {
    EventSchedule::parse("2026-06-15", "18:00:00", "19:30:00").unwrap()
}

#[test]
fn test_event_rejects_zero_capacity() {
    let result: Result<Event, DomainError> =
        Event::new(1, "Spinning", create_test_schedule(), 0, false, false);
    assert_eq!(result, Err(DomainError::InvalidCapacity { capacity: 0 }));
}

#[test]
fn test_event_rejects_blank_name() {
    let result: Result<Event, DomainError> =
        Event::new(1, "   ", create_test_schedule(), 10, false, false);
    assert!(matches!(result, Err(DomainError::InvalidEventName(_))));
}

#[test]
fn test_appointment_copies_times_from_event() {
    let event: Event = Event::new(1, "Spinning", create_test_schedule(), 10, true, false)
        .unwrap()
        .with_id(7);

    let appointment: Appointment = Appointment::new(7, &event, 42);

    assert_eq!(appointment.appointment_id(), None);
    assert_eq!(appointment.event_id(), 7);
    assert_eq!(appointment.client_id(), 42);
    assert_eq!(appointment.start_time(), event.schedule().start_time());
    assert_eq!(appointment.end_time(), event.schedule().end_time());
    assert!(appointment.is_active());
}

#[test]
fn test_worker_can_reflects_granted_permissions() {
    let worker: Worker = Worker::new(
        5,
        WorkerPermissions::empty().with(WorkerPermission::UpdateEventAppointments),
    );

    assert!(worker.can(WorkerPermission::UpdateEventAppointments));
    assert!(!worker.can(WorkerPermission::CreateEventAppointments));
}
