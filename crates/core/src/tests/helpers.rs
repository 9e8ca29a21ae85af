// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::BookingSnapshot;
use hubbl_domain::{Appointment, Event, EventSchedule};

pub const EVENT_ID: i64 = 1;

pub fn create_test_event(capacity: u32, covid_passport: bool) -> Event {
    let schedule: EventSchedule =
        EventSchedule::parse("2026-11-20", "18:00:00", "19:00:00").unwrap();
    Event::new(1, "Crossfit", schedule, capacity, covid_passport, false)
        .unwrap()
        .with_id(EVENT_ID)
}

pub fn create_test_snapshot(capacity: u32, covid_passport: bool) -> BookingSnapshot {
    BookingSnapshot::for_event(EVENT_ID, create_test_event(capacity, covid_passport))
}

pub fn create_test_appointment(appointment_id: i64, client_id: i64, cancelled: bool) -> Appointment {
    let event: Event = create_test_event(10, false);
    Appointment::from_parts(
        appointment_id,
        EVENT_ID,
        client_id,
        event.schedule().start_time(),
        event.schedule().end_time(),
        cancelled,
    )
}
