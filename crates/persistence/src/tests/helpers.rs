// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewPerson, Persistence, PersonRole};
use hubbl_domain::{Event, EventSchedule};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn new_person(email: &str, role: PersonRole) -> NewPerson {
    NewPerson {
        first_name: String::from("Test"),
        last_name: String::from("Person"),
        email: email.to_string(),
        role,
    }
}

pub fn create_client(persistence: &mut Persistence, email: &str, covid_passport: bool) -> i64 {
    persistence
        .create_person(&new_person(email, PersonRole::Client { covid_passport }))
        .unwrap()
}

/// Creates a calendar with one event and returns `(calendar_id, event_id)`.
pub fn create_calendar_with_event(
    persistence: &mut Persistence,
    date: &str,
    capacity: u32,
) -> (i64, i64) {
    let calendar_id: i64 = persistence.create_calendar("Main hall").unwrap();
    let event_id: i64 = create_event(persistence, calendar_id, date, capacity);
    (calendar_id, event_id)
}

pub fn create_event(
    persistence: &mut Persistence,
    calendar_id: i64,
    date: &str,
    capacity: u32,
) -> i64 {
    let schedule: EventSchedule = EventSchedule::parse(date, "18:00:00", "19:00:00").unwrap();
    let event: Event = Event::new(calendar_id, "Pilates", schedule, capacity, false, true).unwrap();
    persistence.create_event(&event).unwrap()
}
