// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, TimeZone, Utc};
use hubbl_domain::{Event, EventSchedule, WorkerPermission, WorkerPermissions};
use hubbl_persistence::{NewPerson, Persistence, PersonRole};

use crate::{
    AppointmentResponse, AuthenticatedActor, BookingClock, CreateAppointmentRequest, Role,
    create_appointment,
};

pub const FUTURE_DATE: &str = "2026-06-10";
pub const PAST_DATE: &str = "2026-05-20";

/// Noon UTC on 2026-06-01.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub fn test_clock() -> BookingClock {
    BookingClock::new(test_now(), chrono_tz::UTC)
}

/// A seeded gym: one of each role, one calendar and a few events.
pub struct TestGym {
    pub persistence: Persistence,
    pub owner_id: i64,
    /// Holds every permission.
    pub worker_id: i64,
    /// Holds only the create permission.
    pub booking_worker_id: i64,
    /// Holds no permissions.
    pub idle_worker_id: i64,
    /// Holds a covid passport.
    pub client_id: i64,
    pub other_client_id: i64,
    /// Has no covid passport.
    pub unvaccinated_client_id: i64,
    pub calendar_id: i64,
    /// Capacity 2, no passport required.
    pub event_id: i64,
    /// Capacity 5, passport required.
    pub passport_event_id: i64,
    /// Already finished.
    pub past_event_id: i64,
}

impl TestGym {
    pub const fn owner(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.owner_id, Role::Owner)
    }

    pub const fn worker(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.worker_id, Role::Worker)
    }

    pub const fn booking_worker(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.booking_worker_id, Role::Worker)
    }

    pub const fn idle_worker(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.idle_worker_id, Role::Worker)
    }

    pub const fn client(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.client_id, Role::Client)
    }

    pub const fn other_client(&self) -> AuthenticatedActor {
        AuthenticatedActor::new(self.other_client_id, Role::Client)
    }

    /// Books `client_id` into `event_id` as the owner.
    pub fn book(&mut self, event_id: i64, client_id: i64) -> AppointmentResponse {
        let owner: AuthenticatedActor = self.owner();
        create_appointment(
            &mut self.persistence,
            &owner,
            CreateAppointmentRequest {
                event_id,
                client_id: Some(client_id),
            },
            test_clock(),
        )
        .expect("Failed to book appointment")
    }
}

pub fn person(persistence: &mut Persistence, first_name: &str, role: PersonRole) -> i64 {
    persistence
        .create_person(&NewPerson {
            first_name: first_name.to_string(),
            last_name: String::from("Tester"),
            email: format!("{}@hubbl.test", first_name.to_lowercase()),
            role,
        })
        .expect("Failed to create person")
}

pub fn create_event(
    persistence: &mut Persistence,
    calendar_id: i64,
    date: &str,
    capacity: u32,
    covid_passport: bool,
) -> i64 {
    let schedule: EventSchedule =
        EventSchedule::parse(date, "18:00:00", "19:00:00").expect("Failed to parse schedule");
    let event: Event = Event::new(calendar_id, "Pilates", schedule, capacity, covid_passport, false)
        .expect("Failed to build event");
    persistence
        .create_event(&event)
        .expect("Failed to create event")
}

pub fn setup_gym() -> TestGym {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create persistence");

    let owner_id: i64 = person(&mut persistence, "Olivia", PersonRole::Owner);
    let worker_id: i64 = person(
        &mut persistence,
        "Walter",
        PersonRole::Worker {
            permissions: WorkerPermissions::all(),
        },
    );
    let booking_worker_id: i64 = person(
        &mut persistence,
        "Beatriz",
        PersonRole::Worker {
            permissions: WorkerPermissions::empty()
                .with(WorkerPermission::CreateEventAppointments),
        },
    );
    let idle_worker_id: i64 = person(
        &mut persistence,
        "Ivan",
        PersonRole::Worker {
            permissions: WorkerPermissions::empty(),
        },
    );
    let client_id: i64 = person(
        &mut persistence,
        "Carla",
        PersonRole::Client {
            covid_passport: true,
        },
    );
    let other_client_id: i64 = person(
        &mut persistence,
        "Diego",
        PersonRole::Client {
            covid_passport: true,
        },
    );
    let unvaccinated_client_id: i64 = person(
        &mut persistence,
        "Uma",
        PersonRole::Client {
            covid_passport: false,
        },
    );

    let calendar_id: i64 = persistence
        .create_calendar("Main hall")
        .expect("Failed to create calendar");
    let event_id: i64 = create_event(&mut persistence, calendar_id, FUTURE_DATE, 2, false);
    let passport_event_id: i64 = create_event(&mut persistence, calendar_id, FUTURE_DATE, 5, true);
    let past_event_id: i64 = create_event(&mut persistence, calendar_id, PAST_DATE, 5, false);

    TestGym {
        persistence,
        owner_id,
        worker_id,
        booking_worker_id,
        idle_worker_id,
        client_id,
        other_client_id,
        unvaccinated_client_id,
        calendar_id,
        event_id,
        passport_event_id,
        past_event_id,
    }
}

pub fn assert_rule_violation(result: Result<impl std::fmt::Debug, crate::ApiError>, expected: &str) {
    match result {
        Err(crate::ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, expected),
        other => panic!("Expected {expected} violation, got {other:?}"),
    }
}

pub fn assert_unauthorized(result: Result<impl std::fmt::Debug, crate::ApiError>) {
    assert!(
        matches!(result, Err(crate::ApiError::Unauthorized { .. })),
        "Expected unauthorized, got {result:?}"
    );
}

pub fn assert_not_found(result: Result<impl std::fmt::Debug, crate::ApiError>, expected: &str) {
    match result {
        Err(crate::ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, expected);
        }
        other => panic!("Expected {expected} not found, got {other:?}"),
    }
}
