// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hubbl_domain::{Appointment, Event, WorkerPermissions};
use serde::{Deserialize, Serialize};
use time::Date;

/// An appointment joined with its client's person record and its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub event_name: String,
    pub event_date: Date,
}

/// An event together with the number of places currently taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOccupancy {
    pub event_id: i64,
    pub event: Event,
    pub active_appointments: u32,
}

/// The role record created alongside a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum PersonRole {
    Owner,
    Worker {
        #[serde(default)]
        permissions: WorkerPermissions,
    },
    Client {
        #[serde(default)]
        covid_passport: bool,
    },
}

/// A person to register, with exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(flatten)]
    pub role: PersonRole,
}

/// An event as written in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFixture {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    pub capacity: u32,
    #[serde(default)]
    pub covid_passport: bool,
    #[serde(default)]
    pub mask_required: bool,
}

/// A calendar and its events as written in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFixture {
    pub name: String,
    #[serde(default)]
    pub events: Vec<EventFixture>,
}

/// Seed data loaded at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub persons: Vec<NewPerson>,
    #[serde(default)]
    pub calendars: Vec<CalendarFixture>,
}

/// How many rows of each kind a fixture load created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub persons: usize,
    pub calendars: usize,
    pub events: usize,
}
