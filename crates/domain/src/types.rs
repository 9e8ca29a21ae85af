// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::permissions::{WorkerPermission, WorkerPermissions};
use crate::schedule::EventSchedule;
use crate::validation::validate_capacity;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::Time;

/// The account holder of a gym. Identified by person id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    person_id: i64,
}

impl Owner {
    #[must_use]
    pub const fn new(person_id: i64) -> Self {
        Self { person_id }
    }

    #[must_use]
    pub const fn person_id(&self) -> i64 {
        self.person_id
    }
}

/// A staff member acting on behalf of an owner, with granular permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    person_id: i64,
    permissions: WorkerPermissions,
}

impl Worker {
    #[must_use]
    pub const fn new(person_id: i64, permissions: WorkerPermissions) -> Self {
        Self {
            person_id,
            permissions,
        }
    }

    #[must_use]
    pub const fn person_id(&self) -> i64 {
        self.person_id
    }

    #[must_use]
    pub const fn permissions(&self) -> WorkerPermissions {
        self.permissions
    }

    /// Returns true if this worker has been granted `permission`.
    #[must_use]
    pub const fn can(&self, permission: WorkerPermission) -> bool {
        self.permissions.allows(permission)
    }
}

/// An end consumer who books appointments.
///
/// A client is keyed by the id of the person it belongs to, which is also
/// the id carried by the caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    client_id: i64,
    covid_passport: bool,
}

impl Client {
    #[must_use]
    pub const fn new(client_id: i64, covid_passport: bool) -> Self {
        Self {
            client_id,
            covid_passport,
        }
    }

    #[must_use]
    pub const fn client_id(&self) -> i64 {
        self.client_id
    }

    /// Returns true if the client holds a covid passport.
    #[must_use]
    pub const fn has_covid_passport(&self) -> bool {
        self.covid_passport
    }
}

/// A named calendar grouping events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    calendar_id: Option<i64>,
    name: String,
}

impl Calendar {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            calendar_id: None,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn with_id(calendar_id: i64, name: &str) -> Self {
        Self {
            calendar_id: Some(calendar_id),
            name: name.to_string(),
        }
    }

    #[must_use]
    pub const fn calendar_id(&self) -> Option<i64> {
        self.calendar_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A scheduled session clients can book a place in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    event_id: Option<i64>,
    calendar_id: i64,
    name: String,
    schedule: EventSchedule,
    capacity: u32,
    covid_passport: bool,
    mask_required: bool,
}

impl Event {
    /// Creates a new, not yet persisted event.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the capacity is not positive.
    pub fn new(
        calendar_id: i64,
        name: &str,
        schedule: EventSchedule,
        capacity: u32,
        covid_passport: bool,
        mask_required: bool,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidEventName(String::from(
                "Event name cannot be empty",
            )));
        }
        validate_capacity(i64::from(capacity))?;
        Ok(Self {
            event_id: None,
            calendar_id,
            name: name.to_string(),
            schedule,
            capacity,
            covid_passport,
            mask_required,
        })
    }

    /// Attaches the persisted identifier.
    #[must_use]
    pub const fn with_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    #[must_use]
    pub const fn event_id(&self) -> Option<i64> {
        self.event_id
    }

    #[must_use]
    pub const fn calendar_id(&self) -> i64 {
        self.calendar_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns true if attendees must hold a covid passport.
    #[must_use]
    pub const fn requires_covid_passport(&self) -> bool {
        self.covid_passport
    }

    #[must_use]
    pub const fn mask_required(&self) -> bool {
        self.mask_required
    }

    /// Returns true if the event started strictly before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the local start cannot be resolved in `tz`.
    pub fn is_past(&self, now: DateTime<Utc>, tz: Tz) -> Result<bool, DomainError> {
        self.schedule.is_past(now, tz)
    }
}

/// A client's place in an event.
///
/// Start and end times are copied from the event when the appointment is
/// created and never supplied independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    appointment_id: Option<i64>,
    event_id: i64,
    client_id: i64,
    start_time: Time,
    end_time: Time,
    cancelled: bool,
}

impl Appointment {
    /// Creates a new, active appointment for `client_id` in `event`.
    #[must_use]
    pub const fn new(event_id: i64, event: &Event, client_id: i64) -> Self {
        Self {
            appointment_id: None,
            event_id,
            client_id,
            start_time: event.schedule.start_time(),
            end_time: event.schedule.end_time(),
            cancelled: false,
        }
    }

    /// Rebuilds a persisted appointment.
    #[must_use]
    pub const fn from_parts(
        appointment_id: i64,
        event_id: i64,
        client_id: i64,
        start_time: Time,
        end_time: Time,
        cancelled: bool,
    ) -> Self {
        Self {
            appointment_id: Some(appointment_id),
            event_id,
            client_id,
            start_time,
            end_time,
            cancelled,
        }
    }

    #[must_use]
    pub const fn appointment_id(&self) -> Option<i64> {
        self.appointment_id
    }

    #[must_use]
    pub const fn event_id(&self) -> i64 {
        self.event_id
    }

    #[must_use]
    pub const fn client_id(&self) -> i64 {
        self.client_id
    }

    #[must_use]
    pub const fn start_time(&self) -> Time {
        self.start_time
    }

    #[must_use]
    pub const fn end_time(&self) -> Time {
        self.end_time
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns true if the appointment holds a place.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.cancelled
    }
}
