// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hubbl_domain::{Appointment, Client, Event};

/// The facts a booking decision is made from.
///
/// The snapshot is read inside the same storage transaction the resulting
/// mutation is written in, so the counts are still accurate when the
/// mutation lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSnapshot {
    /// The id of the event all facts relate to.
    pub event_id: i64,
    /// The event.
    pub event: Event,
    /// Active (non-cancelled) appointments for the event.
    pub occupied_places: u32,
    /// The client named by a create command, if it exists.
    pub client: Option<Client>,
    /// Active appointments the client already holds in the event.
    pub client_active_appointments: u32,
    /// The appointment targeted by a cancel or delete command, if in scope.
    pub appointment: Option<Appointment>,
}

impl BookingSnapshot {
    /// Creates a snapshot with no occupancy, client, or appointment facts.
    #[must_use]
    pub const fn for_event(event_id: i64, event: Event) -> Self {
        Self {
            event_id,
            event,
            occupied_places: 0,
            client: None,
            client_active_appointments: 0,
            appointment: None,
        }
    }

    #[must_use]
    pub const fn with_occupancy(mut self, occupied_places: u32) -> Self {
        self.occupied_places = occupied_places;
        self
    }

    #[must_use]
    pub const fn with_client(mut self, client: Option<Client>, active_appointments: u32) -> Self {
        self.client = client;
        self.client_active_appointments = active_appointments;
        self
    }

    #[must_use]
    pub const fn with_appointment(mut self, appointment: Option<Appointment>) -> Self {
        self.appointment = appointment;
        self
    }
}

/// The storage change an admitted command results in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a new active appointment.
    Insert(Appointment),
    /// Mark an appointment as cancelled.
    Cancel {
        /// The appointment to cancel.
        appointment_id: i64,
    },
    /// Remove an appointment row.
    Delete {
        /// The appointment to delete.
        appointment_id: i64,
    },
}
