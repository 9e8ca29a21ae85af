// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use hubbl_domain::{format_date, format_time};
use hubbl_persistence::{AppointmentDetails, EventOccupancy};

/// API request to book a place in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAppointmentRequest {
    /// The event to book.
    pub event_id: i64,
    /// The client to book for. Required on the staff path.
    pub client_id: Option<i64>,
}

/// API request to cancel an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelAppointmentRequest {
    /// The event the appointment belongs to.
    pub event_id: i64,
    /// The appointment to cancel.
    pub appointment_id: i64,
}

/// API request to delete an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAppointmentRequest {
    /// The event the appointment belongs to.
    pub event_id: i64,
    /// The appointment to delete.
    pub appointment_id: i64,
}

/// An appointment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AppointmentResponse {
    /// The appointment identifier.
    pub appointment_id: i64,
    /// The event the appointment belongs to.
    pub event_id: i64,
    /// The event name.
    pub event_name: String,
    /// The event date (`YYYY-MM-DD`).
    pub event_date: String,
    /// The booked client.
    pub client_id: i64,
    /// The client's first name.
    pub client_first_name: String,
    /// The client's last name.
    pub client_last_name: String,
    /// Start time copied from the event (`HH:MM:SS`).
    pub start_time: String,
    /// End time copied from the event (`HH:MM:SS`).
    pub end_time: String,
    /// Whether the appointment has been cancelled.
    pub cancelled: bool,
}

impl AppointmentResponse {
    /// Builds a response from a persisted appointment.
    ///
    /// Returns `None` for an appointment without a persisted ID.
    #[must_use]
    pub fn from_details(details: &AppointmentDetails) -> Option<Self> {
        let appointment = &details.appointment;
        Some(Self {
            appointment_id: appointment.appointment_id()?,
            event_id: appointment.event_id(),
            event_name: details.event_name.clone(),
            event_date: format_date(details.event_date),
            client_id: appointment.client_id(),
            client_first_name: details.client_first_name.clone(),
            client_last_name: details.client_last_name.clone(),
            start_time: format_time(appointment.start_time()),
            end_time: format_time(appointment.end_time()),
            cancelled: appointment.is_cancelled(),
        })
    }
}

/// API request to list a calendar's events for one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCalendarEventsRequest {
    /// The calendar to list.
    pub calendar_id: i64,
    /// First day of the week (`YYYY-MM-DD`).
    pub start_date: String,
}

/// Event information for calendar listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarEventInfo {
    pub event_id: i64,
    pub name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    /// Non-cancelled appointments.
    pub occupied_places: u32,
    pub available_places: u32,
    pub covid_passport: bool,
    pub mask_required: bool,
}

impl From<&EventOccupancy> for CalendarEventInfo {
    fn from(occupancy: &EventOccupancy) -> Self {
        let event = &occupancy.event;
        let schedule = event.schedule();
        Self {
            event_id: occupancy.event_id,
            name: event.name().to_string(),
            date: format_date(schedule.date()),
            start_time: format_time(schedule.start_time()),
            end_time: format_time(schedule.end_time()),
            capacity: event.capacity(),
            occupied_places: occupancy.active_appointments,
            available_places: event.capacity().saturating_sub(occupancy.active_appointments),
            covid_passport: event.requires_covid_passport(),
            mask_required: event.mask_required(),
        }
    }
}

/// API response for a calendar week listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCalendarEventsResponse {
    pub calendar_id: i64,
    pub calendar_name: String,
    /// First day of the listed week, inclusive.
    pub start_date: String,
    /// Last day of the listed week, inclusive.
    pub end_date: String,
    pub events: Vec<CalendarEventInfo>,
}

/// API response listing every appointment of an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEventAppointmentsResponse {
    pub event_id: i64,
    pub appointments: Vec<AppointmentResponse>,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let allowed: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(allowed))
    }
}

/// Appointment capabilities for an authenticated caller.
///
/// Advisory only. Every operation re-checks authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AppointmentCapabilities {
    /// Whether the caller can book a place for any client.
    pub can_create_for_clients: Capability,
    /// Whether the caller can cancel any client's appointment.
    pub can_cancel_for_clients: Capability,
    /// Whether the caller can delete any client's appointment.
    pub can_delete_for_clients: Capability,
    /// Whether the caller can book, cancel and delete its own appointments.
    pub can_self_book: Capability,
    /// Whether the caller can list an event's appointments.
    pub can_view_event_appointments: Capability,
}
