// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, ResolvedActor, Role};
pub use capabilities::compute_appointment_capabilities;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    BookingClock, cancel_appointment, create_appointment, delete_appointment,
    get_appointment_capabilities, list_calendar_events, list_event_appointments,
};
pub use request_response::{
    AppointmentCapabilities, AppointmentResponse, CalendarEventInfo, CancelAppointmentRequest,
    Capability, CreateAppointmentRequest, DeleteAppointmentRequest, ListCalendarEventsRequest,
    ListCalendarEventsResponse, ListEventAppointmentsResponse,
};
