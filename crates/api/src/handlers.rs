// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the appointment operations.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use hubbl::{BookingSnapshot, Command, Mutation, apply};
use hubbl_domain::{
    AppointmentAction, Calendar, DomainError, Event, format_date, parse_date,
    validate_event_not_past, week_range,
};
use hubbl_persistence::{AppointmentDetails, EventOccupancy, Persistence};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService, ResolvedActor, Role};
use crate::capabilities::compute_appointment_capabilities;
use crate::error::{ApiError, AuthError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AppointmentCapabilities, AppointmentResponse, CalendarEventInfo, CancelAppointmentRequest,
    CreateAppointmentRequest, DeleteAppointmentRequest, ListCalendarEventsRequest,
    ListCalendarEventsResponse, ListEventAppointmentsResponse,
};

/// The instant a request is judged at and the zone event times are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingClock {
    /// The current instant.
    pub now: DateTime<Utc>,
    /// The zone event dates and times are expressed in.
    pub timezone: Tz,
}

impl BookingClock {
    /// Creates a new clock.
    #[must_use]
    pub const fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// A clock reading the current system time.
    #[must_use]
    pub fn system(timezone: Tz) -> Self {
        Self::new(Utc::now(), timezone)
    }
}

/// Loads an event and rejects actions on events that already started.
fn load_open_event(
    persistence: &mut Persistence,
    event_id: i64,
    action: AppointmentAction,
    clock: BookingClock,
) -> Result<Event, ApiError> {
    let event: Event = persistence
        .get_event(event_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load event {event_id}: {e}"),
        })?
        .ok_or_else(|| translate_domain_error(DomainError::EventNotFound(event_id)))?;

    validate_event_not_past(event_id, &event, action, clock.now, clock.timezone)
        .map_err(translate_domain_error)?;

    Ok(event)
}

/// Authorizes an action and returns the client scope it is limited to.
///
/// Staff are unscoped. A client is scoped to its own appointments.
fn authorize_action(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    action: AppointmentAction,
    requested_client_id: Option<i64>,
) -> Result<Option<i64>, ApiError> {
    match actor.role {
        Role::Owner | Role::Worker => {
            AuthorizationService::authorize_staff_action(persistence, actor, action)?;
            Ok(None)
        }
        Role::Client => {
            let client_id: i64 =
                AuthorizationService::authorize_self_service(actor, requested_client_id, action)?;
            Ok(Some(client_id))
        }
    }
}

fn missing_client() -> ApiError {
    ApiError::InvalidInput {
        field: String::from("client_id"),
        message: String::from("A client is required when booking on a client's behalf"),
    }
}

/// Fetches the joined view of a just-written appointment.
fn appointment_response(
    persistence: &mut Persistence,
    appointment_id: i64,
) -> Result<AppointmentResponse, ApiError> {
    let details: AppointmentDetails = persistence
        .get_appointment_details(appointment_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load appointment {appointment_id}: {e}"),
        })?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Appointment {appointment_id} vanished after write"),
        })?;

    AppointmentResponse::from_details(&details).ok_or_else(|| ApiError::Internal {
        message: format!("Appointment {appointment_id} loaded without an ID"),
    })
}

/// Runs the create checks and inserts the appointment.
fn book_place(
    tx: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateAppointmentRequest,
    clock: BookingClock,
) -> Result<i64, ApiError> {
    let action: AppointmentAction = AppointmentAction::Create;
    let event_id: i64 = request.event_id;
    let event: Event = load_open_event(tx, event_id, action, clock)?;

    let client_id: i64 = match authorize_action(tx, actor, action, request.client_id)? {
        Some(own_id) => own_id,
        None => request.client_id.ok_or_else(missing_client)?,
    };

    let occupied: u32 = tx.count_active_appointments(event_id)?;
    let client = tx.get_client(client_id)?;
    let active_for_client: u32 = tx.count_active_client_appointments(event_id, client_id)?;

    let snapshot: BookingSnapshot = BookingSnapshot::for_event(event_id, event)
        .with_occupancy(occupied)
        .with_client(client, active_for_client);
    let mutation: Mutation = apply(
        &snapshot,
        Command::CreateAppointment {
            event_id,
            client_id,
        },
    )
    .map_err(translate_core_error)?;

    Ok(tx.persist_mutation(&mutation)?)
}

/// Books a place in an event.
///
/// Owners and workers book for the client named in the request. A client
/// books for itself. The checks run in this order inside one immediate
/// transaction: event exists, event not started, caller authorized,
/// capacity, covid passport, duplicate booking.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated caller
/// * `request` - The booking request
/// * `clock` - The current instant and event timezone
///
/// # Errors
///
/// Returns an error if:
/// - A staff caller omits the client
/// - The event or client does not exist
/// - The event already started
/// - The caller is not authorized
/// - The event is full, the client lacks a required covid passport, or the
///   client already holds an active place
pub fn create_appointment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateAppointmentRequest,
    clock: BookingClock,
) -> Result<AppointmentResponse, ApiError> {
    let event_id: i64 = request.event_id;

    if actor.role != Role::Client && request.client_id.is_none() {
        return Err(missing_client());
    }

    let appointment_id: i64 = persistence
        .immediate_transaction(|tx: &mut Persistence| book_place(tx, actor, request, clock))?;

    info!(
        event_id,
        appointment_id,
        person_id = actor.person_id,
        role = %actor.role,
        "Appointment created"
    );

    appointment_response(persistence, appointment_id)
}

/// Cancels an appointment, keeping it in the event's history.
///
/// A client may only cancel its own appointments. A cancelled appointment
/// frees its place.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated caller
/// * `request` - The appointment to cancel
/// * `clock` - The current instant and event timezone
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The event already started
/// - The caller is not authorized
/// - The appointment does not exist in the caller's scope or is already
///   cancelled
pub fn cancel_appointment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CancelAppointmentRequest,
    clock: BookingClock,
) -> Result<AppointmentResponse, ApiError> {
    let action: AppointmentAction = AppointmentAction::Cancel;
    let CancelAppointmentRequest {
        event_id,
        appointment_id,
    } = request;

    persistence.immediate_transaction(|tx: &mut Persistence| -> Result<i64, ApiError> {
        let event: Event = load_open_event(tx, event_id, action, clock)?;
        let client_scope: Option<i64> = authorize_action(tx, actor, action, None)?;
        let appointment = tx.find_appointment(appointment_id, event_id, client_scope)?;

        let snapshot: BookingSnapshot =
            BookingSnapshot::for_event(event_id, event).with_appointment(appointment);
        let mutation: Mutation = apply(
            &snapshot,
            Command::CancelAppointment {
                event_id,
                appointment_id,
            },
        )
        .map_err(translate_core_error)?;

        Ok(tx.persist_mutation(&mutation)?)
    })?;

    info!(
        event_id,
        appointment_id,
        person_id = actor.person_id,
        role = %actor.role,
        "Appointment cancelled"
    );

    appointment_response(persistence, appointment_id)
}

/// Deletes an appointment outright.
///
/// A client may only delete its own appointments. Cancelled appointments
/// may be deleted.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated caller
/// * `request` - The appointment to delete
/// * `clock` - The current instant and event timezone
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The event already started
/// - The caller is not authorized, including a client naming an
///   appointment it does not own
/// - The appointment does not exist
pub fn delete_appointment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: DeleteAppointmentRequest,
    clock: BookingClock,
) -> Result<(), ApiError> {
    let action: AppointmentAction = AppointmentAction::Delete;
    let DeleteAppointmentRequest {
        event_id,
        appointment_id,
    } = request;

    persistence.immediate_transaction(|tx: &mut Persistence| -> Result<(), ApiError> {
        let event: Event = load_open_event(tx, event_id, action, clock)?;
        let client_scope: Option<i64> = authorize_action(tx, actor, action, None)?;

        if let Some(client_id) = client_scope {
            let owned: u32 = tx.count_matching_appointments(appointment_id, client_id, event_id)?;
            if owned == 0 {
                return Err(ApiError::from(AuthError::Unauthorized {
                    action: action.as_str().to_string(),
                    reason: String::from(
                        "Client does not have permissions to delete the appointment.",
                    ),
                }));
            }
        }

        let appointment = tx.find_appointment(appointment_id, event_id, client_scope)?;
        let snapshot: BookingSnapshot =
            BookingSnapshot::for_event(event_id, event).with_appointment(appointment);
        let mutation: Mutation = apply(
            &snapshot,
            Command::DeleteAppointment {
                event_id,
                appointment_id,
            },
        )
        .map_err(translate_core_error)?;

        tx.persist_mutation(&mutation)?;
        Ok(())
    })?;

    info!(
        event_id,
        appointment_id,
        person_id = actor.person_id,
        role = %actor.role,
        "Appointment deleted"
    );

    Ok(())
}

/// Lists a calendar's events for the seven days starting at the requested
/// date, with their occupancy.
///
/// Any authenticated caller may list events.
///
/// # Errors
///
/// Returns an error if the start date is malformed or the calendar does
/// not exist.
pub fn list_calendar_events(
    persistence: &mut Persistence,
    request: &ListCalendarEventsRequest,
) -> Result<ListCalendarEventsResponse, ApiError> {
    let start: Date = parse_date(&request.start_date).map_err(translate_domain_error)?;
    let (from, to): (Date, Date) = week_range(start).map_err(translate_domain_error)?;

    let calendar: Calendar = persistence
        .get_calendar(request.calendar_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load calendar {}: {e}", request.calendar_id),
        })?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Calendar"),
            message: format!("Calendar {} does not exist", request.calendar_id),
        })?;

    let events: Vec<EventOccupancy> = persistence
        .list_calendar_events(request.calendar_id, from, to)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list events: {e}"),
        })?;

    debug!(
        calendar_id = request.calendar_id,
        count = events.len(),
        "Listed calendar events"
    );

    Ok(ListCalendarEventsResponse {
        calendar_id: request.calendar_id,
        calendar_name: calendar.name().to_string(),
        start_date: format_date(from),
        end_date: format_date(to),
        events: events.iter().map(CalendarEventInfo::from).collect(),
    })
}

/// Lists every appointment of an event, cancelled ones included.
///
/// # Errors
///
/// Returns an error if the caller may not view appointments or the event
/// does not exist.
pub fn list_event_appointments(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: i64,
) -> Result<ListEventAppointmentsResponse, ApiError> {
    AuthorizationService::authorize_view_event_appointments(persistence, actor)?;

    if persistence.get_event(event_id)?.is_none() {
        return Err(translate_domain_error(DomainError::EventNotFound(event_id)));
    }

    let details: Vec<AppointmentDetails> = persistence
        .list_event_appointments(event_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list appointments: {e}"),
        })?;

    Ok(ListEventAppointmentsResponse {
        event_id,
        appointments: details
            .iter()
            .filter_map(AppointmentResponse::from_details)
            .collect(),
    })
}

/// Reports which appointment actions the caller may perform.
///
/// # Errors
///
/// Returns an error if the role lookup fails.
pub fn get_appointment_capabilities(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<AppointmentCapabilities, ApiError> {
    let resolved: ResolvedActor = AuthorizationService::resolve(persistence, actor)?;
    Ok(compute_appointment_capabilities(&resolved))
}
