// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::permissions::AppointmentAction;
use crate::types::{Appointment, Client, Event};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Validates that an event capacity is a positive number of places.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if `capacity` is zero or negative.
pub const fn validate_capacity(capacity: i64) -> Result<(), DomainError> {
    if capacity < 1 {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    Ok(())
}

/// Rejects any appointment action on an event that has already started.
///
/// # Arguments
///
/// * `event_id` - The id the event is stored under
/// * `event` - The event being acted upon
/// * `action` - The attempted action, used in the rejection message
/// * `now` - The instant the request was received
/// * `tz` - The venue timezone the event schedule is expressed in
///
/// # Errors
///
/// Returns `DomainError::EventInPast` if the event start is strictly before
/// `now`, or a schedule error if the start cannot be resolved.
pub fn validate_event_not_past(
    event_id: i64,
    event: &Event,
    action: AppointmentAction,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<(), DomainError> {
    if event.is_past(now, tz)? {
        return Err(DomainError::EventInPast { action, event_id });
    }
    Ok(())
}

/// Validates that at least one place is free.
///
/// `occupied` is the number of active appointments; cancelled appointments
/// do not hold a place.
///
/// # Errors
///
/// Returns `DomainError::NoPlacesLeft` if `occupied >= capacity`.
pub const fn validate_capacity_available(
    event_id: i64,
    event: &Event,
    occupied: u32,
) -> Result<(), DomainError> {
    if occupied >= event.capacity() {
        return Err(DomainError::NoPlacesLeft {
            event_id,
            capacity: event.capacity(),
        });
    }
    Ok(())
}

/// Validates that a client may take a place in an event.
///
/// # Arguments
///
/// * `event_id` - The id of the event
/// * `event` - The event
/// * `client` - The client, or `None` if no client record exists
/// * `client_id` - The requested client id
/// * `active_for_client` - Active appointments the client already holds in the event
///
/// # Errors
///
/// Returns an error if:
/// - The client does not exist
/// - The event requires a covid passport and the client has none
/// - The client already holds an active appointment in the event
pub const fn validate_client_eligible(
    event_id: i64,
    event: &Event,
    client: Option<&Client>,
    client_id: i64,
    active_for_client: u32,
) -> Result<(), DomainError> {
    let Some(client) = client else {
        return Err(DomainError::ClientNotFound(client_id));
    };

    if event.requires_covid_passport() && !client.has_covid_passport() {
        return Err(DomainError::CovidPassportRequired {
            client_id,
            event_id,
        });
    }

    if active_for_client > 0 {
        return Err(DomainError::AlreadyBooked {
            client_id,
            event_id,
        });
    }

    Ok(())
}

/// Validates that the targeted appointment exists and is still active.
///
/// # Errors
///
/// Returns `DomainError::AppointmentNotFound` if there is no appointment in
/// scope, or `DomainError::AppointmentAlreadyCancelled` if it was already
/// cancelled.
pub const fn validate_cancellable(
    appointment_id: i64,
    event_id: i64,
    appointment: Option<&Appointment>,
) -> Result<&Appointment, DomainError> {
    match appointment {
        None => Err(DomainError::AppointmentNotFound {
            appointment_id,
            event_id,
        }),
        Some(existing) if existing.is_cancelled() => {
            Err(DomainError::AppointmentAlreadyCancelled { appointment_id })
        }
        Some(existing) => Ok(existing),
    }
}
