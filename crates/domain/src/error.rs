// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::permissions::AppointmentAction;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event capacity must be a positive number of places.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: i64,
    },
    /// Event name is empty.
    InvalidEventName(String),
    /// Event start and end times are inconsistent.
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },
    /// Failed to parse a calendar date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The local wall-clock start of an event does not exist in the venue timezone.
    UnresolvableLocalTime {
        /// The local date and time that could not be resolved.
        local: String,
        /// The timezone name.
        timezone: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A worker permission name is not recognized.
    UnknownPermission(String),
    /// A stored permission bitset contains bits no permission uses.
    InvalidPermissionBits(u32),
    /// The event has already started.
    EventInPast {
        /// The action that was attempted.
        action: AppointmentAction,
        /// The event identifier.
        event_id: i64,
    },
    /// Every place of the event is taken.
    NoPlacesLeft {
        /// The event identifier.
        event_id: i64,
        /// The event capacity.
        capacity: u32,
    },
    /// The event requires a covid passport the client does not hold.
    CovidPassportRequired {
        /// The client identifier.
        client_id: i64,
        /// The event identifier.
        event_id: i64,
    },
    /// The client already holds an active appointment for the event.
    AlreadyBooked {
        /// The client identifier.
        client_id: i64,
        /// The event identifier.
        event_id: i64,
    },
    /// No appointment matches the requested scope.
    AppointmentNotFound {
        /// The appointment identifier.
        appointment_id: i64,
        /// The event identifier.
        event_id: i64,
    },
    /// The appointment was cancelled before.
    AppointmentAlreadyCancelled {
        /// The appointment identifier.
        appointment_id: i64,
    },
    /// The event does not exist.
    EventNotFound(i64),
    /// The client does not exist.
    ClientNotFound(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity: {capacity}. Must be at least 1")
            }
            Self::InvalidEventName(msg) => write!(f, "Invalid event name: {msg}"),
            Self::InvalidSchedule { reason } => write!(f, "Invalid event schedule: {reason}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::UnresolvableLocalTime { local, timezone } => {
                write!(f, "Local time {local} does not exist in timezone {timezone}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
            Self::UnknownPermission(name) => write!(f, "Unknown worker permission: {name}"),
            Self::InvalidPermissionBits(bits) => {
                write!(f, "Invalid worker permission bits: {bits:#x}")
            }
            Self::EventInPast { action, .. } => {
                write!(f, "Can not {} an appointment to a past event", action.as_verb())
            }
            Self::NoPlacesLeft { .. } => write!(f, "No places left for the selected event."),
            Self::CovidPassportRequired { .. } => write!(
                f,
                "Client does not have the covid passport and the event requires it"
            ),
            Self::AlreadyBooked { .. } => write!(f, "Client has already a place in the event"),
            Self::AppointmentNotFound { .. } => write!(f, "The appointment does not exist."),
            Self::AppointmentAlreadyCancelled { .. } => {
                write!(f, "The appointment is already cancelled.")
            }
            Self::EventNotFound(event_id) => write!(f, "Event {event_id} does not exist"),
            Self::ClientNotFound(client_id) => write!(f, "Client {client_id} does not exist"),
        }
    }
}

impl std::error::Error for DomainError {}
