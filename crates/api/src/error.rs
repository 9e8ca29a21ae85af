// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hubbl::CoreError;
use hubbl_domain::DomainError;
use hubbl_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller presented a role the system does not know.
    UnknownRole {
        /// The role string as presented.
        role: String,
    },
    /// The caller may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRole { role } => {
                write!(f, "Unknown role '{role}' cannot perform operation")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized to {action}: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// The variants form the fixed outcome vocabulary the transport layer maps
/// to status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's role or permissions do not allow the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A business rule rejected the request.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred. The message is for logs only.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized to {action}: {reason}")
            }
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownRole { role } => Self::Unauthorized {
                action: String::from("perform operation"),
                reason: format!("unknown role '{role}'"),
            },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            // The unique index caught a booking the pre-check did not see.
            PersistenceError::ActiveAppointmentExists {
                event_id,
                client_id,
            } => translate_domain_error(DomainError::AlreadyBooked {
                client_id,
                event_id,
            }),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidCapacity { .. } => ApiError::InvalidInput {
            field: String::from("capacity"),
            message,
        },
        DomainError::InvalidEventName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidSchedule { .. } | DomainError::TimeParseError { .. } => {
            ApiError::InvalidInput {
                field: String::from("schedule"),
                message,
            }
        }
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::InvalidInput {
                field: String::from("start_date"),
                message,
            }
        }
        DomainError::UnresolvableLocalTime { .. }
        | DomainError::UnknownPermission(_)
        | DomainError::InvalidPermissionBits(_) => ApiError::Internal { message },
        DomainError::EventInPast { .. } => ApiError::DomainRuleViolation {
            rule: String::from("event_not_past"),
            message,
        },
        DomainError::NoPlacesLeft { .. } => ApiError::DomainRuleViolation {
            rule: String::from("capacity"),
            message,
        },
        DomainError::CovidPassportRequired { .. } => ApiError::DomainRuleViolation {
            rule: String::from("covid_passport"),
            message,
        },
        DomainError::AlreadyBooked { .. } => ApiError::DomainRuleViolation {
            rule: String::from("one_active_appointment"),
            message,
        },
        DomainError::AppointmentNotFound { .. } => ApiError::DomainRuleViolation {
            rule: String::from("appointment_exists"),
            message,
        },
        DomainError::AppointmentAlreadyCancelled { .. } => ApiError::DomainRuleViolation {
            rule: String::from("appointment_active"),
            message,
        },
        DomainError::EventNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message,
        },
        DomainError::ClientNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SnapshotMismatch { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
