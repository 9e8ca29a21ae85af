// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and role authorization.

use std::str::FromStr;

use hubbl_domain::{AppointmentAction, Client, Owner, Worker, WorkerPermission};
use hubbl_persistence::{Persistence, PersistenceError};

use crate::error::{ApiError, AuthError};

/// Caller roles.
///
/// A role is asserted by the caller and then checked against the role
/// records held for the caller's person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Owner role: a gym owner.
    ///
    /// Owners may create, cancel and delete any appointment.
    Owner,
    /// Worker role: gym staff.
    ///
    /// Workers may act on any appointment their permission set allows.
    Worker,
    /// Client role: a gym member.
    ///
    /// Clients may only book, cancel or delete their own appointments.
    Client,
}

impl Role {
    /// Returns the wire name of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Worker => "worker",
            Self::Client => "client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "worker" => Ok(Self::Worker),
            "client" => Ok(Self::Client),
            _ => Err(AuthError::UnknownRole {
                role: s.to_string(),
            }),
        }
    }
}

/// An authenticated caller with an asserted role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's person ID.
    pub person_id: i64,
    /// The role the caller acts under.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `person_id` - The caller's person ID
    /// * `role` - The role the caller acts under
    #[must_use]
    pub const fn new(person_id: i64, role: Role) -> Self {
        Self { person_id, role }
    }
}

/// An actor matched against the role records held for its person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedActor {
    Owner(Owner),
    Worker(Worker),
    Client(Client),
    /// The asserted role has no record for this person.
    Unregistered(Role),
}

/// Authorization service for the appointment operations.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Looks up the role record backing an actor's asserted role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn resolve(
        persistence: &mut Persistence,
        actor: &AuthenticatedActor,
    ) -> Result<ResolvedActor, PersistenceError> {
        let resolved: ResolvedActor = match actor.role {
            Role::Owner => persistence
                .get_owner(actor.person_id)?
                .map_or(ResolvedActor::Unregistered(Role::Owner), ResolvedActor::Owner),
            Role::Worker => persistence
                .get_worker(actor.person_id)?
                .map_or(ResolvedActor::Unregistered(Role::Worker), ResolvedActor::Worker),
            Role::Client => persistence
                .get_client(actor.person_id)?
                .map_or(ResolvedActor::Unregistered(Role::Client), ResolvedActor::Client),
        };
        Ok(resolved)
    }

    /// Checks that a staff actor may perform an appointment action on any
    /// client's behalf.
    ///
    /// Owners are always allowed. Workers need the permission the action
    /// requires. Clients never take the staff path.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor may not perform the
    /// action, or `ApiError::Internal` if the role lookup fails.
    pub fn authorize_staff_action(
        persistence: &mut Persistence,
        actor: &AuthenticatedActor,
        action: AppointmentAction,
    ) -> Result<(), ApiError> {
        let refuse = |reason: &str| -> ApiError {
            ApiError::from(AuthError::Unauthorized {
                action: action.as_str().to_string(),
                reason: reason.to_string(),
            })
        };

        match Self::resolve(persistence, actor)? {
            ResolvedActor::Owner(_) => Ok(()),
            ResolvedActor::Worker(worker) if worker.can(action.required_permission()) => Ok(()),
            ResolvedActor::Worker(_) => Err(refuse("insufficient permissions")),
            ResolvedActor::Client(_) => Err(refuse("clients may only act on their own appointments")),
            ResolvedActor::Unregistered(role) => {
                Err(refuse(&format!("person {} has no {role} record", actor.person_id)))
            }
        }
    }

    /// Checks a client's self-service request and returns the client the
    /// action applies to.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `requested_client_id` - The client named in the request, if any
    /// * `action` - The action being attempted
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not a client or
    /// names a client other than itself.
    pub fn authorize_self_service(
        actor: &AuthenticatedActor,
        requested_client_id: Option<i64>,
        action: AppointmentAction,
    ) -> Result<i64, AuthError> {
        if actor.role != Role::Client {
            return Err(AuthError::Unauthorized {
                action: action.as_str().to_string(),
                reason: format!("{} callers must act through the staff path", actor.role),
            });
        }

        match requested_client_id {
            Some(client_id) if client_id != actor.person_id => Err(AuthError::Unauthorized {
                action: action.as_str().to_string(),
                reason: String::from("clients may only act on their own appointments"),
            }),
            _ => Ok(actor.person_id),
        }
    }

    /// Checks that an actor may list the appointments of an event.
    ///
    /// Owners may. Workers may if they hold any appointment permission.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor may not list
    /// appointments, or `ApiError::Internal` if the role lookup fails.
    pub fn authorize_view_event_appointments(
        persistence: &mut Persistence,
        actor: &AuthenticatedActor,
    ) -> Result<(), ApiError> {
        let allowed: bool = match Self::resolve(persistence, actor)? {
            ResolvedActor::Owner(_) => true,
            ResolvedActor::Worker(worker) => can_handle_appointments(&worker),
            ResolvedActor::Client(_) | ResolvedActor::Unregistered(_) => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(ApiError::from(AuthError::Unauthorized {
                action: String::from("list_event_appointments"),
                reason: String::from("insufficient permissions"),
            }))
        }
    }
}

/// Whether a worker holds any of the event appointment permissions.
pub(crate) fn can_handle_appointments(worker: &Worker) -> bool {
    [
        WorkerPermission::CreateEventAppointments,
        WorkerPermission::UpdateEventAppointments,
        WorkerPermission::DeleteEventAppointments,
    ]
    .into_iter()
    .any(|permission| worker.can(permission))
}
