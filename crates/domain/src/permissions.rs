// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker permissions and the appointment actions they gate.
//!
//! A worker carries one grant per (action, resource) pair. Grants are held
//! in a single bitset indexed by [`WorkerPermission`], and every
//! [`AppointmentAction`] names its required permission through an
//! exhaustive match, so a caller can never forget to supply one.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single per-action grant a worker may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerPermission {
    CreateVirtualGyms,
    UpdateVirtualGyms,
    DeleteVirtualGyms,
    CreateGymZones,
    UpdateGymZones,
    DeleteGymZones,
    CreateTrainers,
    UpdateTrainers,
    DeleteTrainers,
    CreateClients,
    UpdateClients,
    DeleteClients,
    CreateTags,
    UpdateTags,
    DeleteTags,
    CreateEvents,
    UpdateEvents,
    DeleteEvents,
    CreateEventTypes,
    UpdateEventTypes,
    DeleteEventTypes,
    CreateEventTemplates,
    UpdateEventTemplates,
    DeleteEventTemplates,
    CreateEventAppointments,
    UpdateEventAppointments,
    DeleteEventAppointments,
    CreateCalendarAppointments,
    UpdateCalendarAppointments,
    DeleteCalendarAppointments,
}

impl WorkerPermission {
    /// Every permission, in bit order.
    pub const ALL: [Self; 30] = [
        Self::CreateVirtualGyms,
        Self::UpdateVirtualGyms,
        Self::DeleteVirtualGyms,
        Self::CreateGymZones,
        Self::UpdateGymZones,
        Self::DeleteGymZones,
        Self::CreateTrainers,
        Self::UpdateTrainers,
        Self::DeleteTrainers,
        Self::CreateClients,
        Self::UpdateClients,
        Self::DeleteClients,
        Self::CreateTags,
        Self::UpdateTags,
        Self::DeleteTags,
        Self::CreateEvents,
        Self::UpdateEvents,
        Self::DeleteEvents,
        Self::CreateEventTypes,
        Self::UpdateEventTypes,
        Self::DeleteEventTypes,
        Self::CreateEventTemplates,
        Self::UpdateEventTemplates,
        Self::DeleteEventTemplates,
        Self::CreateEventAppointments,
        Self::UpdateEventAppointments,
        Self::DeleteEventAppointments,
        Self::CreateCalendarAppointments,
        Self::UpdateCalendarAppointments,
        Self::DeleteCalendarAppointments,
    ];

    /// Returns the bit this permission occupies in a [`WorkerPermissions`] set.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Returns the wire name of the permission, e.g. `createEventAppointments`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateVirtualGyms => "createVirtualGyms",
            Self::UpdateVirtualGyms => "updateVirtualGyms",
            Self::DeleteVirtualGyms => "deleteVirtualGyms",
            Self::CreateGymZones => "createGymZones",
            Self::UpdateGymZones => "updateGymZones",
            Self::DeleteGymZones => "deleteGymZones",
            Self::CreateTrainers => "createTrainers",
            Self::UpdateTrainers => "updateTrainers",
            Self::DeleteTrainers => "deleteTrainers",
            Self::CreateClients => "createClients",
            Self::UpdateClients => "updateClients",
            Self::DeleteClients => "deleteClients",
            Self::CreateTags => "createTags",
            Self::UpdateTags => "updateTags",
            Self::DeleteTags => "deleteTags",
            Self::CreateEvents => "createEvents",
            Self::UpdateEvents => "updateEvents",
            Self::DeleteEvents => "deleteEvents",
            Self::CreateEventTypes => "createEventTypes",
            Self::UpdateEventTypes => "updateEventTypes",
            Self::DeleteEventTypes => "deleteEventTypes",
            Self::CreateEventTemplates => "createEventTemplates",
            Self::UpdateEventTemplates => "updateEventTemplates",
            Self::DeleteEventTemplates => "deleteEventTemplates",
            Self::CreateEventAppointments => "createEventAppointments",
            Self::UpdateEventAppointments => "updateEventAppointments",
            Self::DeleteEventAppointments => "deleteEventAppointments",
            Self::CreateCalendarAppointments => "createCalendarAppointments",
            Self::UpdateCalendarAppointments => "updateCalendarAppointments",
            Self::DeleteCalendarAppointments => "deleteCalendarAppointments",
        }
    }
}

impl FromStr for WorkerPermission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| DomainError::UnknownPermission(s.to_string()))
    }
}

impl std::fmt::Display for WorkerPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of permissions granted to a worker.
///
/// Serialized as a list of permission names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<WorkerPermission>", from = "Vec<WorkerPermission>")]
pub struct WorkerPermissions(u32);

impl WorkerPermissions {
    const VALID_BITS: u32 = (1 << WorkerPermission::ALL.len()) - 1;

    /// Creates an empty permission set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set holding every permission.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::VALID_BITS)
    }

    /// Restores a set from its stored bit representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPermissionBits` if any bit outside the
    /// known permissions is set.
    pub const fn from_bits(bits: u32) -> Result<Self, DomainError> {
        if bits & !Self::VALID_BITS != 0 {
            return Err(DomainError::InvalidPermissionBits(bits));
        }
        Ok(Self(bits))
    }

    /// Returns the stored bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns a copy of this set with `permission` granted.
    #[must_use]
    pub const fn with(self, permission: WorkerPermission) -> Self {
        Self(self.0 | permission.bit())
    }

    pub const fn grant(&mut self, permission: WorkerPermission) {
        self.0 |= permission.bit();
    }

    pub const fn revoke(&mut self, permission: WorkerPermission) {
        self.0 &= !permission.bit();
    }

    /// Returns true if `permission` is granted.
    #[must_use]
    pub const fn allows(self, permission: WorkerPermission) -> bool {
        self.0 & permission.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the granted permissions in bit order.
    pub fn iter(self) -> impl Iterator<Item = WorkerPermission> {
        WorkerPermission::ALL
            .into_iter()
            .filter(move |permission| self.allows(*permission))
    }
}

impl FromIterator<WorkerPermission> for WorkerPermissions {
    fn from_iter<I: IntoIterator<Item = WorkerPermission>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<WorkerPermission>> for WorkerPermissions {
    fn from(permissions: Vec<WorkerPermission>) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<WorkerPermissions> for Vec<WorkerPermission> {
    fn from(permissions: WorkerPermissions) -> Self {
        permissions.iter().collect()
    }
}

/// A write action on an event appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    Create,
    Cancel,
    Delete,
}

impl AppointmentAction {
    /// Returns the worker permission required to perform this action.
    #[must_use]
    pub const fn required_permission(self) -> WorkerPermission {
        match self {
            Self::Create => WorkerPermission::CreateEventAppointments,
            Self::Cancel => WorkerPermission::UpdateEventAppointments,
            Self::Delete => WorkerPermission::DeleteEventAppointments,
        }
    }

    /// Returns the verb used in user-facing messages.
    #[must_use]
    pub const fn as_verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
        }
    }

    /// Returns the operation name used in logs and authorization errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create_appointment",
            Self::Cancel => "cancel_appointment",
            Self::Delete => "delete_appointment",
        }
    }
}
