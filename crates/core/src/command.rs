// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hubbl_domain::AppointmentAction;

/// A command represents booking intent as data only.
///
/// Commands are the only way to request appointment changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Take a place in an event for a client.
    CreateAppointment {
        /// The event to book.
        event_id: i64,
        /// The client the place is for.
        client_id: i64,
    },
    /// Release a place without removing the appointment.
    CancelAppointment {
        /// The event the appointment belongs to.
        event_id: i64,
        /// The appointment to cancel.
        appointment_id: i64,
    },
    /// Remove an appointment entirely.
    DeleteAppointment {
        /// The event the appointment belongs to.
        event_id: i64,
        /// The appointment to delete.
        appointment_id: i64,
    },
}

impl Command {
    /// Returns the action this command performs.
    #[must_use]
    pub const fn action(&self) -> AppointmentAction {
        match self {
            Self::CreateAppointment { .. } => AppointmentAction::Create,
            Self::CancelAppointment { .. } => AppointmentAction::Cancel,
            Self::DeleteAppointment { .. } => AppointmentAction::Delete,
        }
    }

    /// Returns the event the command targets.
    #[must_use]
    pub const fn event_id(&self) -> i64 {
        match self {
            Self::CreateAppointment { event_id, .. }
            | Self::CancelAppointment { event_id, .. }
            | Self::DeleteAppointment { event_id, .. } => *event_id,
        }
    }
}
