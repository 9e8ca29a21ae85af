// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose which appointment actions a caller may perform.
//! They are advisory only and do not replace the checks each operation
//! makes.

use hubbl_domain::{AppointmentAction, Worker};

use crate::auth::{ResolvedActor, can_handle_appointments};
use crate::request_response::{AppointmentCapabilities, Capability};

/// Computes appointment capabilities for a resolved caller.
///
/// Unregistered callers have no capabilities.
///
/// # Arguments
///
/// * `actor` - The caller matched against its role records
#[must_use]
pub fn compute_appointment_capabilities(actor: &ResolvedActor) -> AppointmentCapabilities {
    match actor {
        ResolvedActor::Owner(_) => AppointmentCapabilities {
            can_create_for_clients: Capability::Allowed,
            can_cancel_for_clients: Capability::Allowed,
            can_delete_for_clients: Capability::Allowed,
            can_self_book: Capability::Denied,
            can_view_event_appointments: Capability::Allowed,
        },
        ResolvedActor::Worker(worker) => AppointmentCapabilities {
            can_create_for_clients: worker_capability(worker, AppointmentAction::Create),
            can_cancel_for_clients: worker_capability(worker, AppointmentAction::Cancel),
            can_delete_for_clients: worker_capability(worker, AppointmentAction::Delete),
            can_self_book: Capability::Denied,
            can_view_event_appointments: Capability::from_bool(can_handle_appointments(worker)),
        },
        ResolvedActor::Client(_) => AppointmentCapabilities {
            can_create_for_clients: Capability::Denied,
            can_cancel_for_clients: Capability::Denied,
            can_delete_for_clients: Capability::Denied,
            can_self_book: Capability::Allowed,
            can_view_event_appointments: Capability::Denied,
        },
        ResolvedActor::Unregistered(_) => AppointmentCapabilities {
            can_create_for_clients: Capability::Denied,
            can_cancel_for_clients: Capability::Denied,
            can_delete_for_clients: Capability::Denied,
            can_self_book: Capability::Denied,
            can_view_event_appointments: Capability::Denied,
        },
    }
}

const fn worker_capability(worker: &Worker, action: AppointmentAction) -> Capability {
    Capability::from_bool(worker.can(action.required_permission()))
}
