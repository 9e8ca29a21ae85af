// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and booking rules for hubbl.
//!
//! Everything in this crate is pure: no I/O, no clock. Callers pass "now"
//! and the venue timezone in explicitly so that every rule is evaluated
//! against the instant the request was received.

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

mod error;
mod permissions;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use permissions::{AppointmentAction, WorkerPermission, WorkerPermissions};
pub use schedule::{EventSchedule, format_date, format_time, parse_date, parse_time, week_range};
pub use types::{Appointment, Calendar, Client, Event, Owner, Worker};
pub use validation::{
    validate_cancellable, validate_capacity, validate_capacity_available,
    validate_client_eligible, validate_event_not_past,
};
