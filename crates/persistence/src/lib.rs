// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for hubbl.
//!
//! Built on Diesel over `SQLite`. Schema migrations are embedded in the
//! binary and applied when a [`Persistence`] is constructed.
//!
//! ## Transactions
//!
//! The booking pipeline reads occupancy and then writes an appointment.
//! [`Persistence::immediate_transaction`] runs such a read-then-write
//! sequence under `BEGIN IMMEDIATE`, so the write lock is held from the
//! first read and no other writer can take the last place in between.
//! A partial unique index additionally guarantees one active appointment
//! per (event, client).
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hubbl::Mutation;
use hubbl_domain::{Appointment, Calendar, Client, Event, Owner, Worker};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::warn;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AppointmentDetails, CalendarFixture, EventFixture, EventOccupancy, FixtureSummary, Fixtures,
    NewPerson, PersonRole,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// How long a writer waits for the write lock of a file database.
const BUSY_TIMEOUT_MILLIS: u32 = 5_000;

/// Persistence adapter for people, events, and appointments.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:hubbl_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::set_busy_timeout(&mut conn, BUSY_TIMEOUT_MILLIS)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Sets how long this connection waits for another writer's lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the pragma cannot be applied.
    pub fn set_busy_timeout(&mut self, millis: u32) -> Result<(), PersistenceError> {
        backend::sqlite::set_busy_timeout(&mut self.conn, millis)
    }

    /// Runs `f` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or a persistence error converted into `E`
    /// if the transaction cannot be opened or committed.
    pub fn immediate_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        backend::sqlite::begin_immediate(&mut self.conn)?;

        match f(self) {
            Ok(value) => {
                if let Err(commit_error) = backend::sqlite::commit(&mut self.conn) {
                    if let Err(rollback_error) = backend::sqlite::rollback(&mut self.conn) {
                        warn!(error = %rollback_error, "Rollback after failed commit failed");
                    }
                    return Err(E::from(commit_error));
                }
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = backend::sqlite::rollback(&mut self.conn) {
                    warn!(error = %rollback_error, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    // ========================================================================
    // People
    // ========================================================================

    /// Retrieves the owner record of a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_owner(&mut self, person_id: i64) -> Result<Option<Owner>, PersistenceError> {
        queries::people::get_owner(&mut self.conn, person_id)
    }

    /// Retrieves the worker record of a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the record is corrupt.
    pub fn get_worker(&mut self, person_id: i64) -> Result<Option<Worker>, PersistenceError> {
        queries::people::get_worker(&mut self.conn, person_id)
    }

    /// Retrieves the client record of a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_client(&mut self, person_id: i64) -> Result<Option<Client>, PersistenceError> {
        queries::people::get_client(&mut self.conn, person_id)
    }

    /// Registers a person with their role.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. the email is taken).
    pub fn create_person(&mut self, person: &NewPerson) -> Result<i64, PersistenceError> {
        mutations::people::create_person(&mut self.conn, person)
    }

    // ========================================================================
    // Calendars & Events
    // ========================================================================

    /// Retrieves an event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the record is corrupt.
    pub fn get_event(&mut self, event_id: i64) -> Result<Option<Event>, PersistenceError> {
        queries::events::get_event(&mut self.conn, event_id)
    }

    /// Retrieves a calendar by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_calendar(&mut self, calendar_id: i64) -> Result<Option<Calendar>, PersistenceError> {
        queries::events::get_calendar(&mut self.conn, calendar_id)
    }

    /// Lists a calendar's events dated within `[from, to]` with their occupancy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_calendar_events(
        &mut self,
        calendar_id: i64,
        from: Date,
        to: Date,
    ) -> Result<Vec<EventOccupancy>, PersistenceError> {
        queries::events::list_calendar_events(&mut self.conn, calendar_id, from, to)
    }

    /// Creates a calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_calendar(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::events::create_calendar(&mut self.conn, name)
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar does not exist or the insert fails.
    pub fn create_event(&mut self, event: &Event) -> Result<i64, PersistenceError> {
        mutations::events::create_event(&mut self.conn, event)
    }

    /// Loads seed data in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any fixture is invalid or a write fails.
    pub fn load_fixtures(&mut self, fixtures: &Fixtures) -> Result<FixtureSummary, PersistenceError> {
        mutations::fixtures::load_fixtures(&mut self.conn, fixtures)
    }

    /// Reads and loads a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or loading fails.
    pub fn load_fixture_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<FixtureSummary, PersistenceError> {
        let contents: String = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PersistenceError::InitializationError(format!(
                "Cannot read fixture file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let fixtures: Fixtures = serde_json::from_str(&contents)?;
        self.load_fixtures(&fixtures)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Counts the active appointments of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_appointments(&mut self, event_id: i64) -> Result<u32, PersistenceError> {
        queries::appointments::count_active_appointments(&mut self.conn, event_id)
    }

    /// Counts the active appointments a client holds in an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_client_appointments(
        &mut self,
        event_id: i64,
        client_id: i64,
    ) -> Result<u32, PersistenceError> {
        queries::appointments::count_active_client_appointments(&mut self.conn, event_id, client_id)
    }

    /// Counts appointments matching (id, client, event).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_matching_appointments(
        &mut self,
        appointment_id: i64,
        client_id: i64,
        event_id: i64,
    ) -> Result<u32, PersistenceError> {
        queries::appointments::count_matching_appointments(
            &mut self.conn,
            appointment_id,
            client_id,
            event_id,
        )
    }

    /// Finds an appointment scoped to an event and optionally a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_appointment(
        &mut self,
        appointment_id: i64,
        event_id: i64,
        client_id: Option<i64>,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::find_appointment(&mut self.conn, appointment_id, event_id, client_id)
    }

    /// Retrieves an appointment with its client and event details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_appointment_details(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<AppointmentDetails>, PersistenceError> {
        queries::appointments::get_appointment_details(&mut self.conn, appointment_id)
    }

    /// Lists every appointment of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_event_appointments(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<AppointmentDetails>, PersistenceError> {
        queries::appointments::list_event_appointments(&mut self.conn, event_id)
    }

    /// Inserts an appointment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ActiveAppointmentExists` on a duplicate
    /// active booking, or another error if the insert fails.
    pub fn insert_appointment(&mut self, appointment: &Appointment) -> Result<i64, PersistenceError> {
        mutations::appointments::insert_appointment(&mut self.conn, appointment)
    }

    /// Persists a mutation decided by `hubbl::apply`.
    ///
    /// # Returns
    ///
    /// The ID of the affected appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist_mutation(&mut self, mutation: &Mutation) -> Result<i64, PersistenceError> {
        mutations::appointments::persist_mutation(&mut self.conn, mutation)
    }
}
