// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role lookups by person id.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hubbl_domain::{Client, Owner, Worker, WorkerPermissions};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::{clients, owners, workers};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = workers)]
struct WorkerRow {
    person_id: i64,
    permissions: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
struct ClientRow {
    person_id: i64,
    covid_passport: i32,
}

/// Retrieves the owner record of a person.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the person is not an owner.
pub fn get_owner(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<Option<Owner>, PersistenceError> {
    debug!(person_id, "Looking up owner");

    let result: Result<i64, diesel::result::Error> = owners::table
        .filter(owners::person_id.eq(person_id))
        .select(owners::person_id)
        .first(conn);

    match result {
        Ok(id) => Ok(Some(Owner::new(id))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the worker record of a person, with its permission set.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored permission
/// bits are not a valid set.
/// Returns `Ok(None)` if the person is not a worker.
pub fn get_worker(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<Option<Worker>, PersistenceError> {
    debug!(person_id, "Looking up worker");

    let result: Result<WorkerRow, diesel::result::Error> = workers::table
        .filter(workers::person_id.eq(person_id))
        .select(WorkerRow::as_select())
        .first(conn);

    let row: WorkerRow = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => return Ok(None),
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let bits: u32 = row
        .permissions
        .to_u32()
        .ok_or_else(|| PersistenceError::CorruptRecord {
            table: "workers",
            id: row.person_id,
            reason: format!("permissions out of range: {}", row.permissions),
        })?;
    let permissions: WorkerPermissions =
        WorkerPermissions::from_bits(bits).map_err(|e| PersistenceError::CorruptRecord {
            table: "workers",
            id: row.person_id,
            reason: e.to_string(),
        })?;

    Ok(Some(Worker::new(row.person_id, permissions)))
}

/// Retrieves the client record of a person.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the person is not a client.
pub fn get_client(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<Option<Client>, PersistenceError> {
    debug!(person_id, "Looking up client");

    let result: Result<ClientRow, diesel::result::Error> = clients::table
        .filter(clients::person_id.eq(person_id))
        .select(ClientRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Client::new(row.person_id, row.covid_passport != 0))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
