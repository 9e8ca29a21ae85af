// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewPerson, PersonRole};
use crate::diesel_schema::{clients, owners, persons, workers};
use crate::error::PersistenceError;

/// Registers a person and their role record in one transaction.
///
/// # Returns
///
/// The new person ID.
///
/// # Errors
///
/// Returns an error if either insert fails; neither row is kept in that case.
pub fn create_person(
    conn: &mut SqliteConnection,
    person: &NewPerson,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(persons::table)
            .values((
                persons::first_name.eq(&person.first_name),
                persons::last_name.eq(&person.last_name),
                persons::email.eq(&person.email),
            ))
            .execute(conn)?;

        let person_id: i64 = conn.get_last_insert_rowid()?;

        match &person.role {
            PersonRole::Owner => {
                diesel::insert_into(owners::table)
                    .values(owners::person_id.eq(person_id))
                    .execute(conn)?;
            }
            PersonRole::Worker { permissions } => {
                diesel::insert_into(workers::table)
                    .values((
                        workers::person_id.eq(person_id),
                        workers::permissions.eq(i64::from(permissions.bits())),
                    ))
                    .execute(conn)?;
            }
            PersonRole::Client { covid_passport } => {
                diesel::insert_into(clients::table)
                    .values((
                        clients::person_id.eq(person_id),
                        clients::covid_passport.eq(i32::from(*covid_passport)),
                    ))
                    .execute(conn)?;
            }
        }

        info!(person_id, role = ?person.role, "Person registered");
        Ok(person_id)
    })
}
