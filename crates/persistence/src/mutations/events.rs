// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hubbl_domain::{Event, format_date, format_time};
use num_traits::ToPrimitive;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{calendars, events};
use crate::error::PersistenceError;

/// Creates a calendar.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_calendar(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(calendars::table)
        .values(calendars::name.eq(name))
        .execute(conn)?;

    let calendar_id: i64 = conn.get_last_insert_rowid()?;
    info!(calendar_id, name, "Calendar created");
    Ok(calendar_id)
}

/// Creates an event in the calendar it names.
///
/// # Errors
///
/// Returns an error if the calendar does not exist or the insert fails.
pub fn create_event(conn: &mut SqliteConnection, event: &Event) -> Result<i64, PersistenceError> {
    let capacity: i32 = event.capacity().to_i32().ok_or_else(|| {
        PersistenceError::ConstraintViolation(format!(
            "capacity {} does not fit the events table",
            event.capacity()
        ))
    })?;

    diesel::insert_into(events::table)
        .values((
            events::calendar_id.eq(event.calendar_id()),
            events::name.eq(event.name()),
            events::event_date.eq(format_date(event.schedule().date())),
            events::start_time.eq(format_time(event.schedule().start_time())),
            events::end_time.eq(format_time(event.schedule().end_time())),
            events::capacity.eq(capacity),
            events::covid_passport.eq(i32::from(event.requires_covid_passport())),
            events::mask_required.eq(i32::from(event.mask_required())),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        event_id,
        calendar_id = event.calendar_id(),
        name = event.name(),
        "Event created"
    );
    Ok(event_id)
}
