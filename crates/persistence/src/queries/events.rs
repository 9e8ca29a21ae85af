// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and calendar queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use hubbl_domain::{Calendar, Event, EventSchedule, format_date};
use num_traits::ToPrimitive;
use time::Date;
use tracing::debug;

use crate::data_models::EventOccupancy;
use crate::diesel_schema::{calendars, event_appointments, events};
use crate::error::PersistenceError;
use crate::queries::count_to_u32;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
pub(crate) struct EventRow {
    pub(crate) event_id: i64,
    pub(crate) calendar_id: i64,
    pub(crate) name: String,
    pub(crate) event_date: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    pub(crate) capacity: i32,
    pub(crate) covid_passport: i32,
    pub(crate) mask_required: i32,
}

impl EventRow {
    /// Rebuilds the domain event stored in this row.
    pub(crate) fn into_event(self) -> Result<Event, PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRecord {
            table: "events",
            id: self.event_id,
            reason,
        };

        let schedule: EventSchedule =
            EventSchedule::parse(&self.event_date, &self.start_time, &self.end_time)
                .map_err(|e| corrupt(e.to_string()))?;
        let capacity: u32 = self
            .capacity
            .to_u32()
            .ok_or_else(|| corrupt(format!("capacity out of range: {}", self.capacity)))?;

        Event::new(
            self.calendar_id,
            &self.name,
            schedule,
            capacity,
            self.covid_passport != 0,
            self.mask_required != 0,
        )
        .map(|event| event.with_id(self.event_id))
        .map_err(|e| corrupt(e.to_string()))
    }
}

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is corrupt.
/// Returns `Ok(None)` if the event does not exist.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<Event>, PersistenceError> {
    debug!(event_id, "Looking up event");

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_event().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a calendar by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the calendar does not exist.
pub fn get_calendar(
    conn: &mut SqliteConnection,
    calendar_id: i64,
) -> Result<Option<Calendar>, PersistenceError> {
    let result: Result<(i64, String), diesel::result::Error> = calendars::table
        .filter(calendars::calendar_id.eq(calendar_id))
        .select((calendars::calendar_id, calendars::name))
        .first(conn);

    match result {
        Ok((id, name)) => Ok(Some(Calendar::with_id(id, &name))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the events of a calendar dated between `from` and `to` (inclusive),
/// each with the number of active appointments it holds.
///
/// Events are ordered by date, then start time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `calendar_id` - The calendar to list
/// * `from` - The first date of the window
/// * `to` - The last date of the window
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is corrupt.
pub fn list_calendar_events(
    conn: &mut SqliteConnection,
    calendar_id: i64,
    from: Date,
    to: Date,
) -> Result<Vec<EventOccupancy>, PersistenceError> {
    let from_str: String = format_date(from);
    let to_str: String = format_date(to);

    debug!(calendar_id, from = %from_str, to = %to_str, "Listing calendar events");

    // ISO dates compare correctly as text.
    let rows: Vec<EventRow> = events::table
        .filter(events::calendar_id.eq(calendar_id))
        .filter(events::event_date.ge(&from_str))
        .filter(events::event_date.le(&to_str))
        .order((events::event_date.asc(), events::start_time.asc()))
        .select(EventRow::as_select())
        .load(conn)?;

    let event_ids: Vec<i64> = rows.iter().map(|row| row.event_id).collect();
    let counts: HashMap<i64, i64> = event_appointments::table
        .filter(event_appointments::event_id.eq_any(&event_ids))
        .filter(event_appointments::cancelled.eq(0))
        .group_by(event_appointments::event_id)
        .select((
            event_appointments::event_id,
            diesel::dsl::count(event_appointments::appointment_id),
        ))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    let mut result: Vec<EventOccupancy> = Vec::with_capacity(rows.len());
    for row in rows {
        let event_id: i64 = row.event_id;
        let active_appointments: u32 = count_to_u32(counts.get(&event_id).copied().unwrap_or(0))?;
        result.push(EventOccupancy {
            event_id,
            event: row.into_event()?,
            active_appointments,
        });
    }

    Ok(result)
}
