// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::Connection;
use diesel::SqliteConnection;
use hubbl_domain::{Event, EventSchedule};
use tracing::info;

use crate::data_models::{FixtureSummary, Fixtures};
use crate::error::PersistenceError;
use crate::mutations::events::{create_calendar, create_event};
use crate::mutations::people::create_person;

/// Loads seed data. Either every fixture row is written or none is.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidFixture` if an event fails domain
/// validation, or another error if a write fails.
pub fn load_fixtures(
    conn: &mut SqliteConnection,
    fixtures: &Fixtures,
) -> Result<FixtureSummary, PersistenceError> {
    conn.transaction::<FixtureSummary, PersistenceError, _>(|conn| {
        let mut summary: FixtureSummary = FixtureSummary::default();

        for person in &fixtures.persons {
            create_person(conn, person)?;
            summary.persons += 1;
        }

        for calendar in &fixtures.calendars {
            let calendar_id: i64 = create_calendar(conn, &calendar.name)?;
            summary.calendars += 1;

            for fixture in &calendar.events {
                let invalid = |e: hubbl_domain::DomainError| {
                    PersistenceError::InvalidFixture(format!("event '{}': {e}", fixture.name))
                };
                let schedule: EventSchedule =
                    EventSchedule::parse(&fixture.date, &fixture.start_time, &fixture.end_time)
                        .map_err(invalid)?;
                let event: Event = Event::new(
                    calendar_id,
                    &fixture.name,
                    schedule,
                    fixture.capacity,
                    fixture.covid_passport,
                    fixture.mask_required,
                )
                .map_err(invalid)?;

                create_event(conn, &event)?;
                summary.events += 1;
            }
        }

        info!(
            persons = summary.persons,
            calendars = summary.calendars,
            events = summary.events,
            "Fixtures loaded"
        );
        Ok(summary)
    })
}
