// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event scheduling and wall-clock resolution.
//!
//! Events are scheduled as a local calendar date plus start and end times of
//! day, with no offset attached. The venue timezone turns that local start
//! into an absolute instant, which is what "in the past" is measured
//! against.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, Time};

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an `HH:MM:SS` time of day. `HH:MM` is accepted as well.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    Time::parse(value, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(value, format_description!("[hour]:[minute]")))
        .map_err(|e| DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a time of day as `HH:MM:SS`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Returns the inclusive seven-day window starting at `start`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the window runs past the
/// last representable date.
pub fn week_range(start: Date) -> Result<(Date, Date), DomainError> {
    let end: Date =
        start
            .checked_add(Duration::days(6))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("week starting {}", format_date(start)),
            })?;
    Ok((start, end))
}

/// When an event takes place, in venue-local wall-clock terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    date: Date,
    start_time: Time,
    end_time: Time,
}

impl EventSchedule {
    /// Creates a new schedule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchedule` if the event does not end after it starts.
    pub fn new(date: Date, start_time: Time, end_time: Time) -> Result<Self, DomainError> {
        if end_time <= start_time {
            return Err(DomainError::InvalidSchedule {
                reason: format!(
                    "end time {} must be after start time {}",
                    format_time(end_time),
                    format_time(start_time)
                ),
            });
        }
        Ok(Self {
            date,
            start_time,
            end_time,
        })
    }

    /// Creates a schedule from its textual form (`YYYY-MM-DD`, `HH:MM:SS`, `HH:MM:SS`).
    ///
    /// # Errors
    ///
    /// Returns an error if any component fails to parse or the times are inconsistent.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> Result<Self, DomainError> {
        Self::new(parse_date(date)?, parse_time(start_time)?, parse_time(end_time)?)
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[must_use]
    pub const fn start_time(&self) -> Time {
        self.start_time
    }

    #[must_use]
    pub const fn end_time(&self) -> Time {
        self.end_time
    }

    /// Resolves the local start of the event to an absolute instant.
    ///
    /// An ambiguous local time (clocks falling back) resolves to the
    /// earlier of the two instants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnresolvableLocalTime` if the local start falls
    /// in a gap (clocks springing forward).
    pub fn starts_at(&self, tz: Tz) -> Result<DateTime<Utc>, DomainError> {
        // time::Date -> chrono::NaiveDate
        let date: NaiveDate = NaiveDate::from_ymd_opt(
            self.date.year(),
            u32::from(u8::from(self.date.month())),
            u32::from(self.date.day()),
        )
        .ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!("invalid event date: {}", format_date(self.date)),
        })?;

        // time::Time -> chrono::NaiveTime
        let start: NaiveTime = NaiveTime::from_hms_opt(
            u32::from(self.start_time.hour()),
            u32::from(self.start_time.minute()),
            u32::from(self.start_time.second()),
        )
        .ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!("invalid start time: {}", format_time(self.start_time)),
        })?;

        let local = date.and_time(start);
        tz.from_local_datetime(&local)
            .earliest()
            .map(|start_dt| start_dt.with_timezone(&Utc))
            .ok_or_else(|| DomainError::UnresolvableLocalTime {
                local: local.to_string(),
                timezone: tz.name().to_string(),
            })
    }

    /// Returns true if the event started strictly before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the start cannot be resolved in `tz`.
    pub fn is_past(&self, now: DateTime<Utc>, tz: Tz) -> Result<bool, DomainError> {
        Ok(self.starts_at(tz)? < now)
    }
}
