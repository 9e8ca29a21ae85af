// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EventSchedule, format_date, format_time, parse_date, parse_time, week_range};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use time::macros::{date, time};

#[test]
fn test_parse_time_accepts_seconds_and_minutes_forms() {
    assert_eq!(parse_time("18:30:00").unwrap(), time!(18:30:00));
    assert_eq!(parse_time("07:05").unwrap(), time!(07:05:00));
}

#[test]
fn test_parse_date_rejects_garbage() {
    let result: Result<time::Date, DomainError> = parse_date("2026-13-40");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_format_round_trips_through_parse() {
    let day: time::Date = date!(2026 - 03 - 07);
    assert_eq!(format_date(day), "2026-03-07");
    assert_eq!(parse_date(&format_date(day)).unwrap(), day);
    assert_eq!(format_time(time!(09:05:00)), "09:05:00");
}

#[test]
fn test_schedule_rejects_end_before_start() {
    let result: Result<EventSchedule, DomainError> =
        EventSchedule::new(date!(2026 - 05 - 01), time!(10:00), time!(09:00));
    assert!(matches!(result, Err(DomainError::InvalidSchedule { .. })));
}

#[test]
fn test_starts_at_applies_venue_timezone() {
    let schedule: EventSchedule = EventSchedule::parse("2026-07-01", "09:00:00", "10:00:00").unwrap();
    let tz: Tz = chrono_tz::Europe::Madrid;

    let start: DateTime<Utc> = schedule.starts_at(tz).unwrap();

    // Madrid is UTC+2 in July.
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 1, 7, 0, 0).unwrap());
}

#[test]
fn test_starts_at_rejects_local_time_in_dst_gap() {
    // 02:30 does not exist in Madrid on the last Sunday of March.
    let schedule: EventSchedule = EventSchedule::parse("2026-03-29", "02:30:00", "03:30:00").unwrap();

    let result: Result<DateTime<Utc>, DomainError> = schedule.starts_at(chrono_tz::Europe::Madrid);

    assert!(matches!(
        result,
        Err(DomainError::UnresolvableLocalTime { .. })
    ));
}

#[test]
fn test_is_past_is_strict() {
    let schedule: EventSchedule = EventSchedule::parse("2026-02-10", "12:00:00", "13:00:00").unwrap();
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();

    assert!(!schedule.is_past(start, Tz::UTC).unwrap());
    assert!(
        schedule
            .is_past(start + chrono::Duration::seconds(1), Tz::UTC)
            .unwrap()
    );
}

#[test]
fn test_week_range_spans_seven_days() {
    let (start, end) = week_range(date!(2026 - 12 - 28)).unwrap();
    assert_eq!(start, date!(2026 - 12 - 28));
    assert_eq!(end, date!(2027 - 01 - 03));
}
