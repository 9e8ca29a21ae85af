// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests for the server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request as HttpRequest, StatusCode as HttpStatusCode},
};
use hubbl_domain::{Event, EventSchedule, WorkerPermissions};
use hubbl_persistence::{NewPerson, PersonRole};
use tower::ServiceExt;

const FUTURE_DATE: &str = "2099-06-10";
const PAST_DATE: &str = "2001-06-10";

struct TestServer {
    app: Router,
    owner_id: i64,
    worker_id: i64,
    client_id: i64,
    other_client_id: i64,
    calendar_id: i64,
    /// Capacity 1.
    event_id: i64,
    past_event_id: i64,
}

fn person(persistence: &mut Persistence, email: &str, role: PersonRole) -> i64 {
    persistence
        .create_person(&NewPerson {
            first_name: String::from("Test"),
            last_name: String::from("Person"),
            email: email.to_string(),
            role,
        })
        .expect("Failed to create person")
}

fn event(persistence: &mut Persistence, calendar_id: i64, date: &str, capacity: u32) -> i64 {
    let schedule: EventSchedule = EventSchedule::parse(date, "09:00:00", "10:00:00").unwrap();
    let event: Event = Event::new(calendar_id, "Spinning", schedule, capacity, false, true).unwrap();
    persistence.create_event(&event).unwrap()
}

/// Helper to create a router over a seeded in-memory database.
fn create_test_server() -> TestServer {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");

    let owner_id: i64 = person(&mut persistence, "owner@hubbl.test", PersonRole::Owner);
    let worker_id: i64 = person(
        &mut persistence,
        "worker@hubbl.test",
        PersonRole::Worker {
            permissions: WorkerPermissions::empty(),
        },
    );
    let client_id: i64 = person(
        &mut persistence,
        "client@hubbl.test",
        PersonRole::Client {
            covid_passport: true,
        },
    );
    let other_client_id: i64 = person(
        &mut persistence,
        "other@hubbl.test",
        PersonRole::Client {
            covid_passport: true,
        },
    );
    let calendar_id: i64 = persistence.create_calendar("Studio").unwrap();
    let event_id: i64 = event(&mut persistence, calendar_id, FUTURE_DATE, 1);
    let past_event_id: i64 = event(&mut persistence, calendar_id, PAST_DATE, 5);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone: chrono_tz::UTC,
    };

    TestServer {
        app: build_router(app_state),
        owner_id,
        worker_id,
        client_id,
        other_client_id,
        calendar_id,
        event_id,
        past_event_id,
    }
}

fn request(
    method: &str,
    uri: &str,
    caller: Option<(i64, &str)>,
    body: Option<&str>,
) -> HttpRequest<Body> {
    let mut builder = HttpRequest::builder().method(method).uri(uri);
    if let Some((person_id, role)) = caller {
        builder = builder
            .header("X-Person-Id", person_id.to_string())
            .header("X-Person-Role", role);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: HttpRequest<Body>) -> (HttpStatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server();

    let (status, body) = send(&server.app, request("GET", "/health", None, None)).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(&server.app, request("POST", &uri, None, Some("{}"))).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_unknown_role_is_unauthorized() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "admin")), Some("{}")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unknown role 'admin' cannot perform operation");
}

#[tokio::test]
async fn test_client_books_itself() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "client")), Some("{}")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    let appointment: AppointmentResponse = serde_json::from_value(body).unwrap();
    assert_eq!(appointment.client_id, server.client_id);
    assert_eq!(appointment.start_time, "09:00:00");
    assert!(!appointment.cancelled);
}

#[tokio::test]
async fn test_full_event_is_forbidden() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);
    send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "client")), Some("{}")),
    )
    .await;

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.other_client_id, "client")), Some("{}")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "No places left for the selected event.");
}

#[tokio::test]
async fn test_past_event_is_forbidden() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.past_event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "client")), Some("{}")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Can not create an appointment to a past event");
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let server = create_test_server();

    let (status, _) = send(
        &server.app,
        request(
            "POST",
            "/events/9999/appointments",
            Some((server.client_id, "client")),
            Some("{}"),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_must_name_client() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, _) = send(
        &server.app,
        request("POST", &uri, Some((server.owner_id, "owner")), Some("{}")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_books_without_body() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "client")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["client_id"], server.client_id);
}

#[tokio::test]
async fn test_owner_without_body_must_name_client() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.owner_id, "owner")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_malformed_body_gets_error_body() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);

    let (status, body) = send(
        &server.app,
        request("POST", &uri, Some((server.client_id, "client")), Some("{not json")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_path_gets_error_body() {
    let server = create_test_server();

    let (status, body) = send(
        &server.app,
        request(
            "DELETE",
            "/events/abc/appointments/1",
            Some((server.owner_id, "owner")),
            None,
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_worker_without_permission_is_unauthorized() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);
    let body = format!(r#"{{"client_id": {}}}"#, server.client_id);

    let (status, _) = send(
        &server.app,
        request("POST", &uri, Some((server.worker_id, "worker")), Some(&body)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cancel_then_delete() {
    let server = create_test_server();
    let uri = format!("/events/{}/appointments", server.event_id);
    let body = format!(r#"{{"client_id": {}}}"#, server.client_id);
    let (_, created) = send(
        &server.app,
        request("POST", &uri, Some((server.owner_id, "owner")), Some(&body)),
    )
    .await;
    let appointment_id = created["appointment_id"].as_i64().unwrap();

    let cancel_uri = format!("/events/{}/appointments/{appointment_id}/cancel", server.event_id);
    let (status, cancelled) = send(
        &server.app,
        request("PUT", &cancel_uri, Some((server.client_id, "client")), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(cancelled["cancelled"], true);

    let (status, body) = send(
        &server.app,
        request("PUT", &cancel_uri, Some((server.client_id, "client")), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["message"], "The appointment is already cancelled.");

    let delete_uri = format!("/events/{}/appointments/{appointment_id}", server.event_id);
    let (status, _) = send(
        &server.app,
        request("DELETE", &delete_uri, Some((server.other_client_id, "client")), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &server.app,
        request("DELETE", &delete_uri, Some((server.client_id, "client")), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_list_calendar_week() {
    let server = create_test_server();
    let uri = format!("/calendars/{}/events?start_date=2099-06-08", server.calendar_id);

    let (status, body) = send(
        &server.app,
        request("GET", &uri, Some((server.client_id, "client")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let week: ListCalendarEventsResponse = serde_json::from_value(body).unwrap();
    assert_eq!(week.end_date, "2099-06-14");
    assert_eq!(week.events.len(), 1);
    assert_eq!(week.events[0].available_places, 1);
}

#[tokio::test]
async fn test_list_calendar_week_rejects_bad_date() {
    let server = create_test_server();
    let uri = format!("/calendars/{}/events?start_date=next-monday", server.calendar_id);

    let (status, _) = send(
        &server.app,
        request("GET", &uri, Some((server.client_id, "client")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_capabilities_for_client() {
    let server = create_test_server();

    let (status, body) = send(
        &server.app,
        request("GET", "/capabilities", Some((server.client_id, "client")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["can_self_book"], true);
    assert_eq!(body["can_view_event_appointments"], false);
}

#[test]
fn test_internal_errors_hide_details() {
    let http: HttpError = HttpError::from(ApiError::Internal {
        message: String::from("database is locked"),
    });

    assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(http.message, INTERNAL_ERROR_MESSAGE);
}

/// Records the level of every event emitted while installed.
struct LevelRecorder(std::sync::Arc<std::sync::Mutex<Vec<tracing::Level>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

fn logged_level(err: ApiError) -> tracing::Level {
    use tracing_subscriber::layer::SubscriberExt;

    let levels = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(LevelRecorder(levels.clone()));
    let actor = AuthenticatedActor::new(1, hubbl_api::Role::Client);

    tracing::subscriber::with_default(subscriber, || {
        let _ = HttpError::from_api("create_appointment", &actor, err);
    });

    let recorded = levels.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    recorded[0]
}

#[test]
fn test_rejections_log_at_warn() {
    assert_eq!(
        logged_level(ApiError::DomainRuleViolation {
            rule: String::from("capacity"),
            message: String::from("No places left for the selected event."),
        }),
        tracing::Level::WARN
    );
    assert_eq!(
        logged_level(ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: String::from("Event 9 does not exist"),
        }),
        tracing::Level::WARN
    );
    assert_eq!(
        logged_level(ApiError::Unauthorized {
            action: String::from("create_appointment"),
            reason: String::from("insufficient permissions"),
        }),
        tracing::Level::WARN
    );
    assert_eq!(
        logged_level(ApiError::Internal {
            message: String::from("disk I/O error"),
        }),
        tracing::Level::ERROR
    );
}
