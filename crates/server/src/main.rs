// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;

use axum::{
    Json, Router,
    extract::{
        Path, Query, Request, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono_tz::Tz;
use clap::Parser;
use hubbl_api::{
    ApiError, AppointmentCapabilities, AppointmentResponse, AuthenticatedActor, BookingClock,
    CancelAppointmentRequest, CreateAppointmentRequest, DeleteAppointmentRequest,
    ListCalendarEventsRequest, ListCalendarEventsResponse, ListEventAppointmentsResponse,
    cancel_appointment, create_appointment, delete_appointment, get_appointment_capabilities,
    list_calendar_events, list_event_appointments,
};
use hubbl_persistence::{FixtureSummary, Persistence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::identity::CallerIdentity;

/// Message returned for every internal failure.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. If the error persists, contact our team";

/// Hubbl Server - HTTP server for gym event bookings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "HUBBL_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000, env = "HUBBL_PORT")]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1", env = "HUBBL_BIND")]
    bind: String,

    /// IANA timezone event dates and times are expressed in
    #[arg(short, long, default_value = "UTC", env = "HUBBL_TIMEZONE")]
    timezone: String,

    /// JSON fixture file to seed the database with at start-up
    #[arg(short, long, env = "HUBBL_FIXTURES")]
    fixtures: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// The zone event times are expressed in.
    timezone: Tz,
}

/// Body of a create appointment request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct CreateAppointmentBody {
    /// The client to book. Staff must provide it; clients may omit it.
    #[serde(default)]
    client_id: Option<i64>,
}

/// Query parameters for the calendar week listing.
#[derive(Debug, Deserialize)]
struct WeekQuery {
    /// First day of the week (`YYYY-MM-DD`).
    start_date: String,
}

/// API response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    /// Logs an API error against the operation and caller, then converts it.
    ///
    /// Internal errors are logged in full and answered with a generic
    /// message. Rejections are expected outcomes and are logged as warnings.
    fn from_api(operation: &'static str, actor: &AuthenticatedActor, err: ApiError) -> Self {
        match &err {
            ApiError::Internal { message } => error!(
                operation,
                person_id = actor.person_id,
                role = %actor.role,
                error = %message,
                "Internal error"
            ),
            ApiError::Unauthorized { .. } => warn!(
                operation,
                person_id = actor.person_id,
                role = %actor.role,
                reason = %err,
                "Request not authorized"
            ),
            _ => warn!(
                operation,
                person_id = actor.person_id,
                role = %actor.role,
                reason = %err,
                "Request rejected"
            ),
        }
        Self::from(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from(INTERNAL_ERROR_MESSAGE),
            },
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Handler for POST `/events/{event_id}/appointments`.
///
/// Books a place in an event. A request without a JSON body books the
/// caller, which only a client may do.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateAppointmentBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentResponse>), HttpError> {
    let Path(event_id) = path?;
    let body: CreateAppointmentBody = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateAppointmentBody::default(),
        Err(rejection) => return Err(HttpError::from(rejection)),
    };
    let request: CreateAppointmentRequest = CreateAppointmentRequest {
        event_id,
        client_id: body.client_id,
    };
    let clock: BookingClock = BookingClock::system(app_state.timezone);

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentResponse =
        create_appointment(&mut persistence, &actor, request, clock)
            .map_err(|e| HttpError::from_api("create_appointment", &actor, e))?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/events/{event_id}/appointments/{appointment_id}/cancel`.
///
/// Cancels an appointment.
async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<AppointmentResponse>, HttpError> {
    let Path((event_id, appointment_id)) = path?;
    let request: CancelAppointmentRequest = CancelAppointmentRequest {
        event_id,
        appointment_id,
    };
    let clock: BookingClock = BookingClock::system(app_state.timezone);

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentResponse =
        cancel_appointment(&mut persistence, &actor, request, clock)
            .map_err(|e| HttpError::from_api("cancel_appointment", &actor, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/events/{event_id}/appointments/{appointment_id}`.
///
/// Deletes an appointment.
async fn handle_delete_appointment(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, HttpError> {
    let Path((event_id, appointment_id)) = path?;
    let request: DeleteAppointmentRequest = DeleteAppointmentRequest {
        event_id,
        appointment_id,
    };
    let clock: BookingClock = BookingClock::system(app_state.timezone);

    let mut persistence = app_state.persistence.lock().await;
    delete_appointment(&mut persistence, &actor, request, clock)
        .map_err(|e| HttpError::from_api("delete_appointment", &actor, e))?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/events/{event_id}/appointments`.
async fn handle_list_event_appointments(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ListEventAppointmentsResponse>, HttpError> {
    let Path(event_id) = path?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEventAppointmentsResponse =
        list_event_appointments(&mut persistence, &actor, event_id)
            .map_err(|e| HttpError::from_api("list_event_appointments", &actor, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/calendars/{calendar_id}/events`.
///
/// Lists one week of a calendar's events.
async fn handle_list_calendar_events(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<ListCalendarEventsResponse>, HttpError> {
    let Path(calendar_id) = path?;
    let Query(query) = query?;
    let request: ListCalendarEventsRequest = ListCalendarEventsRequest {
        calendar_id,
        start_date: query.start_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCalendarEventsResponse = list_calendar_events(&mut persistence, &request)
        .map_err(|e| HttpError::from_api("list_calendar_events", &actor, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/capabilities`.
async fn handle_get_capabilities(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
) -> Result<Json<AppointmentCapabilities>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let capabilities: AppointmentCapabilities =
        get_appointment_capabilities(&mut persistence, &actor)
            .map_err(|e| HttpError::from_api("get_capabilities", &actor, e))?;
    drop(persistence);

    Ok(Json(capabilities))
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Logs each request with its outcome.
async fn log_requests(request: Request, next: Next) -> Response {
    let method: Method = request.method().clone();
    let path: String = request.uri().path().to_string();
    let started: Instant = Instant::now();

    let response: Response = next.run(request).await;

    let elapsed_ms: u64 = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "Request handled"
    );

    response
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/capabilities", get(handle_get_capabilities))
        .route(
            "/calendars/{calendar_id}/events",
            get(handle_list_calendar_events),
        )
        .route(
            "/events/{event_id}/appointments",
            post(handle_create_appointment).get(handle_list_event_appointments),
        )
        .route(
            "/events/{event_id}/appointments/{appointment_id}",
            delete(handle_delete_appointment),
        )
        .route(
            "/events/{event_id}/appointments/{appointment_id}/cancel",
            put(handle_cancel_appointment),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Hubbl Server");

    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|e| format!("Invalid timezone '{}': {e}", args.timezone))?;
    info!(%timezone, "Event times are local to timezone");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(fixtures_path) = &args.fixtures {
        let summary: FixtureSummary = persistence.load_fixture_file(fixtures_path)?;
        info!(
            path = %fixtures_path.display(),
            persons = summary.persons,
            calendars = summary.calendars,
            events = summary.events,
            "Loaded fixtures"
        );
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
