// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction for the server.
//!
//! The caller's person ID and role arrive in request headers set by the
//! gateway in front of this service.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use hubbl_api::{AuthenticatedActor, Role};
use tracing::{debug, warn};

use crate::ErrorResponse;

/// Header carrying the caller's person ID.
pub const PERSON_ID_HEADER: &str = "X-Person-Id";
/// Header carrying the caller's role.
pub const PERSON_ROLE_HEADER: &str = "X-Person-Role";

/// Extractor for the calling person.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     CallerIdentity(actor): CallerIdentity,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if:
/// - Either header is missing or not valid ASCII
/// - The person ID is not an integer
/// - The role is not one of `owner`, `worker` or `client`
pub struct CallerIdentity(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let person_id_raw: &str = header_value(parts, PERSON_ID_HEADER)?;
        let role_raw: &str = header_value(parts, PERSON_ROLE_HEADER)?;

        let person_id: i64 = person_id_raw.trim().parse().map_err(|_| {
            warn!(value = %person_id_raw, "Invalid person ID header");
            IdentityError::InvalidPersonId(person_id_raw.to_string())
        })?;
        let role: Role = role_raw.parse().map_err(|_| {
            warn!(value = %role_raw, "Unknown role header");
            IdentityError::UnknownRole(role_raw.to_string())
        })?;

        debug!(person_id, %role, "Caller identified");

        Ok(Self(AuthenticatedActor::new(person_id, role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, IdentityError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing identity header");
            IdentityError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Identity header is not valid ASCII");
            IdentityError::MissingHeader(name)
        })
}

/// Identity extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// A required header is missing or unreadable.
    MissingHeader(&'static str),
    /// The person ID header is not an integer.
    InvalidPersonId(String),
    /// The role header names no known role.
    UnknownRole(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidPersonId(value) => format!("Invalid person ID '{value}'"),
            Self::UnknownRole(role) => format!("Unknown role '{role}' cannot perform operation"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
