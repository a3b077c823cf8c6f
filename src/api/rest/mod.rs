//! REST API module for HTTP endpoints
//!
//! Handlers are grouped by resource:
//! - `auth` — register / login / token refresh
//! - `users` — the authenticated account
//! - `apiaries` — apiary CRUD, settings, per-apiary history
//! - `stats` — aggregate and same-day harvest statistics
//! - `tasks`, `drums` — auxiliary resources

pub mod apiaries;
pub mod auth;
pub mod drums;
pub mod stats;
pub mod tasks;
pub mod users;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use crate::store::StoreError;

use super::state::AppState;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "FORBIDDEN".to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UNAUTHORIZED".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "CONFLICT".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}

/// Error reply type shared by the handlers
pub type ErrorReply = (StatusCode, Json<ApiError>);

/// Resolve the authenticated user id from the Authorization header
///
/// Only access tokens pass; refresh tokens are for `/auth/refresh`.
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<u64, ErrorReply> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiError::unauthorized("Missing authentication token")),
            )
        })?;

    let claims = state.auth.validate_authorization(header).map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiError::unauthorized(e.to_string())),
        )
    })?;

    if claims.token_type != "access" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError::unauthorized("Access token required")),
        ));
    }

    claims.user_id().map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiError::unauthorized(e.to_string())),
        )
    })
}

/// Map a store error onto an HTTP error reply
pub fn store_error_reply(err: StoreError) -> ErrorReply {
    match err {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, Json(ApiError::not_found(err.to_string()))),
        StoreError::Forbidden(_) => (
            StatusCode::FORBIDDEN,
            Json(ApiError::forbidden(err.to_string())),
        ),
        StoreError::Conflict(_) => (StatusCode::CONFLICT, Json(ApiError::conflict(err.to_string()))),
        StoreError::Io(_) | StoreError::Json(_) => {
            eprintln!("[Api] Store failure: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::internal("Internal storage error")),
            )
        }
    }
}
