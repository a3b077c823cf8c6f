//! Honey drum endpoints

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::types::{CreateDrum, UpdateDrum};

use super::super::state::AppState;
use super::{require_user, store_error_reply, ApiError};

/// GET /api/drums
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.list_drums(user_id)).into_response()
}

/// POST /api/drums
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateDrum>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    if body.code.trim().is_empty() {
        let error = ApiError::bad_request("Drum code must not be empty");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    match state.store.create_drum(user_id, body) {
        Ok(drum) => (StatusCode::CREATED, Json(drum)).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// PUT /api/drums/:id
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(drum_id): Path<u64>,
    Json(body): Json<UpdateDrum>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.update_drum(user_id, drum_id, body) {
        Ok(drum) => Json(drum).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// DELETE /api/drums/:id
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(drum_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.delete_drum(user_id, drum_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// GET /api/drums/summary
pub async fn summary(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.drum_summary(user_id)).into_response()
}
