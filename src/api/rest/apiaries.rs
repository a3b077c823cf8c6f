//! Apiary endpoints
//!
//! Every update flows through the store's audited path, so each changed
//! tracked field lands in the ledger automatically.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::types::{CreateApiary, UpdateApiary, UpdateSettings};

use super::super::state::AppState;
use super::{require_user, store_error_reply, ApiError};

/// GET /api/apiaries
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.list_apiaries(user_id)).into_response()
}

/// POST /api/apiaries
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateApiary>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    if body.name.trim().is_empty() {
        let error = ApiError::bad_request("Apiary name must not be empty");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    match state.store.create_apiary(user_id, body) {
        Ok(detail) => (StatusCode::CREATED, Json(detail)).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// GET /api/apiaries/:id
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.get_apiary(user_id, apiary_id) {
        Ok(detail) => Json(detail).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// PUT /api/apiaries/:id
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
    Json(body): Json<UpdateApiary>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.update_apiary(user_id, apiary_id, body) {
        Ok(apiary) => Json(apiary).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// DELETE /api/apiaries/:id
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.delete_apiary(user_id, apiary_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// GET /api/apiaries/:id/history
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.history_for_apiary(user_id, apiary_id) {
        Ok(records) => Json(records).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// GET /api/apiaries/:id/harvested
pub async fn harvested(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.harvested_totals_for_apiary(user_id, apiary_id) {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// PUT /api/apiaries/:id/settings
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(apiary_id): Path<u64>,
    Json(body): Json<UpdateSettings>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.update_settings(user_id, apiary_id, body) {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// Request body for PUT /api/apiaries/harvest/all
#[derive(Debug, Deserialize)]
pub struct HarvestAllRequest {
    pub harvesting: bool,
}

/// PUT /api/apiaries/harvest/all
pub async fn harvest_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<HarvestAllRequest>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.set_harvesting_for_all(user_id, body.harvesting) {
        Ok(updated) => Json(serde_json::json!({ "updated": updated })).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// GET /api/apiaries/count
pub async fn count(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.apiary_counts(user_id)).into_response()
}
