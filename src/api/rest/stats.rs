//! Statistics endpoints
//!
//! Cumulative numbers come from current apiary state; the `today` routes
//! come from the change ledger with latest-wins same-day dedup.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use super::super::state::AppState;
use super::require_user;

/// GET /api/stats/boxes
pub async fn boxes(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.box_stats(user_id)).into_response()
}

/// GET /api/stats/harvesting/count
pub async fn harvesting_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    let count = state.store.count_harvesting(user_id);
    Json(serde_json::json!({ "count": count })).into_response()
}

/// GET /api/stats/harvested/counts
pub async fn harvested_counts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.harvested_counts(user_id)).into_response()
}

/// GET /api/stats/harvested/today/boxes
pub async fn harvested_today_boxes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.harvested_today_box_stats(user_id)).into_response()
}

/// GET /api/stats/harvested/today/counts
pub async fn harvested_today_counts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.harvested_today_counts(user_id)).into_response()
}
