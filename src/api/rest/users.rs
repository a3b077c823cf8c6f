//! Account endpoints

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use super::super::state::AppState;
use super::{require_user, store_error_reply, ApiError};

/// GET /api/users/me
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.get_user(user_id) {
        Some(user) => Json(user.public()).into_response(),
        None => {
            let error = ApiError::not_found("User not found");
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
    }
}

/// DELETE /api/users/me
///
/// Removes the account with its apiaries, settings, tasks and drums.
/// Ledger rows are retained.
pub async fn delete_me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.delete_user(user_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}
