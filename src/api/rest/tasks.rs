//! Task endpoints

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::types::{CreateTask, UpdateTask};

use super::super::state::AppState;
use super::{require_user, store_error_reply, ApiError};

/// GET /api/tasks
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    Json(state.store.list_tasks(user_id)).into_response()
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateTask>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    if body.title.trim().is_empty() {
        let error = ApiError::bad_request("Task title must not be empty");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    match state.store.create_task(user_id, body) {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// PUT /api/tasks/:id
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<u64>,
    Json(body): Json<UpdateTask>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.update_task(user_id, task_id, body) {
        Ok(task) => Json(task).into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}

/// DELETE /api/tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<u64>,
) -> impl IntoResponse {
    let user_id = match require_user(&state, &headers) {
        Ok(id) => id,
        Err(reply) => return reply.into_response(),
    };

    match state.store.delete_task(user_id, task_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_reply(e).into_response(),
    }
}
