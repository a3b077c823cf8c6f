//! Authentication endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password, TokenPair};
use crate::store::StoreError;
use crate::types::{CreateUser, LoginRequest, UserPublic};

use super::super::state::AppState;
use super::ApiError;

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserPublic,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Request body for token refresh
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> impl IntoResponse {
    if body.email.trim().is_empty() || body.password.len() < 6 {
        let error = ApiError::bad_request("Email required and password must be 6+ characters");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let password_hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("[Auth] Password hashing failed: {}", e);
            let error = ApiError::internal("Could not process password");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response();
        }
    };

    let user = match state.store.register_user(
        body.name,
        body.surname,
        body.email.trim().to_string(),
        password_hash,
    ) {
        Ok(user) => user,
        Err(StoreError::Conflict(msg)) => {
            return (StatusCode::CONFLICT, Json(ApiError::conflict(msg))).into_response();
        }
        Err(e) => return super::store_error_reply(e).into_response(),
    };

    match state.auth.generate_tokens(&user) {
        Ok(tokens) => (
            StatusCode::CREATED,
            Json(AuthResponse {
                user: user.public(),
                tokens,
            }),
        )
            .into_response(),
        Err(e) => {
            eprintln!("[Auth] Token generation failed: {}", e);
            let error = ApiError::internal("Could not issue tokens");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> impl IntoResponse {
    // Same reply for unknown email and wrong password
    let invalid = || {
        let error = ApiError::unauthorized("Invalid email or password");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    };

    let user = match state.store.find_user_by_email(&body.email) {
        Some(user) => user,
        None => return invalid(),
    };

    if !verify_password(&body.password, &user.password_hash) {
        return invalid();
    }

    match state.auth.generate_tokens(&user) {
        Ok(tokens) => Json(AuthResponse {
            user: user.public(),
            tokens,
        })
        .into_response(),
        Err(e) => {
            eprintln!("[Auth] Token generation failed: {}", e);
            let error = ApiError::internal("Could not issue tokens");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.auth.validate_refresh_token(&body.refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            let error = ApiError::unauthorized(e.to_string());
            return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
        }
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => {
            let error = ApiError::unauthorized(e.to_string());
            return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
        }
    };

    // The account may have been deleted since the token was issued
    let user = match state.store.get_user(user_id) {
        Some(user) => user,
        None => {
            let error = ApiError::unauthorized("User not found");
            return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
        }
    };

    match state.auth.generate_tokens(&user) {
        Ok(tokens) => Json(tokens).into_response(),
        Err(e) => {
            eprintln!("[Auth] Token generation failed: {}", e);
            let error = ApiError::internal("Could not issue tokens");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
