//! HTTP server setup with Axum

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::rest::{apiaries, auth, drums, stats, tasks, users};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        // Account
        .route("/api/users/me", get(users::me).delete(users::delete_me))
        // Apiaries; static segments must precede the :id routes
        .route("/api/apiaries/count", get(apiaries::count))
        .route("/api/apiaries/harvest/all", put(apiaries::harvest_all))
        .route("/api/apiaries", get(apiaries::list).post(apiaries::create))
        .route(
            "/api/apiaries/:id",
            get(apiaries::get)
                .put(apiaries::update)
                .delete(apiaries::delete),
        )
        .route("/api/apiaries/:id/history", get(apiaries::history))
        .route("/api/apiaries/:id/harvested", get(apiaries::harvested))
        .route("/api/apiaries/:id/settings", put(apiaries::update_settings))
        // Statistics
        .route("/api/stats/boxes", get(stats::boxes))
        .route("/api/stats/harvesting/count", get(stats::harvesting_count))
        .route("/api/stats/harvested/counts", get(stats::harvested_counts))
        .route(
            "/api/stats/harvested/today/boxes",
            get(stats::harvested_today_boxes),
        )
        .route(
            "/api/stats/harvested/today/counts",
            get(stats::harvested_today_counts),
        )
        // Tasks
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/api/tasks/:id",
            put(tasks::update).delete(tasks::delete),
        )
        // Drums
        .route("/api/drums/summary", get(drums::summary))
        .route("/api/drums", get(drums::list).post(drums::create))
        .route(
            "/api/drums/:id",
            put(drums::update).delete(drums::delete),
        )
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
