//! HTTP API layer

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
