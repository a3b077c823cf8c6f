//! Apiarium - beekeeping management backend
//!
//! A REST backend for apiary management whose core is an audited change
//! ledger: every tracked-field edit to an apiary is diffed and appended to
//! an immutable history table, and the harvest dashboards are computed from
//! that ledger with latest-wins same-day deduplication.
//!
//! # Modules
//!
//! - `types`: Plain data structures (User, Apiary, Settings, ChangeRecord, ...)
//! - `history`: Tracked-field set, snapshot type and the pure diff engine
//! - `store`: Data engine - JSONL persistence, audited mutations, queries
//! - `auth`: JWT tokens and bcrypt password hashing
//! - `api`: Axum REST layer
//! - `scheduler`: Daily maintenance loop (food and treatment countdowns)
//! - `config`: Environment-variable configuration
//! - `utils`: Timestamps and atomic file writes

pub mod api;
pub mod auth;
pub mod config;
pub mod history;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use auth::JwtAuth;
pub use history::{diff, ApiarySnapshot, ChangeDescriptor, TrackedField};
pub use store::{ApiaryStore, StoreError, StoreResult};
pub use types::{
    Apiary, ApiaryCounts, ApiaryDetail, BoxStats, ChangeRecord, Drum, DrumSummary, Settings, Task,
    User,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
