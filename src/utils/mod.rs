//! Utility functions

pub mod atomic;

pub use atomic::atomic_write;

/// Current Unix timestamp in seconds (UTC)
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
