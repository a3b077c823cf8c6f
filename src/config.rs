//! Server configuration from environment variables
//!
//! - `APIARIUM_HOST` — bind address (default 127.0.0.1)
//! - `APIARIUM_PORT` — bind port (default 3000)
//! - `APIARIUM_DATA_FILE` — data file path (default apiarium.jsonl)
//! - `APIARIUM_JWT_SECRET` — token signing secret (see `auth`)

use std::env;

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let host = env::var("APIARIUM_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APIARIUM_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self { host, port }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
