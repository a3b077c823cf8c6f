//! Shared application state

use std::sync::Arc;

use crate::auth::JwtAuth;
use crate::store::ApiaryStore;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ApiaryStore>,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(store: Arc<ApiaryStore>, auth: Arc<JwtAuth>) -> Self {
        Self { store, auth }
    }
}
