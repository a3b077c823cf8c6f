//! Apiarium server - binary entry point

use std::sync::Arc;

use apiarium::api::{create_router, AppState};
use apiarium::auth::JwtAuth;
use apiarium::config::Config;
use apiarium::scheduler::spawn_daily_maintenance;
use apiarium::store::ApiaryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let store = Arc::new(ApiaryStore::open_default());
    eprintln!("[Server] Data file: {}", store.file_path().display());

    let auth = Arc::new(JwtAuth::from_env()?);

    spawn_daily_maintenance(Arc::clone(&store));

    let app = create_router(AppState::new(store, auth));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("[Server] Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    eprintln!("[Server] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("[Server] Failed to listen for shutdown signal: {}", e);
    }
}
