//! Binary entrypoint for the curriculum HTTP server.
//!
//! Configuration comes from environment variables; see [`ServerConfig`].

use malla_server::config::ServerConfig;
use malla_server::router::build_router;
use malla_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config)?;
    let app = build_router(state, config.request_timeout);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(db = %config.db_path, "malla server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
