use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_wizard::{
    build_router,
    config::Config,
    services::cleanup::CleanupService,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Max Kate booking API ({})", config.app.environment);

    // Create the shared application state
    let app_state: Arc<AppState> = AppState::new(config.clone())?;

    // --- Start background tasks ---

    // Evict abandoned wizard sessions
    task::spawn(CleanupService::new(app_state.clone()).run());

    // --- Start the web server ---

    let app = build_router(app_state);

    let host: std::net::IpAddr = config
        .app
        .host
        .parse()
        .with_context(|| format!("HOST must be an IP address, got {}", config.app.host))?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
