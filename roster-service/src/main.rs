use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_service::api;
use roster_service::domain::engine::{EngineConfig, RosterEngine};
use roster_service::infrastructure::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Roster Service...");

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    let engine = RosterEngine::new(EngineConfig {
        staffing: settings.staffing.clone(),
        policy: settings.policy.clone(),
        time_limit: Duration::from_secs(settings.solver.time_limit_seconds),
    });
    let state = api::AppState::new(Arc::new(engine));

    // Create router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(settings.server_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Roster Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
