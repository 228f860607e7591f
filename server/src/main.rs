//! Constrix API server - Main entry point

mod config;
mod error;
mod routes;
mod state;

use config::Config;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "constrix_server=debug,constrix_engine=debug,constrix_persistence=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Constrix API server");

    let config = Config::from_env()?;
    tracing::info!(
        "Database at {}, chain gateway at {}",
        config.database_path.display(),
        config.chain_gateway_url
    );

    let state = AppState::new(&config).await?;
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
