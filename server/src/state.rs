//! Application state shared across request handlers

use crate::config::Config;
use constrix_core::Result;
use constrix_networking::ChainGatewayClient;
use constrix_persistence::Database;
use std::sync::Arc;

/// Global application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub chain: Arc<ChainGatewayClient>,
}

impl AppState {
    /// Connect the database and construct the gateway client
    pub async fn new(config: &Config) -> Result<Self> {
        let db = Database::connect(&config.database_path).await?;

        Ok(Self {
            db: Arc::new(db),
            chain: Arc::new(ChainGatewayClient::new(&config.chain_gateway_url)),
        })
    }

    /// State backed by an in-memory database (for testing)
    #[cfg(test)]
    pub async fn for_testing() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("in-memory database");
        Self {
            db: Arc::new(db),
            // Port 9 (discard) is never listening; sync tests stub the
            // gateway at the engine level instead of going through HTTP.
            chain: Arc::new(ChainGatewayClient::new("http://127.0.0.1:9")),
        }
    }
}
