//! Server configuration from environment variables

use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "127.0.0.1:8787";
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:9545";

/// Runtime configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub chain_gateway_url: String,
}

impl Config {
    /// Read configuration from the environment, with local-dev defaults
    ///
    /// - `CONSTRIX_BIND`: listen address (default `127.0.0.1:8787`)
    /// - `CONSTRIX_DB`: SQLite path (default under the OS data directory)
    /// - `CONSTRIX_CHAIN_GATEWAY_URL`: chain gateway base URL
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("CONSTRIX_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .context("CONSTRIX_BIND is not a valid socket address")?;

        let database_path = std::env::var("CONSTRIX_DB").map(PathBuf::from).unwrap_or_else(|_| {
            dirs_next::data_local_dir()
                .map(|p| p.join("Constrix"))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("constrix.db")
        });

        let chain_gateway_url = std::env::var("CONSTRIX_CHAIN_GATEWAY_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());

        Ok(Self {
            bind_addr,
            database_path,
            chain_gateway_url,
        })
    }
}
