//! HTTP client for the chain gateway service

use crate::chain::{ChainError, ChainGateway, MilestoneRecord};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Response from POST /api/milestones on the gateway
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordResponse {
    tx_hash: String,
}

/// HTTP client for the chain gateway
///
/// The gateway is a thin service in front of the HabitVault contract; this
/// client only knows its REST surface. Connection-level failures are
/// `Unavailable` (systemic), HTTP-level rejections are `Rejected` (per item).
pub struct ChainGatewayClient {
    http: Client,
    base_url: String,
}

impl ChainGatewayClient {
    /// Create a new client against the given gateway base URL
    pub fn new(base_url: &str) -> Self {
        let http = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check that the gateway is up
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<(), ChainError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ChainError::Unavailable(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| ChainError::Unavailable(e.to_string()))?;

        debug!("Chain gateway healthy");
        Ok(())
    }
}

impl ChainGateway for ChainGatewayClient {
    #[instrument(skip(self, record), fields(days = record.milestone_days))]
    async fn record_milestone(
        &self,
        record: &MilestoneRecord,
    ) -> Result<String, ChainError> {
        let url = format!("{}/api/milestones", self.base_url);

        debug!(
            "Recording {} {}-day milestone for {}",
            record.habit_type, record.milestone_days, record.wallet_address
        );

        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                error!("Chain gateway request failed: {}", e);
                ChainError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Chain gateway rejected record: HTTP {} {}", status, body);
            return Err(ChainError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        let recorded: RecordResponse = response.json().await.map_err(|e| {
            error!("Failed to parse gateway response: {}", e);
            ChainError::Rejected(e.to_string())
        })?;

        debug!("Milestone recorded: tx {}", recorded.tx_hash);
        Ok(recorded.tx_hash)
    }
}
