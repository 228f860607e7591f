//! Chain gateway abstraction
//!
//! Milestone recording is fire-and-forget from the product's point of view:
//! the check-in path never waits on it, and the sync batch retries anything
//! that did not land. The error split below is what drives the batch's
//! abort-vs-continue decision.

use constrix_core::HabitType;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// A milestone to record against the chain gateway
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRecord {
    pub wallet_address: String,
    pub habit_type: HabitType,
    pub milestone_days: u32,
    /// Reward amount in VERY tokens for this threshold
    pub reward_amount: u32,
}

/// Gateway-level failure modes
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    /// The gateway cannot be reached at all; the whole sync batch aborts
    /// and every remaining item stays unsynced for the next call.
    #[error("Chain gateway unreachable: {0}")]
    Unavailable(String),

    /// The gateway rejected this one record; reported inline, the batch
    /// continues with the next item.
    #[error("Chain gateway rejected record: {0}")]
    Rejected(String),
}

/// A service that can persist a milestone record externally
///
/// The production implementation is [`crate::ChainGatewayClient`]; tests use
/// in-memory fakes to script per-item and systemic failures.
pub trait ChainGateway: Send + Sync {
    /// Record one milestone; returns the gateway's transaction reference
    fn record_milestone(
        &self,
        record: &MilestoneRecord,
    ) -> impl Future<Output = std::result::Result<String, ChainError>> + Send;
}
