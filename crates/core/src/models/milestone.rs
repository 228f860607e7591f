//! Milestone models

use crate::models::HabitType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A one-time streak threshold reached by a habit
///
/// Unique per (habit, milestone_days); `synced` flips to true exactly once,
/// when the chain gateway confirms the record with a transaction reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i64,
    pub habit_id: i64,
    pub milestone_days: u32,
    pub achieved_at: DateTime<Utc>,
    pub synced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_ref: Option<String>,
}

/// Per-item outcome of a milestone sync batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneSyncResult {
    pub milestone_id: i64,
    pub habit_type: HabitType,
    pub milestone_days: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `POST /api/blockchain/sync`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub synced: u32,
    pub results: Vec<MilestoneSyncResult>,
}
