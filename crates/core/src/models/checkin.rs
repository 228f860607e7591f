//! Check-in models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single daily check-in for a habit
///
/// Immutable once created; at most one exists per (habit, calendar day).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    pub id: i64,
    pub habit_id: i64,
    /// Calendar day of the check-in, no time component
    pub checkin_date: NaiveDate,
    /// Opaque client-supplied proof (JSON object)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/habits/{id}/checkin`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[serde(default)]
    pub proof_data: Option<serde_json::Value>,
}
