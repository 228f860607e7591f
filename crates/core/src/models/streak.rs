//! Streak summary model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of the streak calculation over a habit's check-in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Consecutive days ending today or yesterday; 0 if the chain is broken
    pub current_streak: u32,
    /// Longest consecutive-day run anywhere in the history
    pub longest_streak: u32,
    pub last_checkin_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl StreakSummary {
    /// Summary for a habit with no check-ins at all
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_checkin_date: None,
            is_active: false,
        }
    }
}
