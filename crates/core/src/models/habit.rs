//! Habit models

use crate::errors::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of habit a user can track (one per kind per user)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    Study,
    Fitness,
}

impl HabitType {
    /// Stable string form used in the database and the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Study => "study",
            HabitType::Fitness => "fitness",
        }
    }

    /// Human-readable name shown in clients
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitType::Study => "Study",
            HabitType::Fitness => "Fitness",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HabitType::Study => "Daily learning and skill development",
            HabitType::Fitness => "Physical exercise and health",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study" => Ok(HabitType::Study),
            "fitness" => Ok(HabitType::Fitness),
            other => Err(Error::Validation(format!(
                "Habit type must be study or fitness, got '{}'",
                other
            ))),
        }
    }
}

/// A tracked habit with its persisted streak counters
///
/// Counters are mutated only by the check-in transaction after a
/// successful insert; reads elsewhere treat them as a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_checkin_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
