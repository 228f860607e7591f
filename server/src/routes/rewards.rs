//! Earned milestone rewards

use crate::error::ApiResult;
use crate::routes::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use constrix_core::{HabitType, Milestone};
use constrix_engine::milestones::reward_for;
use constrix_persistence::sqlite::milestones;
use serde::Serialize;

/// A milestone with the reward it pays out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEntry {
    #[serde(flatten)]
    pub milestone: Milestone,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub reward_amount: u32,
}

/// GET /api/rewards
///
/// Every milestone the user has reached, newest first, with reward amounts.
/// `totalEarned` counts all achieved milestones; sync state only affects the
/// per-entry `synced` flag.
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let entries: Vec<RewardEntry> = milestones::list_for_user(state.db.pool(), user.id)
        .await?
        .into_iter()
        .map(|(milestone, habit_type)| RewardEntry {
            reward_amount: reward_for(milestone.milestone_days),
            milestone,
            habit_type,
        })
        .collect();

    let total_earned: u32 = entries.iter().map(|e| e.reward_amount).sum();

    Ok(Json(serde_json::json!({
        "rewards": entries,
        "totalEarned": total_earned,
    })))
}
