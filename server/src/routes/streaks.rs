//! Live streak views

use crate::error::{ApiError, ApiResult};
use crate::routes::CurrentUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use constrix_core::{Error, Habit, HabitType, StreakSummary};
use constrix_engine::compute_streak;
use constrix_persistence::sqlite::{checkins, habits};
use constrix_persistence::Database;
use serde::Serialize;

const HISTORY_WINDOW: u32 = 365;

/// Streak summary for one habit, as served over the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStreak {
    pub habit_id: i64,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    #[serde(flatten)]
    pub streak: StreakSummary,
}

/// Recompute a habit's streak from its stored history as of today
async fn live_streak(db: &Database, habit: &Habit, today: NaiveDate) -> ApiResult<HabitStreak> {
    let dates = checkins::list_dates_desc(db.pool(), habit.id, HISTORY_WINDOW).await?;
    let streak = compute_streak(&dates, today)?;
    Ok(HabitStreak {
        habit_id: habit.id,
        habit_type: habit.habit_type,
        streak,
    })
}

/// GET /api/streaks
///
/// One summary per habit, recomputed live. A streak that lapsed since the
/// last check-in shows as current 0 here even though the stored counter has
/// not been rewritten yet.
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let user_habits = habits::list_for_user(state.db.pool(), user.id).await?;

    let mut streaks = Vec::with_capacity(user_habits.len());
    for habit in &user_habits {
        streaks.push(live_streak(&state.db, habit, today).await?);
    }

    Ok(Json(serde_json::json!({ "streaks": streaks })))
}

/// GET /api/habits/{id}/streak
pub async fn for_habit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(habit_id): Path<i64>,
) -> ApiResult<Json<HabitStreak>> {
    let habit = habits::get_owned(state.db.pool(), habit_id, user.id)
        .await?
        .ok_or_else(|| ApiError(Error::NotFound("Habit not found".to_string())))?;

    let streak = live_streak(&state.db, &habit, Utc::now().date_naive()).await?;
    Ok(Json(streak))
}
