//! Habit CRUD and the check-in endpoint

use crate::error::{ApiError, ApiResult};
use crate::routes::CurrentUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use constrix_core::{CheckinRequest, Error, HabitType};
use constrix_engine::{check_in, compute_streak, CheckinOutcome};
use constrix_persistence::sqlite::{checkins, habits, milestones};
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

const RECENT_CHECKINS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(rename = "type")]
    pub habit_type: String,
}

/// GET /api/habits
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    let habits = habits::list_for_user(state.db.pool(), user.id).await?;
    Ok(Json(serde_json::json!({ "habits": habits })))
}

/// POST /api/habits
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreateHabitRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let habit_type = HabitType::from_str(&body.habit_type)?;
    let habit = habits::create(state.db.pool(), user.id, habit_type).await?;

    info!("User {} created {} habit {}", user.id, habit_type, habit.id);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "habit": habit })),
    ))
}

/// GET /api/habits/{id}
///
/// The stored streak counters can go stale overnight, so the summary is
/// recomputed from the check-in history on every read.
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(habit_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let habit = habits::get_owned(state.db.pool(), habit_id, user.id)
        .await?
        .ok_or_else(|| ApiError(Error::NotFound("Habit not found".to_string())))?;

    let recent = checkins::list_recent(state.db.pool(), habit_id, RECENT_CHECKINS).await?;
    let dates = checkins::list_dates_desc(state.db.pool(), habit_id, 365).await?;
    let streak = compute_streak(&dates, Utc::now().date_naive())?;

    Ok(Json(serde_json::json!({
        "habit": habit,
        "streak": streak,
        "recentCheckins": recent,
    })))
}

/// DELETE /api/habits/{id}
///
/// Removes the habit with its check-ins and milestones in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(habit_id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut tx = state
        .db
        .pool()
        .begin()
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    checkins::delete_for_habit(&mut *tx, habit_id).await?;
    milestones::delete_for_habit(&mut *tx, habit_id).await?;
    let deleted = habits::delete_owned(&mut *tx, habit_id, user.id).await?;

    if !deleted {
        // Rolls back the child deletes along with everything else
        return Err(ApiError(Error::NotFound("Habit not found".to_string())));
    }

    tx.commit().await.map_err(|e| Error::Database(e.to_string()))?;

    info!("User {} deleted habit {}", user.id, habit_id);
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/habits/{id}/checkin
///
/// The body is optional; `{"proofData": {...}}` attaches proof to the
/// check-in. The check-in day is the server's current UTC date.
pub async fn checkin(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(habit_id): Path<i64>,
    body: Option<Json<CheckinRequest>>,
) -> ApiResult<Json<CheckinOutcome>> {
    let proof_data = body.and_then(|Json(req)| req.proof_data);
    let today = Utc::now().date_naive();

    let outcome = check_in(&state.db, user.id, habit_id, proof_data, today).await?;
    Ok(Json(outcome))
}
