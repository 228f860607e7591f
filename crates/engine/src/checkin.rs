//! The check-in transaction
//!
//! One logical unit: insert today's check-in, recompute the streak over the
//! full history, persist the counters, and fire a milestone if the new streak
//! lands exactly on a threshold. Either everything commits or nothing does.

use crate::milestones::is_new_milestone;
use crate::streak::compute_streak;
use chrono::NaiveDate;
use constrix_core::{Checkin, Error, Milestone, Result, StreakSummary};
use constrix_persistence::sqlite::{checkins, habits, milestones};
use constrix_persistence::Database;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// How far back the recompute looks, in check-ins
///
/// Streaks longer than a year are still reported correctly up to this cap;
/// the window exists so a years-old habit does not scan unbounded history on
/// every check-in.
const HISTORY_WINDOW: u32 = 365;

/// Everything a successful check-in produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinOutcome {
    pub checkin: Checkin,
    pub streak: StreakSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
}

/// Check in a habit for `today` on behalf of `user_id`
///
/// Fails with `NotFound` if the habit does not exist or is not owned by the
/// caller, `Conflict` if a check-in for today already exists, and
/// `Validation` if the proof payload is not a JSON object. Any failure rolls
/// the whole transaction back; no partial state persists.
#[instrument(skip(db, proof_data))]
pub async fn check_in(
    db: &Database,
    user_id: i64,
    habit_id: i64,
    proof_data: Option<serde_json::Value>,
    today: NaiveDate,
) -> Result<CheckinOutcome> {
    if let Some(ref proof) = proof_data {
        if !proof.is_object() {
            return Err(Error::Validation(
                "Proof data must be a JSON object".to_string(),
            ));
        }
    }

    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    let habit = habits::get_owned(&mut *tx, habit_id, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Habit not found or access denied".to_string()))?;

    // The UNIQUE(habit_id, checkin_date) constraint turns a duplicate or a
    // racing insert into Conflict here.
    let checkin = checkins::insert(&mut *tx, habit_id, today, proof_data.as_ref()).await?;

    // Full recompute over the updated history. Incremental updating against
    // only the previous day would be cheaper but is safe only if no
    // backfilled rows can appear; the recompute holds regardless.
    let dates = checkins::list_dates_desc(&mut *tx, habit_id, HISTORY_WINDOW).await?;
    let streak = compute_streak(&dates, today)?;

    habits::update_streak(
        &mut *tx,
        habit_id,
        streak.current_streak,
        streak.longest_streak,
        streak.last_checkin_date,
    )
    .await?;

    // Fires only when the recomputed streak lands exactly on a threshold.
    // insert_if_new returns None when this threshold already fired for the
    // habit, so a retry or a race cannot produce a second reward.
    let milestone = if is_new_milestone(streak.current_streak) {
        milestones::insert_if_new(&mut *tx, habit_id, streak.current_streak).await?
    } else {
        None
    };

    tx.commit()
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    if let Some(ref m) = milestone {
        info!(
            "Habit {} ({}) reached {}-day milestone",
            habit_id, habit.habit_type, m.milestone_days
        );
    } else {
        debug!(
            "Habit {} checked in, streak {}",
            habit_id, streak.current_streak
        );
    }

    Ok(CheckinOutcome {
        checkin,
        streak,
        milestone,
    })
}
