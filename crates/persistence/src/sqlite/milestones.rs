//! Milestone queries

use chrono::{DateTime, Utc};
use constrix_core::{Error, HabitType, Milestone, Result};
use sqlx::{Executor, Sqlite};
use std::str::FromStr;

/// Database row for a milestone
#[derive(Debug, sqlx::FromRow)]
struct MilestoneRow {
    id: i64,
    habit_id: i64,
    milestone_days: i64,
    achieved_at: DateTime<Utc>,
    synced: i64,
    tx_ref: Option<String>,
}

impl From<MilestoneRow> for Milestone {
    fn from(row: MilestoneRow) -> Self {
        Milestone {
            id: row.id,
            habit_id: row.habit_id,
            milestone_days: row.milestone_days.max(0) as u32,
            achieved_at: row.achieved_at,
            synced: row.synced != 0,
            tx_ref: row.tx_ref,
        }
    }
}

/// A milestone pending chain sync, with the context the gateway needs
#[derive(Debug, Clone)]
pub struct PendingMilestone {
    pub milestone: Milestone,
    pub habit_type: HabitType,
    pub wallet_address: String,
}

const MILESTONE_COLUMNS: &str = "id, habit_id, milestone_days, achieved_at, synced, tx_ref";

/// Insert a milestone if this threshold has not fired for the habit yet
///
/// Returns None when the (habit_id, milestone_days) row already exists, which
/// makes a crash-retry or a racing check-in a no-op instead of a second reward.
pub async fn insert_if_new<'e, E>(
    executor: E,
    habit_id: i64,
    milestone_days: u32,
) -> Result<Option<Milestone>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<MilestoneRow> = sqlx::query_as(&format!(
        r#"
        INSERT INTO milestones (habit_id, milestone_days)
        VALUES (?, ?)
        ON CONFLICT(habit_id, milestone_days) DO NOTHING
        RETURNING {}
        "#,
        MILESTONE_COLUMNS
    ))
    .bind(habit_id)
    .bind(milestone_days as i64)
    .fetch_optional(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(row.map(Milestone::from))
}

/// All milestones across a user's habits, most recent first
pub async fn list_for_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<(Milestone, HabitType)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        habit_id: i64,
        milestone_days: i64,
        achieved_at: DateTime<Utc>,
        synced: i64,
        tx_ref: Option<String>,
        habit_type: String,
    }

    let rows: Vec<Row> = sqlx::query_as(
        r#"
        SELECT m.id, m.habit_id, m.milestone_days, m.achieved_at, m.synced, m.tx_ref,
               h.habit_type
        FROM milestones m
        JOIN habits h ON h.id = m.habit_id
        WHERE h.user_id = ?
        ORDER BY m.achieved_at DESC, m.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    rows.into_iter()
        .map(|r| {
            let habit_type = HabitType::from_str(&r.habit_type)?;
            Ok((
                Milestone {
                    id: r.id,
                    habit_id: r.habit_id,
                    milestone_days: r.milestone_days.max(0) as u32,
                    achieved_at: r.achieved_at,
                    synced: r.synced != 0,
                    tx_ref: r.tx_ref,
                },
                habit_type,
            ))
        })
        .collect()
}

/// Unsynced milestones across a user's habits: the sync batch candidate set
pub async fn list_unsynced_for_user<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Vec<PendingMilestone>>
where
    E: Executor<'e, Database = Sqlite>,
{
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        habit_id: i64,
        milestone_days: i64,
        achieved_at: DateTime<Utc>,
        synced: i64,
        tx_ref: Option<String>,
        habit_type: String,
        wallet_address: String,
    }

    let rows: Vec<Row> = sqlx::query_as(
        r#"
        SELECT m.id, m.habit_id, m.milestone_days, m.achieved_at, m.synced, m.tx_ref,
               h.habit_type, u.wallet_address
        FROM milestones m
        JOIN habits h ON h.id = m.habit_id
        JOIN users u ON u.id = h.user_id
        WHERE h.user_id = ? AND m.synced = 0
        ORDER BY m.achieved_at ASC, m.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    rows.into_iter()
        .map(|r| {
            Ok(PendingMilestone {
                milestone: Milestone {
                    id: r.id,
                    habit_id: r.habit_id,
                    milestone_days: r.milestone_days.max(0) as u32,
                    achieved_at: r.achieved_at,
                    synced: r.synced != 0,
                    tx_ref: r.tx_ref,
                },
                habit_type: HabitType::from_str(&r.habit_type)?,
                wallet_address: r.wallet_address,
            })
        })
        .collect()
}

/// Count all milestones across a user's habits
pub async fn count_for_user<'e, E>(executor: E, user_id: i64) -> Result<u32>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM milestones m
        JOIN habits h ON h.id = m.habit_id
        WHERE h.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(count.max(0) as u32)
}

/// Flip a milestone to synced with the gateway's transaction reference
pub async fn mark_synced<'e, E>(executor: E, milestone_id: i64, tx_ref: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE milestones SET synced = 1, tx_ref = ? WHERE id = ?")
        .bind(tx_ref)
        .bind(milestone_id)
        .execute(executor)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    Ok(())
}

/// Delete all milestones belonging to a habit (habit deletion only)
pub async fn delete_for_habit<'e, E>(executor: E, habit_id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM milestones WHERE habit_id = ?")
        .bind(habit_id)
        .execute(executor)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{habits, users};
    use crate::Database;

    async fn seeded_habit(db: &Database) -> i64 {
        let user = users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap();
        habits::create(db.pool(), user.id, HabitType::Fitness)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn threshold_fires_at_most_once_per_habit() {
        let db = Database::connect_in_memory().await.unwrap();
        let habit_id = seeded_habit(&db).await;

        let first = insert_if_new(db.pool(), habit_id, 7).await.unwrap();
        assert!(first.is_some());
        assert!(!first.unwrap().synced);

        // Retry after a crash or a racing writer: no second row
        let second = insert_if_new(db.pool(), habit_id, 7).await.unwrap();
        assert!(second.is_none());

        // A different threshold is a different milestone
        assert!(insert_if_new(db.pool(), habit_id, 14)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn synced_rows_leave_the_candidate_set() {
        let db = Database::connect_in_memory().await.unwrap();
        let habit_id = seeded_habit(&db).await;
        let milestone = insert_if_new(db.pool(), habit_id, 7)
            .await
            .unwrap()
            .unwrap();
        insert_if_new(db.pool(), habit_id, 14).await.unwrap();

        let pending = list_unsynced_for_user(db.pool(), 1).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(
            pending[0].wallet_address,
            "0x00000000000000000000000000000000000000aa"
        );

        mark_synced(db.pool(), milestone.id, "0xdeadbeef").await.unwrap();

        let pending = list_unsynced_for_user(db.pool(), 1).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].milestone.milestone_days, 14);

        let all = list_for_user(db.pool(), 1).await.unwrap();
        assert_eq!(all.len(), 2);
        let synced = all.iter().find(|(m, _)| m.synced).unwrap();
        assert_eq!(synced.0.tx_ref.as_deref(), Some("0xdeadbeef"));
    }
}
