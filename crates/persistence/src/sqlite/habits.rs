//! Habit queries

use crate::sqlite::connection::is_unique_violation;
use chrono::{DateTime, NaiveDate, Utc};
use constrix_core::{Error, Habit, HabitType, Result};
use sqlx::{Executor, Sqlite};
use std::str::FromStr;

/// Database row for a habit
#[derive(Debug, sqlx::FromRow)]
struct HabitRow {
    id: i64,
    user_id: i64,
    habit_type: String,
    current_streak: i64,
    longest_streak: i64,
    last_checkin_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<HabitRow> for Habit {
    type Error = Error;

    fn try_from(row: HabitRow) -> Result<Self> {
        Ok(Habit {
            id: row.id,
            user_id: row.user_id,
            habit_type: HabitType::from_str(&row.habit_type)?,
            current_streak: row.current_streak.max(0) as u32,
            longest_streak: row.longest_streak.max(0) as u32,
            last_checkin_date: row.last_checkin_date,
            created_at: row.created_at,
        })
    }
}

const HABIT_COLUMNS: &str =
    "id, user_id, habit_type, current_streak, longest_streak, last_checkin_date, created_at";

/// Create a habit for a user
///
/// The UNIQUE(user_id, habit_type) constraint rejects a second habit of the
/// same type, surfaced as `Conflict`.
pub async fn create<'e, E>(executor: E, user_id: i64, habit_type: HabitType) -> Result<Habit>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: HabitRow = sqlx::query_as(&format!(
        "INSERT INTO habits (user_id, habit_type) VALUES (?, ?) RETURNING {}",
        HABIT_COLUMNS
    ))
    .bind(user_id)
    .bind(habit_type.as_str())
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict("You already have a habit of this type".to_string())
        } else {
            Error::Database(e.to_string())
        }
    })?;

    row.try_into()
}

/// Get a habit by ID, only if it belongs to the given user
pub async fn get_owned<'e, E>(executor: E, habit_id: i64, user_id: i64) -> Result<Option<Habit>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<HabitRow> = sqlx::query_as(&format!(
        "SELECT {} FROM habits WHERE id = ? AND user_id = ?",
        HABIT_COLUMNS
    ))
    .bind(habit_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    row.map(Habit::try_from).transpose()
}

/// List all habits for a user, newest first
pub async fn list_for_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<Habit>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<HabitRow> = sqlx::query_as(&format!(
        "SELECT {} FROM habits WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        HABIT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    rows.into_iter().map(Habit::try_from).collect()
}

/// Persist recomputed streak counters onto a habit
pub async fn update_streak<'e, E>(
    executor: E,
    habit_id: i64,
    current_streak: u32,
    longest_streak: u32,
    last_checkin_date: Option<NaiveDate>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE habits
        SET current_streak = ?, longest_streak = ?, last_checkin_date = ?
        WHERE id = ?
        "#,
    )
    .bind(current_streak as i64)
    .bind(longest_streak as i64)
    .bind(last_checkin_date)
    .bind(habit_id)
    .execute(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(())
}

/// Delete a habit row; returns false if it did not exist or is not owned
pub async fn delete_owned<'e, E>(executor: E, habit_id: i64, user_id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM habits WHERE id = ? AND user_id = ?")
        .bind(habit_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::users;
    use crate::Database;

    async fn seeded_user(db: &Database) -> i64 {
        users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn one_habit_per_type_per_user() {
        let db = Database::connect_in_memory().await.unwrap();
        let user_id = seeded_user(&db).await;

        create(db.pool(), user_id, HabitType::Study).await.unwrap();
        let err = create(db.pool(), user_id, HabitType::Study)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // A different type is still allowed
        create(db.pool(), user_id, HabitType::Fitness)
            .await
            .unwrap();
        assert_eq!(list_for_user(db.pool(), user_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ownership_is_enforced_on_reads_and_deletes() {
        let db = Database::connect_in_memory().await.unwrap();
        let owner = seeded_user(&db).await;
        let stranger =
            users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000bb")
                .await
                .unwrap()
                .id;

        let habit = create(db.pool(), owner, HabitType::Study).await.unwrap();
        assert!(get_owned(db.pool(), habit.id, stranger)
            .await
            .unwrap()
            .is_none());
        assert!(!delete_owned(db.pool(), habit.id, stranger).await.unwrap());
        assert!(delete_owned(db.pool(), habit.id, owner).await.unwrap());
    }

    #[tokio::test]
    async fn update_streak_round_trips() {
        let db = Database::connect_in_memory().await.unwrap();
        let user_id = seeded_user(&db).await;
        let habit = create(db.pool(), user_id, HabitType::Fitness)
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        update_streak(db.pool(), habit.id, 4, 9, Some(date))
            .await
            .unwrap();

        let reloaded = get_owned(db.pool(), habit.id, user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.current_streak, 4);
        assert_eq!(reloaded.longest_streak, 9);
        assert_eq!(reloaded.last_checkin_date, Some(date));
    }
}
