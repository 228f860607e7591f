//! Check-in queries

use crate::sqlite::connection::is_unique_violation;
use chrono::{DateTime, NaiveDate, Utc};
use constrix_core::{Checkin, Error, Result};
use sqlx::{Executor, Sqlite};

/// Database row for a check-in
#[derive(Debug, sqlx::FromRow)]
struct CheckinRow {
    id: i64,
    habit_id: i64,
    checkin_date: NaiveDate,
    proof_data: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CheckinRow> for Checkin {
    type Error = Error;

    fn try_from(row: CheckinRow) -> Result<Self> {
        let proof_data = row
            .proof_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| Error::Database(format!("Stored proof data is not JSON: {}", e)))?;

        Ok(Checkin {
            id: row.id,
            habit_id: row.habit_id,
            checkin_date: row.checkin_date,
            proof_data,
            created_at: row.created_at,
        })
    }
}

const CHECKIN_COLUMNS: &str = "id, habit_id, checkin_date, proof_data, created_at";

/// Insert a check-in for a calendar day
///
/// The UNIQUE(habit_id, checkin_date) constraint is the at-most-once-per-day
/// invariant: a duplicate attempt (including a concurrent one) comes back as
/// `Conflict`, never as a second row.
pub async fn insert<'e, E>(
    executor: E,
    habit_id: i64,
    checkin_date: NaiveDate,
    proof_data: Option<&serde_json::Value>,
) -> Result<Checkin>
where
    E: Executor<'e, Database = Sqlite>,
{
    let proof_json = proof_data
        .map(|v| serde_json::to_string(v).map_err(|e| Error::Validation(e.to_string())))
        .transpose()?;

    let row: CheckinRow = sqlx::query_as(&format!(
        "INSERT INTO checkins (habit_id, checkin_date, proof_data) VALUES (?, ?, ?) RETURNING {}",
        CHECKIN_COLUMNS
    ))
    .bind(habit_id)
    .bind(checkin_date)
    .bind(proof_json)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::Conflict("You have already checked in today".to_string())
        } else {
            Error::Database(e.to_string())
        }
    })?;

    row.try_into()
}

/// List a habit's check-in dates, newest first, capped at `limit` entries
///
/// This is the input to the streak calculator; the UNIQUE constraint plus the
/// ORDER BY guarantee its strictly-descending, deduplicated precondition.
pub async fn list_dates_desc<'e, E>(
    executor: E,
    habit_id: i64,
    limit: u32,
) -> Result<Vec<NaiveDate>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        r#"
        SELECT checkin_date FROM checkins
        WHERE habit_id = ?
        ORDER BY checkin_date DESC
        LIMIT ?
        "#,
    )
    .bind(habit_id)
    .bind(limit as i64)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))
}

/// List a habit's most recent check-ins (full rows)
pub async fn list_recent<'e, E>(executor: E, habit_id: i64, limit: u32) -> Result<Vec<Checkin>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<CheckinRow> = sqlx::query_as(&format!(
        "SELECT {} FROM checkins WHERE habit_id = ? ORDER BY checkin_date DESC LIMIT ?",
        CHECKIN_COLUMNS
    ))
    .bind(habit_id)
    .bind(limit as i64)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    rows.into_iter().map(Checkin::try_from).collect()
}

/// Per-date check-in counts across all of a user's habits within a date range
pub async fn activity_for_user<'e, E>(
    executor: E,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, u32)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
        r#"
        SELECT c.checkin_date, COUNT(*) AS n
        FROM checkins c
        JOIN habits h ON h.id = c.habit_id
        WHERE h.user_id = ? AND c.checkin_date >= ? AND c.checkin_date <= ?
        GROUP BY c.checkin_date
        ORDER BY c.checkin_date
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(date, n)| (date, n.max(0) as u32))
        .collect())
}

/// Delete all check-ins belonging to a habit (habit deletion only)
pub async fn delete_for_habit<'e, E>(executor: E, habit_id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM checkins WHERE habit_id = ?")
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
    use constrix_core::HabitType;

    async fn seeded_habit(db: &Database) -> i64 {
        let user = users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap();
        habits::create(db.pool(), user.id, HabitType::Study)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn duplicate_day_is_conflict_with_single_row() {
        let db = Database::connect_in_memory().await.unwrap();
        let habit_id = seeded_habit(&db).await;
        let day = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        insert(db.pool(), habit_id, day, None).await.unwrap();
        let err = insert(db.pool(), habit_id, day, None).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let dates = list_dates_desc(db.pool(), habit_id, 365).await.unwrap();
        assert_eq!(dates, vec![day]);
    }

    #[tokio::test]
    async fn dates_come_back_descending() {
        let db = Database::connect_in_memory().await.unwrap();
        let habit_id = seeded_habit(&db).await;

        for day in [3, 1, 2] {
            let date = NaiveDate::from_ymd_opt(2026, 8, day).unwrap();
            insert(db.pool(), habit_id, date, None).await.unwrap();
        }

        let dates = list_dates_desc(db.pool(), habit_id, 365).await.unwrap();
        let expected: Vec<NaiveDate> = [3, 2, 1]
            .iter()
            .map(|d| NaiveDate::from_ymd_opt(2026, 8, *d).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[tokio::test]
    async fn proof_data_round_trips_as_json() {
        let db = Database::connect_in_memory().await.unwrap();
        let habit_id = seeded_habit(&db).await;
        let day = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let proof = serde_json::json!({"photoUrl": "https://example.com/a.jpg"});

        let checkin = insert(db.pool(), habit_id, day, Some(&proof)).await.unwrap();
        assert_eq!(checkin.proof_data, Some(proof.clone()));

        let recent = list_recent(db.pool(), habit_id, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].proof_data, Some(proof));
    }
}
