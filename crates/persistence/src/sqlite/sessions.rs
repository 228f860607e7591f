//! Bearer-token session queries

use chrono::{DateTime, Utc};
use constrix_core::{Error, Result, User};
use sqlx::{Executor, Sqlite};

/// Store a new session token for a user
pub async fn create<'e, E>(executor: E, token: &str, user_id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
        .bind(token)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    Ok(())
}

/// Resolve a session token to its user, if the session exists
pub async fn resolve<'e, E>(executor: E, token: &str) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    #[derive(sqlx::FromRow)]
    struct Row {
        id: i64,
        wallet_address: String,
        username: Option<String>,
        created_at: DateTime<Utc>,
    }

    let row: Option<Row> = sqlx::query_as(
        r#"
        SELECT u.id, u.wallet_address, u.username, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(row.map(|r| User {
        id: r.id,
        wallet_address: r.wallet_address,
        username: r.username,
        created_at: r.created_at,
    }))
}

/// Delete a session (logout)
pub async fn delete<'e, E>(executor: E, token: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(executor)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::users;
    use crate::Database;

    #[tokio::test]
    async fn session_round_trip() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap();

        create(db.pool(), "tok-1", user.id).await.unwrap();
        let resolved = resolve(db.pool(), "tok-1").await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        delete(db.pool(), "tok-1").await.unwrap();
        assert!(resolve(db.pool(), "tok-1").await.unwrap().is_none());
    }
}
