//! User account queries

use chrono::{DateTime, Utc};
use constrix_core::{Error, Result, User};
use sqlx::{Executor, Sqlite};

/// Database row for a user
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    wallet_address: String,
    username: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            wallet_address: row.wallet_address,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Fetch the user for a wallet address, creating the account on first login
///
/// Implemented as an upsert so concurrent first logins for the same wallet
/// both resolve to the single existing row.
pub async fn get_or_create<'e, E>(executor: E, wallet_address: &str) -> Result<User>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (wallet_address)
        VALUES (?)
        ON CONFLICT(wallet_address) DO UPDATE SET wallet_address = excluded.wallet_address
        RETURNING id, wallet_address, username, created_at
        "#,
    )
    .bind(wallet_address)
    .fetch_one(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(row.into())
}

/// Get a user by ID
pub async fn get<'e, E>(executor: E, id: i64) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<UserRow> = sqlx::query_as(
        r#"
        SELECT id, wallet_address, username, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(row.map(User::from))
}
