use sqlx::SqlitePool;

use crate::models::{user::User, Pagination};

const COLUMNS: &str =
    "id, email, first_name, last_name, birth_date, password_hash, created_at, updated_at";

pub struct NewUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: Option<chrono::NaiveDate>,
    pub password_hash: &'a str,
}

pub async fn create(pool: &SqlitePool, new: &NewUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, first_name, last_name, birth_date, password_hash) \
         VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(new.email)
    .bind(new.first_name)
    .bind(new.last_name)
    .bind(new.birth_date)
    .bind(new.password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool, page: Pagination) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await
}

/// Replaces every editable field. `None` when the row is gone.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: &NewUser<'_>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET email = ?, first_name = ?, last_name = ?, birth_date = ?, \
         password_hash = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(changes.email)
    .bind(changes.first_name)
    .bind(changes.last_name)
    .bind(changes.birth_date)
    .bind(changes.password_hash)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
