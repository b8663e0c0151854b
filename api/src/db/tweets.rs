use sqlx::SqlitePool;

use crate::models::{tweet::Tweet, Pagination};

const COLUMNS: &str = "id, content, user_id, created_at, updated_at";

pub async fn create(pool: &SqlitePool, user_id: i64, content: &str) -> Result<Tweet, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "INSERT INTO tweets (content, user_id) VALUES (?, ?) RETURNING {COLUMNS}"
    ))
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!("SELECT {COLUMNS} FROM tweets WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool, page: Pagination) -> Result<Vec<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "SELECT {COLUMNS} FROM tweets ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(pool)
    .await
}

pub async fn update_content(
    pool: &SqlitePool,
    id: i64,
    content: &str,
) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "UPDATE tweets SET content = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? \
         RETURNING {COLUMNS}"
    ))
    .bind(content)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
