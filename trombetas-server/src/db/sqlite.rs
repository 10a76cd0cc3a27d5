//! SQLite document store
//!
//! One row per document in `documents(collection, id, body, created_at, updated_at)`,
//! body kept as JSON text.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::store::{Document, DocumentStore, Record, RepoError, RepoResult, merge_shallow, not_found};

const MAX_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn encode(record: &Record) -> RepoResult<String> {
    serde_json::to_string(record).map_err(|e| RepoError::Validation(e.to_string()))
}

fn decode(id: String, body: &str) -> RepoResult<Document> {
    let data: Record = serde_json::from_str(body)
        .map_err(|e| RepoError::Corrupted(format!("document {id}: {e}")))?;
    Ok(Document { id, data })
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, collection: &str, record: Record) -> RepoResult<String> {
        let body = encode(&record)?;
        let mut attempt = 0;
        loop {
            let now = shared::util::now_millis();
            let id = shared::util::snowflake_id().to_string();
            let result = sqlx::query(
                "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            )
            .bind(collection)
            .bind(&id)
            .bind(&body)
            .bind(now)
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => return Ok(id),
                // Two ids drawn in the same millisecond can collide
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() && attempt < MAX_ID_ATTEMPTS => {
                    attempt += 1;
                    tracing::debug!(collection, attempt, "Document id collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn list(&self, collection: &str) -> RepoResult<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id, body FROM documents WHERE collection = ? ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| decode(row.try_get("id")?, row.try_get::<&str, _>("body")?))
            .collect()
    }

    async fn get(&self, collection: &str, id: &str) -> RepoResult<Option<Document>> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| decode(row.try_get("id")?, row.try_get::<&str, _>("body")?))
            .transpose()
    }

    async fn update(&self, collection: &str, id: &str, partial: Record) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(body) = body else {
            return Err(not_found(collection, id));
        };

        let mut data = decode(id.to_string(), &body)?.data;
        merge_shallow(&mut data, partial);

        sqlx::query("UPDATE documents SET body = ?, updated_at = ? WHERE collection = ? AND id = ?")
            .bind(encode(&data)?)
            .bind(shared::util::now_millis())
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(collection, id));
        }
        Ok(())
    }
}
