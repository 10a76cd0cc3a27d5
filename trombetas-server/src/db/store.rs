//! Generic document store
//!
//! Records are JSON objects grouped into named collections and addressed by an
//! opaque string id. Implementations: [`SqliteDocumentStore`](super::SqliteDocumentStore)
//! and [`MemoryDocumentStore`](super::MemoryDocumentStore).

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// JSON object body of a document
pub type Record = Map<String, Value>;

/// A stored record with its id
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Record,
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupted document: {0}")]
    Corrupted(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Corrupted(msg) => AppError::with_message(ErrorCode::StorageCorrupted, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// CRUD over JSON documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `record` and return the new id
    async fn create(&self, collection: &str, record: Record) -> RepoResult<String>;

    /// Every document of `collection`, oldest first
    async fn list(&self, collection: &str) -> RepoResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> RepoResult<Option<Document>>;

    /// Overwrite the top-level keys present in `partial`, keep the rest
    async fn update(&self, collection: &str, id: &str, partial: Record) -> RepoResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> RepoResult<()>;
}

/// Shallow merge: top-level keys of `partial` replace those of `target`
pub fn merge_shallow(target: &mut Record, partial: Record) {
    for (key, value) in partial {
        target.insert(key, value);
    }
}

pub(crate) fn not_found(collection: &str, id: &str) -> RepoError {
    RepoError::NotFound(format!("{collection}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_merge_shallow_replaces_whole_values() {
        let mut target = record(json!({"a": 1, "b": {"x": 1, "y": 2}, "c": [1, 2]}));
        merge_shallow(&mut target, record(json!({"b": {"x": 9}, "c": []})));
        assert_eq!(
            Value::Object(target),
            json!({"a": 1, "b": {"x": 9}, "c": []})
        );
    }

    #[test]
    fn test_repo_error_maps_to_app_error() {
        let err: AppError = RepoError::NotFound("registrations/1".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: AppError = RepoError::Database("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
