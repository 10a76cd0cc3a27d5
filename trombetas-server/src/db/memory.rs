//! In-memory document store (`STORE=memory`, tests)

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::store::{Document, DocumentStore, Record, RepoResult, merge_shallow, not_found};

#[derive(Debug)]
struct Slot {
    seq: u64,
    data: Record,
}

/// Documents keyed by `(collection, id)`; lost on restart
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<(String, String), Slot>,
    seq: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(collection: &str, id: &str) -> (String, String) {
    (collection.to_string(), id.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, record: Record) -> RepoResult<String> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        loop {
            let id = shared::util::snowflake_id().to_string();
            if let Entry::Vacant(slot) = self.documents.entry(key(collection, &id)) {
                slot.insert(Slot { seq, data: record });
                return Ok(id);
            }
        }
    }

    async fn list(&self, collection: &str) -> RepoResult<Vec<Document>> {
        let mut entries: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter(|e| e.key().0 == collection)
            .map(|e| {
                (
                    e.seq,
                    Document {
                        id: e.key().1.clone(),
                        data: e.data.clone(),
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> RepoResult<Option<Document>> {
        Ok(self.documents.get(&key(collection, id)).map(|e| Document {
            id: id.to_string(),
            data: e.data.clone(),
        }))
    }

    async fn update(&self, collection: &str, id: &str, partial: Record) -> RepoResult<()> {
        let mut entry = self
            .documents
            .get_mut(&key(collection, id))
            .ok_or_else(|| not_found(collection, id))?;
        merge_shallow(&mut entry.data, partial);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> RepoResult<()> {
        self.documents
            .remove(&key(collection, id))
            .map(|_| ())
            .ok_or_else(|| not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::RepoError;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_per_collection() {
        let store = MemoryDocumentStore::new();
        let a = store.create("c", record(json!({"n": 1}))).await.unwrap();
        store.create("other", record(json!({"n": 9}))).await.unwrap();
        let b = store.create("c", record(json!({"n": 2}))).await.unwrap();

        let ids: Vec<String> = store.list("c").await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryDocumentStore::new();
        let id = store.create("c", record(json!({"a": 1, "b": 2}))).await.unwrap();

        store.update("c", &id, record(json!({"b": 5}))).await.unwrap();
        let doc = store.get("c", &id).await.unwrap().unwrap();
        assert_eq!(Value::Object(doc.data), json!({"a": 1, "b": 5}));

        store.delete("c", &id).await.unwrap();
        assert!(matches!(store.delete("c", &id).await, Err(RepoError::NotFound(_))));
        assert!(matches!(
            store.update("c", &id, Record::new()).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
