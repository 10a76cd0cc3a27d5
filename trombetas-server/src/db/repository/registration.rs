//! Registration Repository
//!
//! Registrations live in the `registrations` collection as camelCase JSON
//! documents (`memberName`, `assistanceGroup`, `visitors`, `timestamp`).

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared::GroupFilter;
use shared::models::{Registration, RegistrationUpdate, StoredRegistration};

use crate::db::store::{Document, DocumentStore, Record, RepoError, RepoResult};

pub const COLLECTION: &str = "registrations";

fn to_record<T: Serialize>(value: &T) -> RepoResult<Record> {
    match serde_json::to_value(value).map_err(|e| RepoError::Validation(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(RepoError::Validation(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn from_document(doc: Document) -> RepoResult<StoredRegistration> {
    let registration: Registration = serde_json::from_value(Value::Object(doc.data))
        .map_err(|e| RepoError::Corrupted(format!("{COLLECTION}/{}: {e}", doc.id)))?;
    Ok(StoredRegistration {
        id: doc.id,
        registration,
    })
}

#[derive(Clone)]
pub struct RegistrationRepository {
    store: Arc<dyn DocumentStore>,
}

impl RegistrationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, registration: Registration) -> RepoResult<StoredRegistration> {
        let id = self
            .store
            .create(COLLECTION, to_record(&registration)?)
            .await?;
        Ok(StoredRegistration { id, registration })
    }

    /// Every decodable registration, newest first
    ///
    /// Documents that do not decode are skipped with a warning so one bad
    /// record does not take the dashboard down.
    pub async fn find_all(&self) -> RepoResult<Vec<StoredRegistration>> {
        let mut registrations: Vec<StoredRegistration> = self
            .store
            .list(COLLECTION)
            .await?
            .into_iter()
            .filter_map(|doc| match from_document(doc) {
                Ok(r) => Some(r),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable registration");
                    None
                }
            })
            .collect();

        registrations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(registrations)
    }

    /// [`find_all`](Self::find_all) restricted to one assistance group
    pub async fn find_by_group(&self, filter: &GroupFilter) -> RepoResult<Vec<StoredRegistration>> {
        let mut registrations = self.find_all().await?;
        registrations.retain(|r| filter.matches(&r.assistance_group));
        Ok(registrations)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StoredRegistration>> {
        self.store
            .get(COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Replace member, group and visitors; the timestamp is kept
    pub async fn update(&self, id: &str, data: RegistrationUpdate) -> RepoResult<StoredRegistration> {
        self.store.update(COLLECTION, id, to_record(&data)?).await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{COLLECTION}/{id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store.delete(COLLECTION, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbService, MemoryDocumentStore, SqliteDocumentStore};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use shared::models::Visitor;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 19, 0, 0).unwrap()
    }

    fn registration(member: &str, group: &str, day: u32) -> Registration {
        Registration {
            member_name: member.to_string(),
            assistance_group: group.to_string(),
            visitors: vec![Visitor::new("João", "(11) 91234-5678")],
            timestamp: at(day),
        }
    }

    async fn sqlite_repo() -> (RegistrationRepository, Arc<dyn DocumentStore>) {
        let db = DbService::in_memory().await.unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(SqliteDocumentStore::new(db.pool));
        (RegistrationRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first() {
        let (repo, _) = sqlite_repo().await;
        repo.create(registration("Ana", "G1", 3)).await.unwrap();
        repo.create(registration("Bruno", "G2", 17)).await.unwrap();
        repo.create(registration("Carla", "G1", 10)).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.registration.member_name)
            .collect();
        assert_eq!(names, ["Bruno", "Carla", "Ana"]);
    }

    #[tokio::test]
    async fn test_find_by_group() {
        let repo = RegistrationRepository::new(Arc::new(MemoryDocumentStore::new()));
        repo.create(registration("Ana", "G1", 3)).await.unwrap();
        repo.create(registration("Bruno", "G2", 4)).await.unwrap();

        let g1 = repo
            .find_by_group(&GroupFilter::parse(Some("G1")))
            .await
            .unwrap();
        assert_eq!(g1.len(), 1);
        assert_eq!(g1[0].member_name, "Ana");

        let all = repo.find_by_group(&GroupFilter::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_timestamp() {
        let (repo, _) = sqlite_repo().await;
        let created = repo.create(registration("Ana", "G1", 3)).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                RegistrationUpdate {
                    member_name: "Bruno".to_string(),
                    assistance_group: "G2".to_string(),
                    visitors: vec![Visitor::new("Maria", "(11) 95555-5555")],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.member_name, "Bruno");
        assert_eq!(updated.assistance_group, "G2");
        assert_eq!(updated.visitors[0].name, "Maria");
        assert_eq!(updated.timestamp, created.timestamp);
    }

    #[tokio::test]
    async fn test_delete_and_missing_ids() {
        let (repo, _) = sqlite_repo().await;
        let created = repo.create(registration("Ana", "G1", 3)).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(&created.id).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_undecodable_documents_are_skipped() {
        let (repo, store) = sqlite_repo().await;
        repo.create(registration("Ana", "G1", 3)).await.unwrap();

        let broken = match json!({"memberName": "Sem data"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        store.create(COLLECTION, broken).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].member_name, "Ana");
    }
}
