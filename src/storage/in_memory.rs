//! In-memory implementation of CollectionStore for testing and development

use crate::catalog;
use crate::core::entity::Record;
use crate::core::error::StoreError;
use crate::core::field::FieldValue;
use crate::core::service::CollectionStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

type Collections = HashMap<String, IndexMap<String, Record>>;

/// In-memory collection store
///
/// Every catalog collection exists from the start, empty. Records keep
/// their insertion order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create a store with every catalog collection registered
    pub fn new() -> Self {
        let collections = catalog::COLLECTIONS
            .iter()
            .map(|name| (name.to_string(), IndexMap::new()))
            .collect();
        Self {
            collections: Arc::new(RwLock::new(collections)),
        }
    }

    /// Register an additional (empty) collection. Existing ones are untouched.
    pub fn register(&self, collection: &str) -> Result<()> {
        self.write()?
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    /// Seed a collection, assigning ids to records that lack one
    pub fn with_records(self, collection: &str, records: Vec<Record>) -> Result<Self> {
        {
            let mut collections = self.write()?;
            let target = collections.entry(collection.to_string()).or_default();
            for record in records {
                let (id, record) = ensure_id(record);
                target.insert(id, record);
            }
        }
        Ok(self)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections.read().map_err(|e| StoreError::LockPoisoned {
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections.write().map_err(|e| StoreError::LockPoisoned {
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(collection: &str) -> StoreError {
    StoreError::UnknownCollection {
        collection: collection.to_string(),
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

fn ensure_id(mut record: Record) -> (String, Record) {
    let id = match record.id() {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            record.set("id", id.clone());
            id
        }
    };
    (id, record)
}

#[async_trait]
impl CollectionStore for InMemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Record>> {
        let collections = self.read()?;
        let records = collections.get(collection).ok_or_else(|| unknown(collection))?;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>> {
        let collections = self.read()?;
        let records = collections.get(collection).ok_or_else(|| unknown(collection))?;
        Ok(records.get(id).cloned())
    }

    async fn save(&self, collection: &str, record: Record) -> Result<Record> {
        let (id, mut record) = ensure_id(record);
        record.set("updatedAt", Utc::now());

        let mut collections = self.write()?;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?;
        let replaced = records.insert(id.clone(), record.clone()).is_some();

        tracing::debug!(collection, id = %id, replaced, "saved record");
        Ok(record)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.write()?;
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?;
        records
            .shift_remove(id)
            .ok_or_else(|| not_found(collection, id))?;

        tracing::debug!(collection, id, "deleted record");
        Ok(())
    }

    async fn mark_read(&self, collection: &str, id: &str) -> Result<Record> {
        let mut collections = self.write()?;
        let record = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?
            .get_mut(id)
            .ok_or_else(|| not_found(collection, id))?;
        record.set("read", true);
        Ok(record.clone())
    }

    async fn send(&self, conversation_id: &str, message: Record) -> Result<Record> {
        if conversation_id.is_empty() {
            return Err(StoreError::InvalidRecord {
                collection: catalog::MESSAGES.to_string(),
                message: "message needs a conversation id".to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let (id, mut message) = ensure_id(message);
        message.set("conversationId", conversation_id);
        message.set("sentAt", now);
        if message.get("read").is_none() {
            message.set("read", false);
        }

        let mut collections = self.write()?;
        collections
            .get_mut(catalog::MESSAGES)
            .ok_or_else(|| unknown(catalog::MESSAGES))?
            .insert(id.clone(), message.clone());

        if let Some(conversation) = collections
            .get_mut(catalog::CONVERSATIONS)
            .and_then(|c| c.get_mut(conversation_id))
        {
            conversation.set("lastMessageAt", FieldValue::DateTime(now));
        }

        tracing::debug!(conversation_id, id = %id, "sent message");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_collections_exist_empty() {
        let store = InMemoryStore::new();
        for name in catalog::COLLECTIONS {
            assert!(store.list(name).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_collection() {
        let store = InMemoryStore::new();
        let err = store.list("tickets").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::UnknownCollection {
                collection: "tickets".into()
            })
        );

        store.register("tickets").unwrap();
        assert!(store.list("tickets").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_upserts() {
        let store = InMemoryStore::new();
        let saved = store
            .save(catalog::VENDORS, Record::new().with("name", "Acme"))
            .await
            .unwrap();
        let id = saved.id().unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(saved.get("updatedAt").is_some());

        let renamed = saved.clone().with("name", "Acme Plumbing");
        store.save(catalog::VENDORS, renamed).await.unwrap();

        let all = store.list(catalog::VENDORS).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(
            all[0].get("name"),
            Some(&FieldValue::String("Acme Plumbing".into()))
        );
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = InMemoryStore::new()
            .with_records(
                catalog::ACCOUNTS,
                vec![
                    Record::new().with("id", "b").with("number", "200"),
                    Record::new().with("id", "a").with("number", "100"),
                ],
            )
            .unwrap();
        let ids: Vec<_> = store
            .list(catalog::ACCOUNTS)
            .await
            .unwrap()
            .iter()
            .filter_map(Record::id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new()
            .with_records(catalog::DOCUMENTS, vec![Record::new().with("id", "d1")])
            .unwrap();
        store.delete(catalog::DOCUMENTS, "d1").await.unwrap();
        assert!(store.get(catalog::DOCUMENTS, "d1").await.unwrap().is_none());

        let err = store.delete(catalog::DOCUMENTS, "d1").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>().map(StoreError::error_code),
            Some("RECORD_NOT_FOUND")
        );
    }

    #[tokio::test]
    async fn test_mark_read() {
        let store = InMemoryStore::new()
            .with_records(
                catalog::NOTIFICATIONS,
                vec![Record::new().with("id", "n1").with("read", false)],
            )
            .unwrap();
        let updated = store.mark_read(catalog::NOTIFICATIONS, "n1").await.unwrap();
        assert_eq!(updated.get("read"), Some(&FieldValue::Boolean(true)));

        assert!(store.mark_read(catalog::NOTIFICATIONS, "nope").await.is_err());
    }

    #[tokio::test]
    async fn test_send_appends_message_and_touches_conversation() {
        let store = InMemoryStore::new()
            .with_records(
                catalog::CONVERSATIONS,
                vec![Record::new().with("id", "c1").with("subject", "Leak")],
            )
            .unwrap();

        let sent = store
            .send("c1", Record::new().with("sender", "tenant").with("body", "Still dripping"))
            .await
            .unwrap();
        assert_eq!(
            sent.get("conversationId"),
            Some(&FieldValue::String("c1".into()))
        );
        assert_eq!(sent.get("read"), Some(&FieldValue::Boolean(false)));

        let messages = store.list(catalog::MESSAGES).await.unwrap();
        assert_eq!(messages.len(), 1);

        let conversation = store.get(catalog::CONVERSATIONS, "c1").await.unwrap().unwrap();
        assert_eq!(conversation.get("lastMessageAt"), sent.get("sentAt"));
    }

    #[tokio::test]
    async fn test_send_requires_conversation_id() {
        let store = InMemoryStore::new();
        assert!(store.send("", Record::new()).await.is_err());
    }
}
