//! Service trait for the dashboard data store

use crate::core::entity::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Named collections of records plus the writes screens perform on them.
///
/// Views only ever read from a store; writes happen in response to user
/// actions after a view has been rendered. The crate is agnostic to where
/// the records live.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// List a collection in its stored order
    async fn list(&self, collection: &str) -> Result<Vec<Record>>;

    /// Get a record by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>>;

    /// Create or replace a record, returning it as stored
    async fn save(&self, collection: &str, record: Record) -> Result<Record>;

    /// Delete a record
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Flag a notification or message as read
    async fn mark_read(&self, collection: &str, id: &str) -> Result<Record>;

    /// Post a message to a conversation
    async fn send(&self, conversation_id: &str, message: Record) -> Result<Record>;
}
