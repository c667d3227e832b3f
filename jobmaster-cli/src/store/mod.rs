//! Record storage seam
//!
//! The reconciliation engine talks to storage through the RecordStore trait,
//! bound to one record type. SqliteStore is the production implementation;
//! MemoryStore backs the engine tests.

#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::record::{FieldSet, RecordKey, StoredRecord};
use crate::schema::RecordSchema;

/// Transactional key-lookup/upsert service for one record type
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The record type this store is bound to
    fn schema(&self) -> &RecordSchema;

    /// Bulk lookup. Round trips are bounded regardless of key count; callers
    /// fetch the whole snapshot once instead of one lookup per row.
    async fn find_by_keys(&self, keys: &[RecordKey]) -> Result<Vec<StoredRecord>>;

    /// Create a record with a generated surrogate id
    async fn insert(&self, key: RecordKey, fields: &FieldSet) -> Result<StoredRecord>;

    /// Update the record carrying the key. Returns None when no record does.
    async fn update_by_key(&self, key: RecordKey, fields: &FieldSet)
    -> Result<Option<StoredRecord>>;

    /// Delete every record of this type, returning the count removed
    async fn delete_all(&self) -> Result<u64>;

    /// Delete the records carrying the given keys, returning the count removed
    async fn delete_by_keys(&self, keys: &[RecordKey]) -> Result<u64>;

    async fn count(&self) -> Result<u64>;

    /// All records of this type, ordered by business key
    async fn list_all(&self) -> Result<Vec<StoredRecord>>;
}
