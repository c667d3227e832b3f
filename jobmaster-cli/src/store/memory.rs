//! In-memory record store for the engine tests
//!
//! Behavioral twin of SqliteStore: values canonicalize to text on the way in,
//! duplicate keys are rejected.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::record::{FieldSet, FieldValue, RecordKey, StoredRecord};
use crate::schema::RecordSchema;

use super::RecordStore;

pub struct MemoryStore {
    schema: &'static RecordSchema,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    records: HashMap<RecordKey, StoredRecord>,
}

impl MemoryStore {
    pub fn new(schema: &'static RecordSchema) -> Self {
        Self {
            schema,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn stored_fields(&self, fields: &FieldSet) -> FieldSet {
        let mut stored = FieldSet::new();
        for field in self.schema.fields {
            match fields.get(field.name) {
                Some(v) if !v.is_null() => stored.set(field.name, FieldValue::Text(v.canonical())),
                _ => stored.set(field.name, FieldValue::Null),
            }
        }
        stored
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn schema(&self) -> &RecordSchema {
        self.schema
    }

    async fn find_by_keys(&self, keys: &[RecordKey]) -> Result<Vec<StoredRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<StoredRecord> = keys
            .iter()
            .filter_map(|k| inner.records.get(k).cloned())
            .collect();
        records.sort_by_key(|r| r.key);
        records.dedup_by_key(|r| r.key);
        Ok(records)
    }

    async fn insert(&self, key: RecordKey, fields: &FieldSet) -> Result<StoredRecord> {
        let mut inner = self.inner.lock().unwrap();
        if inner.records.contains_key(&key) {
            bail!("UNIQUE constraint violated: {} {}", self.schema.name, key);
        }
        inner.next_id += 1;
        let record = StoredRecord {
            id: inner.next_id,
            key,
            fields: self.stored_fields(fields),
            status: self.schema.has_status.then(|| "Active".to_string()),
        };
        inner.records.insert(key, record.clone());
        Ok(record)
    }

    async fn update_by_key(
        &self,
        key: RecordKey,
        fields: &FieldSet,
    ) -> Result<Option<StoredRecord>> {
        let stored = self.stored_fields(fields);
        let mut inner = self.inner.lock().unwrap();
        match inner.records.get_mut(&key) {
            Some(record) => {
                record.fields = stored;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        let n = inner.records.len() as u64;
        inner.records.clear();
        Ok(n)
    }

    async fn delete_by_keys(&self, keys: &[RecordKey]) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        let mut deleted = 0;
        for key in keys {
            if inner.records.remove(key).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.lock().unwrap().records.len() as u64)
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<StoredRecord> = inner.records.values().cloned().collect();
        records.sort_by_key(|r| r.key);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::find_record_type;

    fn description_fields(nama: &str, deskripsi: &str) -> FieldSet {
        FieldSet::from_pairs([
            ("nama_job", FieldValue::Text(nama.to_string())),
            ("deskripsi", FieldValue::Text(deskripsi.to_string())),
        ])
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let store = MemoryStore::new(find_record_type("mission_statement").unwrap());

        store.insert(1, &description_fields("A", "x")).await.unwrap();
        store.insert(2, &description_fields("B", "y")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        let found = store.find_by_keys(&[1]).await.unwrap();
        assert_eq!(found.len(), 1);

        store
            .update_by_key(1, &description_fields("A", "z"))
            .await
            .unwrap()
            .unwrap();
        let found = store.find_by_keys(&[1]).await.unwrap();
        assert_eq!(found[0].fields.canonical_of("deskripsi"), "z");

        assert_eq!(store.delete_by_keys(&[1, 99]).await.unwrap(), 1);
        assert_eq!(store.delete_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = MemoryStore::new(find_record_type("mission_statement").unwrap());
        store.insert(1, &description_fields("A", "x")).await.unwrap();
        assert!(store.insert(1, &description_fields("B", "y")).await.is_err());
    }

    #[tokio::test]
    async fn test_canonicalizes_like_sqlite() {
        let store = MemoryStore::new(find_record_type("mission_statement").unwrap());
        let fields = FieldSet::from_pairs([
            ("nama_job", FieldValue::Text("  A  ".to_string())),
            ("deskripsi", FieldValue::Int(7)),
        ]);
        let record = store.insert(1, &fields).await.unwrap();
        assert_eq!(record.fields.get("nama_job"), Some(&FieldValue::Text("A".to_string())));
        assert_eq!(record.fields.get("deskripsi"), Some(&FieldValue::Text("7".to_string())));
    }
}
