//! SQLite-backed record store
//!
//! One table per record type, created on demand from its schema descriptor.
//! Field columns are TEXT; values canonicalize on the way in so stored and
//! uploaded cells compare on the same form.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::record::{FieldSet, FieldValue, RecordKey, StoredRecord};
use crate::schema::RecordSchema;

use super::RecordStore;

/// Bind-variable budget per statement (SQLite's default limit is 999)
const MAX_BIND_VARS: usize = 900;

pub struct SqliteStore {
    pool: SqlitePool,
    schema: &'static RecordSchema,
}

impl SqliteStore {
    /// Open a store for one record type, creating its table when missing
    pub async fn open(pool: SqlitePool, schema: &'static RecordSchema) -> Result<Self> {
        let store = Self { pool, schema };
        store.ensure_table().await?;
        Ok(store)
    }

    async fn ensure_table(&self) -> Result<()> {
        let mut columns = vec![
            "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            format!("{} INTEGER NOT NULL UNIQUE", self.schema.key_field),
        ];
        for field in self.schema.fields {
            columns.push(format!("{} TEXT", field.name));
        }
        if self.schema.has_status {
            columns.push("status TEXT NOT NULL DEFAULT 'Active'".to_string());
        }
        columns.push("created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
        columns.push("updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.schema.table,
            columns.join(", ")
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create table {}", self.schema.table))?;
        Ok(())
    }

    fn select_columns(&self) -> String {
        let mut cols = vec!["id".to_string(), self.schema.key_field.to_string()];
        cols.extend(self.schema.fields.iter().map(|f| f.name.to_string()));
        if self.schema.has_status {
            cols.push("status".to_string());
        }
        cols.join(", ")
    }

    fn record_from_row(&self, row: &sqlx::sqlite::SqliteRow) -> Result<StoredRecord> {
        let mut fields = FieldSet::new();
        for field in self.schema.fields {
            let value: Option<String> = row.try_get(field.name)?;
            match value {
                Some(s) => fields.set(field.name, FieldValue::Text(s)),
                None => fields.set(field.name, FieldValue::Null),
            }
        }
        let status = if self.schema.has_status {
            row.try_get("status")?
        } else {
            None
        };
        Ok(StoredRecord {
            id: row.try_get("id")?,
            key: row.try_get(self.schema.key_field)?,
            fields,
            status,
        })
    }

    /// Field values as they will read back from TEXT columns
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

    async fn find_one(&self, key: RecordKey) -> Result<Option<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.select_columns(),
            self.schema.table,
            self.schema.key_field
        );
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to look up {} record {}", self.schema.name, key))?;
        row.map(|r| self.record_from_row(&r)).transpose()
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn schema(&self) -> &RecordSchema {
        self.schema
    }

    async fn find_by_keys(&self, keys: &[RecordKey]) -> Result<Vec<StoredRecord>> {
        let mut records = Vec::new();
        for chunk in keys.chunks(MAX_BIND_VARS) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT {} FROM {} WHERE {} IN ({})",
                self.select_columns(),
                self.schema.table,
                self.schema.key_field,
                placeholders
            );
            let mut query = sqlx::query(&sql);
            for key in chunk {
                query = query.bind(*key);
            }
            let rows = query
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("Failed to look up {} records", self.schema.name))?;
            for row in &rows {
                records.push(self.record_from_row(row)?);
            }
        }
        Ok(records)
    }

    async fn insert(&self, key: RecordKey, fields: &FieldSet) -> Result<StoredRecord> {
        let mut columns = vec![self.schema.key_field.to_string()];
        columns.extend(self.schema.fields.iter().map(|f| f.name.to_string()));
        if self.schema.has_status {
            columns.push("status".to_string());
        }
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.schema.table,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(key);
        for field in self.schema.fields {
            let value = fields.get(field.name).filter(|v| !v.is_null());
            query = query.bind(value.map(FieldValue::canonical));
        }
        if self.schema.has_status {
            query = query.bind("Active");
        }

        let result = query
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to insert {} record {}", self.schema.name, key))?;

        Ok(StoredRecord {
            id: result.last_insert_rowid(),
            key,
            fields: self.stored_fields(fields),
            status: self.schema.has_status.then(|| "Active".to_string()),
        })
    }

    async fn update_by_key(
        &self,
        key: RecordKey,
        fields: &FieldSet,
    ) -> Result<Option<StoredRecord>> {
        let assignments: Vec<String> = self
            .schema
            .fields
            .iter()
            .map(|f| format!("{} = ?", f.name))
            .chain(std::iter::once(
                "updated_at = CURRENT_TIMESTAMP".to_string(),
            ))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.schema.table,
            assignments.join(", "),
            self.schema.key_field
        );

        let mut query = sqlx::query(&sql);
        for field in self.schema.fields {
            let value = fields.get(field.name).filter(|v| !v.is_null());
            query = query.bind(value.map(FieldValue::canonical));
        }
        let result = query
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update {} record {}", self.schema.name, key))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_one(key).await
    }

    async fn delete_all(&self) -> Result<u64> {
        let sql = format!("DELETE FROM {}", self.schema.table);
        let result = sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to clear table {}", self.schema.table))?;
        Ok(result.rows_affected())
    }

    async fn delete_by_keys(&self, keys: &[RecordKey]) -> Result<u64> {
        let mut deleted = 0;
        for chunk in keys.chunks(MAX_BIND_VARS) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "DELETE FROM {} WHERE {} IN ({})",
                self.schema.table, self.schema.key_field, placeholders
            );
            let mut query = sqlx::query(&sql);
            for key in chunk {
                query = query.bind(*key);
            }
            let result = query
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to delete {} records", self.schema.name))?;
            deleted += result.rows_affected();
        }
        Ok(deleted)
    }

    async fn count(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", self.schema.table);
        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count {} records", self.schema.name))?;
        let n: i64 = row.try_get("n")?;
        Ok(n as u64)
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.select_columns(),
            self.schema.table,
            self.schema.key_field
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list {} records", self.schema.name))?;
        rows.iter().map(|r| self.record_from_row(r)).collect()
    }
}
