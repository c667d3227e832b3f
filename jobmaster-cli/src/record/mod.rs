//! Record model: business keys, cell values and field sets

mod value;

pub use value::FieldValue;

use std::collections::HashMap;

use crate::schema::RecordSchema;

/// Business identifier distinguishing records within a record type.
/// Independent of the storage surrogate id.
pub type RecordKey = i64;

/// Field name -> value mapping for one record.
///
/// Field order comes from the record type's schema, not from the map; every
/// FieldSet of the same record type has an identical field schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    values: HashMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, value) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.set(name, value);
        }
        set
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Canonical form of one field; missing fields canonicalize to empty
    pub fn canonical_of(&self, name: &str) -> String {
        self.get(name).map(FieldValue::canonical).unwrap_or_default()
    }

    /// Field-by-field comparison on canonical forms over the schema's fields.
    ///
    /// Both the reconciler and the conflict detector go through here, so a
    /// row counts as a conflict exactly when it would classify as an update.
    pub fn differs_from(&self, other: &FieldSet, schema: &RecordSchema) -> bool {
        schema
            .fields
            .iter()
            .any(|f| self.canonical_of(f.name) != other.canonical_of(f.name))
    }

    /// JSON object with the schema's fields, in schema order
    pub fn to_json(&self, schema: &RecordSchema) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for field in schema.fields {
            let value = self
                .get(field.name)
                .map(FieldValue::to_json)
                .unwrap_or(serde_json::Value::Null);
            obj.insert(field.name.to_string(), value);
        }
        serde_json::Value::Object(obj)
    }
}

/// A record as held in the store: surrogate id, business key, field values
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Storage surrogate id
    pub id: i64,
    /// Business key
    pub key: RecordKey,
    pub fields: FieldSet,
    /// Soft-delete marker, for record types that carry one
    pub status: Option<String>,
}
