//! Reconciliation planning: classify upload rows against stored records

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::{RecordKey, StoredRecord};
use crate::schema::RecordSchema;

use super::row::{ParsedRows, Row};

/// Mutation policy selected per upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Merge: insert new keys, update changed rows, leave the rest alone
    Update,
    /// Full replace: delete everything stored, insert every valid row
    Overwrite,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Update => write!(f, "update"),
            Mode::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// The computed mutation plan for one upload.
///
/// In update mode every valid row lands in exactly one of to_insert,
/// to_update or unchanged.
#[derive(Debug, Clone)]
pub struct ReconciliationPlan {
    pub mode: Mode,
    /// Keys absent from the store (every row, in overwrite mode)
    pub to_insert: Vec<Row>,
    /// Keys present with differing field values
    pub to_update: Vec<Row>,
    /// Keys present and field-wise identical; no mutation emitted
    pub unchanged: Vec<Row>,
    /// Overwrite mode: clear the whole table before inserting
    pub delete_all: bool,
    /// Rows dropped during validation
    pub skipped: u32,
}

impl ReconciliationPlan {
    pub fn valid_rows(&self) -> usize {
        self.to_insert.len() + self.to_update.len() + self.unchanged.len()
    }
}

/// Classify every valid row against the existing-records snapshot.
///
/// Pure: no storage calls, cannot fail. Duplicate keys in the upload resolve
/// last-occurrence-wins; the later row replaces the earlier one before
/// classification.
pub fn reconcile(
    parsed: &ParsedRows,
    existing: &HashMap<RecordKey, StoredRecord>,
    mode: Mode,
    schema: &RecordSchema,
) -> ReconciliationPlan {
    let rows = dedup_last_wins(&parsed.rows);
    let mut plan = ReconciliationPlan {
        mode,
        to_insert: Vec::new(),
        to_update: Vec::new(),
        unchanged: Vec::new(),
        delete_all: false,
        skipped: parsed.skipped,
    };

    match mode {
        Mode::Overwrite => {
            plan.delete_all = true;
            plan.to_insert = rows;
        }
        Mode::Update => {
            for row in rows {
                match existing.get(&row.key) {
                    None => plan.to_insert.push(row),
                    Some(stored) if row.fields.differs_from(&stored.fields, schema) => {
                        plan.to_update.push(row)
                    }
                    Some(_) => plan.unchanged.push(row),
                }
            }
        }
    }

    plan
}

/// Collapse duplicate keys, keeping the last occurrence in first-seen position
fn dedup_last_wins(rows: &[Row]) -> Vec<Row> {
    let mut index: HashMap<RecordKey, usize> = HashMap::new();
    let mut out: Vec<Row> = Vec::with_capacity(rows.len());
    for row in rows {
        match index.get(&row.key) {
            Some(&i) => out[i] = row.clone(),
            None => {
                index.insert(row.key, out.len());
                out.push(row.clone());
            }
        }
    }
    out
}
