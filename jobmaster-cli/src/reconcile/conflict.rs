//! Read-only conflict detection between an upload and stored records
//!
//! Runs the same diff as update-mode reconciliation but never mutates
//! storage; intended for a preview before the caller chooses a mode.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{RecordKey, StoredRecord};
use crate::schema::RecordSchema;

use super::plan::{Mode, reconcile};
use super::row::ParsedRows;

/// One row whose incoming values differ from the stored record
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub job_id: RecordKey,
    pub existing: serde_json::Value,
    #[serde(rename = "new")]
    pub incoming: serde_json::Value,
}

/// Report returned by the preview entry point
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub has_conflict: bool,
    pub total_conflicts: usize,
    pub conflicting_job_ids: Vec<RecordKey>,
    pub conflicts: Vec<Conflict>,
}

/// Compare each valid row against its stored record.
///
/// Implemented on top of reconcile() in update mode, so the conflicting-key
/// set always equals the ToUpdate set a subsequent update-mode import would
/// compute from the same input.
pub fn detect_conflicts(
    parsed: &ParsedRows,
    existing: &HashMap<RecordKey, StoredRecord>,
    schema: &RecordSchema,
) -> ConflictReport {
    let plan = reconcile(parsed, existing, Mode::Update, schema);

    let mut report = ConflictReport::default();
    for row in &plan.to_update {
        // to_update rows always have a stored counterpart
        let stored = &existing[&row.key];
        report.conflicting_job_ids.push(row.key);
        report.conflicts.push(Conflict {
            job_id: row.key,
            existing: stored.fields.to_json(schema),
            incoming: row.fields.to_json(schema),
        });
    }
    report.total_conflicts = report.conflicts.len();
    report.has_conflict = report.total_conflicts > 0;
    report
}
