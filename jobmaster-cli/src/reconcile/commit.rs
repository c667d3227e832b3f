//! Apply a reconciliation plan to a record store
//!
//! The bulk delete runs before any insert or update. Row-level store calls
//! are independent: a failure on one row is logged and counted, and the
//! remaining rows still commit.

use anyhow::Result;
use serde::Serialize;

use crate::store::RecordStore;

use super::plan::ReconciliationPlan;

/// Counts returned after applying a plan
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CommitOutcome {
    pub inserted: u64,
    pub updated: u64,
    pub deleted: u64,
    /// Rows whose store call failed; the batch continued past them
    pub failed: u64,
}

/// Execute a plan against the store
pub async fn commit_plan(
    store: &dyn RecordStore,
    plan: &ReconciliationPlan,
) -> Result<CommitOutcome> {
    let mut outcome = CommitOutcome::default();

    // A failing bulk delete aborts the run: inserting into a half-cleared
    // table would not be a replace
    if plan.delete_all {
        outcome.deleted = store.delete_all().await?;
    }

    for row in &plan.to_insert {
        match store.insert(row.key, &row.fields).await {
            Ok(record) => {
                log::debug!(
                    "inserted {} key {} as id {}",
                    store.schema().name,
                    record.key,
                    record.id
                );
                outcome.inserted += 1;
            }
            Err(err) => {
                log::warn!(
                    "insert failed for {} key {} (row {}): {:#}",
                    store.schema().name,
                    row.key,
                    row.row_number,
                    err
                );
                outcome.failed += 1;
            }
        }
    }

    for row in &plan.to_update {
        match store.update_by_key(row.key, &row.fields).await {
            Ok(Some(_)) => outcome.updated += 1,
            Ok(None) => {
                log::warn!(
                    "update target vanished for {} key {}",
                    store.schema().name,
                    row.key
                );
                outcome.failed += 1;
            }
            Err(err) => {
                log::warn!(
                    "update failed for {} key {} (row {}): {:#}",
                    store.schema().name,
                    row.key,
                    row.row_number,
                    err
                );
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
