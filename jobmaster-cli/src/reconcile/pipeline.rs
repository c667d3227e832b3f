//! Upload pipeline: parse, load, reconcile, commit
//!
//! Each run processes one upload against one record type's store. Validation
//! failures surface before any mutation; the upload file, when temporary, is
//! removed on the success and error paths alike.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::excel;
use crate::record::{RecordKey, StoredRecord};
use crate::store::RecordStore;

use super::commit::commit_plan;
use super::conflict::{ConflictReport, detect_conflicts};
use super::error::ImportError;
use super::plan::{Mode, reconcile};
use super::row::{ParsedRows, parse_rows};

/// An upload file scoped to one pipeline run
#[derive(Debug)]
pub struct UploadedFile {
    path: PathBuf,
    remove_on_drop: bool,
}

impl UploadedFile {
    /// A temporary upload, removed when the run finishes
    pub fn temp(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remove_on_drop: true,
        }
    }

    /// A caller-owned file, left in place
    pub fn keep(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remove_on_drop: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadedFile {
    fn drop(&mut self) {
        if self.remove_on_drop {
            if let Err(err) = std::fs::remove_file(&self.path) {
                log::warn!(
                    "Failed to remove upload file {}: {}",
                    self.path.display(),
                    err
                );
            }
        }
    }
}

/// Result object returned to the upload caller
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub message: String,
    pub mode: Mode,
    pub inserted: u64,
    pub updated: u64,
    pub deleted: u64,
    pub skipped: u32,
    pub failed: u64,
}

/// Parse and validate the upload, then bulk-load the stored records it references
async fn load_snapshot(
    store: &dyn RecordStore,
    upload: &UploadedFile,
) -> Result<(ParsedRows, HashMap<RecordKey, StoredRecord>)> {
    let path = upload.path();
    if !path.is_file() {
        return Err(ImportError::FileMissing(path.display().to_string()).into());
    }

    let sheet = excel::read_upload_sheet(path).map_err(|source| ImportError::Workbook {
        path: path.display().to_string(),
        source,
    })?;
    if sheet.rows.is_empty() {
        return Err(ImportError::EmptySheet(sheet.sheet_name).into());
    }

    let parsed = parse_rows(&sheet, store.schema());
    if parsed.rows.is_empty() {
        return Err(ImportError::NoValidRows.into());
    }

    // One bulk lookup for the whole snapshot, not one per row
    let keys = parsed.distinct_keys();
    let records = store.find_by_keys(&keys).await?;
    let existing = records.into_iter().map(|r| (r.key, r)).collect();

    Ok((parsed, existing))
}

/// Full import: parse, load, reconcile, commit
pub async fn run_import(
    store: &dyn RecordStore,
    upload: UploadedFile,
    mode: Mode,
) -> Result<ImportSummary> {
    let schema = store.schema();
    let (parsed, existing) = load_snapshot(store, &upload).await?;

    let plan = reconcile(&parsed, &existing, mode, schema);
    log::info!(
        "{}: {} valid rows ({} to insert, {} to update, {} unchanged), {} skipped",
        schema.name,
        plan.valid_rows(),
        plan.to_insert.len(),
        plan.to_update.len(),
        plan.unchanged.len(),
        plan.skipped
    );

    let outcome = commit_plan(store, &plan).await?;

    Ok(ImportSummary {
        message: format!("Upload processed in {} mode", mode),
        mode,
        inserted: outcome.inserted,
        updated: outcome.updated,
        deleted: outcome.deleted,
        skipped: plan.skipped,
        failed: outcome.failed,
    })
}

/// Read-only preview: the same diff as update mode, no mutation
pub async fn run_check(store: &dyn RecordStore, upload: UploadedFile) -> Result<ConflictReport> {
    let (parsed, existing) = load_snapshot(store, &upload).await?;
    Ok(detect_conflicts(&parsed, &existing, store.schema()))
}
