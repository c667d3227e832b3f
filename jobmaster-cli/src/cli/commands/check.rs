//! Check command: read-only conflict preview

use std::path::PathBuf;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::reconcile::{UploadedFile, run_check};
use crate::store::SqliteStore;

use super::lookup_record_type;

pub async fn handle_check(
    pool: SqlitePool,
    record_type: &str,
    file: PathBuf,
    json: bool,
) -> Result<()> {
    let schema = lookup_record_type(record_type)?;
    let store = SqliteStore::open(pool, schema).await?;

    let report = run_check(&store, UploadedFile::keep(file)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.has_conflict {
        println!("No conflicts: the upload matches the stored records");
        return Ok(());
    }

    println!("{} conflicting record(s):", report.total_conflicts);
    for conflict in &report.conflicts {
        println!("  {} {}", schema.key_field, conflict.job_id);
        println!("    stored:   {}", conflict.existing);
        println!("    incoming: {}", conflict.incoming);
    }

    Ok(())
}
