//! Import command: the full upload pipeline against the SQLite store

use std::path::PathBuf;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::reconcile::{Mode, UploadedFile, run_import};
use crate::store::SqliteStore;

use super::lookup_record_type;

pub async fn handle_import(
    pool: SqlitePool,
    record_type: &str,
    file: PathBuf,
    mode: Mode,
    json: bool,
    temp: bool,
) -> Result<()> {
    let schema = lookup_record_type(record_type)?;
    let store = SqliteStore::open(pool, schema).await?;

    let upload = if temp {
        UploadedFile::temp(file)
    } else {
        UploadedFile::keep(file)
    };

    let summary = run_import(&store, upload, mode).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.message);
        println!("  inserted: {}", summary.inserted);
        println!("  updated:  {}", summary.updated);
        println!("  deleted:  {}", summary.deleted);
        println!("  skipped:  {}", summary.skipped);
        if summary.failed > 0 {
            println!("  failed:   {}", summary.failed);
        }
    }

    Ok(())
}
