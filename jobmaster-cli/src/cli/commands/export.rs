//! Export command: dump stored records to a spreadsheet

use anyhow::Result;
use sqlx::SqlitePool;

use crate::excel::write_records_excel;
use crate::store::{RecordStore, SqliteStore};

use super::lookup_record_type;

pub async fn handle_export(pool: SqlitePool, record_type: &str, out: &str) -> Result<()> {
    let schema = lookup_record_type(record_type)?;
    let store = SqliteStore::open(pool, schema).await?;

    let records = store.list_all().await?;
    write_records_excel(schema, &records, out)?;
    println!("{} {} record(s) written to {}", records.len(), schema.name, out);

    Ok(())
}
