//! Export stored records to a spreadsheet

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::record::StoredRecord;
use crate::schema::RecordSchema;

/// Write stored records of one type to an Excel file, one row per record
pub fn write_records_excel(
    schema: &RecordSchema,
    records: &[StoredRecord],
    path: &str,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(schema.name)?;
    for (col, header) in schema.header_columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_number(row, 0, record.key as f64)?;
        for (col, field) in schema.fields.iter().enumerate() {
            let text = record.fields.canonical_of(field.name);
            if text.is_empty() {
                continue;
            }
            worksheet.write_string(row, col as u16 + 1, &text)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path))?;

    Ok(())
}
