//! Upload template generation

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::schema::RecordSchema;

/// Write an empty upload template for a record type: header row only
pub fn write_template_excel(schema: &RecordSchema, path: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(schema.name)?;
    for (col, header) in schema.header_columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path))?;

    Ok(())
}
