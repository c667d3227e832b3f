//! Read upload workbooks into header-keyed rows
//!
//! Uploads use the first sheet only; row 1 is the header.

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::collections::HashMap;
use std::path::Path;

use crate::record::FieldValue;

/// One raw sheet row, keyed by header
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based row number in the sheet, for log messages
    pub row_number: u32,
    pub cells: HashMap<String, FieldValue>,
}

/// First sheet of an upload workbook
#[derive(Debug, Clone)]
pub struct UploadSheet {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Convert an Excel cell to a field value
fn cell_to_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Null,
        Data::String(s) if s.is_empty() => FieldValue::Null,
        Data::String(s) => FieldValue::Text(s.clone()),
        Data::Int(i) => FieldValue::Int(*i),
        Data::Float(f) => {
            // Spreadsheets hand whole numbers back as floats
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                FieldValue::Int(*f as i64)
            } else {
                FieldValue::Float(*f)
            }
        }
        Data::Bool(b) => FieldValue::Bool(*b),
        Data::DateTime(dt) => FieldValue::Text(format!("{}", dt)),
        Data::DateTimeIso(s) => FieldValue::Text(s.clone()),
        Data::DurationIso(s) => FieldValue::Text(s.clone()),
        Data::Error(_) => FieldValue::Null,
    }
}

/// Read the first sheet of an upload workbook
pub fn read_upload_sheet<P: AsRef<Path>>(path: P) -> Result<UploadSheet> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("Workbook has no sheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows_iter = range.rows();

    // First row is the header
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row
            .iter()
            .map(|c| match c {
                Data::String(s) => s.trim().to_string(),
                other => cell_to_value(other).canonical(),
            })
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        let mut cells = HashMap::new();
        for (col, cell) in row.iter().enumerate() {
            let header = match headers.get(col) {
                Some(h) if !h.is_empty() => h,
                _ => continue,
            };
            let value = cell_to_value(cell);
            if value.is_null() {
                continue;
            }
            cells.insert(header.clone(), value);
        }

        // Trailing blank lines are not rows
        if cells.is_empty() {
            continue;
        }

        rows.push(RawRow {
            // +2: 1-based, plus the header row
            row_number: idx as u32 + 2,
            cells,
        });
    }

    Ok(UploadSheet {
        sheet_name,
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_value_coercions() {
        assert_eq!(cell_to_value(&Data::Empty), FieldValue::Null);
        assert_eq!(cell_to_value(&Data::String(String::new())), FieldValue::Null);
        assert_eq!(
            cell_to_value(&Data::String("x".to_string())),
            FieldValue::Text("x".to_string())
        );
        assert_eq!(cell_to_value(&Data::Float(3.0)), FieldValue::Int(3));
        assert_eq!(cell_to_value(&Data::Float(3.5)), FieldValue::Float(3.5));
        assert_eq!(cell_to_value(&Data::Int(7)), FieldValue::Int(7));
        assert_eq!(cell_to_value(&Data::Bool(true)), FieldValue::Bool(true));
    }
}
