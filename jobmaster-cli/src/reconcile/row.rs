//! Row parsing and validation for uploaded sheets

use std::collections::HashSet;

use crate::excel::{RawRow, UploadSheet};
use crate::record::{FieldSet, FieldValue, RecordKey};
use crate::schema::RecordSchema;

/// One validated upload row
#[derive(Debug, Clone)]
pub struct Row {
    pub key: RecordKey,
    pub fields: FieldSet,
    /// 1-based sheet row, carried for log messages
    pub row_number: u32,
}

/// Outcome of parsing an upload sheet against a schema
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub rows: Vec<Row>,
    /// Rows dropped for a missing/invalid key or a missing required field
    pub skipped: u32,
}

impl ParsedRows {
    /// Distinct keys referenced by the valid rows, in first-seen order
    pub fn distinct_keys(&self) -> Vec<RecordKey> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.key))
            .map(|r| r.key)
            .collect()
    }
}

/// Validate raw rows against a schema.
///
/// Invalid rows are skipped and counted, never an error: a sheet with some
/// bad rows still processes the good ones.
pub fn parse_rows(sheet: &UploadSheet, schema: &RecordSchema) -> ParsedRows {
    let mut parsed = ParsedRows::default();
    for raw in &sheet.rows {
        match parse_row(raw, schema) {
            Some(row) => parsed.rows.push(row),
            None => parsed.skipped += 1,
        }
    }
    parsed
}

fn parse_row(raw: &RawRow, schema: &RecordSchema) -> Option<Row> {
    // Keys are strictly positive; zero marks an unfilled template row
    let key = match raw
        .cells
        .get(schema.key_field)
        .and_then(FieldValue::as_key)
    {
        Some(k) if k > 0 => k,
        _ => {
            log::debug!(
                "row {}: missing or non-numeric {}, skipping",
                raw.row_number,
                schema.key_field
            );
            return None;
        }
    };

    let mut fields = FieldSet::new();
    for field in schema.fields {
        let value = raw.cells.get(field.name).cloned().unwrap_or(FieldValue::Null);
        if field.required && value.is_empty() {
            log::debug!(
                "row {}: missing required field '{}', skipping",
                raw.row_number,
                field.name
            );
            return None;
        }
        fields.set(field.name, value);
    }

    Some(Row {
        key,
        fields,
        row_number: raw.row_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::schema::find_record_type;

    fn sheet_of(rows: Vec<Vec<(&str, FieldValue)>>) -> UploadSheet {
        UploadSheet {
            sheet_name: "Sheet1".to_string(),
            headers: vec!["job_id".to_string(), "nama_job".to_string(), "deskripsi".to_string()],
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(i, cells)| RawRow {
                    row_number: i as u32 + 2,
                    cells: cells
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect::<HashMap<_, _>>(),
                })
                .collect(),
        }
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_valid_rows_parse() {
        let schema = find_record_type("mission_statement").unwrap();
        let sheet = sheet_of(vec![
            vec![("job_id", FieldValue::Int(1)), ("nama_job", text("A")), ("deskripsi", text("x"))],
            vec![("job_id", text("2")), ("nama_job", text("B")), ("deskripsi", text("y"))],
        ]);

        let parsed = parse_rows(&sheet, schema);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.rows[1].key, 2);
    }

    #[test]
    fn test_skip_accounting() {
        // N raw rows with K invalid: valid = N-K, skipped = K
        let schema = find_record_type("mission_statement").unwrap();
        let sheet = sheet_of(vec![
            vec![("job_id", FieldValue::Int(1)), ("nama_job", text("A")), ("deskripsi", text("x"))],
            // missing key
            vec![("nama_job", text("B")), ("deskripsi", text("y"))],
            // zero key
            vec![("job_id", FieldValue::Int(0)), ("nama_job", text("C")), ("deskripsi", text("z"))],
            // non-numeric key
            vec![("job_id", text("abc")), ("nama_job", text("D")), ("deskripsi", text("w"))],
            // missing required field
            vec![("job_id", FieldValue::Int(5)), ("nama_job", text("E"))],
            vec![("job_id", FieldValue::Int(6)), ("nama_job", text("F")), ("deskripsi", text("v"))],
        ]);

        let parsed = parse_rows(&sheet, schema);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 4);
    }

    #[test]
    fn test_whitespace_required_field_is_missing() {
        let schema = find_record_type("mission_statement").unwrap();
        let sheet = sheet_of(vec![vec![
            ("job_id", FieldValue::Int(1)),
            ("nama_job", text("A")),
            ("deskripsi", text("   ")),
        ]]);

        let parsed = parse_rows(&sheet, schema);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = find_record_type("job_creation").unwrap();
        let sheet = UploadSheet {
            sheet_name: "Sheet1".to_string(),
            headers: Vec::new(),
            rows: vec![RawRow {
                row_number: 2,
                cells: HashMap::from([
                    ("job_id".to_string(), FieldValue::Int(1)),
                    ("nama_job".to_string(), text("Engineer")),
                    ("job_prefix".to_string(), text("ENG")),
                    ("company_code".to_string(), FieldValue::Int(1001)),
                    ("band".to_string(), FieldValue::Int(4)),
                    // flag_mgr absent
                ]),
            }],
        };

        let parsed = parse_rows(&sheet, schema);
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.rows[0].fields.get("flag_mgr").unwrap().is_null());
    }

    #[test]
    fn test_distinct_keys_first_seen_order() {
        let schema = find_record_type("mission_statement").unwrap();
        let sheet = sheet_of(vec![
            vec![("job_id", FieldValue::Int(3)), ("nama_job", text("A")), ("deskripsi", text("x"))],
            vec![("job_id", FieldValue::Int(1)), ("nama_job", text("B")), ("deskripsi", text("y"))],
            vec![("job_id", FieldValue::Int(3)), ("nama_job", text("C")), ("deskripsi", text("z"))],
        ]);

        let parsed = parse_rows(&sheet, schema);
        assert_eq!(parsed.distinct_keys(), vec![3, 1]);
    }
}
