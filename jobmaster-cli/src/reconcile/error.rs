//! Error taxonomy for the upload pipeline
//!
//! These are the caller-visible failure kinds reported before any store
//! mutation. Row-level defects are not errors; they are skipped and counted.

use std::fmt;

#[derive(Debug)]
pub enum ImportError {
    /// No upload file at the given path
    FileMissing(String),
    /// The workbook could not be parsed
    Workbook { path: String, source: anyhow::Error },
    /// The first sheet has no data rows
    EmptySheet(String),
    /// No row carried a usable key and all required fields
    NoValidRows,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::FileMissing(path) => write!(f, "No upload file at {}", path),
            ImportError::Workbook { path, .. } => write!(f, "Failed to read workbook {}", path),
            ImportError::EmptySheet(sheet) => write!(f, "Sheet '{}' has no data rows", sheet),
            ImportError::NoValidRows => write!(f, "Upload contains no valid rows"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Workbook { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
