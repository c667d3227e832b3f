//! Bulk spreadsheet reconciliation engine
//!
//! Takes an uploaded workbook, compares it row-by-row against stored records
//! keyed by business id, and classifies each row as insert/update/unchanged
//! (or full-replace in overwrite mode). The conflict detector runs the same
//! diff read-only for previews; the commit executor applies a plan to a
//! record store.

pub mod commit;
pub mod conflict;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod row;

pub use commit::{CommitOutcome, commit_plan};
pub use conflict::{Conflict, ConflictReport, detect_conflicts};
pub use error::ImportError;
pub use pipeline::{ImportSummary, UploadedFile, run_check, run_import};
pub use plan::{Mode, ReconciliationPlan, reconcile};
pub use row::{ParsedRows, Row, parse_rows};
