//! Spreadsheet adapters: upload parsing, templates and exports

pub mod export;
pub mod reader;
pub mod template;

pub use export::write_records_excel;
pub use reader::{RawRow, UploadSheet, read_upload_sheet};
pub use template::write_template_excel;
