//! Command handlers

mod check;
mod export;
mod import;
mod template;
mod types;

pub use check::handle_check;
pub use export::handle_export;
pub use import::handle_import;
pub use template::handle_template;
pub use types::handle_types;

use anyhow::{Result, bail};

use crate::schema::{RecordSchema, find_record_type};

fn lookup_record_type(name: &str) -> Result<&'static RecordSchema> {
    match find_record_type(name) {
        Some(schema) => Ok(schema),
        None => bail!(
            "Unknown record type '{}'; run `jobmaster-cli types` to list them",
            name
        ),
    }
}
