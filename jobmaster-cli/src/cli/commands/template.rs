//! Template command: write an empty upload sheet

use anyhow::Result;

use crate::excel::write_template_excel;

use super::lookup_record_type;

pub fn handle_template(record_type: &str, out: &str) -> Result<()> {
    let schema = lookup_record_type(record_type)?;
    write_template_excel(schema, out)?;
    println!("Template for {} written to {}", schema.name, out);
    Ok(())
}
