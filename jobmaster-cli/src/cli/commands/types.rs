//! Types command: list the record-type registry

use crate::schema::RECORD_TYPES;

pub fn handle_types() {
    for schema in RECORD_TYPES {
        let fields: Vec<&str> = schema.fields.iter().map(|f| f.name).collect();
        println!("{}", schema.name);
        println!("  key:    {}", schema.key_field);
        println!("  fields: {}", fields.join(", "));
        if schema.has_status {
            println!("  status: Active/Non-Active");
        }
    }
}
