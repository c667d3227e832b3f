//! Record-type descriptors and the built-in registry
//!
//! Every record type runs through the same reconciliation engine; a
//! RecordSchema tells the generic code which column carries the business key,
//! which fields make up a record, and which storage table holds it.

/// One field of a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Rows missing a required field are skipped during parsing
    pub required: bool,
}

/// Descriptor for one category of job master data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Registry name, as given on the command line
    pub name: &'static str,
    /// Storage table
    pub table: &'static str,
    /// Column carrying the business key
    pub key_field: &'static str,
    /// Record fields, in sheet column order
    pub fields: &'static [FieldSpec],
    /// Whether records carry an Active/Non-Active soft-delete marker
    pub has_status: bool,
}

impl RecordSchema {
    /// Upload sheet header: key column followed by the record fields
    pub fn header_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(1 + self.fields.len());
        columns.push(self.key_field);
        columns.extend(self.fields.iter().map(|f| f.name));
        columns
    }
}

const fn field(name: &'static str) -> FieldSpec {
    FieldSpec { name, required: true }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec { name, required: false }
}

/// Shared field list for the description-style record types
const DESCRIPTION_FIELDS: &[FieldSpec] = &[field("nama_job"), field("deskripsi")];

/// All record types served by the engine
pub const RECORD_TYPES: &[RecordSchema] = &[
    RecordSchema {
        name: "job_creation",
        table: "job_creation",
        key_field: "job_id",
        fields: &[
            field("nama_job"),
            field("job_prefix"),
            field("company_code"),
            field("band"),
            optional("flag_mgr"),
        ],
        has_status: true,
    },
    RecordSchema {
        name: "job_mapping",
        table: "job_mapping",
        key_field: "job_id",
        fields: &[
            field("nama_job"),
            field("company_code"),
            field("unit_code"),
            field("band"),
        ],
        has_status: true,
    },
    RecordSchema {
        name: "mission_statement",
        table: "mission_statement",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "job_responsibility",
        table: "job_responsibility",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "job_authority",
        table: "job_authority",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "job_specification",
        table: "job_specification",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "education_requirement",
        table: "education_requirement",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "experience_requirement",
        table: "experience_requirement",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
    RecordSchema {
        name: "competency_requirement",
        table: "competency_requirement",
        key_field: "job_id",
        fields: DESCRIPTION_FIELDS,
        has_status: false,
    },
];

/// Look up a record type by registry name
pub fn find_record_type(name: &str) -> Option<&'static RecordSchema> {
    RECORD_TYPES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_record_type() {
        assert!(find_record_type("job_creation").is_some());
        assert!(find_record_type("mission_statement").is_some());
        assert!(find_record_type("nonexistent").is_none());
    }

    #[test]
    fn test_header_columns_lead_with_key() {
        let schema = find_record_type("mission_statement").unwrap();
        assert_eq!(schema.header_columns(), vec!["job_id", "nama_job", "deskripsi"]);
    }

    #[test]
    fn test_tables_are_unique() {
        let mut tables: Vec<_> = RECORD_TYPES.iter().map(|s| s.table).collect();
        tables.sort();
        tables.dedup();
        assert_eq!(tables.len(), RECORD_TYPES.len());
    }
}
