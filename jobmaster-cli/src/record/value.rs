//! Cell value representation for uploaded and stored records

/// A single cell value, as parsed from a spreadsheet or loaded from storage
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Empty cell
    Null,
    /// Text value
    Text(String),
    /// Whole number
    Int(i64),
    /// Floating point
    Float(f64),
    /// Boolean cell
    Bool(bool),
}

impl FieldValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// True when the cell carries no usable content (null or whitespace-only text)
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Coerce to a business key.
    ///
    /// Spreadsheet libraries hand numeric cells back as floats as often as
    /// ints, and a key typed into a text cell is still a key. Accepts integer
    /// cells, integral floats and numeric text; anything else is None.
    pub fn as_key(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(*f as i64)
            }
            FieldValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Canonical text form used for field comparison and TEXT-column storage.
    ///
    /// Stored values round-trip through TEXT columns while upload cells arrive
    /// typed, so equality is defined on this form: text is trimmed, integral
    /// floats render without a fractional part. `1` stored equals `1.0` parsed.
    pub fn canonical(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                (*f as i64).to_string()
            }
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Convert to a plain JSON value for result objects
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::json!(*i),
            FieldValue::Float(f) => serde_json::json!(*f),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, ""),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
