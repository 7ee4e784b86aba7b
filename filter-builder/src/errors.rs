/// Errors raised while loading or consulting a field schema
#[derive(Debug)]
pub enum SchemaError {
    InvalidDocument(serde_json::Error),
    UnknownFieldType(String, String),
    UnknownField(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::InvalidDocument(err)
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::InvalidDocument(err) => write!(f, "Invalid schema document: {}", err),
            SchemaError::UnknownFieldType(field, field_type) => {
                write!(f, "Unexpected type {:?} for field {}", field_type, field)
            }
            SchemaError::UnknownField(field) => write!(f, "Field not in schema: {}", field),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Contract violations hit while building filters from a rule tree.
///
/// Incomplete rules are not errors; they are dropped from the output.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    UnknownField(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnknownField(field) => {
                write!(f, "Rule references a field missing from the schema: {}", field)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// A filter document that cannot be represented as a filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterFormatError {
    NotAnObject(String),
    KeyCount(usize),
    InvalidBody(String, String),
}

impl std::fmt::Display for FilterFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterFormatError::NotAnObject(found) => {
                write!(f, "Expected a filter object, found {}", found)
            }
            FilterFormatError::KeyCount(count) => {
                write!(f, "Expected exactly one filter key, found {}", count)
            }
            FilterFormatError::InvalidBody(key, reason) => {
                write!(f, "Invalid body for filter {:?}: {}", key, reason)
            }
        }
    }
}

impl std::error::Error for FilterFormatError {}
