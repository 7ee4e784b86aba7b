use crate::errors::SchemaError;
use crate::operator::Operator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Field types understood by the converter. Each one fixes the set of
/// operators a rule on that field may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Term,
    Boolean,
    Number,
    Date,
    Multi,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Term,
        FieldType::Boolean,
        FieldType::Number,
        FieldType::Date,
        FieldType::Multi,
    ];

    /// Operators a rule on a field of this type may use, in display order
    pub fn operators(&self) -> &'static [Operator] {
        use Operator::*;
        match self {
            FieldType::Term => &[Exists, NotExists, Equals, NotEquals, Prefix, Contains],
            FieldType::Boolean => &[Exists, NotExists, Equals],
            FieldType::Number => &[Exists, NotExists, Equals, NotEquals, Gt, Gte, Lt, Lte],
            FieldType::Date => &[Exists, NotExists, Equals, Gt, Gte, Lt, Lte, Last, Next],
            FieldType::Multi => &[Exists, NotExists, Equals, NotEquals],
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Term => write!(f, "term"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Number => write!(f, "number"),
            FieldType::Date => write!(f, "date"),
            FieldType::Multi => write!(f, "multi"),
        }
    }
}

impl FromStr for FieldType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "term" => Ok(FieldType::Term),
            "boolean" => Ok(FieldType::Boolean),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            "multi" => Ok(FieldType::Multi),
            _ => Err(()),
        }
    }
}

/// One selectable value offered for a field. Hosts may pass bare scalars or
/// `{value, label}` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Labeled { value: Value, label: String },
    Plain(Value),
}

impl Choice {
    pub fn value(&self) -> &Value {
        match self {
            Choice::Labeled { value, .. } => value,
            Choice::Plain(value) => value,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Choice::Labeled { label, .. } => label.clone(),
            Choice::Plain(Value::String(s)) => s.clone(),
            Choice::Plain(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
}

impl FieldSpec {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            minimum: None,
            maximum: None,
            choices: None,
        }
    }

    pub fn with_bounds(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = Some(choices);
        self
    }
}

/// Field registry supplied by the host, keyed by field name in the order
/// the host declared the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: IndexMap<String, FieldSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Loads a schema from an already-decoded document.
    ///
    /// Field types are checked before the rest of the document so that an
    /// unexpected type is reported by name rather than as a generic decoding
    /// failure.
    pub fn from_json_value(value: Value) -> Result<Self, SchemaError> {
        if let Value::Object(entries) = &value {
            for (name, spec) in entries {
                if let Some(type_name) = spec.get("type").and_then(Value::as_str) {
                    if FieldType::from_str(type_name).is_err() {
                        return Err(SchemaError::UnknownFieldType(
                            name.clone(),
                            type_name.to_string(),
                        ));
                    }
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.get(field)
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.get(field).map(|spec| spec.field_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSpec)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
