//! Filter expressions in the search backend's boolean-filter grammar.
//!
//! On the wire every node is a JSON object with a single key naming the
//! construct, e.g. `{"term": {"state": "AZ"}}` or
//! `{"not": {"filter": {...}}}`.

use crate::errors::FilterFormatError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Value", try_from = "Value")]
pub enum FilterExpr {
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Term { field: String, value: Value },
    Terms { field: String, values: Vec<Value> },
    /// Bounds keep insertion order; a two-sided range is always `gte` then `lte`.
    Range { field: String, bounds: IndexMap<String, Value> },
    Exists { field: String },
    Missing { field: String },
    Prefix { field: String, value: Value },
    Regexp { field: String, pattern: String },
    Not(Box<FilterExpr>),
    /// Construct this crate does not produce, kept as received
    Unknown { key: String, body: Value },
}

impl FilterExpr {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpr::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<Value>) -> Self {
        FilterExpr::Terms {
            field: field.into(),
            values,
        }
    }

    pub fn range<K, V>(field: impl Into<String>, bounds: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        FilterExpr::Range {
            field: field.into(),
            bounds: bounds
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn not(inner: FilterExpr) -> Self {
        FilterExpr::Not(Box::new(inner))
    }

    /// The discriminant key this node is written under
    pub fn key(&self) -> &str {
        match self {
            FilterExpr::And(_) => "and",
            FilterExpr::Or(_) => "or",
            FilterExpr::Term { .. } => "term",
            FilterExpr::Terms { .. } => "terms",
            FilterExpr::Range { .. } => "range",
            FilterExpr::Exists { .. } => "exists",
            FilterExpr::Missing { .. } => "missing",
            FilterExpr::Prefix { .. } => "prefix",
            FilterExpr::Regexp { .. } => "regexp",
            FilterExpr::Not(_) => "not",
            FilterExpr::Unknown { key, .. } => key,
        }
    }

    pub fn to_json(&self) -> Value {
        let body = match self {
            FilterExpr::And(children) | FilterExpr::Or(children) => {
                Value::Array(children.iter().map(FilterExpr::to_json).collect())
            }
            FilterExpr::Term { field, value } | FilterExpr::Prefix { field, value } => {
                single_entry(field, value.clone())
            }
            FilterExpr::Terms { field, values } => single_entry(field, Value::Array(values.clone())),
            FilterExpr::Range { field, bounds } => {
                let bounds: Map<String, Value> = bounds
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                single_entry(field, Value::Object(bounds))
            }
            FilterExpr::Exists { field } | FilterExpr::Missing { field } => {
                single_entry("field", Value::String(field.clone()))
            }
            FilterExpr::Regexp { field, pattern } => {
                single_entry(field, Value::String(pattern.clone()))
            }
            FilterExpr::Not(inner) => single_entry("filter", inner.to_json()),
            FilterExpr::Unknown { body, .. } => body.clone(),
        };
        single_entry(self.key(), body)
    }

    /// Decodes one filter node.
    ///
    /// A node with several keys is read by its first key.
    pub fn from_json(value: &Value) -> Result<Self, FilterFormatError> {
        let node = value
            .as_object()
            .ok_or_else(|| FilterFormatError::NotAnObject(json_kind(value).to_string()))?;
        let (key, body) = node
            .iter()
            .next()
            .ok_or(FilterFormatError::KeyCount(0))?;
        if node.len() > 1 {
            log::debug!(
                "Filter node has {} keys, reading it as {:?}",
                node.len(),
                key
            );
        }

        let invalid = |reason: &str| FilterFormatError::InvalidBody(key.clone(), reason.to_string());

        match key.as_str() {
            "and" | "or" => {
                let children = body
                    .as_array()
                    .ok_or_else(|| invalid("expected an array of filters"))?
                    .iter()
                    .map(FilterExpr::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(if key == "and" {
                    FilterExpr::And(children)
                } else {
                    FilterExpr::Or(children)
                })
            }
            "term" | "prefix" => {
                let (field, value) = first_entry(body).ok_or_else(|| invalid("expected {field: value}"))?;
                Ok(if key == "term" {
                    FilterExpr::Term { field, value }
                } else {
                    FilterExpr::Prefix { field, value }
                })
            }
            "terms" => {
                let (field, value) = first_entry(body).ok_or_else(|| invalid("expected {field: [values]}"))?;
                match value {
                    Value::Array(values) => Ok(FilterExpr::Terms { field, values }),
                    _ => Err(invalid("expected an array of values")),
                }
            }
            "range" => {
                let (field, value) = first_entry(body).ok_or_else(|| invalid("expected {field: {bounds}}"))?;
                match value {
                    Value::Object(bounds) => Ok(FilterExpr::Range {
                        field,
                        bounds: bounds.into_iter().collect(),
                    }),
                    _ => Err(invalid("expected an object of bounds")),
                }
            }
            "exists" | "missing" => {
                let field = body
                    .get("field")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("expected {field: name}"))?
                    .to_string();
                Ok(if key == "exists" {
                    FilterExpr::Exists { field }
                } else {
                    FilterExpr::Missing { field }
                })
            }
            "regexp" => {
                let (field, value) = first_entry(body).ok_or_else(|| invalid("expected {field: pattern}"))?;
                match value {
                    Value::String(pattern) => Ok(FilterExpr::Regexp { field, pattern }),
                    _ => Err(invalid("expected a pattern string")),
                }
            }
            "not" => {
                let inner = body
                    .get("filter")
                    .ok_or_else(|| invalid("expected {filter: ...}"))?;
                Ok(FilterExpr::not(FilterExpr::from_json(inner)?))
            }
            _ => Ok(FilterExpr::Unknown {
                key: key.clone(),
                body: body.clone(),
            }),
        }
    }
}

impl From<FilterExpr> for Value {
    fn from(expr: FilterExpr) -> Self {
        expr.to_json()
    }
}

impl TryFrom<Value> for FilterExpr {
    type Error = FilterFormatError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        FilterExpr::from_json(&value)
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// First `(key, value)` of an object body
fn first_entry(body: &Value) -> Option<(String, Value)> {
    body.as_object()?
        .iter()
        .next()
        .map(|(k, v)| (k.clone(), v.clone()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
