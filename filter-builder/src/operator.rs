use crate::schema::FieldType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Comparison or existence test applied by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Exists,
    NotExists,
    Equals,
    NotEquals,
    Prefix,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
    Last,
    Next,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Exists,
        Operator::NotExists,
        Operator::Equals,
        Operator::NotEquals,
        Operator::Prefix,
        Operator::Contains,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Last,
        Operator::Next,
    ];

    pub fn is_legal_for(&self, field_type: FieldType) -> bool {
        field_type.operators().contains(self)
    }

    /// Whether the rule editor has to ask for a value or date at all
    pub fn needs_input(&self) -> bool {
        !matches!(self, Operator::Exists | Operator::NotExists)
    }

    /// Operators that read the rule's date rather than its value on date fields
    pub fn needs_date(&self) -> bool {
        matches!(
            self,
            Operator::Equals | Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }

    /// Relative date operators, whose value is a count of days
    pub fn needs_day_count(&self) -> bool {
        matches!(self, Operator::Last | Operator::Next)
    }

    /// Range bound key this operator maps to, for the four comparisons
    pub fn range_key(&self) -> Option<&'static str> {
        match self {
            Operator::Gt => Some("gt"),
            Operator::Gte => Some("gte"),
            Operator::Lt => Some("lt"),
            Operator::Lte => Some("lte"),
            _ => None,
        }
    }

    pub fn from_range_key(key: &str) -> Option<Operator> {
        match key {
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operator::Exists => "exists",
            Operator::NotExists => "notExists",
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Prefix => "prefix",
            Operator::Contains => "contains",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Last => "last",
            Operator::Next => "next",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exists" => Ok(Operator::Exists),
            "notExists" => Ok(Operator::NotExists),
            "equals" => Ok(Operator::Equals),
            "notEquals" => Ok(Operator::NotEquals),
            "prefix" => Ok(Operator::Prefix),
            "contains" => Ok(Operator::Contains),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "last" => Ok(Operator::Last),
            "next" => Ok(Operator::Next),
            _ => Err(()),
        }
    }
}
