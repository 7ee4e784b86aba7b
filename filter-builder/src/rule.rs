use crate::dates::to_ui_date;
use crate::errors::SchemaError;
use crate::operator::Operator;
use crate::schema::{FieldSchema, FieldType};
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Node of the rule tree edited by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleNode {
    Group(Group),
    Rule(Rule),
}

impl RuleNode {
    pub fn and(children: Vec<RuleNode>) -> Self {
        RuleNode::Group(Group::new(Combinator::And, children))
    }

    pub fn or(children: Vec<RuleNode>) -> Self {
        RuleNode::Group(Group::new(Combinator::Or, children))
    }
}

impl From<Rule> for RuleNode {
    fn from(rule: Rule) -> Self {
        RuleNode::Rule(rule)
    }
}

impl From<Group> for RuleNode {
    fn from(group: Group) -> Self {
        RuleNode::Group(group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combinator::And => write!(f, "and"),
            Combinator::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub combinator: Combinator,
    #[serde(default)]
    pub children: Vec<RuleNode>,
}

impl Group {
    pub fn new(combinator: Combinator, children: Vec<RuleNode>) -> Self {
        Self {
            combinator,
            children,
        }
    }
}

/// A single field/operator/value condition.
///
/// Every part is optional because the rule tree mirrors what the user has
/// typed so far. `value` and `date` are never both read: date fields use
/// `date` for the calendar operators and `value` for `last`/`next`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "operator_or_unset"
    )]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Rule {
    pub fn new(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: Some(field.into()),
            operator: Some(operator),
            value: None,
            date: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// A fresh rule for `field`, as the editor shows it right after the user
    /// picks the field: `equals` with an empty value of the field's type.
    pub fn seeded(field: &str, schema: &FieldSchema, today: NaiveDate) -> Result<Self, SchemaError> {
        let field_type = schema
            .field_type(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;

        let rule = Rule::new(field, Operator::Equals);
        Ok(match field_type {
            FieldType::Term | FieldType::Boolean => rule.with_value(""),
            FieldType::Number => rule.with_value(0),
            FieldType::Date => rule.with_value(0).with_date(to_ui_date(today)),
            FieldType::Multi => rule.with_value(Value::Array(Vec::new())),
        })
    }

    /// Whether this rule's operator reads `date` instead of `value`
    pub fn reads_date(&self, field_type: FieldType) -> bool {
        field_type == FieldType::Date && self.operator.is_some_and(|op| op.needs_date())
    }
}

/// A freshly added rule carries `""` as its operator; that reads as unset.
fn operator_or_unset<'de, D>(deserializer: D) -> Result<Option<Operator>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(name) if name.is_empty() => Ok(None),
        Some(name) => Operator::from_str(&name)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("unknown operator {:?}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use serde_json::json;

    fn schema() -> FieldSchema {
        FieldSchema::new()
            .with_field("name", FieldSpec::new(FieldType::Term))
            .with_field("active", FieldSpec::new(FieldType::Boolean))
            .with_field("price", FieldSpec::new(FieldType::Number))
            .with_field("created", FieldSpec::new(FieldType::Date))
            .with_field("state", FieldSpec::new(FieldType::Multi))
    }

    #[test]
    fn test_rule_node_json_shape() {
        let node = RuleNode::and(vec![
            Rule::new("price", Operator::Gt).with_value(5).into(),
            RuleNode::or(vec![]),
        ]);
        let encoded = serde_json::to_value(&node).unwrap();
        assert_eq!(
            encoded,
            json!({
                "kind": "group",
                "combinator": "and",
                "children": [
                    { "kind": "rule", "field": "price", "operator": "gt", "value": 5 },
                    { "kind": "group", "combinator": "or", "children": [] }
                ]
            })
        );
        let decoded: RuleNode = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, node);
    }

    #[test]
    fn test_incomplete_rule_decodes() {
        let node: RuleNode = serde_json::from_value(json!({ "kind": "rule", "value": null })).unwrap();
        assert_eq!(node, RuleNode::Rule(Rule::default()));
    }

    #[test]
    fn test_empty_operator_decodes_as_unset() {
        let nodes: Vec<RuleNode> = serde_json::from_value(json!([
            { "kind": "rule", "field": "name", "operator": "", "value": "" },
            { "kind": "rule", "field": "name", "operator": null },
            { "kind": "rule", "field": "name", "operator": "equals", "value": "x" }
        ]))
        .unwrap();
        assert_eq!(
            nodes,
            vec![
                RuleNode::Rule(Rule {
                    field: Some("name".to_string()),
                    value: Some(json!("")),
                    ..Rule::default()
                }),
                RuleNode::Rule(Rule {
                    field: Some("name".to_string()),
                    ..Rule::default()
                }),
                Rule::new("name", Operator::Equals).with_value("x").into(),
            ]
        );
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = serde_json::from_value::<RuleNode>(json!({
            "kind": "rule", "field": "name", "operator": "between"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("between"), "{}", err);
    }

    #[test]
    fn test_seeded_values() {
        let today = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        let schema = schema();

        let term = Rule::seeded("name", &schema, today).unwrap();
        assert_eq!(term.operator, Some(Operator::Equals));
        assert_eq!(term.value, Some(json!("")));

        let boolean = Rule::seeded("active", &schema, today).unwrap();
        assert_eq!(boolean.value, Some(json!("")));

        let number = Rule::seeded("price", &schema, today).unwrap();
        assert_eq!(number.value, Some(json!(0)));
        assert_eq!(number.date, None);

        let date = Rule::seeded("created", &schema, today).unwrap();
        assert_eq!(date.value, Some(json!(0)));
        assert_eq!(date.date.as_deref(), Some("01/03/2016"));

        let multi = Rule::seeded("state", &schema, today).unwrap();
        assert_eq!(multi.value, Some(json!([])));
    }

    #[test]
    fn test_seeding_unknown_field_fails() {
        let today = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        let err = Rule::seeded("missing", &schema(), today).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField(ref f) if f == "missing"));
    }

    #[test]
    fn test_reads_date() {
        let rule = Rule::new("created", Operator::Gte);
        assert!(rule.reads_date(FieldType::Date));
        assert!(!rule.reads_date(FieldType::Number));
        assert!(!Rule::new("created", Operator::Last).reads_date(FieldType::Date));
        assert!(!Rule::default().reads_date(FieldType::Date));
    }
}
