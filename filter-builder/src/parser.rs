use crate::dates::format_ui_date;
use crate::filter::FilterExpr;
use crate::operator::Operator;
use crate::rule::{Combinator, Group, Rule, RuleNode};
use crate::schema::FieldSchema;
use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Rebuilds the rule tree from backend filters.
///
/// This never fails: nodes this crate does not produce come back as rules
/// carrying only their field, for the user to complete.
pub fn parse_filters(expressions: &[FilterExpr], schema: &FieldSchema) -> Vec<RuleNode> {
    expressions
        .iter()
        .map(|expr| parse_one(expr, true, schema))
        .collect()
}

/// Rebuilds one node. `truthy` is false under a `not` wrapper.
///
/// Only `term`/`terms` react to the wrapper (as `notEquals`). Any other
/// wrapped node is rebuilt as if it were not negated.
pub fn parse_one(expr: &FilterExpr, truthy: bool, schema: &FieldSchema) -> RuleNode {
    match expr {
        FilterExpr::And(children) => RuleNode::Group(Group::new(
            Combinator::And,
            parse_filters(children, schema),
        )),
        FilterExpr::Or(children) => RuleNode::Group(Group::new(
            Combinator::Or,
            parse_filters(children, schema),
        )),
        FilterExpr::Exists { field } => rule_on(field, schema, Some(Operator::Exists)).into(),
        FilterExpr::Missing { field } => rule_on(field, schema, Some(Operator::NotExists)).into(),
        FilterExpr::Term { field, value } => {
            equality_rule(field, value.clone(), truthy, schema).into()
        }
        FilterExpr::Terms { field, values } => {
            equality_rule(field, Value::Array(values.clone()), truthy, schema).into()
        }
        FilterExpr::Regexp { field, pattern } => {
            let mut rule = rule_on(field, schema, Some(Operator::Contains));
            rule.value = Some(Value::String(strip_contains_pattern(pattern)));
            rule.into()
        }
        FilterExpr::Prefix { field, value } => {
            let mut rule = rule_on(field, schema, Some(Operator::Prefix));
            rule.value = Some(value.clone());
            rule.into()
        }
        FilterExpr::Range { field, bounds } => range_rule(field, bounds, schema).into(),
        FilterExpr::Not(inner) => parse_one(inner, false, schema),
        FilterExpr::Unknown { key, body } => {
            log::debug!("No rule form for filter {:?}, keeping its field only", key);
            let field = body
                .as_object()
                .and_then(|entries| entries.keys().next())
                .cloned();
            match field {
                Some(field) => rule_on(&field, schema, None).into(),
                None => Rule::default().into(),
            }
        }
    }
}

fn rule_on(field: &str, schema: &FieldSchema, operator: Option<Operator>) -> Rule {
    if schema.get(field).is_none() {
        log::warn!("Filter references field {} which is not in the schema", field);
    }
    Rule {
        field: Some(field.to_string()),
        operator,
        value: None,
        date: None,
    }
}

fn equality_rule(field: &str, value: Value, truthy: bool, schema: &FieldSchema) -> Rule {
    let operator = if truthy {
        Operator::Equals
    } else {
        Operator::NotEquals
    };
    let mut rule = rule_on(field, schema, Some(operator));
    rule.value = Some(value);
    rule
}

/// Undoes the `contains` wrapping by removing the first `.*` and the first
/// `(?i)`. The trailing `.*` is left in place, and a value that itself
/// contains either marker is not recovered exactly.
fn strip_contains_pattern(pattern: &str) -> String {
    pattern.replacen(".*", "", 1).replacen("(?i)", "", 1)
}

/// Reads a `range` back as the comparison, relative date or calendar date
/// rule that produced it. Two-sided ranges are told apart by their `gte`
/// bound, which the builder always writes first.
fn range_rule(field: &str, bounds: &IndexMap<String, Value>, schema: &FieldSchema) -> Rule {
    let mut rule = rule_on(field, schema, None);
    let Some((first_key, first_value)) = bounds.first() else {
        log::debug!("Range on {} has no bounds", field);
        return rule;
    };
    rule.operator = Operator::from_range_key(first_key);

    if first_value.is_number() {
        rule.value = Some(first_value.clone());
        return rule;
    }

    if bounds.len() > 1 {
        let Some(lower) = bounds.get("gte").and_then(Value::as_str) else {
            log::debug!("Two-sided range on {} has no textual gte bound", field);
            return rule;
        };
        if let Some(rest) = lower.split_once("now-").map(|(_, rest)| rest) {
            rule.operator = Some(Operator::Last);
            rule.value = leading_days(rest);
        } else if lower.contains("now") {
            rule.operator = Some(Operator::Next);
            rule.value = bounds
                .get("lte")
                .and_then(Value::as_str)
                .and_then(|upper| upper.split_once("now+"))
                .and_then(|(_, rest)| leading_days(rest));
        } else {
            rule.operator = Some(Operator::Equals);
            rule.date = format_ui_date(lower);
        }
        return rule;
    }

    rule.date = first_value.as_str().and_then(format_ui_date);
    rule
}

/// Day count at the start of `7d`-style text
fn leading_days(text: &str) -> Option<Value> {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u64>()
        .ok()
        .map(|days| Value::Number(Number::from(days)))
}
