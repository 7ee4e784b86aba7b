use crate::dates::parse_ui_date;
use crate::errors::BuildError;
use crate::filter::FilterExpr;
use crate::operator::Operator;
use crate::rule::{Combinator, Rule, RuleNode};
use crate::schema::{FieldSchema, FieldType};
use serde_json::{Number, Value};

const START_OF_DAY: &str = "T00:00:00";
const END_OF_DAY: &str = "T23:59:59";

/// Builds backend filters from a rule tree.
///
/// Rules the user has not finished (no field, operator or usable value) are
/// left out of the result. A rule on a field the schema does not know is a
/// host error and fails the whole call.
pub fn build_filters(rules: &[RuleNode], schema: &FieldSchema) -> Result<Vec<FilterExpr>, BuildError> {
    let mut filters = Vec::with_capacity(rules.len());
    for rule in rules {
        if let Some(filter) = build_one(rule, schema)? {
            filters.push(filter);
        }
    }
    Ok(filters)
}

/// Builds the filter for a single node. Groups always produce a filter,
/// possibly with no children.
pub fn build_one(node: &RuleNode, schema: &FieldSchema) -> Result<Option<FilterExpr>, BuildError> {
    match node {
        RuleNode::Group(group) => {
            let children = build_filters(&group.children, schema)?;
            Ok(Some(match group.combinator {
                Combinator::And => FilterExpr::And(children),
                Combinator::Or => FilterExpr::Or(children),
            }))
        }
        RuleNode::Rule(rule) => build_rule(rule, schema),
    }
}

fn build_rule(rule: &Rule, schema: &FieldSchema) -> Result<Option<FilterExpr>, BuildError> {
    let (field, operator) = match (rule.field.as_deref(), rule.operator) {
        (Some(field), Some(operator)) if !field.is_empty() => (field, operator),
        _ => {
            log::debug!("Skipping rule without field or operator: {:?}", rule);
            return Ok(None);
        }
    };
    let field_type = schema
        .field_type(field)
        .ok_or_else(|| BuildError::UnknownField(field.to_string()))?;

    if !operator.is_legal_for(field_type) {
        log::debug!(
            "Skipping rule on {}: {} is not available for {} fields",
            field,
            operator,
            field_type
        );
        return Ok(None);
    }

    let filter = match (operator, field_type) {
        (Operator::Exists, _) => Some(FilterExpr::Exists {
            field: field.to_string(),
        }),
        (Operator::NotExists, _) => Some(FilterExpr::Missing {
            field: field.to_string(),
        }),
        (Operator::Equals, FieldType::Date) => parse_ui_date_of(rule).map(|date| {
            FilterExpr::range(
                field,
                [
                    ("gte", format!("{}{}", date, START_OF_DAY)),
                    ("lte", format!("{}{}", date, END_OF_DAY)),
                ],
            )
        }),
        (Operator::Equals, _) => equality(field, rule.value.as_ref()),
        (Operator::NotEquals, _) => equality(field, rule.value.as_ref()).map(FilterExpr::not),
        (Operator::Prefix, _) => present(rule.value.as_ref()).map(|value| FilterExpr::Prefix {
            field: field.to_string(),
            value: value.clone(),
        }),
        (Operator::Contains, _) => present(rule.value.as_ref()).map(|value| FilterExpr::Regexp {
            field: field.to_string(),
            pattern: contains_pattern(value),
        }),
        (Operator::Gt | Operator::Gte, FieldType::Date) => {
            date_bound(field, operator, parse_ui_date_of(rule), START_OF_DAY)
        }
        (Operator::Lt | Operator::Lte, FieldType::Date) => {
            date_bound(field, operator, parse_ui_date_of(rule), END_OF_DAY)
        }
        (Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte, _) => {
            match (numeric(rule.value.as_ref()), operator.range_key()) {
                (Some(value), Some(key)) => Some(FilterExpr::range(field, [(key, value)])),
                _ => None,
            }
        }
        (Operator::Last, _) => day_count(rule.value.as_ref()).map(|days| {
            FilterExpr::range(
                field,
                [("gte", format!("now-{}d", days)), ("lte", "now".to_string())],
            )
        }),
        (Operator::Next, _) => day_count(rule.value.as_ref()).map(|days| {
            FilterExpr::range(
                field,
                [("gte", "now".to_string()), ("lte", format!("now+{}d", days))],
            )
        }),
    };

    if filter.is_none() {
        log::debug!(
            "Skipping rule on {}: no usable value for {}",
            field,
            operator
        );
    }
    Ok(filter)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// `term` for a single value, `terms` for a list
fn equality(field: &str, value: Option<&Value>) -> Option<FilterExpr> {
    Some(match present(value)? {
        Value::Array(values) => FilterExpr::terms(field, values.clone()),
        value => FilterExpr::term(field, value.clone()),
    })
}

/// Case-insensitive substring pattern for `contains`.
///
/// The value is inserted as typed: pattern metacharacters in it are not
/// escaped and take effect in the backend's regexp engine.
fn contains_pattern(value: &Value) -> String {
    format!(".*(?i){}.*", value_text(value))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numbers pass through; numeric strings from text inputs are converted
fn numeric(value: Option<&Value>) -> Option<Value> {
    match present(value)? {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Some(Value::Number(Number::from(i)))
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }
        }
        _ => None,
    }
}

/// Non-negative whole number of days
fn day_count(value: Option<&Value>) -> Option<u64> {
    match present(value)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn parse_ui_date_of(rule: &Rule) -> Option<String> {
    rule.date.as_deref().and_then(parse_ui_date)
}

fn date_bound(
    field: &str,
    operator: Operator,
    date: Option<String>,
    time: &str,
) -> Option<FilterExpr> {
    let key = operator.range_key()?;
    let date = date?;
    Some(FilterExpr::range(field, [(key, format!("{}{}", date, time))]))
}
