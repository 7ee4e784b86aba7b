mod common;

use chrono::NaiveDate;
use common::{demo_schema, init_logger};
use filter_builder::{build_one, FieldType, Operator, Rule, SchemaError};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 3, 10).unwrap()
}

#[test]
fn test_seeded_rules_follow_field_type() {
    init_logger();
    let schema = demo_schema();
    for (field, spec) in schema.iter() {
        let rule = Rule::seeded(field, &schema, today()).unwrap();
        assert_eq!(rule.operator, Some(Operator::Equals));
        assert_eq!(rule.reads_date(spec.field_type), spec.field_type == FieldType::Date);
    }
}

#[test]
fn test_seeded_rules_build_immediately() {
    init_logger();
    let schema = demo_schema();

    let date = Rule::seeded("test.date", &schema, today()).unwrap();
    assert_eq!(
        build_one(&date.into(), &schema).unwrap().map(|f| f.to_json()),
        Some(json!({"range": {"test.date": {
            "gte": "2016-03-10T00:00:00",
            "lte": "2016-03-10T23:59:59"
        }}}))
    );

    let term = Rule::seeded("test.term", &schema, today()).unwrap();
    assert_eq!(
        build_one(&term.into(), &schema).unwrap().map(|f| f.to_json()),
        Some(json!({"term": {"test.term": ""}}))
    );

    let multi = Rule::seeded("test.state.multi", &schema, today()).unwrap();
    assert_eq!(
        build_one(&multi.into(), &schema).unwrap().map(|f| f.to_json()),
        Some(json!({"terms": {"test.state.multi": []}}))
    );
}

#[test]
fn test_seeding_requires_known_field() {
    let err = Rule::seeded("test.unknown", &demo_schema(), today()).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownField(_)));
    assert_eq!(err.to_string(), "Field not in schema: test.unknown");
}
