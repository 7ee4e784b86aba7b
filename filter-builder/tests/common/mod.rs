//! Shared fixtures for the filter-builder integration tests

#![allow(dead_code)]

use filter_builder::{FieldSchema, FilterExpr};
use serde_json::Value;

/// Field registry of the demo search page
pub const DEMO_SCHEMA: &str = r#"{
    "test.number": { "type": "number", "minimum": 650 },
    "test.term": { "type": "term" },
    "test.boolean": { "type": "boolean" },
    "test.date": { "type": "date" },
    "test.state.multi": { "type": "multi", "choices": ["AZ", "CA", "CT"] }
}"#;

/// Stored filters of the demo search page
pub const DEMO_FILTERS: &str = r#"[
    {
        "and": [
            { "range": { "test.number": { "gte": 650 } } },
            { "range": { "test.number": { "lt": 850 } } },
            { "range": { "test.date": { "gte": "2016-03-10 00:00:00", "lte": "2016-03-10 23:59:59" } } }
        ]
    },
    { "term": { "test.boolean": "S" } },
    { "terms": { "test.state.multi": ["AZ", "CT"] } },
    { "not": { "filter": { "term": { "test.term": "asdfasdf" } } } },
    { "exists": { "field": "test.term" } }
]"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn demo_schema() -> FieldSchema {
    FieldSchema::from_json_str(DEMO_SCHEMA).expect("demo schema is valid")
}

pub fn demo_filters() -> Vec<FilterExpr> {
    serde_json::from_str(DEMO_FILTERS).expect("demo filters are valid")
}

pub fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("serializable")
}
