//! Two-way conversion between an editable rule tree and the boolean filter
//! expressions understood by the search backend.
//!
//! [`build_filters`] turns the user's rules into filters, quietly leaving out
//! rules that are still being edited. [`parse_filters`] turns stored filters
//! back into rules. Both are pure: they borrow their inputs and return fresh
//! trees.

mod builder;
pub mod dates;
mod errors;
mod filter;
mod operator;
mod parser;
mod rule;
mod schema;

pub use builder::{build_filters, build_one};
pub use dates::{format_ui_date, parse_ui_date};
pub use errors::{BuildError, FilterFormatError, SchemaError};
pub use filter::FilterExpr;
pub use operator::Operator;
pub use parser::{parse_filters, parse_one};
pub use rule::{Combinator, Group, Rule, RuleNode};
pub use schema::{Choice, FieldSchema, FieldSpec, FieldType};
