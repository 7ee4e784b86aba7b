use crate::argparse::DocumentArgs;
use crate::documents::{load_list, load_schema};
use anyhow::{Context, Result};
use filter_builder::{build_filters, parse_filters, FilterExpr, RuleNode};
use serde_json::{json, Value};

fn build(args: &DocumentArgs) -> Result<Vec<FilterExpr>> {
    let schema = load_schema(&args.schema)?;
    let rules: Vec<RuleNode> = load_list(&args.input)?;
    let filters = build_filters(&rules, &schema)
        .with_context(|| format!("Failed to build filters from {}", args.input.display()))?;
    log::info!("Built {} filters from {} rules", filters.len(), rules.len());
    Ok(filters)
}

pub fn handle_build_command(args: &DocumentArgs) -> Result<Value> {
    Ok(serde_json::to_value(build(args)?)?)
}

/// Filters wrapped in the request body the search page sends
pub fn handle_show_command(args: &DocumentArgs) -> Result<Value> {
    let filters = build(args)?;
    Ok(json!({
        "size": 0,
        "filter": { "and": filters },
    }))
}

pub fn handle_parse_command(args: &DocumentArgs) -> Result<Value> {
    let schema = load_schema(&args.schema)?;
    let filters: Vec<FilterExpr> = load_list(&args.input)?;
    let rules = parse_filters(&filters, &schema);
    log::info!("Rebuilt {} rules from {} filters", rules.len(), filters.len());
    Ok(serde_json::to_value(rules)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"{
        "price": { "type": "number" },
        "created": { "type": "date" },
        "name": { "type": "term" }
    }"#;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs_err::write(&path, contents).unwrap();
        path
    }

    fn args(dir: &TempDir, input: &str) -> DocumentArgs {
        DocumentArgs {
            schema: write(dir.path(), "schema.json", SCHEMA),
            input: write(dir.path(), "input.json", input),
        }
    }

    #[test]
    fn test_build_command() {
        let dir = TempDir::new().unwrap();
        let args = args(
            &dir,
            r#"[
                {"kind": "rule", "field": "price", "operator": "gt", "value": 5},
                {"kind": "rule", "field": "name", "operator": "prefix"}
            ]"#,
        );
        let output = handle_build_command(&args).unwrap();
        assert_eq!(output, json!([{"range": {"price": {"gt": 5}}}]));
    }

    #[test]
    fn test_build_command_rejects_unknown_field() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, r#"[{"kind": "rule", "field": "colour", "operator": "exists"}]"#);
        let err = handle_build_command(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("colour"));
    }

    #[test]
    fn test_show_command_wraps_filters() {
        let dir = TempDir::new().unwrap();
        let args = args(
            &dir,
            r#"[{"kind": "rule", "field": "created", "operator": "last", "value": 7}]"#,
        );
        let output = handle_show_command(&args).unwrap();
        assert_eq!(
            output,
            json!({
                "size": 0,
                "filter": {"and": [{"range": {"created": {"gte": "now-7d", "lte": "now"}}}]}
            })
        );
    }

    #[test]
    fn test_parse_command() {
        let dir = TempDir::new().unwrap();
        let args = args(
            &dir,
            r#"[{"and": [{"range": {"created": {"gte": "now", "lte": "now+3d"}}}]}]"#,
        );
        let output = handle_parse_command(&args).unwrap();
        assert_eq!(
            output,
            json!([{
                "kind": "group",
                "combinator": "and",
                "children": [
                    {"kind": "rule", "field": "created", "operator": "next", "value": 3}
                ]
            }])
        );
    }
}
