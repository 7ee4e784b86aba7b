use anyhow::{bail, Context, Result};
use filter_builder::FieldSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::argparse::OutputFormat;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads a JSON or YAML document, chosen by file extension
pub fn read_value(path: &Path) -> Result<Value> {
    let text = fs_err::read_to_string(path)?;
    if is_yaml(path) {
        serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Failed to parse YAML from {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))
    }
}

pub fn load_schema(path: &Path) -> Result<FieldSchema> {
    let value = read_value(path)?;
    FieldSchema::from_json_value(value)
        .with_context(|| format!("Invalid field schema in {}", path.display()))
}

/// Loads a list of nodes. A document holding a single node is read as a
/// list of one.
pub fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let value = read_value(path)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        other => bail!(
            "Expected a list of nodes in {}, found {}",
            path.display(),
            other
        ),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item)
                .with_context(|| format!("Invalid node #{} in {}", idx, path.display()))
        })
        .collect()
}

pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
    })
}
