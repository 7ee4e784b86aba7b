use crate::argparse::{OperatorsArgs, SeedArgs};
use crate::documents::load_schema;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use filter_builder::{FieldSchema, FieldSpec, Rule};
use serde_json::{json, Map, Value};

fn describe(spec: &FieldSpec) -> Value {
    json!({
        "type": spec.field_type,
        "operators": spec.field_type.operators(),
    })
}

fn operators_for(schema: &FieldSchema, field: Option<&str>) -> Result<Value> {
    let mut fields = Map::new();
    match field {
        Some(field) => match schema.get(field) {
            Some(spec) => {
                fields.insert(field.to_string(), describe(spec));
            }
            None => bail!("Field not in schema: {}", field),
        },
        None => {
            for (name, spec) in schema.iter() {
                fields.insert(name.clone(), describe(spec));
            }
        }
    }
    Ok(Value::Object(fields))
}

pub fn handle_operators_command(args: &OperatorsArgs) -> Result<Value> {
    let schema = load_schema(&args.schema)?;
    operators_for(&schema, args.field.as_deref())
}

pub fn handle_seed_command(args: &SeedArgs) -> Result<Value> {
    let schema = load_schema(&args.schema)?;
    let today = match &args.today {
        Some(date) => NaiveDate::parse_from_str(date, "%d/%m/%Y")
            .with_context(|| format!("Invalid --today date {:?}, expected DD/MM/YYYY", date))?,
        None => chrono::Local::now().date_naive(),
    };
    let rule = Rule::seeded(&args.field, &schema, today)?;
    Ok(serde_json::to_value(rule)?)
}
