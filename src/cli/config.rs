//! Schema command

use crate::SchemaKind;
use contractc::schema::SchemaDocument;
use contractc::{Config, Contract, Result};

/// Print the JSON Schema of the selected input format
pub fn cmd_schema(kind: SchemaKind) -> Result<()> {
    match kind {
        SchemaKind::Ir => print_schema::<Contract>(),
        SchemaKind::Document => print_schema::<SchemaDocument>(),
        SchemaKind::Config => print_schema::<Config>(),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
