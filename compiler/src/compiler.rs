use crate::{error::SchemaError, parser::parse_schema, types::Schema};

/// Compile schema text into the message model consumed by the generators.
/// Returns `Err(SchemaError)` on the first syntax, type or limit violation;
/// there is no recovery and no partial model.
pub fn compile_schema(text: &str) -> Result<Schema, SchemaError> {
    parse_schema(text)
}
