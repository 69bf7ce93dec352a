use thiserror::Error;

use crate::types::MAX_FIELDS;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error at line {line}: {msg}")]
    Syntax { msg: String, line: usize },

    #[error("Unknown type {type_name} for field {field} at line {line}")]
    UnknownType {
        type_name: String,
        field:     String,
        line:      usize,
    },

    #[error("Arrays cannot have a default value: field {field} at line {line}")]
    ArrayDefault { field: String, line: usize },

    #[error("Message {message} exceeds the maximum of {} fields at line {line}", MAX_FIELDS)]
    FieldLimit { message: String, line: usize },
}
