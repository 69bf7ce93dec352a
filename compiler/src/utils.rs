use crate::error::SchemaError;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("{:?}", text))
}

pub fn syntax_error(msg: &str, line: usize) -> SchemaError {
    SchemaError::Syntax {
        msg: msg.to_string(),
        line,
    }
}
