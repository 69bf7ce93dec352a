use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::SchemaError,
    registry::TypeRegistry,
    types::{BaseKind, Field, FieldKind, Message, Schema, MAX_FIELDS},
    utils::{quote, syntax_error},
};

lazy_static! {
    static ref MSG_OPEN: Regex =
        Regex::new(r"^msg\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{$").unwrap();
    // `type name;`, `type name = default;`; the array marker is accepted on
    // the type (`float[] w`) or, C-style, on the name (`float w[]`).
    static ref FIELD_DECL: Regex = Regex::new(
        r"^([A-Za-z_][A-Za-z0-9_]*)(\[\])?\s+([A-Za-z_][A-Za-z0-9_]*)(\[\])?\s*(?:=\s*(\S+))?$"
    )
    .unwrap();
}

struct MessageBuilder {
    name:   String,
    fields: Vec<Field>,
    before: String,
    line:   usize,
}

/// Parse schema text into an ordered sequence of messages.
///
/// One sequential scan over the lines: outside a block every line is
/// passthrough, inside a block every non-blank line must be a field
/// declaration or the closing `}`. All errors abort the run.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
    let mut registry = TypeRegistry::new();
    let mut messages: Vec<Message> = Vec::new();
    let mut passthrough = String::new();
    let mut current: Option<MessageBuilder> = None;
    let mut pending_comment: Option<String> = None;
    let mut last_line = 0;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        last_line = line;

        if current.is_none() {
            let trimmed = raw.trim();
            if let Some(caps) = MSG_OPEN.captures(trimmed) {
                current = Some(MessageBuilder {
                    name:   caps[1].to_string(),
                    fields: Vec::new(),
                    before: std::mem::take(&mut passthrough),
                    line,
                });
                pending_comment = None;
            } else {
                passthrough.push_str(raw);
                passthrough.push('\n');
            }
            continue;
        }

        // Inside a block. Text after the first `;` is a trailing comment
        // attached to the field declared on this line, or carried over to
        // the next declaration if this line declares nothing.
        let (decl, comment) = match raw.find(';') {
            Some(idx) => (&raw[..idx], Some(&raw[idx + 1..])),
            None => (raw, None),
        };
        let decl = decl.trim();

        if comment.is_none() && decl == "}" {
            if let Some(b) = current.take() {
                registry.define(&b.name);
                messages.push(Message {
                    name:   b.name,
                    fields: b.fields,
                    before: b.before,
                    line:   b.line,
                });
            }
            pending_comment = None;
            continue;
        }

        if let Some(trailing) = comment {
            if !trailing.is_empty() {
                pending_comment = Some(trailing.to_string());
            }
            if decl.is_empty() {
                continue;
            }
            if let Some(builder) = current.as_mut() {
                let field = parse_field(
                    decl,
                    raw,
                    line,
                    builder,
                    &registry,
                    pending_comment.take(),
                )?;
                builder.fields.push(field);
            }
            continue;
        }

        if !decl.is_empty() {
            return Err(syntax_error(&format!("invalid line {}", quote(raw)), line));
        }
    }

    if let Some(b) = current {
        return Err(syntax_error(
            &format!("missing closing brace for msg {}", quote(&b.name)),
            last_line,
        ));
    }

    Ok(Schema {
        messages,
        epilogue: passthrough,
    })
}

fn parse_field(
    decl: &str,
    raw: &str,
    line: usize,
    builder: &MessageBuilder,
    registry: &TypeRegistry,
    comment: Option<String>,
) -> Result<Field, SchemaError> {
    let caps = match FIELD_DECL.captures(decl) {
        Some(caps) => caps,
        None => {
            return Err(syntax_error(
                &format!("invalid field declaration {}", quote(raw)),
                line,
            ))
        }
    };

    let type_name = &caps[1];
    let is_array = caps.get(2).is_some() || caps.get(4).is_some();
    let name = caps[3].to_string();
    let default = caps.get(5).map(|m| m.as_str().to_string());

    if builder.fields.len() == MAX_FIELDS {
        return Err(SchemaError::FieldLimit {
            message: builder.name.clone(),
            line,
        });
    }

    let base = registry.resolve(type_name).ok_or_else(|| SchemaError::UnknownType {
        type_name: type_name.to_string(),
        field:     name.clone(),
        line,
    })?;

    if is_array && default.is_some() {
        return Err(SchemaError::ArrayDefault { field: name, line });
    }

    let kind = match (base, is_array) {
        (base, true) => FieldKind::Array(base),
        (BaseKind::Prim(p), false) => FieldKind::Scalar(p),
        (BaseKind::Msg(m), false) => FieldKind::Nested(m),
    };

    Ok(Field {
        id: builder.fields.len(),
        name,
        kind,
        default,
        comment,
        line,
    })
}
