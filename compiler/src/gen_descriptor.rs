//! Descriptor artifact: default instances, field descriptor tables and
//! schema records, followed by the out-of-line array accessor bodies.
//!
//! The descriptor tables are the runtime reflection contract: generic
//! encode/decode/copy code walks them instead of carrying per-message
//! logic, so the tags and offsets here must match the layout artifact
//! exactly.

use crate::gen_accessors::array_impls;
use crate::types::{BaseKind, Field, FieldKind, Message, Schema};

/// Render the descriptor artifact for the whole schema.
pub fn generate_descriptors(schema: &Schema) -> String {
    let mut out = String::new();

    for msg in &schema.messages {
        out.push_str(&format!(
            "static {0} ___{0}_default = {1};\n",
            msg.name,
            default_value(msg, schema)
        ));
    }
    out.push('\n');

    for msg in &schema.messages {
        out.push_str(&schema_tables(msg));
        out.push('\n');
    }

    for msg in &schema.messages {
        for field in &msg.fields {
            if field.kind.is_array() {
                out.push_str(&array_impls(msg, field));
            }
        }
    }

    out
}

/// Brace initializer for a message's default instance: presence word zero,
/// then one initializer per field in declaration order.
fn default_value(msg: &Message, schema: &Schema) -> String {
    if msg.fields.is_empty() {
        return "{ 0 }".to_string();
    }
    let vals: Vec<String> = msg
        .fields
        .iter()
        .map(|f| field_default(f, schema))
        .collect();
    format!("{{ 0, {} }}", vals.join(", "))
}

fn field_default(field: &Field, schema: &Schema) -> String {
    // An explicit schema default wins; arrays can never carry one.
    if let Some(default) = &field.default {
        return default.clone();
    }
    match &field.kind {
        FieldKind::Array(_) => "NULL, 0, 0".to_string(),
        FieldKind::Scalar(p) => p.zero().to_string(),
        FieldKind::Nested(sub) => {
            let sub_msg = schema
                .message(sub)
                .expect("nested message defined earlier in the schema");
            default_value(sub_msg, schema)
        }
    }
}

fn schema_tables(msg: &Message) -> String {
    let mut out = String::new();

    let entries: Vec<String> = msg
        .fields
        .iter()
        .map(|f| format!("    {}", field_descriptor(msg, f)))
        .collect();

    out.push_str(&format!(
        "static msg_schema_field_t ___{}_fields[] = {{\n",
        msg.name
    ));
    out.push_str(&entries.join(",\n"));
    out.push_str("\n};\n");

    out.push_str(&format!("static msg_schema_t ___{}_schema = {{\n", msg.name));
    out.push_str(&format!("    sizeof({}),\n", msg.name));
    out.push_str(&format!("    ___{}_fields,\n", msg.name));
    out.push_str(&format!(
        "    sizeof(___{}_fields) / sizeof(msg_schema_field_t),\n",
        msg.name
    ));
    out.push_str(&format!("    &___{}_default\n", msg.name));
    out.push_str("};\n");
    out.push_str(&format!("msg_schema_t *{0}_schema = &___{0}_schema;\n", msg.name));

    out
}

/// One descriptor entry: kind tag, slot offset, length/capacity offsets
/// (-1 for non-arrays), sub-schema reference and default-value reference.
fn field_descriptor(msg: &Message, field: &Field) -> String {
    let offset = |member: &str| format!("_MSG_SCHEMA_OFFSET({}, {})", msg.name, member);
    let slot_offset = offset(&field.name);

    let (tag, size_offset, alloc_offset, sub, default) = match &field.kind {
        FieldKind::Scalar(p) => (
            p.tag().to_string(),
            "-1".to_string(),
            "-1".to_string(),
            "NULL".to_string(),
            format!(
                "(void *)(((char *)&___{}_default) + {})",
                msg.name, slot_offset
            ),
        ),
        FieldKind::Nested(sub) => (
            "_MSG_SCHEMA_MSG".to_string(),
            "-1".to_string(),
            "-1".to_string(),
            format!("&___{}_schema", sub),
            "NULL".to_string(),
        ),
        FieldKind::Array(base) => {
            let (base_tag, sub) = match base {
                BaseKind::Prim(p) => (p.tag().to_string(), "NULL".to_string()),
                BaseKind::Msg(sub) => {
                    ("_MSG_SCHEMA_MSG".to_string(), format!("&___{}_schema", sub))
                }
            };
            (
                format!("_MSG_SCHEMA_ARR_BASE + {}", base_tag),
                offset(&format!("{}_size", field.name)),
                offset(&format!("{}_alloc", field.name)),
                sub,
                "NULL".to_string(),
            )
        }
    };

    format!(
        "{{{}, {}, {}, {}, {}, {}}}",
        tag, slot_offset, size_offset, alloc_offset, sub, default
    )
}
