//! Layout artifact: the record definitions the rest of the system compiles
//! against. One struct per message with the leading presence word, a
//! presence-bit index macro per field, and the accessor surface.

use crate::gen_accessors::{array_decls, presence_macro, scalar_accessors};
use crate::types::{BaseKind, Field, FieldKind, Message, Schema, HEADER_TYPE};

/// Render the layout artifact for the whole schema, passthrough included.
pub fn generate_layout(schema: &Schema) -> String {
    let mut out = String::new();
    for msg in &schema.messages {
        out.push_str(&msg.before);
        out.push_str(&struct_def(msg));
        out.push('\n');
        out.push_str(&header_macros(msg));
        out.push('\n');
        out.push_str(&accessor_block(msg));
    }
    out.push_str(&schema.epilogue);
    out
}

fn struct_def(msg: &Message) -> String {
    let mut out = String::new();
    out.push_str(&format!("struct _{} {{\n", msg.name));
    out.push_str(&format!("    {} __msg_header;\n", HEADER_TYPE));
    for field in &msg.fields {
        out.push_str(&struct_member(field));
    }
    out.push_str("};\n");
    out.push_str(&format!("typedef struct _{0} {0};\n", msg.name));
    out.push_str(&format!("extern msg_schema_t *{}_schema;\n", msg.name));
    out
}

fn struct_member(field: &Field) -> String {
    let comment = field.comment.as_deref().unwrap_or("");
    match &field.kind {
        FieldKind::Scalar(p) => {
            format!("    {} {};{}\n", p.c_type(), field.name, comment)
        }
        FieldKind::Nested(sub) => {
            format!("    {} {};{}\n", sub, field.name, comment)
        }
        FieldKind::Array(base) => {
            let ctype = match base {
                BaseKind::Prim(p) => p.c_type().to_string(),
                BaseKind::Msg(sub) => sub.clone(),
            };
            // Buffer plus its length and capacity counters.
            format!(
                "    {} *{};{}\n    int {}_size;\n    int {}_alloc;\n",
                ctype, field.name, comment, field.name, field.name
            )
        }
    }
}

fn header_macros(msg: &Message) -> String {
    let mut out = String::new();
    for field in &msg.fields {
        out.push_str(&format!("#define {} {}\n", presence_macro(msg, field), field.id));
    }
    out
}

fn accessor_block(msg: &Message) -> String {
    let mut out = String::new();
    for field in &msg.fields {
        match &field.kind {
            FieldKind::Array(_) => out.push_str(&array_decls(msg, field)),
            _ => out.push_str(&scalar_accessors(msg, field)),
        }
        out.push('\n');
    }
    out
}
