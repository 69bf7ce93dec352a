//! Per-field accessor emission.
//!
//! Scalar and nested fields get inline get/set/unset in the layout artifact.
//! Array fields get declarations there and out-of-line implementations in
//! the descriptor artifact, so the growth policy lives in exactly one
//! translation unit.
//!
//! Generated code calls the runtime contract by naming convention:
//! `msgSetHeaderField`/`msgUnsetHeaderField` for the presence bits,
//! `msgInit`/`msgFree` for nested element lifecycle, and `MSG_REALLOC_ARR`
//! for buffer growth.

use crate::types::{BaseKind, Field, FieldKind, Message};

/// Name of the presence-bit index macro for a field.
pub fn presence_macro(msg: &Message, field: &Field) -> String {
    format!("MSG_HEADER_{}_{}", msg.name, field.name)
}

fn base_c_type(base: &BaseKind) -> String {
    match base {
        BaseKind::Prim(p) => p.c_type().to_string(),
        BaseKind::Msg(name) => name.clone(),
    }
}

/// Inline get/set/unset for a scalar or nested field. Getters hand out a
/// read-only pointer to the slot; set writes the slot and stamps the
/// presence bit; unset clears the bit and leaves the value alone.
pub fn scalar_accessors(msg: &Message, field: &Field) -> String {
    let n = &msg.name;
    let f = &field.name;
    let bit = presence_macro(msg, field);

    let (ctype, set_sig, store) = match &field.kind {
        FieldKind::Scalar(p) => (
            p.c_type().to_string(),
            format!("{} val", p.c_type()),
            format!("msg->{} = val;", f),
        ),
        FieldKind::Nested(sub) => (
            sub.clone(),
            format!("const {} *val", sub),
            format!("msg->{} = *val;", f),
        ),
        FieldKind::Array(_) => return String::new(),
    };

    format!(
        "_msg_inline const {ctype} *{n}_get_{f}(const {n} *msg)\n\
         {{\n\
         \x20   return &msg->{f};\n\
         }}\n\
         _msg_inline void {n}_set_{f}({n} *msg, {set_sig})\n\
         {{\n\
         \x20   {store}\n\
         \x20   msgSetHeaderField(msg, {bit});\n\
         }}\n\
         _msg_inline void {n}_unset_{f}({n} *msg)\n\
         {{\n\
         \x20   msgUnsetHeaderField(msg, {bit});\n\
         }}\n"
    )
}

/// Header-side surface for an array field: prototypes for the out-of-line
/// operations plus the inline unset.
pub fn array_decls(msg: &Message, field: &Field) -> String {
    let base = match &field.kind {
        FieldKind::Array(base) => base,
        _ => return String::new(),
    };
    let n = &msg.name;
    let f = &field.name;
    let bit = presence_macro(msg, field);
    let t = base_c_type(base);
    let val_sig = match base {
        BaseKind::Prim(p) => format!("{} val", p.c_type()),
        BaseKind::Msg(sub) => format!("const {} *val", sub),
    };

    format!(
        "void {n}_add_{f}({n} *msg, {val_sig});\n\
         void {n}_remove_{f}({n} *msg, int idx);\n\
         void {n}_set_{f}_at({n} *msg, int idx, {val_sig});\n\
         void {n}_set_{f}({n} *msg, const {t} *arr, int size);\n\
         void {n}_reserve_{f}({n} *msg, int size);\n\
         void {n}_resize_{f}({n} *msg, int size);\n\
         _msg_inline void {n}_unset_{f}({n} *msg)\n\
         {{\n\
         \x20   msgUnsetHeaderField(msg, {bit});\n\
         }}\n"
    )
}

/// Out-of-line implementations of the array operations for one field.
pub fn array_impls(msg: &Message, field: &Field) -> String {
    let base = match &field.kind {
        FieldKind::Array(base) => base,
        _ => return String::new(),
    };
    let n = &msg.name;
    let f = &field.name;
    let bit = presence_macro(msg, field);
    let t = base_c_type(base);
    let val_sig = match base {
        BaseKind::Prim(p) => format!("{} val", p.c_type()),
        BaseKind::Msg(sub) => format!("const {} *val", sub),
    };
    let stored_val = match base {
        BaseKind::Prim(_) => "val",
        BaseKind::Msg(_) => "*val",
    };
    // Remove releases a nested element's owned resources before the shift;
    // resize default-initializes newly exposed slots.
    let release_elem = match base {
        BaseKind::Prim(_) => String::new(),
        BaseKind::Msg(sub) => format!("    msgFree(&msg->{f}[idx], {sub}_schema);\n"),
    };
    let init_slot = match base {
        BaseKind::Prim(p) => format!("msg->{}[i] = {};", f, p.zero()),
        BaseKind::Msg(sub) => format!("msgInit(&msg->{f}[i], {sub}_schema);"),
    };

    let mut out = String::new();

    out.push_str(&format!(
        "void {n}_reserve_{f}({n} *msg, int size)\n\
         {{\n\
         \x20   if (msg->{f}_alloc >= size)\n\
         \x20       return;\n\
         \x20   msg->{f} = MSG_REALLOC_ARR({t}, msg->{f}, size);\n\
         \x20   msg->{f}_alloc = size;\n\
         }}\n\n"
    ));

    // Amortized O(1) append: capacity seeds at 1 and doubles from there.
    out.push_str(&format!(
        "void {n}_add_{f}({n} *msg, {val_sig})\n\
         {{\n\
         \x20   if (msg->{f}_size == msg->{f}_alloc){{\n\
         \x20       if (msg->{f}_alloc == 0){{\n\
         \x20           msg->{f}_alloc = 1;\n\
         \x20       }}else{{\n\
         \x20           msg->{f}_alloc *= 2;\n\
         \x20       }}\n\
         \x20       msg->{f} = MSG_REALLOC_ARR({t}, msg->{f}, msg->{f}_alloc);\n\
         \x20   }}\n\
         \x20   msgSetHeaderField(msg, {bit});\n\
         \x20   msg->{f}[msg->{f}_size++] = {stored_val};\n\
         }}\n\n"
    ));

    out.push_str(&format!(
        "void {n}_remove_{f}({n} *msg, int idx)\n\
         {{\n\
         \x20   int i;\n\
         \n\
         {release_elem}\
         \x20   for (i = idx + 1; i < msg->{f}_size; ++i)\n\
         \x20       msg->{f}[i - 1] = msg->{f}[i];\n\
         \x20   --msg->{f}_size;\n\
         \x20   if (msg->{f}_size == 0)\n\
         \x20       msgUnsetHeaderField(msg, {bit});\n\
         }}\n\n"
    ));

    out.push_str(&format!(
        "void {n}_set_{f}_at({n} *msg, int idx, {val_sig})\n\
         {{\n\
         \x20   msg->{f}[idx] = {stored_val};\n\
         \x20   msgSetHeaderField(msg, {bit});\n\
         }}\n\n"
    ));

    out.push_str(&format!(
        "void {n}_set_{f}({n} *msg, const {t} *arr, int size)\n\
         {{\n\
         \x20   {n}_reserve_{f}(msg, size);\n\
         \x20   memcpy(msg->{f}, arr, sizeof({t}) * size);\n\
         \x20   msg->{f}_size = size;\n\
         \x20   msgSetHeaderField(msg, {bit});\n\
         }}\n\n"
    ));

    out.push_str(&format!(
        "void {n}_resize_{f}({n} *msg, int size)\n\
         {{\n\
         \x20   int i;\n\
         \n\
         \x20   {n}_reserve_{f}(msg, size);\n\
         \x20   for (i = msg->{f}_size; i < size; ++i)\n\
         \x20       {init_slot}\n\
         \x20   msg->{f}_size = size;\n\
         \x20   msgSetHeaderField(msg, {bit});\n\
         }}\n\n"
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimKind;

    fn sample() -> (Message, Field, Field) {
        let scalar = Field {
            id:      0,
            name:    "x".to_string(),
            kind:    FieldKind::Scalar(PrimKind::Float),
            default: None,
            comment: None,
            line:    2,
        };
        let arr = Field {
            id:      1,
            name:    "w".to_string(),
            kind:    FieldKind::Array(BaseKind::Prim(PrimKind::Float)),
            default: None,
            comment: None,
            line:    3,
        };
        let msg = Message {
            name:   "path_t".to_string(),
            fields: vec![scalar.clone(), arr.clone()],
            before: String::new(),
            line:   1,
        };
        (msg, scalar, arr)
    }

    #[test]
    fn test_scalar_accessors_touch_presence_bit() {
        let (msg, scalar, _) = sample();
        let code = scalar_accessors(&msg, &scalar);
        assert!(code.contains("const float *path_t_get_x(const path_t *msg)"));
        assert!(code.contains("msgSetHeaderField(msg, MSG_HEADER_path_t_x);"));
        assert!(code.contains("msgUnsetHeaderField(msg, MSG_HEADER_path_t_x);"));
        // Unset must not touch the value.
        let unset = code.split("path_t_unset_x").nth(1).unwrap();
        assert!(!unset.contains("msg->x ="));
    }

    #[test]
    fn test_add_grows_from_one_and_doubles() {
        let (msg, _, arr) = sample();
        let code = array_impls(&msg, &arr);
        let add = code.split("void path_t_add_w").nth(1).unwrap();
        let add = add.split("void ").next().unwrap();
        assert!(add.contains("msg->w_alloc = 1;"));
        assert!(add.contains("msg->w_alloc *= 2;"));
        assert!(add.contains("MSG_REALLOC_ARR(float, msg->w, msg->w_alloc);"));
        assert!(add.contains("msg->w[msg->w_size++] = val;"));
        // Presence bit is stamped before the append.
        assert!(add.find("msgSetHeaderField").unwrap() < add.find("msg->w_size++").unwrap());
    }

    #[test]
    fn test_remove_clears_bit_on_empty() {
        let (msg, _, arr) = sample();
        let code = array_impls(&msg, &arr);
        let remove = code.split("void path_t_remove_w").nth(1).unwrap();
        let remove = remove.split("void ").next().unwrap();
        assert!(remove.contains("msg->w[i - 1] = msg->w[i];"));
        assert!(remove.contains("if (msg->w_size == 0)"));
        assert!(remove.contains("msgUnsetHeaderField(msg, MSG_HEADER_path_t_w);"));
    }

    #[test]
    fn test_reserve_never_shrinks() {
        let (msg, _, arr) = sample();
        let code = array_impls(&msg, &arr);
        let reserve = code.split("void path_t_reserve_w").nth(1).unwrap();
        let reserve = reserve.split("void ").next().unwrap();
        assert!(reserve.contains("if (msg->w_alloc >= size)"));
        assert!(reserve.contains("return;"));
        // Reserve leaves length and presence alone.
        assert!(!reserve.contains("w_size"));
        assert!(!reserve.contains("msgSetHeaderField"));
    }

    #[test]
    fn test_nested_array_lifecycle_calls() {
        let (mut msg, _, _) = sample();
        let nested_arr = Field {
            id:      0,
            name:    "pts".to_string(),
            kind:    FieldKind::Array(BaseKind::Msg("point_t".to_string())),
            default: None,
            comment: None,
            line:    2,
        };
        msg.fields = vec![nested_arr.clone()];
        let code = array_impls(&msg, &nested_arr);
        assert!(code.contains("msgFree(&msg->pts[idx], point_t_schema);"));
        assert!(code.contains("msgInit(&msg->pts[i], point_t_schema);"));
        assert!(code.contains("void path_t_add_pts(path_t *msg, const point_t *val)"));
        // The removed element is released before the shift.
        let remove = code.split("void path_t_remove_pts").nth(1).unwrap();
        let remove = remove.split("void ").next().unwrap();
        assert!(remove.find("msgFree").unwrap() < remove.find("for (i = idx + 1").unwrap());
    }
}
