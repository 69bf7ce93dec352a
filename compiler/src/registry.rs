use std::collections::HashSet;

use crate::types::{BaseKind, PrimKind};

/// Symbol table for one compilation run, mapping a type name to a primitive
/// kind or to a message defined earlier in the same schema.
///
/// Messages are registered one by one as the parser completes each block, so
/// a field may reference any earlier message but never a later one. That
/// ordering is what keeps the composition graph acyclic and lets the
/// generators emit nested layouts before the messages that embed them.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    messages: HashSet<String>,
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        TypeRegistry::default()
    }

    /// Register a fully parsed message under its name.
    pub fn define(&mut self, name: &str) {
        self.messages.insert(name.to_string());
    }

    /// Resolve a field's base type name. Primitives win over message names.
    pub fn resolve(&self, name: &str) -> Option<BaseKind> {
        if let Some(kind) = PrimKind::from_name(name) {
            return Some(BaseKind::Prim(kind));
        }
        if self.messages.contains(name) {
            return Some(BaseKind::Msg(name.to_string()));
        }
        None
    }
}
