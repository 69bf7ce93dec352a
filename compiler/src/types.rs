use serde::Serialize;

/// Hard cap on fields per message: every field id doubles as a bit index
/// into the 32-bit presence word at the head of the record.
pub const MAX_FIELDS: usize = 32;

/// C type of the presence word emitted at the head of every record.
pub const HEADER_TYPE: &str = "uint32_t";

/// The fixed set of primitive field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Char,
    Uchar,
    Short,
    Ushort,
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
}

impl PrimKind {
    pub const ALL: [PrimKind; 18] = [
        PrimKind::Int8,
        PrimKind::Uint8,
        PrimKind::Int16,
        PrimKind::Uint16,
        PrimKind::Int32,
        PrimKind::Uint32,
        PrimKind::Int64,
        PrimKind::Uint64,
        PrimKind::Char,
        PrimKind::Uchar,
        PrimKind::Short,
        PrimKind::Ushort,
        PrimKind::Int,
        PrimKind::Uint,
        PrimKind::Long,
        PrimKind::Ulong,
        PrimKind::Float,
        PrimKind::Double,
    ];

    /// Resolve a schema-level type name to a primitive kind.
    pub fn from_name(name: &str) -> Option<PrimKind> {
        match name {
            "int8"   => Some(PrimKind::Int8),
            "uint8"  => Some(PrimKind::Uint8),
            "int16"  => Some(PrimKind::Int16),
            "uint16" => Some(PrimKind::Uint16),
            "int32"  => Some(PrimKind::Int32),
            "uint32" => Some(PrimKind::Uint32),
            "int64"  => Some(PrimKind::Int64),
            "uint64" => Some(PrimKind::Uint64),
            "char"   => Some(PrimKind::Char),
            "uchar"  => Some(PrimKind::Uchar),
            "short"  => Some(PrimKind::Short),
            "ushort" => Some(PrimKind::Ushort),
            "int"    => Some(PrimKind::Int),
            "uint"   => Some(PrimKind::Uint),
            "long"   => Some(PrimKind::Long),
            "ulong"  => Some(PrimKind::Ulong),
            "float"  => Some(PrimKind::Float),
            "double" => Some(PrimKind::Double),
            _        => None,
        }
    }

    /// The name used in schema text.
    pub fn schema_name(self) -> &'static str {
        match self {
            PrimKind::Int8   => "int8",
            PrimKind::Uint8  => "uint8",
            PrimKind::Int16  => "int16",
            PrimKind::Uint16 => "uint16",
            PrimKind::Int32  => "int32",
            PrimKind::Uint32 => "uint32",
            PrimKind::Int64  => "int64",
            PrimKind::Uint64 => "uint64",
            PrimKind::Char   => "char",
            PrimKind::Uchar  => "uchar",
            PrimKind::Short  => "short",
            PrimKind::Ushort => "ushort",
            PrimKind::Int    => "int",
            PrimKind::Uint   => "uint",
            PrimKind::Long   => "long",
            PrimKind::Ulong  => "ulong",
            PrimKind::Float  => "float",
            PrimKind::Double => "double",
        }
    }

    /// The C type the kind maps to in the record layout.
    pub fn c_type(self) -> &'static str {
        match self {
            PrimKind::Int8   => "int8_t",
            PrimKind::Uint8  => "uint8_t",
            PrimKind::Int16  => "int16_t",
            PrimKind::Uint16 => "uint16_t",
            PrimKind::Int32  => "int32_t",
            PrimKind::Uint32 => "uint32_t",
            PrimKind::Int64  => "int64_t",
            PrimKind::Uint64 => "uint64_t",
            PrimKind::Char   => "char",
            PrimKind::Uchar  => "unsigned char",
            PrimKind::Short  => "short",
            PrimKind::Ushort => "unsigned short",
            PrimKind::Int    => "int",
            PrimKind::Uint   => "unsigned int",
            PrimKind::Long   => "long",
            PrimKind::Ulong  => "unsigned long",
            PrimKind::Float  => "float",
            PrimKind::Double => "double",
        }
    }

    /// The canonical zero literal for the kind, used in default instances
    /// and when resize exposes new array slots.
    pub fn zero(self) -> &'static str {
        match self {
            PrimKind::Int8   => "(int8_t)0",
            PrimKind::Uint8  => "(uint8_t)0",
            PrimKind::Int16  => "(int16_t)0",
            PrimKind::Uint16 => "(uint16_t)0",
            PrimKind::Int32  => "(int32_t)0",
            PrimKind::Uint32 => "(uint32_t)0",
            PrimKind::Int64  => "(int64_t)0",
            PrimKind::Uint64 => "(uint64_t)0",
            PrimKind::Char   => "(char)0",
            PrimKind::Uchar  => "(unsigned char)0",
            PrimKind::Short  => "(short)0",
            PrimKind::Ushort => "(unsigned short)0",
            PrimKind::Int    => "(int)0",
            PrimKind::Uint   => "(unsigned int)0",
            PrimKind::Long   => "(long)0",
            PrimKind::Ulong  => "(unsigned long)0",
            PrimKind::Float  => "0.f",
            PrimKind::Double => "0.",
        }
    }

    /// The kind tag constant used in field descriptor tables. Array fields
    /// add `_MSG_SCHEMA_ARR_BASE` on top of the base tag.
    pub fn tag(self) -> &'static str {
        match self {
            PrimKind::Int8   => "_MSG_SCHEMA_INT8",
            PrimKind::Uint8  => "_MSG_SCHEMA_UINT8",
            PrimKind::Int16  => "_MSG_SCHEMA_INT16",
            PrimKind::Uint16 => "_MSG_SCHEMA_UINT16",
            PrimKind::Int32  => "_MSG_SCHEMA_INT32",
            PrimKind::Uint32 => "_MSG_SCHEMA_UINT32",
            PrimKind::Int64  => "_MSG_SCHEMA_INT64",
            PrimKind::Uint64 => "_MSG_SCHEMA_UINT64",
            PrimKind::Char   => "_MSG_SCHEMA_CHAR",
            PrimKind::Uchar  => "_MSG_SCHEMA_UCHAR",
            PrimKind::Short  => "_MSG_SCHEMA_SHORT",
            PrimKind::Ushort => "_MSG_SCHEMA_USHORT",
            PrimKind::Int    => "_MSG_SCHEMA_INT",
            PrimKind::Uint   => "_MSG_SCHEMA_UINT",
            PrimKind::Long   => "_MSG_SCHEMA_LONG",
            PrimKind::Ulong  => "_MSG_SCHEMA_ULONG",
            PrimKind::Float  => "_MSG_SCHEMA_FLOAT",
            PrimKind::Double => "_MSG_SCHEMA_DOUBLE",
        }
    }
}

/// Base type of a field or of an array element: a primitive or a message
/// defined earlier in the same schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BaseKind {
    Prim(PrimKind),
    Msg(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldKind {
    Scalar(PrimKind),
    Nested(String),
    Array(BaseKind),
}

impl FieldKind {
    pub fn is_array(&self) -> bool {
        matches!(self, FieldKind::Array(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Zero-based declaration order; also the field's presence-bit index.
    /// Stable for the lifetime of the schema, never renumbered.
    pub id:      usize,
    pub name:    String,
    pub kind:    FieldKind,
    /// Verbatim default value literal. Never present on array fields.
    pub default: Option<String>,
    /// Trailing text captured after the `;` of the declaration line.
    pub comment: Option<String>,
    pub line:    usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub name:   String,
    pub fields: Vec<Field>,
    /// Verbatim passthrough text between the previous block and this one.
    pub before: String,
    pub line:   usize,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Schema {
    pub messages: Vec<Message>,
    /// Verbatim passthrough text after the last block.
    pub epilogue: String,
}

impl Schema {
    /// Look up a message by name. Later definitions shadow earlier ones,
    /// matching the registry used during parsing.
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prim_names_round_trip() {
        for kind in PrimKind::ALL {
            assert_eq!(PrimKind::from_name(kind.schema_name()), Some(kind));
        }
        assert_eq!(PrimKind::from_name("string"), None);
        assert_eq!(PrimKind::from_name("Float"), None);
    }

    #[test]
    fn test_prim_zero_literals() {
        assert_eq!(PrimKind::Float.zero(), "0.f");
        assert_eq!(PrimKind::Double.zero(), "0.");
        assert_eq!(PrimKind::Uchar.zero(), "(unsigned char)0");
        assert_eq!(PrimKind::Int64.c_type(), "int64_t");
    }
}
