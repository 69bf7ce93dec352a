//! msg-schema-compiler
//!
//! This crate implements:
//!  1) A line-oriented parser for `msg` schema files,
//!  2) The message model (`Schema`/`Message`/`Field`) and per-run type
//!     registry (primitives plus previously defined messages),
//!  3) The layout generator (record structs, presence-bit macros, accessor
//!     surface),
//!  4) The descriptor generator (default instances, field descriptor
//!     tables, schema records, out-of-line array accessors),
//!  5) Error types (`SchemaError`).

pub mod compiler;
pub mod error;
pub mod gen_accessors;
pub mod gen_descriptor;
pub mod gen_layout;
pub mod parser;
pub mod registry;
pub mod types;
pub mod utils;

pub use compiler::compile_schema;
pub use gen_descriptor::generate_descriptors;
pub use gen_layout::generate_layout;
