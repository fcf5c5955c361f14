//! # graphelm Schema
//!
//! GraphQL server schema loading and type definitions.
//!
//! This crate provides:
//! - SDL schema parsing
//! - Introspection JSON loading
//! - Type definitions for schema elements
//! - Schema validation
//! - A resolved type view for code generation

pub mod error;
pub mod introspection;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use introspection::{load_schema_file, parse_introspection};
pub use ir::SchemaType;
pub use parser::parse_sdl;
pub use types::{
    EnumDef, EnumValue, FieldDef, InputObjectDef, InputValueDef, ObjectDef, ScalarDef, Schema,
    TypeDef, UnionDef,
};
pub use validation::validate_schema;
