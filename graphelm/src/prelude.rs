//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use graphelm::prelude::*;
//! ```

// Document types
pub use graphelm_core::{
    Definition, Document, DocumentError, FragmentIndex, OperationKind, TypeRef, parse_document,
};

// Schema types
pub use graphelm_schema::{
    ParseError, Schema, SchemaError, SchemaType, TypeDef, load_schema_file, parse_introspection,
    parse_sdl, validate_schema,
};

// Code generation
pub use graphelm_codegen::interpret::{DecodeError, Decoded, decode};
pub use graphelm_codegen::{
    CodegenError, DefinitionKind, GeneratedDefinition, Generator, HttpMethod, ModuleEmitter,
    ModuleOptions, generate_module, generate_module_from_file,
};
