//! # graphelm Core
//!
//! Core types shared by the graphelm crates.
//!
//! This crate provides:
//! - The executable GraphQL document model (operations, fragments, selections)
//! - Query document parsing on top of `graphql-parser`
//! - Type references and built-in scalars
//! - The per-document fragment index
//! - Naming helpers and a compact GraphQL printer

pub mod document;
pub mod error;
pub mod fragments;
pub mod naming;
pub mod parser;
pub mod printer;
pub mod types;

pub use document::{
    ANONYMOUS_QUERY, Definition, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, OperationDefinition, OperationKind, Pos, Selection, SelectionSet, Value,
    VariableDefinition,
};
pub use error::{DocumentError, Result};
pub use fragments::FragmentIndex;
pub use parser::parse_document;
pub use types::{BuiltinScalar, TypeRef};
