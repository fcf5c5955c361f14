//! Elm code generation.
//!
//! This module contains generators for:
//! - Local variable naming
//! - Type descriptors, records and union custom types
//! - `Json.Decode` expression trees
//! - Enum custom types with their decoders and encoders
//! - Variable encoders
//! - Complete modules with request functions

pub mod binders;
pub mod decoder;
pub mod encoders;
pub mod enums;
pub mod module;
pub mod types;

pub use binders::Binders;
pub use decoder::{Constructor, DecoderExpr, Primitive};
pub use encoders::{EncoderExpr, InputType, Variable};
pub use enums::{EnumIndex, EnumNaming};
pub use module::{HttpMethod, ModuleEmitter, ModuleOptions, ModuleOptionsBuilder};
pub use types::{ElmType, UnionDecl, Variant};
