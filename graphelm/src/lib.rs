//! # graphelm
//!
//! Generates Elm client modules from GraphQL query files.
//!
//! Every `*.graphql` file under a project becomes an Elm module exporting,
//! for each operation and fragment it contains, a result type alias and a
//! matching JSON decoder, plus an `Http` request function per operation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use graphelm::prelude::*;
//!
//! let schema = parse_sdl("type Query { hello: String }")?;
//! let options = ModuleOptions::builder("Hello")
//!     .endpoint("https://api.example.com/graphql")
//!     .build();
//! let elm = generate_module("query hello { hello }", &schema, &options)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Query document model, parsing and naming helpers
//! - [`schema`] - Server schema loading and validation
//! - [`codegen`] - Elm type, decoder and module generation
//! - [`cli`], [`config`], [`scan`], [`app`] - The `graphelm` command-line tool

pub mod app;
pub mod cli;
pub mod config;
pub mod elm_format;
pub mod prelude;
pub mod scan;

/// Query document model and parsing.
pub mod core {
    pub use graphelm_core::*;
}

/// Server schema loading and validation.
pub mod schema {
    pub use graphelm_schema::*;
}

/// Elm code generation.
pub mod codegen {
    pub use graphelm_codegen::*;
}
