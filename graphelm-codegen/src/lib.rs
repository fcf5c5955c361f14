//! # graphelm Codegen
//!
//! Elm code generation from GraphQL query documents.
//!
//! This crate provides:
//! - Schema type resolution to Elm types and decoders
//! - A single-pass walker producing result types and decoders together
//! - Union dispatch on `__typename`
//! - Enum, variable encoder and request function generation
//! - Module emission
//! - An interpreter that runs generated decoders against JSON

pub mod elm;
pub mod error;
pub mod generator;
pub mod interpret;
pub mod resolver;
pub mod union;

pub use elm::{HttpMethod, ModuleEmitter, ModuleOptions, ModuleOptionsBuilder};
pub use error::CodegenError;
pub use generator::{DefinitionKind, GeneratedDefinition, Generator};
pub use resolver::TypeResolver;
pub use union::VariantRegistry;

use graphelm_schema::Schema;

/// Generates an Elm module from a GraphQL query document.
///
/// # Arguments
/// * `source` - Query document text
/// * `schema` - Server schema
/// * `options` - Module name, endpoint and HTTP method
///
/// # Returns
/// Generated Elm source as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_module(
    source: &str,
    schema: &Schema,
    options: &ModuleOptions,
) -> Result<String, CodegenError> {
    let document = graphelm_core::parse_document(source)?;
    let definitions = Generator::new(schema).generate_document(&document)?;
    ModuleEmitter::new(schema, options).emit(&definitions)
}

/// Generates an Elm module from a query document file.
///
/// # Arguments
/// * `path` - Path to the `.graphql` file
/// * `schema` - Server schema
/// * `options` - Module name, endpoint and HTTP method
///
/// # Returns
/// Generated Elm source as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_module_from_file(
    path: &std::path::Path,
    schema: &Schema,
    options: &ModuleOptions,
) -> Result<String, CodegenError> {
    let source = std::fs::read_to_string(path)?;
    generate_module(&source, schema, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphelm_schema::parse_sdl;

    fn schema() -> Schema {
        parse_sdl(
            r#"
            type Query { user(id: ID!): User }
            type User { id: ID! name: String friends: [User] }
            "#,
        )
        .expect("Failed to parse schema")
    }

    #[test]
    fn test_generate_module() {
        let options = ModuleOptions::builder("Queries").build();
        let output = generate_module(
            r#"
            query user($id: ID!) { user(id: $id) { ...UserFields } }
            fragment UserFields on User { id name friends { id name } }
            "#,
            &schema(),
            &options,
        )
        .expect("Failed to generate");

        assert!(output.starts_with("module Queries exposing (..)\n"));
        assert!(output.contains(
            "type alias UserFields =\n    { id : String\n    , name : Maybe String\n    , friends : Maybe (List { id : String, name : Maybe String })\n    }\n"
        ));
        assert!(output.contains("user : UserVariables -> (Result Http.Error User -> msg) -> Cmd msg\n"));
    }

    #[test]
    fn test_generate_module_reports_document_errors() {
        let options = ModuleOptions::builder("Queries").build();
        let err = generate_module("query {", &schema(), &options).unwrap_err();
        assert!(matches!(err, CodegenError::Document(_)));
    }

    #[test]
    fn test_generate_module_reports_walk_errors() {
        let options = ModuleOptions::builder("Queries").build();
        let err = generate_module("{ user(id: \"1\") { email } }", &schema(), &options).unwrap_err();
        assert_eq!(err.to_string(), "unknown field 'email' on type 'User'");
    }

    #[test]
    fn test_generate_module_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let path = dir.path().join("User.graphql");
        std::fs::write(&path, "query me { user(id: \"1\") { id } }").expect("Failed to write");

        let options = ModuleOptions::builder("User").build();
        let output = generate_module_from_file(&path, &schema(), &options).expect("Failed to generate");
        assert!(output.contains("meDecoder : Decoder Me\n"));

        let missing = dir.path().join("Missing.graphql");
        assert!(matches!(
            generate_module_from_file(&missing, &schema(), &options),
            Err(CodegenError::Io(_))
        ));
    }
}
