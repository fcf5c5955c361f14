//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// SDL parsing error.
    #[error(transparent)]
    Sdl(#[from] graphql_parser::schema::ParseError),

    /// Introspection JSON error.
    #[error("introspection JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A type reference in an introspection result is malformed.
    #[error("invalid type reference in '{context}': {message}")]
    InvalidTypeRef {
        /// Where the reference was found.
        context: String,
        /// Error message.
        message: String,
    },

    /// Extension of a type that was never defined.
    #[error("extension of unknown type '{name}'")]
    UnknownExtension {
        /// Type name.
        name: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{name}' not found (referenced from '{context}')")]
    TypeNotFound {
        /// Type name.
        name: String,
        /// Referencing definition.
        context: String,
    },

    /// Union member is not an object type.
    #[error("union '{union_name}' member '{member}' is not an object type")]
    InvalidUnionMember {
        /// Union name.
        union_name: String,
        /// Member name.
        member: String,
    },

    /// Non-null wrapping another non-null.
    #[error("non-null type wraps another non-null type in '{context}'")]
    NestedNonNull {
        /// Offending definition.
        context: String,
    },

    /// Root operation type is missing or not an object type.
    #[error("invalid {operation} root type '{name}'")]
    InvalidRootType {
        /// Operation kind.
        operation: String,
        /// Root type name.
        name: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an invalid type reference error.
    pub fn invalid_type_ref(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTypeRef {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a type-not-found error.
    pub fn type_not_found(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::TypeNotFound {
            name: name.into(),
            context: context.into(),
        }
    }
}
