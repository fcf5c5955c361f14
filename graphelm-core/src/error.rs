//! Error types for graphelm core operations.

use thiserror::Error;

/// Error type for GraphQL document parsing and indexing.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The GraphQL source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] graphql_parser::query::ParseError),

    /// Two fragments share the same name.
    #[error("duplicate fragment definition: '{name}'")]
    DuplicateFragment {
        /// Fragment name.
        name: String,
    },

    /// A literal value cannot be represented.
    #[error("invalid value for '{context}': {message}")]
    InvalidValue {
        /// Where the value was found.
        context: String,
        /// Error message.
        message: String,
    },
}

impl DocumentError {
    /// Creates a duplicate fragment error.
    pub fn duplicate_fragment(name: impl Into<String>) -> Self {
        Self::DuplicateFragment { name: name.into() }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for graphelm core operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
