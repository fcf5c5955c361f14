//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Query document error.
    #[error("document error: {0}")]
    Document(#[from] graphelm_core::DocumentError),

    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] graphelm_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] graphelm_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Leaf resolution was requested for an object, interface, union or
    /// input object type.
    #[error("not a leaf type: {name}")]
    NotALeafType {
        /// Type name.
        name: String,
    },

    /// Inline fragment in a selection that is not on a union.
    #[error("should not happen")]
    InlineFragmentOutsideUnion,

    /// Field other than `__typename` directly in a union selection.
    #[error("unexpected field: {name}")]
    UnexpectedField {
        /// Field name.
        name: String,
    },

    /// Selection of the wrong kind in a union selection.
    #[error("unexpected: {kind}")]
    UnexpectedSelection {
        /// Selection kind.
        kind: String,
    },

    /// Spread of a fragment the document does not define.
    #[error("unknown fragment '{name}'")]
    UnknownFragment {
        /// Fragment name.
        name: String,
    },

    /// Fragment spreads form a cycle.
    #[error("fragment cycle: {}", path.join(" -> "))]
    FragmentCycle {
        /// Fragment names, outermost first, ending with the repeated one.
        path: Vec<String>,
    },

    /// Inline fragment type condition is not a member of the union.
    #[error("'{type_condition}' is not a member of union '{union_name}'")]
    NotAUnionMember {
        /// Union name.
        union_name: String,
        /// Type condition (empty when the fragment has none).
        type_condition: String,
    },

    /// Field not defined on the selected type.
    #[error("unknown field '{field}' on type '{type_name}'")]
    UnknownField {
        /// Parent type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Type reference not defined in the schema, or of the wrong kind.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// Type name.
        name: String,
    },

    /// Schema has no root type for the operation kind.
    #[error("schema has no {operation} root type")]
    MissingRootType {
        /// Operation kind.
        operation: String,
    },

    /// Operation kind that cannot be generated.
    #[error("unsupported operation: {kind}")]
    UnsupportedOperation {
        /// Operation kind.
        kind: String,
    },

    /// Two generated declarations share one Elm name.
    #[error("duplicate declaration '{name}'")]
    DuplicateDeclaration {
        /// Elm name.
        name: String,
    },

    /// Input object that contains itself.
    #[error("recursive input type '{name}'")]
    RecursiveInputType {
        /// Input object name.
        name: String,
    },

    /// HTTP method other than GET or POST.
    #[error("unknown HTTP method '{method}' (expected GET or POST)")]
    UnknownMethod {
        /// Method as given.
        method: String,
    },
}

impl CodegenError {
    /// Creates an unknown field error.
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Creates a duplicate declaration error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateDeclaration { name: name.into() }
    }
}
