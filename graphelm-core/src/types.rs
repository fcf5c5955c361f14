//! Type references and built-in scalar definitions.
//!
//! This module provides the unresolved GraphQL type reference used by both
//! schema definitions and operation variables, along with the set of
//! built-in scalar types every schema carries.

use std::fmt;

/// Built-in GraphQL scalar type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinScalar {
    /// Signed 32-bit integer.
    Int,
    /// Double-precision floating point.
    Float,
    /// UTF-8 string.
    String,
    /// `true` or `false`.
    Boolean,
    /// Opaque identifier, serialized as a string.
    Id,
}

impl BuiltinScalar {
    /// All built-in scalars, in GraphQL declaration order.
    pub const ALL: [Self; 5] = [Self::Int, Self::Float, Self::String, Self::Boolean, Self::Id];

    /// Returns the GraphQL type name.
    #[must_use]
    pub const fn graphql_name(&self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
        }
    }

    /// Parses a built-in scalar from its GraphQL type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "ID" => Some(Self::Id),
            _ => None,
        }
    }
}

/// Unresolved type reference, as written in SDL, introspection results or
/// variable definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Reference to a named type.
    Named(String),
    /// List of the inner type.
    List(Box<TypeRef>),
    /// Non-null wrapper around the inner type.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a named type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a type reference in a list.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps a type reference in a non-null marker.
    ///
    /// Wrapping an already non-null reference returns it unchanged.
    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        match inner {
            Self::NonNull(_) => inner,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Returns the innermost named type.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    /// Returns true if the outermost wrapper is non-null.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Strips a single outer non-null wrapper, if present.
    #[must_use]
    pub fn nullable(&self) -> &Self {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
