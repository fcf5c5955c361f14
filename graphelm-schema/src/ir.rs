//! Resolved schema view for code generation.
//!
//! [`SchemaType`] is a borrowed, fully resolved view of a [`TypeRef`]: every
//! named type is looked up once so that code generation can match on the
//! definition directly.

use crate::error::SchemaError;
use crate::types::{EnumDef, InputObjectDef, ObjectDef, ScalarDef, Schema, TypeDef, UnionDef};
use graphelm_core::TypeRef;

/// Schema type with every name resolved to its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType<'s> {
    /// Scalar type.
    Scalar(&'s ScalarDef),
    /// Enum type.
    Enum(&'s EnumDef),
    /// List of the inner type.
    List(Box<SchemaType<'s>>),
    /// Non-null wrapper. Never wraps another `NonNull`.
    NonNull(Box<SchemaType<'s>>),
    /// Object or interface type.
    Object(&'s ObjectDef),
    /// Union type.
    Union(&'s UnionDef),
    /// Input object type.
    InputObject(&'s InputObjectDef),
}

impl<'s> SchemaType<'s> {
    /// Returns true if the outermost wrapper is `NonNull`.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Strips an outer `NonNull` wrapper, if present.
    #[must_use]
    pub fn nullable(&self) -> &SchemaType<'s> {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Strips every list and non-null wrapper.
    #[must_use]
    pub fn named(&self) -> &SchemaType<'s> {
        match self {
            Self::List(inner) | Self::NonNull(inner) => inner.named(),
            other => other,
        }
    }

    /// Returns the name of the innermost named type.
    #[must_use]
    pub fn name(&self) -> &'s str {
        match self {
            Self::Scalar(s) => &s.name,
            Self::Enum(e) => &e.name,
            Self::List(inner) | Self::NonNull(inner) => inner.name(),
            Self::Object(o) => &o.name,
            Self::Union(u) => &u.name,
            Self::InputObject(i) => &i.name,
        }
    }
}

impl Schema {
    /// Resolves a type reference against the schema.
    ///
    /// # Arguments
    /// * `type_ref` - Reference to resolve
    /// * `context` - Referencing definition, used in errors
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if a named type is not defined and
    /// `SchemaError::NestedNonNull` if a non-null wraps another non-null.
    pub fn resolve<'s>(
        &'s self,
        type_ref: &TypeRef,
        context: &str,
    ) -> Result<SchemaType<'s>, SchemaError> {
        match type_ref {
            TypeRef::Named(name) => self.resolve_named(name, context),
            TypeRef::List(inner) => Ok(SchemaType::List(Box::new(self.resolve(inner, context)?))),
            TypeRef::NonNull(inner) => {
                if inner.is_non_null() {
                    return Err(SchemaError::NestedNonNull {
                        context: context.to_string(),
                    });
                }
                Ok(SchemaType::NonNull(Box::new(self.resolve(inner, context)?)))
            }
        }
    }

    /// Resolves a bare type name against the schema.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if the type is not defined.
    pub fn resolve_named<'s>(
        &'s self,
        name: &str,
        context: &str,
    ) -> Result<SchemaType<'s>, SchemaError> {
        let type_def = self
            .get_type(name)
            .ok_or_else(|| SchemaError::type_not_found(name, context))?;
        Ok(match type_def {
            TypeDef::Scalar(s) => SchemaType::Scalar(s),
            TypeDef::Object(o) | TypeDef::Interface(o) => SchemaType::Object(o),
            TypeDef::Union(u) => SchemaType::Union(u),
            TypeDef::Enum(e) => SchemaType::Enum(e),
            TypeDef::InputObject(i) => SchemaType::InputObject(i),
        })
    }
}
