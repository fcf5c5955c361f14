//! Schema validation utilities.
//!
//! This module provides validation functions for GraphQL schemas to ensure
//! the invariants code generation relies on actually hold.

use crate::error::SchemaError;
use crate::types::{EnumDef, Schema, TypeDef, UnionDef};
use graphelm_core::TypeRef;
use std::collections::HashSet;

/// Validates a loaded schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_roots(schema)?;
    validate_types(schema)?;
    Ok(())
}

/// Validates that the root operation types exist and are object types.
fn validate_roots(schema: &Schema) -> Result<(), SchemaError> {
    let roots = [
        ("query", Some(&schema.query_type)),
        ("mutation", schema.mutation_type.as_ref()),
        ("subscription", schema.subscription_type.as_ref()),
    ];

    for (operation, name) in roots {
        let Some(name) = name else { continue };
        if !matches!(schema.get_type(name), Some(TypeDef::Object(_))) {
            return Err(SchemaError::InvalidRootType {
                operation: operation.to_string(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}

/// Validates all type definitions in the schema.
fn validate_types(schema: &Schema) -> Result<(), SchemaError> {
    for type_def in &schema.types {
        match type_def {
            TypeDef::Object(object) | TypeDef::Interface(object) => {
                for field in &object.fields {
                    let context = format!("{}.{}", object.name, field.name);
                    validate_type_ref(schema, &field.field_type, &context)?;
                    for argument in &field.arguments {
                        let context = format!("{context}({})", argument.name);
                        validate_type_ref(schema, &argument.value_type, &context)?;
                    }
                }
            }
            TypeDef::InputObject(input) => {
                for field in &input.fields {
                    let context = format!("{}.{}", input.name, field.name);
                    validate_type_ref(schema, &field.value_type, &context)?;
                }
            }
            TypeDef::Union(union_def) => validate_union(schema, union_def)?,
            TypeDef::Enum(enum_def) => validate_enum(enum_def)?,
            TypeDef::Scalar(_) => {}
        }
    }
    Ok(())
}

/// Validates a single type reference.
fn validate_type_ref(schema: &Schema, type_ref: &TypeRef, context: &str) -> Result<(), SchemaError> {
    match type_ref {
        TypeRef::Named(name) => {
            if !schema.has_type(name) {
                return Err(SchemaError::type_not_found(name, context));
            }
            Ok(())
        }
        TypeRef::List(inner) => validate_type_ref(schema, inner, context),
        TypeRef::NonNull(inner) => {
            if inner.is_non_null() {
                return Err(SchemaError::NestedNonNull {
                    context: context.to_string(),
                });
            }
            validate_type_ref(schema, inner, context)
        }
    }
}

/// Validates a union type definition.
fn validate_union(schema: &Schema, union_def: &UnionDef) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for member in &union_def.members {
        match schema.get_type(member) {
            Some(TypeDef::Object(_)) => {}
            Some(_) => {
                return Err(SchemaError::InvalidUnionMember {
                    union_name: union_def.name.clone(),
                    member: member.clone(),
                });
            }
            None => return Err(SchemaError::type_not_found(member, &union_def.name)),
        }

        if !seen.insert(member) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate member '{}' in union '{}'",
                    member, union_def.name
                ),
            });
        }
    }

    Ok(())
}

/// Validates an enum type definition.
fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for value in &enum_def.values {
        if !seen_names.insert(&value.name) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value name '{}' in enum '{}'",
                    value.name, enum_def.name
                ),
            });
        }
    }

    Ok(())
}
