//! Schema type to Elm type resolution.

use crate::elm::decoder::Primitive;
use crate::elm::encoders::{EncoderExpr, InputType, ObjectField};
use crate::elm::enums::enum_decoder_name;
use crate::elm::types::ElmType;
use crate::error::CodegenError;
use graphelm_core::naming::elm_safe_name;
use graphelm_core::{BuiltinScalar, TypeRef};
use graphelm_schema::{Schema, SchemaType};

/// Custom scalars decoded as strings without a log entry.
const KNOWN_STRING_SCALARS: &[&str] = &["DateTime"];

/// Leaf decoder and the list layers around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLeaf {
    /// Decoder primitive.
    pub primitive: Primitive,
    /// Elm type of one item.
    pub elm_type: ElmType,
    /// Number of list layers unwrapped.
    pub list_depth: usize,
}

/// Counts the list layers of a type, looking through `NonNull` wrappers.
#[must_use]
pub fn list_depth(ty: &SchemaType<'_>) -> usize {
    match ty {
        SchemaType::List(inner) => 1 + list_depth(inner),
        SchemaType::NonNull(inner) => list_depth(inner),
        _ => 0,
    }
}

/// Maps schema types to Elm types, decoders and encoders.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'s> {
    schema: &'s Schema,
}

impl<'s> TypeResolver<'s> {
    /// Creates a resolver over the given schema.
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Resolves a leaf type to its decoder primitive.
    ///
    /// List layers are unwrapped and counted; `NonNull` wrappers inside the
    /// outermost one are dropped.
    ///
    /// # Errors
    /// Returns `CodegenError::NotALeafType` for object, interface, union and
    /// input object types.
    pub fn resolve_leaf(&self, ty: &SchemaType<'_>) -> Result<ResolvedLeaf, CodegenError> {
        let depth = list_depth(ty);
        let (primitive, elm_type) = match ty.named() {
            SchemaType::Scalar(scalar) => scalar_primitive(&scalar.name),
            SchemaType::Enum(enum_def) => (
                Primitive::Enum {
                    name: enum_def.name.clone(),
                    decoder: enum_decoder_name(&enum_def.name),
                },
                ElmType::Enum(enum_def.name.clone()),
            ),
            other => {
                return Err(CodegenError::NotALeafType {
                    name: other.name().to_string(),
                });
            }
        };

        Ok(ResolvedLeaf {
            primitive,
            elm_type,
            list_depth: depth,
        })
    }

    /// Resolves a variable type to its Elm type and JSON encoder.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` for unknown types,
    /// `CodegenError::RecursiveInputType` for input objects that contain
    /// themselves and `CodegenError::UnknownType` for output types.
    pub fn resolve_input(&self, type_ref: &TypeRef, context: &str) -> Result<InputType, CodegenError> {
        let ty = self.schema.resolve(type_ref, context)?;
        self.input_type(&ty, &mut Vec::new())
    }

    fn input_type(
        &self,
        ty: &SchemaType<'s>,
        visiting: &mut Vec<&'s str>,
    ) -> Result<InputType, CodegenError> {
        let (inner, nullable) = match ty {
            SchemaType::NonNull(inner) => (inner.as_ref(), false),
            other => (other, true),
        };

        let input = match inner {
            SchemaType::List(item) => {
                let item = self.input_type(item, visiting)?;
                InputType {
                    elm_type: item.elm_type.list(),
                    encoder: EncoderExpr::List(Box::new(item.encoder)),
                }
            }
            SchemaType::Scalar(scalar) => {
                let (primitive, elm_type) = scalar_primitive(&scalar.name);
                let encoder = match primitive {
                    Primitive::Int => EncoderExpr::Int,
                    Primitive::Float => EncoderExpr::Float,
                    Primitive::Bool => EncoderExpr::Bool,
                    _ => EncoderExpr::String,
                };
                InputType { elm_type, encoder }
            }
            SchemaType::Enum(enum_def) => InputType {
                elm_type: ElmType::Enum(enum_def.name.clone()),
                encoder: EncoderExpr::Enum(enum_def.name.clone()),
            },
            SchemaType::InputObject(input) => {
                let input = *input;
                if visiting.contains(&input.name.as_str()) {
                    return Err(CodegenError::RecursiveInputType {
                        name: input.name.clone(),
                    });
                }
                visiting.push(&input.name);
                let mut record = Vec::with_capacity(input.fields.len());
                let mut fields = Vec::with_capacity(input.fields.len());
                for field in &input.fields {
                    let context = format!("{}.{}", input.name, field.name);
                    let field_ty = self.schema.resolve(&field.value_type, &context)?;
                    let resolved = self.input_type(&field_ty, visiting)?;
                    let elm_field = elm_safe_name(&field.name);
                    record.push((elm_field.clone(), resolved.elm_type));
                    fields.push(ObjectField {
                        wire_name: field.name.clone(),
                        field: elm_field,
                        encoder: resolved.encoder,
                    });
                }
                visiting.pop();
                InputType {
                    elm_type: ElmType::Record(record),
                    encoder: EncoderExpr::Object(fields),
                }
            }
            SchemaType::NonNull(_) | SchemaType::Object(_) | SchemaType::Union(_) => {
                return Err(CodegenError::unknown_type(inner.name()));
            }
        };

        if nullable {
            Ok(InputType {
                elm_type: input.elm_type.maybe(),
                encoder: EncoderExpr::Maybe(Box::new(input.encoder)),
            })
        } else {
            Ok(input)
        }
    }
}

/// Maps a scalar name to its decoder primitive and Elm type.
fn scalar_primitive(name: &str) -> (Primitive, ElmType) {
    match BuiltinScalar::from_name(name) {
        Some(BuiltinScalar::Int) => (Primitive::Int, ElmType::Int),
        Some(BuiltinScalar::Float) => (Primitive::Float, ElmType::Float),
        Some(BuiltinScalar::Boolean) => (Primitive::Bool, ElmType::Bool),
        Some(BuiltinScalar::String | BuiltinScalar::Id) => (Primitive::String, ElmType::String),
        None => {
            if !KNOWN_STRING_SCALARS.contains(&name) {
                tracing::debug!(scalar = name, "decoding custom scalar as string");
            }
            (Primitive::String, ElmType::String)
        }
    }
}
