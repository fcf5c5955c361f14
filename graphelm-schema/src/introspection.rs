//! Introspection JSON schema loader.
//!
//! Reads the result of the standard GraphQL introspection query, either as a
//! full response (`{"data": {"__schema": …}}`), as `{"__schema": …}` or as a
//! bare schema object.

use crate::error::ParseError;
use crate::parser::parse_sdl;
use crate::types::{
    EnumDef, EnumValue, FieldDef, InputObjectDef, InputValueDef, ObjectDef, ScalarDef, Schema,
    TypeDef, UnionDef,
};
use graphelm_core::TypeRef;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Response { data: SchemaWrapper },
    Wrapped(SchemaWrapper),
    Bare(IntrospectionSchema),
}

#[derive(Debug, Deserialize)]
struct SchemaWrapper {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: NamedRef,
    mutation_type: Option<NamedRef>,
    subscription_type: Option<NamedRef>,
    types: Vec<FullType>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullType {
    kind: String,
    name: String,
    description: Option<String>,
    fields: Option<Vec<IntrospectionField>>,
    input_fields: Option<Vec<IntrospectionInputValue>>,
    interfaces: Option<Vec<NamedRef>>,
    enum_values: Option<Vec<IntrospectionEnumValue>>,
    possible_types: Option<Vec<NamedRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    field_type: IntrospectionTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    value_type: IntrospectionTypeRef,
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}

/// Parses a schema from an introspection query result.
///
/// # Arguments
/// * `source` - Introspection JSON text
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a type reference is
/// incomplete.
pub fn parse_introspection(source: &str) -> Result<Schema, ParseError> {
    let introspection = match serde_json::from_str::<Envelope>(source)? {
        Envelope::Response { data } => data.schema,
        Envelope::Wrapped(wrapper) => wrapper.schema,
        Envelope::Bare(schema) => schema,
    };

    let mut schema = Schema::new(introspection.query_type.name);
    schema.mutation_type = introspection.mutation_type.map(|t| t.name);
    schema.subscription_type = introspection.subscription_type.map(|t| t.name);

    for full_type in introspection.types {
        if full_type.name.starts_with("__") {
            continue;
        }
        if let Some(type_def) = convert_full_type(full_type)? {
            schema.add_type(type_def);
        }
    }

    tracing::debug!(types = schema.types.len(), "parsed introspection schema");
    Ok(schema)
}

/// Loads a schema file, choosing the format by extension.
///
/// Files ending in `.json` are read as introspection results; anything else
/// is read as SDL.
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, or the format's
/// parse error.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<Schema, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    tracing::debug!(path = %path.display(), is_json, "loading schema");
    if is_json {
        parse_introspection(&source)
    } else {
        parse_sdl(&source)
    }
}

fn convert_full_type(full_type: FullType) -> Result<Option<TypeDef>, ParseError> {
    let name = full_type.name;
    let description = full_type.description;

    let type_def = match full_type.kind.as_str() {
        "SCALAR" => {
            let mut scalar = ScalarDef::new(name);
            scalar.description = description;
            TypeDef::Scalar(scalar)
        }
        "OBJECT" | "INTERFACE" => {
            let mut object = ObjectDef::new(&name);
            object.description = description;
            object.interfaces = full_type
                .interfaces
                .unwrap_or_default()
                .into_iter()
                .map(|i| i.name)
                .collect();
            for field in full_type.fields.unwrap_or_default() {
                object.add_field(convert_field(&name, field)?);
            }
            if full_type.kind == "OBJECT" {
                TypeDef::Object(object)
            } else {
                TypeDef::Interface(object)
            }
        }
        "UNION" => {
            let mut union_def = UnionDef::new(name);
            union_def.description = description;
            union_def.members = full_type
                .possible_types
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.name)
                .collect();
            TypeDef::Union(union_def)
        }
        "ENUM" => {
            let mut enum_def = EnumDef::new(name);
            enum_def.description = description;
            for value in full_type.enum_values.unwrap_or_default() {
                let mut enum_value = EnumValue::new(value.name);
                enum_value.description = value.description;
                if value.is_deprecated {
                    enum_value.deprecation = Some(value.deprecation_reason.unwrap_or_default());
                }
                enum_def.add_value(enum_value);
            }
            TypeDef::Enum(enum_def)
        }
        "INPUT_OBJECT" => {
            let mut input = InputObjectDef::new(&name);
            input.description = description;
            for field in full_type.input_fields.unwrap_or_default() {
                input.fields.push(convert_input_value(&name, field)?);
            }
            TypeDef::InputObject(input)
        }
        other => {
            tracing::warn!(kind = other, name = %name, "skipping introspection type of unknown kind");
            return Ok(None);
        }
    };

    Ok(Some(type_def))
}

fn convert_field(owner: &str, field: IntrospectionField) -> Result<FieldDef, ParseError> {
    let context = format!("{owner}.{}", field.name);
    let mut def = FieldDef::new(&field.name, convert_type_ref(&context, field.field_type)?);
    def.description = field.description;
    if field.is_deprecated {
        def.deprecation = Some(field.deprecation_reason.unwrap_or_default());
    }
    for arg in field.args {
        def.arguments.push(convert_input_value(&context, arg)?);
    }
    Ok(def)
}

fn convert_input_value(
    owner: &str,
    value: IntrospectionInputValue,
) -> Result<InputValueDef, ParseError> {
    let context = format!("{owner}.{}", value.name);
    let mut def = InputValueDef::new(value.name, convert_type_ref(&context, value.value_type)?);
    def.default_value = value.default_value;
    Ok(def)
}

fn convert_type_ref(context: &str, type_ref: IntrospectionTypeRef) -> Result<TypeRef, ParseError> {
    match type_ref.kind.as_str() {
        "NON_NULL" | "LIST" => {
            let Some(inner) = type_ref.of_type else {
                return Err(ParseError::invalid_type_ref(
                    context,
                    format!("{} without ofType", type_ref.kind),
                ));
            };
            let inner = convert_type_ref(context, *inner)?;
            if type_ref.kind == "LIST" {
                Ok(TypeRef::list(inner))
            } else {
                Ok(TypeRef::NonNull(Box::new(inner)))
            }
        }
        _ => type_ref
            .name
            .map(TypeRef::Named)
            .ok_or_else(|| ParseError::invalid_type_ref(context, "named type without a name")),
    }
}
