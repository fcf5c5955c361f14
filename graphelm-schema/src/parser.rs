//! GraphQL SDL schema parser.
//!
//! This module parses schema definition language documents into the
//! internal schema representation.

use crate::error::ParseError;
use crate::types::{
    EnumDef, EnumValue, FieldDef, InputObjectDef, InputValueDef, ObjectDef, ScalarDef, Schema,
    TypeDef, UnionDef,
};
use graphelm_core::parser::{convert_type, convert_value};
use graphelm_core::printer::print_value;
use graphql_parser::schema as sdl;

/// Default name of the query root type.
pub const DEFAULT_QUERY_TYPE: &str = "Query";
/// Default name of the mutation root type.
pub const DEFAULT_MUTATION_TYPE: &str = "Mutation";
/// Default name of the subscription root type.
pub const DEFAULT_SUBSCRIPTION_TYPE: &str = "Subscription";

/// Parses a GraphQL schema from SDL text.
///
/// # Arguments
/// * `source` - SDL schema content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the SDL is malformed or extends an unknown type.
pub fn parse_sdl(source: &str) -> Result<Schema, ParseError> {
    let document = sdl::parse_schema::<String>(source)?;

    let mut schema = Schema::new(DEFAULT_QUERY_TYPE);
    let mut root_declared = false;
    let mut extensions = Vec::new();

    for definition in document.definitions {
        match definition {
            sdl::Definition::SchemaDefinition(def) => {
                root_declared = true;
                if let Some(query) = def.query {
                    schema.query_type = query;
                }
                schema.mutation_type = def.mutation;
                schema.subscription_type = def.subscription;
            }
            sdl::Definition::TypeDefinition(def) => {
                schema.add_type(convert_type_definition(def)?);
            }
            sdl::Definition::TypeExtension(ext) => extensions.push(ext),
            sdl::Definition::DirectiveDefinition(_) => {}
        }
    }

    // Extensions may precede their base definition in the document.
    for ext in extensions {
        apply_extension(&mut schema, ext)?;
    }

    if !root_declared {
        if schema.has_type(DEFAULT_MUTATION_TYPE) {
            schema.mutation_type = Some(DEFAULT_MUTATION_TYPE.to_string());
        }
        if schema.has_type(DEFAULT_SUBSCRIPTION_TYPE) {
            schema.subscription_type = Some(DEFAULT_SUBSCRIPTION_TYPE.to_string());
        }
    }

    tracing::debug!(types = schema.types.len(), "parsed SDL schema");
    Ok(schema)
}

/// Converts a type definition.
fn convert_type_definition(def: sdl::TypeDefinition<'_, String>) -> Result<TypeDef, ParseError> {
    Ok(match def {
        sdl::TypeDefinition::Scalar(s) => {
            let mut scalar = ScalarDef::new(s.name);
            scalar.description = s.description;
            TypeDef::Scalar(scalar)
        }
        sdl::TypeDefinition::Object(o) => {
            let mut object = ObjectDef::new(o.name);
            object.description = o.description;
            object.interfaces = o.implements_interfaces;
            for field in o.fields {
                object.add_field(convert_field(field)?);
            }
            TypeDef::Object(object)
        }
        sdl::TypeDefinition::Interface(i) => {
            let mut interface = ObjectDef::new(i.name);
            interface.description = i.description;
            for field in i.fields {
                interface.add_field(convert_field(field)?);
            }
            TypeDef::Interface(interface)
        }
        sdl::TypeDefinition::Union(u) => {
            let mut union_def = UnionDef::new(u.name);
            union_def.description = u.description;
            union_def.members = u.types;
            TypeDef::Union(union_def)
        }
        sdl::TypeDefinition::Enum(e) => {
            let mut enum_def = EnumDef::new(e.name);
            enum_def.description = e.description;
            for value in e.values {
                enum_def.add_value(convert_enum_value(value));
            }
            TypeDef::Enum(enum_def)
        }
        sdl::TypeDefinition::InputObject(i) => {
            let mut input = InputObjectDef::new(i.name);
            input.description = i.description;
            for field in i.fields {
                input.fields.push(convert_input_value(field)?);
            }
            TypeDef::InputObject(input)
        }
    })
}

/// Merges a type extension into its base definition.
fn apply_extension(
    schema: &mut Schema,
    ext: sdl::TypeExtension<'_, String>,
) -> Result<(), ParseError> {
    let name = extension_name(&ext).to_string();
    let Some(target) = schema.get_type_mut(&name) else {
        return Err(ParseError::UnknownExtension { name });
    };

    match (target, ext) {
        (TypeDef::Scalar(_), sdl::TypeExtension::Scalar(_)) => {}
        (TypeDef::Object(object), sdl::TypeExtension::Object(o)) => {
            object.interfaces.extend(o.implements_interfaces);
            for field in o.fields {
                object.add_field(convert_field(field)?);
            }
        }
        (TypeDef::Interface(interface), sdl::TypeExtension::Interface(i)) => {
            for field in i.fields {
                interface.add_field(convert_field(field)?);
            }
        }
        (TypeDef::Union(union_def), sdl::TypeExtension::Union(u)) => {
            union_def.members.extend(u.types);
        }
        (TypeDef::Enum(enum_def), sdl::TypeExtension::Enum(e)) => {
            for value in e.values {
                enum_def.add_value(convert_enum_value(value));
            }
        }
        (TypeDef::InputObject(input), sdl::TypeExtension::InputObject(i)) => {
            for field in i.fields {
                input.fields.push(convert_input_value(field)?);
            }
        }
        (target, _) => {
            return Err(ParseError::invalid_structure(format!(
                "extension of {} '{}' has a different kind",
                target.kind(),
                name
            )));
        }
    }

    Ok(())
}

fn extension_name<'a>(ext: &'a sdl::TypeExtension<'_, String>) -> &'a str {
    match ext {
        sdl::TypeExtension::Scalar(s) => &s.name,
        sdl::TypeExtension::Object(o) => &o.name,
        sdl::TypeExtension::Interface(i) => &i.name,
        sdl::TypeExtension::Union(u) => &u.name,
        sdl::TypeExtension::Enum(e) => &e.name,
        sdl::TypeExtension::InputObject(i) => &i.name,
    }
}

fn convert_field(field: sdl::Field<'_, String>) -> Result<FieldDef, ParseError> {
    let deprecation = deprecation_reason(&field.directives);
    let mut def = FieldDef::new(field.name, convert_type(field.field_type));
    def.description = field.description;
    def.deprecation = deprecation;
    for argument in field.arguments {
        def.arguments.push(convert_input_value(argument)?);
    }
    Ok(def)
}

fn convert_input_value(value: sdl::InputValue<'_, String>) -> Result<InputValueDef, ParseError> {
    let default_value = match value.default_value {
        Some(default) => Some(print_value(&convert_value(default, &value.name).map_err(
            |err| ParseError::invalid_structure(err.to_string()),
        )?)),
        None => None,
    };
    let mut def = InputValueDef::new(value.name, convert_type(value.value_type));
    def.default_value = default_value;
    Ok(def)
}

fn convert_enum_value(value: sdl::EnumValue<'_, String>) -> EnumValue {
    let mut enum_value = EnumValue::new(value.name);
    enum_value.description = value.description;
    enum_value.deprecation = deprecation_reason(&value.directives);
    enum_value
}

/// Extracts the `@deprecated(reason:)` text, if the directive is present.
fn deprecation_reason(directives: &[sdl::Directive<'_, String>]) -> Option<String> {
    let directive = directives.iter().find(|d| d.name == "deprecated")?;
    let reason = directive
        .arguments
        .iter()
        .find_map(|(name, value)| match (name.as_str(), value) {
            ("reason", sdl::Value::String(reason)) => Some(reason.clone()),
            _ => None,
        });
    Some(reason.unwrap_or_else(|| "No longer supported".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphelm_core::TypeRef;

    const STAR_WARS: &str = r#"
        schema { query: Root mutation: Ops }

        type Root {
            hero(episode: Episode = EMPIRE): Character
            search(text: String!): [SearchResult]
        }

        type Ops { rate(stars: Int!): Boolean }

        interface Character { id: ID! name: String }

        type Human implements Character { id: ID! name: String homePlanet: String }
        type Droid implements Character { id: ID! name: String primaryFunction: String @deprecated }

        union SearchResult = Human | Droid

        enum Episode { NEWHOPE EMPIRE JEDI }

        input ReviewInput { stars: Int! commentary: String }

        scalar DateTime
    "#;

    #[test]
    fn test_parse_sdl_root_types() {
        let schema = parse_sdl(STAR_WARS).expect("Failed to parse");
        assert_eq!(schema.query_type, "Root");
        assert_eq!(schema.mutation_type.as_deref(), Some("Ops"));
        assert!(schema.subscription_type.is_none());
    }

    #[test]
    fn test_parse_sdl_objects_and_fields() {
        let schema = parse_sdl(STAR_WARS).expect("Failed to parse");
        let root = schema.get_object("Root").expect("Root");
        let hero = root.field("hero").expect("hero");
        assert_eq!(hero.field_type, TypeRef::named("Character"));
        assert_eq!(hero.arguments[0].default_value.as_deref(), Some("EMPIRE"));

        let search = root.field("search").expect("search");
        assert_eq!(search.field_type.to_string(), "[SearchResult]");

        let human = schema.get_object("Human").expect("Human");
        assert_eq!(human.interfaces, vec!["Character".to_string()]);
        assert!(schema.get_object("Character").is_some());
    }

    #[test]
    fn test_parse_sdl_union_enum_input_scalar() {
        let schema = parse_sdl(STAR_WARS).expect("Failed to parse");

        match schema.get_type("SearchResult") {
            Some(TypeDef::Union(u)) => assert_eq!(u.members, vec!["Human", "Droid"]),
            other => panic!("expected union, got {other:?}"),
        }
        match schema.get_type("Episode") {
            Some(TypeDef::Enum(e)) => {
                assert_eq!(e.value_names().collect::<Vec<_>>(), vec!["NEWHOPE", "EMPIRE", "JEDI"]);
            }
            other => panic!("expected enum, got {other:?}"),
        }
        assert!(matches!(schema.get_type("ReviewInput"), Some(TypeDef::InputObject(_))));
        assert!(matches!(schema.get_type("DateTime"), Some(TypeDef::Scalar(_))));
    }

    #[test]
    fn test_parse_sdl_deprecation() {
        let schema = parse_sdl(STAR_WARS).expect("Failed to parse");
        let droid = schema.get_object("Droid").expect("Droid");
        assert_eq!(
            droid.field("primaryFunction").and_then(|f| f.deprecation.as_deref()),
            Some("No longer supported")
        );
    }

    #[test]
    fn test_default_root_names() {
        let schema = parse_sdl("type Query { a: Int } type Mutation { b: Int }")
            .expect("Failed to parse");
        assert_eq!(schema.query_type, "Query");
        assert_eq!(schema.mutation_type.as_deref(), Some("Mutation"));
    }

    #[test]
    fn test_type_extensions_are_merged() {
        let schema = parse_sdl(
            r#"
            extend type Query { b: Int }
            type Query { a: Int }
            enum Color { RED }
            extend enum Color { GREEN }
            "#,
        )
        .expect("Failed to parse");
        let query = schema.get_object("Query").expect("Query");
        assert!(query.field("a").is_some());
        assert!(query.field("b").is_some());
        match schema.get_type("Color") {
            Some(TypeDef::Enum(e)) => assert_eq!(e.values.len(), 2),
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_extension_of_unknown_type() {
        let err = parse_sdl("extend type Nope { a: Int }").unwrap_err();
        assert!(matches!(err, ParseError::UnknownExtension { name } if name == "Nope"));
    }

    #[test]
    fn test_malformed_sdl() {
        let result = parse_sdl("type Query {");
        assert!(matches!(result, Err(ParseError::Sdl(_))));

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("schema parse error: "), "{message}");
        assert_eq!(message.matches("parse error").count(), 1, "{message}");
    }
}
