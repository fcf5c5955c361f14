//! GraphQL query document parser.
//!
//! This module parses query documents with `graphql-parser` and converts the
//! borrowed parser AST into the owned [`Document`] model.

use crate::document::{
    Definition, Document, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, OperationKind, Selection, SelectionSet, Value, VariableDefinition,
};
use crate::error::{DocumentError, Result};
use crate::types::TypeRef;
use graphql_parser::query as gql;

/// Parses a GraphQL query document from a string.
///
/// # Arguments
/// * `source` - Query document text
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `DocumentError` if the text is not a valid executable document.
pub fn parse_document(source: &str) -> Result<Document> {
    let parsed = gql::parse_query::<String>(source)?;
    let mut document = Document::default();

    for definition in parsed.definitions {
        let converted = match definition {
            gql::Definition::Operation(op) => Definition::Operation(convert_operation(op)?),
            gql::Definition::Fragment(fragment) => {
                Definition::Fragment(convert_fragment(fragment)?)
            }
        };
        document.definitions.push(converted);
    }

    tracing::debug!(
        definitions = document.definitions.len(),
        "parsed query document"
    );
    Ok(document)
}

/// Converts an operation definition.
fn convert_operation(op: gql::OperationDefinition<'_, String>) -> Result<OperationDefinition> {
    let (name, kind, variables, selection_set, position) = match op {
        gql::OperationDefinition::SelectionSet(set) => {
            let position = set.span.0;
            (None, OperationKind::Query, Vec::new(), set, position)
        }
        gql::OperationDefinition::Query(q) => (
            q.name,
            OperationKind::Query,
            q.variable_definitions,
            q.selection_set,
            q.position,
        ),
        gql::OperationDefinition::Mutation(m) => (
            m.name,
            OperationKind::Mutation,
            m.variable_definitions,
            m.selection_set,
            m.position,
        ),
        gql::OperationDefinition::Subscription(s) => (
            s.name,
            OperationKind::Subscription,
            s.variable_definitions,
            s.selection_set,
            s.position,
        ),
    };

    let variables = variables
        .into_iter()
        .map(convert_variable)
        .collect::<Result<Vec<_>>>()?;

    Ok(OperationDefinition {
        name,
        kind,
        variables,
        selection_set: convert_selection_set(selection_set)?,
        position: position.into(),
    })
}

/// Converts a variable definition.
fn convert_variable(var: gql::VariableDefinition<'_, String>) -> Result<VariableDefinition> {
    let default_value = match var.default_value {
        Some(value) => Some(convert_value(value, &var.name)?),
        None => None,
    };

    Ok(VariableDefinition {
        var_type: convert_type(var.var_type),
        name: var.name,
        default_value,
    })
}

/// Converts a fragment definition.
fn convert_fragment(fragment: gql::FragmentDefinition<'_, String>) -> Result<FragmentDefinition> {
    let gql::TypeCondition::On(type_condition) = fragment.type_condition;

    Ok(FragmentDefinition {
        name: fragment.name,
        type_condition,
        selection_set: convert_selection_set(fragment.selection_set)?,
        position: fragment.position.into(),
    })
}

/// Converts a selection set, preserving order.
fn convert_selection_set(set: gql::SelectionSet<'_, String>) -> Result<SelectionSet> {
    let items = set
        .items
        .into_iter()
        .map(convert_selection)
        .collect::<Result<Vec<_>>>()?;
    Ok(SelectionSet { items })
}

fn convert_selection(selection: gql::Selection<'_, String>) -> Result<Selection> {
    Ok(match selection {
        gql::Selection::Field(field) => Selection::Field(convert_field(field)?),
        gql::Selection::FragmentSpread(spread) => Selection::FragmentSpread(FragmentSpread {
            fragment_name: spread.fragment_name,
            position: spread.position.into(),
        }),
        gql::Selection::InlineFragment(inline) => Selection::InlineFragment(InlineFragment {
            type_condition: inline.type_condition.map(|gql::TypeCondition::On(name)| name),
            selection_set: convert_selection_set(inline.selection_set)?,
            position: inline.position.into(),
        }),
    })
}

fn convert_field(field: gql::Field<'_, String>) -> Result<Field> {
    let conditional = field
        .directives
        .iter()
        .any(|directive| directive.name == "include" || directive.name == "skip");

    let mut arguments = Vec::with_capacity(field.arguments.len());
    for (name, value) in field.arguments {
        let value = convert_value(value, &name)?;
        arguments.push((name, value));
    }

    let selection_set = if field.selection_set.items.is_empty() {
        None
    } else {
        Some(convert_selection_set(field.selection_set)?)
    };

    Ok(Field {
        alias: field.alias,
        name: field.name,
        arguments,
        conditional,
        selection_set,
        position: field.position.into(),
    })
}

/// Converts a `graphql-parser` type into a [`TypeRef`].
///
/// Query and schema documents share the same type AST, so the schema loader
/// uses this as well.
pub fn convert_type(ty: gql::Type<'_, String>) -> TypeRef {
    match ty {
        gql::Type::NamedType(name) => TypeRef::Named(name),
        gql::Type::ListType(inner) => TypeRef::list(convert_type(*inner)),
        gql::Type::NonNullType(inner) => TypeRef::non_null(convert_type(*inner)),
    }
}

/// Converts a `graphql-parser` literal into a [`Value`].
///
/// # Errors
/// Returns `DocumentError::InvalidValue` for integers outside the `i64` range.
pub fn convert_value(value: gql::Value<'_, String>, context: &str) -> Result<Value> {
    Ok(match value {
        gql::Value::Variable(name) => Value::Variable(name),
        gql::Value::Int(number) => Value::Int(
            number
                .as_i64()
                .ok_or_else(|| DocumentError::invalid_value(context, "integer out of range"))?,
        ),
        gql::Value::Float(f) => Value::Float(f),
        gql::Value::String(s) => Value::String(s),
        gql::Value::Boolean(b) => Value::Boolean(b),
        gql::Value::Null => Value::Null,
        gql::Value::Enum(name) => Value::Enum(name),
        gql::Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| convert_value(item, context))
                .collect::<Result<Vec<_>>>()?,
        ),
        gql::Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, item)| Ok((key, convert_value(item, context)?)))
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}
