//! Executable GraphQL document model.
//!
//! Owned, read-only representation of the operations and fragments of a
//! query file. Selection order is preserved everywhere since it decides the
//! order of generated record fields.

use crate::types::TypeRef;

/// Name used for operations declared without a name.
pub const ANONYMOUS_QUERY: &str = "AnonymousQuery";

/// Source position (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    /// Line number.
    pub line: usize,
    /// Column number.
    pub column: usize,
}

impl From<graphql_parser::Pos> for Pos {
    fn from(pos: graphql_parser::Pos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// A parsed query document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level definitions in source order.
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Iterates over the operations of the document.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    /// Iterates over the fragments of the document.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        })
    }
}

/// Top-level definition.
#[derive(Debug, Clone)]
pub enum Definition {
    /// Query, mutation or subscription.
    Operation(OperationDefinition),
    /// Named fragment.
    Fragment(FragmentDefinition),
}

impl Definition {
    /// Returns the definition name, falling back to [`ANONYMOUS_QUERY`].
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Operation(op) => op.name(),
            Self::Fragment(fragment) => &fragment.name,
        }
    }
}

/// Operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// `query`
    Query,
    /// `mutation`
    Mutation,
    /// `subscription`
    Subscription,
}

impl OperationKind {
    /// Returns the GraphQL keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// Operation definition.
#[derive(Debug, Clone)]
pub struct OperationDefinition {
    /// Declared name, if any.
    pub name: Option<String>,
    /// Operation kind.
    pub kind: OperationKind,
    /// Variable declarations in source order.
    pub variables: Vec<VariableDefinition>,
    /// Root selection set.
    pub selection_set: SelectionSet,
    /// Source position.
    pub position: Pos,
}

impl OperationDefinition {
    /// Returns the operation name or [`ANONYMOUS_QUERY`].
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_QUERY)
    }
}

/// Variable declaration of an operation.
#[derive(Debug, Clone)]
pub struct VariableDefinition {
    /// Variable name without the leading `$`.
    pub name: String,
    /// Declared type.
    pub var_type: TypeRef,
    /// Default value.
    pub default_value: Option<Value>,
}

/// Fragment definition.
#[derive(Debug, Clone)]
pub struct FragmentDefinition {
    /// Fragment name.
    pub name: String,
    /// Type condition (`on Type`).
    pub type_condition: String,
    /// Selection set.
    pub selection_set: SelectionSet,
    /// Source position.
    pub position: Pos,
}

/// Ordered selection set.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    /// Selections in source order.
    pub items: Vec<Selection>,
}

impl SelectionSet {
    /// Returns true if the selection set has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single selection.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Field selection.
    Field(Field),
    /// `...FragmentName`
    FragmentSpread(FragmentSpread),
    /// `... on Type { }`
    InlineFragment(InlineFragment),
}

impl Selection {
    /// Returns the selection kind name, as used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Field(_) => "Field",
            Self::FragmentSpread(_) => "FragmentSpread",
            Self::InlineFragment(_) => "InlineFragment",
        }
    }
}

/// Field selection.
#[derive(Debug, Clone)]
pub struct Field {
    /// Alias, if any.
    pub alias: Option<String>,
    /// Schema field name.
    pub name: String,
    /// Arguments in source order.
    pub arguments: Vec<(String, Value)>,
    /// True when the field carries `@include` or `@skip`.
    pub conditional: bool,
    /// Nested selection set (`None` for leaf fields).
    pub selection_set: Option<SelectionSet>,
    /// Source position.
    pub position: Pos,
}

impl Field {
    /// Returns the name the field has in the result (alias or name).
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Fragment spread.
#[derive(Debug, Clone)]
pub struct FragmentSpread {
    /// Referenced fragment name.
    pub fragment_name: String,
    /// Source position.
    pub position: Pos,
}

/// Inline fragment.
#[derive(Debug, Clone)]
pub struct InlineFragment {
    /// Type condition, if any.
    pub type_condition: Option<String>,
    /// Selection set.
    pub selection_set: SelectionSet,
    /// Source position.
    pub position: Pos,
}

/// Input value literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `$name`
    Variable(String),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// `null`
    Null,
    /// Enum literal.
    Enum(String),
    /// List literal.
    List(Vec<Value>),
    /// Object literal, in source order.
    Object(Vec<(String, Value)>),
}
