//! Query document walker.
//!
//! [`Generator`] walks one operation or fragment definition together with
//! the schema and produces, in a single pass, the Elm result type and the
//! matching decoder. Field names, field types and field decoders are read
//! off the same [`Shape`], so the constructor argument order always matches
//! the decoder application order.

use crate::elm::decoder::{Constructor, DecoderExpr, Primitive};
use crate::elm::encoders::Variable;
use crate::elm::types::ElmType;
use crate::error::CodegenError;
use crate::resolver::{TypeResolver, list_depth};
use crate::union::VariantRegistry;
use graphelm_core::naming::{capitalize, elm_safe_name};
use graphelm_core::printer::{print_fragment, print_operation_document};
use graphelm_core::{
    Definition, Document, Field, FragmentDefinition, FragmentIndex, OperationDefinition,
    OperationKind, Selection, SelectionSet,
};
use graphelm_schema::{ObjectDef, Schema, SchemaType};

/// Name of the introspection field every object answers.
pub const TYPENAME_FIELD: &str = "__typename";

/// Kind of a generated definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Query operation.
    Query,
    /// Mutation operation.
    Mutation,
    /// Fragment definition.
    Fragment,
}

/// Result of walking one definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDefinition {
    /// Definition kind.
    pub kind: DefinitionKind,
    /// GraphQL name (`AnonymousQuery` for unnamed operations).
    pub name: String,
    /// Elm type alias name.
    pub type_name: String,
    /// Record type of the result.
    pub result_type: ElmType,
    /// Decoder of the result.
    pub decoder: DecoderExpr,
    /// Operation variables, in declaration order.
    pub variables: Vec<Variable>,
    /// GraphQL text sent to the server: the operation plus the fragments it
    /// spreads, or the fragment itself.
    pub document: String,
}

impl GeneratedDefinition {
    /// Returns true for query and mutation definitions.
    #[must_use]
    pub const fn is_operation(&self) -> bool {
        !matches!(self.kind, DefinitionKind::Fragment)
    }
}

/// One output field of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    /// Elm-safe output name (alias if present).
    pub name: String,
    /// Elm type of the field.
    pub elm_type: ElmType,
    /// Decoder reading the field from its parent object.
    pub decoder: DecoderExpr,
}

/// Ordered, deduplicated output fields of a selection set with its
/// fragment spreads expanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    entries: Vec<ShapeEntry>,
}

impl Shape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an entry with this output name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ShapeEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ShapeEntry] {
        &self.entries
    }

    /// Returns the output names in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Returns the record fields of this shape.
    #[must_use]
    pub fn record_fields(&self) -> Vec<(String, ElmType)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.elm_type.clone()))
            .collect()
    }

    /// Consumes the shape into a record type and its decoder.
    ///
    /// The decoder applies a named alias constructor when `alias` is given,
    /// and a synthesized shape lambda otherwise.
    #[must_use]
    pub fn into_record(self, alias: Option<String>) -> (ElmType, DecoderExpr) {
        let record = self.record_fields();
        let constructor = Constructor::Record {
            alias,
            fields: self.names(),
        };
        let decoders = self.entries.into_iter().map(|e| e.decoder).collect();
        (ElmType::Record(record), DecoderExpr::construct(constructor, decoders))
    }
}

/// Fragment being expanded, linked to the fragments enclosing it.
#[derive(Debug)]
pub(crate) struct Expansion<'a> {
    fragment: &'a str,
    outer: Option<&'a Expansion<'a>>,
}

/// Immutable walk context, passed by value into each recursive call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    /// Type whose fields are being selected.
    pub(crate) parent: &'a ObjectDef,
    expanding: Option<&'a Expansion<'a>>,
}

impl<'a> Scope<'a> {
    fn root(parent: &'a ObjectDef, expanding: Option<&'a Expansion<'a>>) -> Self {
        Self { parent, expanding }
    }

    /// Returns a scope selecting fields of another type.
    pub(crate) fn at(self, parent: &'a ObjectDef) -> Self {
        Self { parent, ..self }
    }

    /// Returns a scope inside the expansion of `link`.
    fn expanding<'b>(self, link: &'b Expansion<'b>, parent: &'b ObjectDef) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            parent,
            expanding: Some(link),
        }
    }

    /// Returns the expansion path, outermost first, if `fragment` is already
    /// being expanded.
    fn cycle(&self, fragment: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut found = false;
        let mut link = self.expanding;
        while let Some(expansion) = link {
            path.push(expansion.fragment.to_string());
            found |= expansion.fragment == fragment;
            link = expansion.outer;
        }
        if !found {
            return None;
        }
        path.reverse();
        let start = path.iter().position(|name| name == fragment).unwrap_or(0);
        let mut cycle = path.split_off(start);
        cycle.push(fragment.to_string());
        Some(cycle)
    }
}

/// Generates Elm types and decoders for query documents.
#[derive(Debug)]
pub struct Generator<'s> {
    schema: &'s Schema,
    resolver: TypeResolver<'s>,
    pub(crate) variants: VariantRegistry,
}

impl<'s> Generator<'s> {
    /// Creates a new generator over a schema.
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            resolver: TypeResolver::new(schema),
            variants: VariantRegistry::from_schema(schema),
        }
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Generates every definition of a document, in document order.
    ///
    /// # Errors
    /// Returns the first `CodegenError` encountered; no partial output is
    /// produced.
    pub fn generate_document(
        &self,
        document: &Document,
    ) -> Result<Vec<GeneratedDefinition>, CodegenError> {
        let fragments = FragmentIndex::build(document)?;
        document
            .definitions
            .iter()
            .map(|definition| self.generate_definition(definition, &fragments))
            .collect()
    }

    /// Generates the result type and decoder of a single definition.
    ///
    /// # Errors
    /// Returns `CodegenError` if the definition cannot be generated.
    pub fn generate_definition(
        &self,
        definition: &Definition,
        fragments: &FragmentIndex,
    ) -> Result<GeneratedDefinition, CodegenError> {
        tracing::debug!(name = definition.name(), "generating definition");
        match definition {
            Definition::Operation(op) => self.generate_operation(op, fragments),
            Definition::Fragment(fragment) => self.generate_fragment(fragment, fragments),
        }
    }

    fn generate_operation(
        &self,
        op: &OperationDefinition,
        fragments: &FragmentIndex,
    ) -> Result<GeneratedDefinition, CodegenError> {
        let (kind, root) = match op.kind {
            OperationKind::Query => (DefinitionKind::Query, Some(&self.schema.query_type)),
            OperationKind::Mutation => (DefinitionKind::Mutation, self.schema.mutation_type.as_ref()),
            OperationKind::Subscription => {
                return Err(CodegenError::UnsupportedOperation {
                    kind: op.kind.keyword().to_string(),
                });
            }
        };
        let root = root.ok_or_else(|| CodegenError::MissingRootType {
            operation: op.kind.keyword().to_string(),
        })?;
        let root = self.object(root)?;

        let name = op.name().to_string();
        let type_name = capitalize(&name);

        let shape = self.walk_selection_set(Scope::root(root, None), &op.selection_set, fragments)?;
        let (result_type, decoder) = shape.into_record(Some(type_name.clone()));

        let variables = op
            .variables
            .iter()
            .map(|var| {
                let input = self
                    .resolver
                    .resolve_input(&var.var_type, &format!("${}", var.name))?;
                Ok(Variable {
                    name: var.name.clone(),
                    field: elm_safe_name(&var.name),
                    input,
                })
            })
            .collect::<Result<Vec<_>, CodegenError>>()?;

        Ok(GeneratedDefinition {
            kind,
            name,
            type_name,
            result_type,
            decoder,
            variables,
            document: print_operation_document(op, fragments),
        })
    }

    fn generate_fragment(
        &self,
        fragment: &FragmentDefinition,
        fragments: &FragmentIndex,
    ) -> Result<GeneratedDefinition, CodegenError> {
        let root = self.object(&fragment.type_condition)?;
        let link = Expansion {
            fragment: &fragment.name,
            outer: None,
        };

        let shape = self.walk_selection_set(
            Scope::root(root, Some(&link)),
            &fragment.selection_set,
            fragments,
        )?;
        let (result_type, decoder) = shape.into_record(None);

        Ok(GeneratedDefinition {
            kind: DefinitionKind::Fragment,
            name: fragment.name.clone(),
            type_name: capitalize(&fragment.name),
            result_type,
            decoder,
            variables: Vec::new(),
            document: print_fragment(fragment),
        })
    }

    /// Looks up an object or interface type.
    pub(crate) fn object(&self, name: &str) -> Result<&'s ObjectDef, CodegenError> {
        self.schema
            .get_object(name)
            .ok_or_else(|| CodegenError::unknown_type(name))
    }

    /// Walks a selection set into a fresh shape.
    pub(crate) fn walk_selection_set(
        &self,
        scope: Scope<'_>,
        set: &SelectionSet,
        fragments: &FragmentIndex,
    ) -> Result<Shape, CodegenError> {
        let mut shape = Shape::new();
        self.expand_into(scope, set, fragments, &mut shape)?;
        Ok(shape)
    }

    /// Walks a selection set, appending its fields to `shape`.
    ///
    /// Fragment spreads are expanded inline against their type condition.
    /// A field whose output name is already in the shape is skipped.
    pub(crate) fn expand_into(
        &self,
        scope: Scope<'_>,
        set: &SelectionSet,
        fragments: &FragmentIndex,
        shape: &mut Shape,
    ) -> Result<(), CodegenError> {
        for selection in &set.items {
            match selection {
                Selection::Field(field) => {
                    let output = elm_safe_name(field.response_key());
                    if shape.contains(&output) {
                        tracing::trace!(field = %output, "skipping duplicate field");
                        continue;
                    }
                    let entry = self.walk_field(scope, field, output, fragments)?;
                    shape.push(entry);
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    if let Some(path) = scope.cycle(name) {
                        return Err(CodegenError::FragmentCycle { path });
                    }
                    let fragment = fragments
                        .get(name)
                        .ok_or_else(|| CodegenError::UnknownFragment {
                            name: name.to_string(),
                        })?;
                    let parent = self.object(&fragment.type_condition)?;
                    let link = Expansion {
                        fragment: name,
                        outer: scope.expanding,
                    };
                    self.expand_into(
                        scope.expanding(&link, parent),
                        &fragment.selection_set,
                        fragments,
                        shape,
                    )?;
                }
                Selection::InlineFragment(_) => {
                    return Err(CodegenError::InlineFragmentOutsideUnion);
                }
            }
        }
        Ok(())
    }

    fn walk_field(
        &self,
        scope: Scope<'_>,
        field: &Field,
        output: String,
        fragments: &FragmentIndex,
    ) -> Result<ShapeEntry, CodegenError> {
        tracing::trace!(parent = %scope.parent.name, field = %field.name, "walking field");

        if field.name == TYPENAME_FIELD {
            let decoder = DecoderExpr::field(TYPENAME_FIELD, DecoderExpr::Primitive(Primitive::String));
            return Ok(if field.conditional {
                ShapeEntry {
                    name: output,
                    elm_type: ElmType::String.maybe(),
                    decoder: decoder.maybe(),
                }
            } else {
                ShapeEntry {
                    name: output,
                    elm_type: ElmType::String,
                    decoder,
                }
            });
        }

        let definition = scope
            .parent
            .field(&field.name)
            .ok_or_else(|| CodegenError::unknown_field(&scope.parent.name, &field.name))?;
        let context = format!("{}.{}", scope.parent.name, field.name);
        let field_type = self.schema.resolve(&definition.field_type, &context)?;

        let is_maybe = !field_type.is_non_null() || field.conditional;
        let ty = field_type.nullable();
        let depth = list_depth(ty);

        let (elm_type, decoder) = match (ty.named(), &field.selection_set) {
            (SchemaType::Union(union_def), _) => {
                let empty = SelectionSet::default();
                let set = field.selection_set.as_ref().unwrap_or(&empty);
                let (elm_type, decoder) = self.walk_union(scope, union_def, set, fragments)?;
                (elm_type.lists(depth), decoder.lists(depth))
            }
            (SchemaType::Object(object), Some(set)) => {
                let shape = self.walk_selection_set(scope.at(object), set, fragments)?;
                let (elm_type, decoder) = shape.into_record(None);
                (elm_type.lists(depth), decoder.lists(depth))
            }
            (named, selection) => {
                if selection.is_some() {
                    tracing::warn!(field = %context, kind = named.name(), "ignoring selection set on leaf field");
                }
                let leaf = self.resolver.resolve_leaf(ty)?;
                (
                    leaf.elm_type.lists(leaf.list_depth),
                    DecoderExpr::Primitive(leaf.primitive).lists(leaf.list_depth),
                )
            }
        };

        let decoder = DecoderExpr::field(&field.name, decoder);
        Ok(if is_maybe {
            ShapeEntry {
                name: output,
                elm_type: elm_type.maybe(),
                decoder: decoder.maybe(),
            }
        } else {
            ShapeEntry {
                name: output,
                elm_type,
                decoder,
            }
        })
    }
}
