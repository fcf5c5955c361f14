//! Elm type descriptors and their rendering.

use crate::elm::enums::enum_type_name;
use std::fmt::Write;

/// Elm type of a decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum ElmType {
    /// `Int`.
    Int,
    /// `Float`.
    Float,
    /// `Bool`.
    Bool,
    /// `String`.
    String,
    /// Generated custom type for a schema enum, by GraphQL name.
    Enum(String),
    /// Generated custom type for a schema union.
    Union(UnionDecl),
    /// `Maybe a`.
    Maybe(Box<ElmType>),
    /// `List a`.
    List(Box<ElmType>),
    /// Anonymous record, fields in declaration order.
    Record(Vec<(String, ElmType)>),
}

impl ElmType {
    /// Wraps the type in `Maybe`.
    #[must_use]
    pub fn maybe(self) -> Self {
        Self::Maybe(Box::new(self))
    }

    /// Wraps the type in `List`.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps the type in `depth` list layers.
    #[must_use]
    pub fn lists(self, depth: usize) -> Self {
        (0..depth).fold(self, |ty, _| ty.list())
    }

    /// Renders the type as Elm source.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int => "Int".to_string(),
            Self::Float => "Float".to_string(),
            Self::Bool => "Bool".to_string(),
            Self::String => "String".to_string(),
            Self::Enum(name) => enum_type_name(name),
            Self::Union(decl) => decl.name.clone(),
            Self::Maybe(inner) => format!("Maybe {}", inner.render_arg()),
            Self::List(inner) => format!("List {}", inner.render_arg()),
            Self::Record(fields) => render_record(fields),
        }
    }

    /// Renders the type in argument position, parenthesized if needed.
    fn render_arg(&self) -> String {
        match self {
            Self::Maybe(_) | Self::List(_) => format!("({})", self.render()),
            _ => self.render(),
        }
    }

    /// Visits this type and every type nested in it, including union
    /// variant fields.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ElmType)) {
        f(self);
        match self {
            Self::Maybe(inner) | Self::List(inner) => inner.visit(f),
            Self::Record(fields) => fields.iter().for_each(|(_, ty)| ty.visit(f)),
            Self::Union(decl) => decl
                .variants
                .iter()
                .flat_map(|v| v.fields.iter())
                .for_each(|(_, ty)| ty.visit(f)),
            _ => {}
        }
    }
}

/// Renders a record type on one line.
#[must_use]
pub fn render_record(fields: &[(String, ElmType)]) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let fields: Vec<String> = fields
        .iter()
        .map(|(name, ty)| format!("{name} : {}", ty.render()))
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

/// Custom type generated for a union selection.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDecl {
    /// Type name (the schema union name).
    pub name: String,
    /// Variants in selection order.
    pub variants: Vec<Variant>,
}

/// Union variant: a constructor tagging a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Constructor name.
    pub tag: String,
    /// Record fields.
    pub fields: Vec<(String, ElmType)>,
}

impl UnionDecl {
    /// Renders the custom type declaration.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = format!("type {}\n", self.name);
        for (i, variant) in self.variants.iter().enumerate() {
            let sep = if i == 0 { '=' } else { '|' };
            let _ = writeln!(output, "    {sep} {} {}", variant.tag, render_record(&variant.fields));
        }
        output
    }
}

/// Renders a record type alias declaration.
#[must_use]
pub fn render_alias(name: &str, fields: &[(String, ElmType)]) -> String {
    let mut output = format!("type alias {name} =\n");
    if fields.is_empty() {
        output.push_str("    {}\n");
        return output;
    }
    for (i, (field, ty)) in fields.iter().enumerate() {
        let sep = if i == 0 { '{' } else { ',' };
        let _ = writeln!(output, "    {sep} {field} : {}", ty.render());
    }
    output.push_str("    }\n");
    output
}
