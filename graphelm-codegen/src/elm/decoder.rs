//! `Json.Decode` expression trees.
//!
//! A [`DecoderExpr`] is built bottom-up by the walker and rendered to Elm
//! source by [`DecoderExpr::render`]. The same tree is evaluated by
//! [`crate::interpret`].

use crate::elm::binders::Binders;
use std::fmt::Write;

/// Default case message of a union dispatch.
pub const UNEXPECTED_UNION_TYPE: &str = "Unexpected union type";

/// Leaf decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// `int`.
    Int,
    /// `float`.
    Float,
    /// `bool`.
    Bool,
    /// `string`.
    String,
    /// Generated enum decoder.
    Enum {
        /// GraphQL enum name.
        name: String,
        /// Elm decoder function name.
        decoder: String,
    },
}

impl Primitive {
    /// Returns the Elm decoder expression.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Enum { decoder, .. } => decoder,
        }
    }
}

/// Function that builds a value from positionally decoded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constructor {
    /// Record, either through a named alias constructor or a synthesized
    /// shape lambda.
    Record {
        /// Alias name, if the record has one.
        alias: Option<String>,
        /// Field names, in argument order.
        fields: Vec<String>,
    },
    /// Union variant constructor applied to a record.
    Variant {
        /// Constructor name.
        tag: String,
        /// Field names, in argument order.
        fields: Vec<String>,
    },
}

impl Constructor {
    /// Returns the field names in argument order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Record { fields, .. } | Self::Variant { fields, .. } => fields,
        }
    }

    /// Renders the constructor function. Shape lambda parameters are bound
    /// in `binders` so they never shadow a name in scope.
    fn render(&self, binders: &mut Binders<'_>) -> String {
        match self {
            Self::Record {
                alias: Some(alias), ..
            } => alias.clone(),
            Self::Record { alias: None, fields } => {
                let params = binders.bind_all(fields);
                binders.release(params.len());
                format!("(\\{} -> {})", params.join(" "), record_literal(fields, &params))
            }
            Self::Variant { tag, fields } => {
                let params = binders.bind_all(fields);
                binders.release(params.len());
                format!(
                    "(\\{} -> {tag} {})",
                    params.join(" "),
                    record_literal(fields, &params)
                )
            }
        }
    }

    /// Renders the value built from zero fields.
    fn render_empty(&self) -> String {
        match self {
            Self::Record { .. } => "{}".to_string(),
            Self::Variant { tag, .. } => format!("({tag} {{}})"),
        }
    }
}

fn record_literal(fields: &[String], params: &[String]) -> String {
    let fields: Vec<String> = fields
        .iter()
        .zip(params)
        .map(|(f, p)| format!("{f} = {p}"))
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

/// Decoder expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderExpr {
    /// Leaf decoder.
    Primitive(Primitive),
    /// `field "<name>" decoder`.
    Field {
        /// JSON key.
        name: String,
        /// Decoder for the value.
        decoder: Box<DecoderExpr>,
    },
    /// `maybe decoder`.
    ///
    /// Gives `Nothing` whenever the inner decoder fails. Around a field
    /// read this covers a missing key and `null`, and also a malformed
    /// value anywhere below it: one bad list item turns the whole field
    /// into `Nothing` instead of failing the decode.
    Maybe(Box<DecoderExpr>),
    /// `list decoder`.
    List(Box<DecoderExpr>),
    /// `map ctor d1 |> apply d2 |> apply …`.
    Map {
        /// Constructor receiving the decoded fields.
        constructor: Constructor,
        /// One decoder per constructor argument.
        fields: Vec<DecoderExpr>,
    },
    /// Dispatch on `__typename` with one case per variant and a failing
    /// default.
    Dispatch {
        /// `(typename, decoder)` cases.
        cases: Vec<(String, DecoderExpr)>,
    },
    /// `succeed` of a constructor applied to no fields.
    Succeed(Constructor),
}

impl DecoderExpr {
    /// Creates a field read.
    #[must_use]
    pub fn field(name: impl Into<String>, decoder: Self) -> Self {
        Self::Field {
            name: name.into(),
            decoder: Box::new(decoder),
        }
    }

    /// Wraps the decoder in `maybe`. See [`DecoderExpr::Maybe`] for how
    /// errors below it are absorbed.
    #[must_use]
    pub fn maybe(self) -> Self {
        Self::Maybe(Box::new(self))
    }

    /// Wraps the decoder in `list`.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps the decoder in `depth` list layers.
    #[must_use]
    pub fn lists(self, depth: usize) -> Self {
        (0..depth).fold(self, |d, _| d.list())
    }

    /// Applies a constructor to field decoders, or `succeed` when there are
    /// none.
    #[must_use]
    pub fn construct(constructor: Constructor, fields: Vec<Self>) -> Self {
        if fields.is_empty() {
            Self::Succeed(constructor)
        } else {
            Self::Map {
                constructor,
                fields,
            }
        }
    }

    /// Renders the expression as Elm source, with no names in scope.
    ///
    /// The first line carries no indentation; continuation lines are
    /// indented by at least `indent` spaces.
    #[must_use]
    pub fn render(&self, indent: usize) -> String {
        self.render_in(indent, &mut Binders::default())
    }

    /// Renders the expression as Elm source inside `binders`.
    ///
    /// Every name the expression binds is fresh with respect to `binders`,
    /// and is released again before returning.
    #[must_use]
    pub fn render_in(&self, indent: usize, binders: &mut Binders<'_>) -> String {
        match self {
            Self::Primitive(primitive) => primitive.name().to_string(),
            Self::Field { name, decoder } => {
                format!("field \"{name}\" {}", decoder.render_arg(indent, binders))
            }
            Self::Maybe(inner) => format!("maybe {}", inner.render_arg(indent, binders)),
            Self::List(inner) => format!("list {}", inner.render_arg(indent, binders)),
            Self::Map {
                constructor,
                fields,
            } => {
                let pad = " ".repeat(indent + 4);
                let mut output = format!("map {}", constructor.render(binders));
                for (i, field) in fields.iter().enumerate() {
                    let _ = write!(output, "\n{pad}");
                    if i > 0 {
                        output.push_str("|> apply ");
                    }
                    output.push_str(&field.render_arg(indent + 8, binders));
                }
                output
            }
            Self::Dispatch { cases } => {
                let pad = |n: usize| " ".repeat(indent + n);
                let typename = binders.bind("typename");
                let mut output = String::from("field \"__typename\" string");
                let _ = write!(output, "\n{}|> andThen", pad(4));
                let _ = write!(output, "\n{}(\\{typename} ->", pad(8));
                let _ = write!(output, "\n{}case {typename} of", pad(12));
                for (tag, decoder) in cases {
                    let _ = write!(
                        output,
                        "\n{}\"{tag}\" ->\n{}{}\n",
                        pad(16),
                        pad(20),
                        decoder.render_in(indent + 20, binders)
                    );
                }
                binders.release(1);
                let _ = write!(
                    output,
                    "\n{}_ ->\n{}fail \"{UNEXPECTED_UNION_TYPE}\"",
                    pad(16),
                    pad(20)
                );
                let _ = write!(output, "\n{})", pad(8));
                output
            }
            Self::Succeed(constructor) => format!("succeed {}", constructor.render_empty()),
        }
    }

    /// Renders the expression in argument position.
    fn render_arg(&self, indent: usize, binders: &mut Binders<'_>) -> String {
        match self {
            Self::Primitive(_) => self.render_in(indent, binders),
            _ => format!("({})", self.render_in(indent, binders)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(fields: &[&str]) -> Constructor {
        Constructor::Record {
            alias: None,
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    #[test]
    fn test_render_leaf_field() {
        let decoder = DecoderExpr::field("name", DecoderExpr::Primitive(Primitive::String)).maybe();
        assert_eq!(decoder.render(4), "maybe (field \"name\" string)");

        let decoder = DecoderExpr::field("tags", DecoderExpr::Primitive(Primitive::String).list());
        assert_eq!(decoder.render(4), "field \"tags\" (list string)");
    }

    #[test]
    fn test_render_enum_primitive() {
        let primitive = Primitive::Enum {
            name: "Episode".to_string(),
            decoder: "episodeDecoder".to_string(),
        };
        assert_eq!(DecoderExpr::Primitive(primitive).render(0), "episodeDecoder");
    }

    #[test]
    fn test_render_shape_map() {
        let decoder = DecoderExpr::construct(
            shape(&["id", "name"]),
            vec![
                DecoderExpr::field("id", DecoderExpr::Primitive(Primitive::String)),
                DecoderExpr::field("name", DecoderExpr::Primitive(Primitive::String)).maybe(),
            ],
        );
        assert_eq!(
            decoder.render(4),
            "map (\\id name -> { id = id, name = name })\n        (field \"id\" string)\n        |> apply (maybe (field \"name\" string))"
        );
    }

    #[test]
    fn test_render_alias_constructor() {
        let decoder = DecoderExpr::construct(
            Constructor::Record {
                alias: Some("User".to_string()),
                fields: vec!["id".to_string()],
            },
            vec![DecoderExpr::field("id", DecoderExpr::Primitive(Primitive::Int))],
        );
        assert_eq!(decoder.render(0), "map User\n    (field \"id\" int)");
    }

    #[test]
    fn test_construct_empty_is_succeed() {
        assert_eq!(
            DecoderExpr::construct(shape(&[]), Vec::new()).render(0),
            "succeed {}"
        );
        let variant = Constructor::Variant {
            tag: "Droid".to_string(),
            fields: Vec::new(),
        };
        assert_eq!(
            DecoderExpr::construct(variant, Vec::new()).render(0),
            "succeed (Droid {})"
        );
    }

    #[test]
    fn test_render_dispatch() {
        let human = DecoderExpr::construct(
            Constructor::Variant {
                tag: "Human".to_string(),
                fields: vec!["name".to_string()],
            },
            vec![DecoderExpr::field("name", DecoderExpr::Primitive(Primitive::String))],
        );
        let decoder = DecoderExpr::Dispatch {
            cases: vec![("Human".to_string(), human)],
        };
        let rendered = decoder.render(0);

        assert!(rendered.starts_with("field \"__typename\" string\n    |> andThen\n        (\\typename ->\n            case typename of\n"));
        assert!(rendered.contains("                \"Human\" ->\n                    map (\\name -> Human { name = name })"));
        assert!(rendered.contains("                _ ->\n                    fail \"Unexpected union type\""));
        assert!(rendered.ends_with("\n        )"));
    }

    #[test]
    fn test_nested_dispatch_binders_are_fresh() {
        let inner = DecoderExpr::Dispatch {
            cases: vec![(
                "B".to_string(),
                DecoderExpr::construct(
                    Constructor::Variant {
                        tag: "B".to_string(),
                        fields: vec!["x".to_string()],
                    },
                    vec![DecoderExpr::field("x", DecoderExpr::Primitive(Primitive::Int))],
                ),
            )],
        };
        let outer = DecoderExpr::Dispatch {
            cases: vec![(
                "A".to_string(),
                DecoderExpr::construct(
                    Constructor::Variant {
                        tag: "A".to_string(),
                        fields: vec!["typename".to_string(), "inner".to_string()],
                    },
                    vec![
                        DecoderExpr::field("__typename", DecoderExpr::Primitive(Primitive::String)),
                        DecoderExpr::field("inner", inner).maybe(),
                    ],
                ),
            )],
        };
        let rendered = outer.render(0);

        assert_eq!(rendered.matches("(\\typename ->").count(), 1);
        assert!(rendered.contains("case typename of"));
        assert!(rendered.contains("map (\\typename1 inner -> A { typename = typename1, inner = inner })"));
        assert!(rendered.contains("(\\typename1 ->"));
        assert!(rendered.contains("case typename1 of"));
    }

    #[test]
    fn test_shape_params_avoid_reserved_names() {
        let reserved: std::collections::HashSet<String> =
            ["friends", "list"].iter().map(|s| (*s).to_string()).collect();
        let decoder = DecoderExpr::construct(
            shape(&["friends", "list", "id"]),
            vec![
                DecoderExpr::field("friends", DecoderExpr::Primitive(Primitive::Int)),
                DecoderExpr::field("list", DecoderExpr::Primitive(Primitive::Int)),
                DecoderExpr::field("id", DecoderExpr::Primitive(Primitive::Int)),
            ],
        );
        let rendered = decoder.render_in(0, &mut Binders::new(&reserved));
        assert!(rendered.starts_with(
            "map (\\friends1 list1 id -> { friends = friends1, list = list1, id = id })"
        ));
    }
}
