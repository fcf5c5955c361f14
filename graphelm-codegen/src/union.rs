//! Union type dispatch.
//!
//! A union-typed field decodes `__typename` first and then runs the decoder
//! of the matching inline fragment. Type conditions are checked against a
//! closed [`VariantRegistry`] built from the schema.

use crate::elm::decoder::{Constructor, DecoderExpr};
use crate::elm::types::{ElmType, UnionDecl, Variant};
use crate::error::CodegenError;
use crate::generator::{Generator, Scope, Shape, TYPENAME_FIELD};
use graphelm_core::naming::capitalize;
use graphelm_core::{FragmentIndex, Selection, SelectionSet};
use graphelm_schema::{Schema, UnionDef};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Union name to member type names, built once per schema.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    unions: HashMap<String, Vec<String>>,
}

impl VariantRegistry {
    /// Builds the registry from every union in the schema.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let unions = schema
            .unions()
            .map(|u| (u.name.clone(), u.members.clone()))
            .collect();
        Self { unions }
    }

    /// Returns the members of a union.
    #[must_use]
    pub fn members(&self, union_name: &str) -> Option<&[String]> {
        self.unions.get(union_name).map(Vec::as_slice)
    }

    /// Checks that a type condition names a member of the union.
    ///
    /// # Errors
    /// Returns `CodegenError::NotAUnionMember` if the condition is absent or
    /// not a declared member.
    pub fn check<'c>(
        &self,
        union_name: &str,
        type_condition: Option<&'c str>,
    ) -> Result<&'c str, CodegenError> {
        let is_member = |name: &str| {
            self.members(union_name)
                .is_some_and(|members| members.iter().any(|m| m == name))
        };
        match type_condition {
            Some(name) if is_member(name) => Ok(name),
            other => Err(CodegenError::NotAUnionMember {
                union_name: union_name.to_string(),
                type_condition: other.unwrap_or_default().to_string(),
            }),
        }
    }
}

impl Generator<'_> {
    /// Walks the selection set of a union-typed field.
    ///
    /// Only `__typename` and inline fragments on union members are allowed.
    /// Inline fragments on the same member merge into one variant.
    pub(crate) fn walk_union(
        &self,
        scope: Scope<'_>,
        union_def: &UnionDef,
        set: &SelectionSet,
        fragments: &FragmentIndex,
    ) -> Result<(ElmType, DecoderExpr), CodegenError> {
        let mut variants: IndexMap<&str, Shape> = IndexMap::new();

        for selection in &set.items {
            match selection {
                Selection::Field(field) if field.name == TYPENAME_FIELD => {}
                Selection::Field(field) => {
                    return Err(CodegenError::UnexpectedField {
                        name: field.name.clone(),
                    });
                }
                Selection::FragmentSpread(_) => {
                    return Err(CodegenError::UnexpectedSelection {
                        kind: selection.kind().to_string(),
                    });
                }
                Selection::InlineFragment(inline) => {
                    let member = self
                        .variants
                        .check(&union_def.name, inline.type_condition.as_deref())?;
                    let object = self.object(member)?;
                    let shape = variants.entry(member).or_default();
                    self.expand_into(scope.at(object), &inline.selection_set, fragments, shape)?;
                }
            }
        }

        let mut decl = UnionDecl {
            name: union_def.name.clone(),
            variants: Vec::with_capacity(variants.len()),
        };
        let mut cases = Vec::with_capacity(variants.len());

        for (member, shape) in variants {
            let tag = capitalize(member);
            decl.variants.push(Variant {
                tag: tag.clone(),
                fields: shape.record_fields(),
            });
            let constructor = Constructor::Variant {
                tag,
                fields: shape.names(),
            };
            let decoders = shape.entries().iter().map(|e| e.decoder.clone()).collect();
            cases.push((member.to_string(), DecoderExpr::construct(constructor, decoders)));
        }

        tracing::trace!(union = %union_def.name, variants = cases.len(), "generated dispatch");
        Ok((ElmType::Union(decl), DecoderExpr::Dispatch { cases }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratedDefinition;
    use crate::interpret::{DecodeError, Decoded, decode};
    use graphelm_core::parse_document;
    use graphelm_schema::parse_sdl;
    use serde_json::json;

    const SCHEMA: &str = r#"
        type Query {
            search: [SearchResult]
            node: SearchResult!
            pet: Pet
        }
        type Human { name: String height: Float }
        type Droid { name: String primaryFunction: String }
        type Cat { lives: Int! }
        union SearchResult = Human | Droid
        union Pet = Cat
    "#;

    fn generate(source: &str) -> Result<Vec<GeneratedDefinition>, CodegenError> {
        let schema = parse_sdl(SCHEMA).expect("Failed to parse schema");
        let document = parse_document(source).expect("Failed to parse document");
        Generator::new(&schema).generate_document(&document)
    }

    fn node_query() -> GeneratedDefinition {
        generate(
            r#"
            query q {
                node {
                    __typename
                    ... on Human { name height }
                    ... on Droid { primaryFunction }
                }
            }
            "#,
        )
        .expect("Failed to generate")
        .remove(0)
    }

    #[test]
    fn test_registry_membership() {
        let schema = parse_sdl(SCHEMA).expect("Failed to parse");
        let registry = VariantRegistry::from_schema(&schema);

        assert_eq!(registry.members("SearchResult").map(<[String]>::len), Some(2));
        assert_eq!(registry.check("SearchResult", Some("Human")).ok(), Some("Human"));
        assert!(matches!(
            registry.check("SearchResult", Some("Cat")),
            Err(CodegenError::NotAUnionMember { type_condition, .. }) if type_condition == "Cat"
        ));
        assert!(registry.check("SearchResult", None).is_err());
        assert!(registry.check("Nope", Some("Human")).is_err());
    }

    #[test]
    fn test_union_type_declaration() {
        let def = node_query();
        let ElmType::Record(fields) = &def.result_type else {
            panic!("expected record");
        };
        match &fields[0].1 {
            ElmType::Union(decl) => assert_eq!(
                decl.render(),
                "type SearchResult\n    = Human { name : Maybe String, height : Maybe Float }\n    | Droid { primaryFunction : Maybe String }\n"
            ),
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_selects_variant() {
        let def = node_query();

        let decoded = decode(
            &def.decoder,
            &json!({ "node": { "__typename": "Human", "name": "Luke", "height": 1.72 } }),
        )
        .expect("Failed to decode");
        assert_eq!(
            decoded,
            Decoded::record([(
                "node",
                Decoded::variant(
                    "Human",
                    [
                        ("name", Decoded::just(Decoded::String("Luke".to_string()))),
                        ("height", Decoded::just(Decoded::Float(1.72))),
                    ]
                )
            )])
        );

        let decoded = decode(
            &def.decoder,
            &json!({ "node": { "__typename": "Droid", "name": "R2", "primaryFunction": "astromech" } }),
        )
        .expect("Failed to decode");
        assert_eq!(
            decoded,
            Decoded::record([(
                "node",
                Decoded::variant(
                    "Droid",
                    [("primaryFunction", Decoded::just(Decoded::String("astromech".to_string())))]
                )
            )])
        );
    }

    #[test]
    fn test_dispatch_rejects_unknown_typename() {
        let def = node_query();
        let err = decode(&def.decoder, &json!({ "node": { "__typename": "Cat" } })).unwrap_err();
        assert!(matches!(err, DecodeError::Failure { ref message, .. } if message == "Unexpected union type"));
    }

    #[test]
    fn test_union_list_is_wrapped_like_objects() {
        let def = generate(r#"{ search { ... on Droid { name } } }"#)
            .expect("Failed to generate")
            .remove(0);
        let rendered = def.decoder.render(4);
        assert!(rendered.contains("maybe (field \"search\" (list (field \"__typename\" string"));

        let decoded = decode(
            &def.decoder,
            &json!({ "search": [{ "__typename": "Droid", "name": null }] }),
        )
        .expect("Failed to decode");
        assert_eq!(
            decoded,
            Decoded::record([(
                "search",
                Decoded::just(Decoded::List(vec![Decoded::variant(
                    "Droid",
                    [("name", Decoded::Nothing)]
                )]))
            )])
        );
    }

    #[test]
    fn test_repeated_type_condition_merges() {
        let def = generate(
            r#"{ node { ... on Human { name } ... on Human { name height } } }"#,
        )
        .expect("Failed to generate")
        .remove(0);
        match &def.decoder {
            DecoderExpr::Map { fields, .. } => {
                let rendered = fields[0].render(0);
                assert_eq!(rendered.matches("\"Human\" ->").count(), 1);
                assert_eq!(rendered.matches("field \"name\"").count(), 1);
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_variant_fragment_spreads_expand() {
        let defs = generate(
            r#"
            { pet { ... on Cat { ...CatFields } } }
            fragment CatFields on Cat { lives }
            "#,
        )
        .expect("Failed to generate");
        let decoded = decode(&defs[0].decoder, &json!({ "pet": { "__typename": "Cat", "lives": 9 } }))
            .expect("Failed to decode");
        assert_eq!(
            decoded,
            Decoded::record([(
                "pet",
                Decoded::just(Decoded::variant("Cat", [("lives", Decoded::Int(9))]))
            )])
        );
    }

    #[test]
    fn test_unexpected_field_in_union() {
        let err = generate("{ node { name } }").unwrap_err();
        assert_eq!(err.to_string(), "unexpected field: name");
    }

    #[test]
    fn test_spread_in_union() {
        let err = generate(
            r#"
            { node { ...H } }
            fragment H on Human { name }
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unexpected: FragmentSpread");
    }

    #[test]
    fn test_non_member_type_condition() {
        let err = generate("{ node { ... on Cat { lives } } }").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::NotAUnionMember { union_name, type_condition }
                if union_name == "SearchResult" && type_condition == "Cat"
        ));
    }

    #[test]
    fn test_inline_fragment_without_type_condition() {
        let err = generate("{ node { ... { __typename } } }").unwrap_err();
        assert!(matches!(err, CodegenError::NotAUnionMember { .. }));
    }
}
