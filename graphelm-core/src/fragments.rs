//! Fragment lookup table.
//!
//! A [`FragmentIndex`] is built once per query document and is read-only for
//! the rest of that document's generation.

use crate::document::{Document, FragmentDefinition, Selection, SelectionSet};
use crate::error::{DocumentError, Result};
use indexmap::{IndexMap, IndexSet};

/// Mapping from fragment name to fragment definition.
#[derive(Debug, Clone, Default)]
pub struct FragmentIndex {
    fragments: IndexMap<String, FragmentDefinition>,
}

impl FragmentIndex {
    /// Builds the index from the fragments of a document.
    ///
    /// # Errors
    /// Returns `DocumentError::DuplicateFragment` if two fragments share a name.
    pub fn build(document: &Document) -> Result<Self> {
        let mut fragments = IndexMap::new();
        for fragment in document.fragments() {
            if fragments
                .insert(fragment.name.clone(), fragment.clone())
                .is_some()
            {
                return Err(DocumentError::duplicate_fragment(&fragment.name));
            }
        }
        Ok(Self { fragments })
    }

    /// Looks up a fragment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments.get(name)
    }

    /// Returns true if a fragment with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Returns the number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the index has no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Collects every fragment reachable from a selection set, in order of
    /// first use.
    ///
    /// Unknown names are skipped and cycles are visited once; reporting those
    /// is left to the generator.
    #[must_use]
    pub fn transitive_spreads(&self, selection_set: &SelectionSet) -> Vec<&FragmentDefinition> {
        let mut seen = IndexSet::new();
        self.collect_spreads(selection_set, &mut seen);
        seen.into_iter()
            .filter_map(|name| self.fragments.get(name))
            .collect()
    }

    fn collect_spreads<'a>(&'a self, selection_set: &'a SelectionSet, seen: &mut IndexSet<&'a str>) {
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => {
                    if let Some(nested) = &field.selection_set {
                        self.collect_spreads(nested, seen);
                    }
                }
                Selection::FragmentSpread(spread) => {
                    if let Some(fragment) = self.fragments.get(&spread.fragment_name) {
                        if seen.insert(fragment.name.as_str()) {
                            self.collect_spreads(&fragment.selection_set, seen);
                        }
                    }
                }
                Selection::InlineFragment(inline) => {
                    self.collect_spreads(&inline.selection_set, seen);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    #[test]
    fn test_build_and_lookup() {
        let doc = parse_document(
            "fragment A on User { id } fragment B on User { name }",
        )
        .expect("Failed to parse");
        let index = FragmentIndex::build(&doc).expect("Failed to index");

        assert_eq!(index.len(), 2);
        assert!(index.contains("A"));
        assert_eq!(index.get("B").map(|f| f.type_condition.as_str()), Some("User"));
        assert!(index.get("C").is_none());
    }

    #[test]
    fn test_duplicate_fragment_rejected() {
        let doc = parse_document("fragment A on User { id } fragment A on User { name }")
            .expect("Failed to parse");
        let err = FragmentIndex::build(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateFragment { name } if name == "A"));
    }

    #[test]
    fn test_transitive_spreads_in_first_use_order() {
        let doc = parse_document(
            r#"
            query q { user { ...B friends { ...A } } }
            fragment A on User { id }
            fragment B on User { name ...C }
            fragment C on User { email }
            "#,
        )
        .expect("Failed to parse");
        let index = FragmentIndex::build(&doc).expect("Failed to index");
        let op = doc.operations().next().expect("operation");

        let names: Vec<_> = index
            .transitive_spreads(&op.selection_set)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_transitive_spreads_tolerates_cycles() {
        let doc = parse_document(
            r#"
            query q { user { ...A } }
            fragment A on User { ...B }
            fragment B on User { ...A }
            "#,
        )
        .expect("Failed to parse");
        let index = FragmentIndex::build(&doc).expect("Failed to index");
        let op = doc.operations().next().expect("operation");
        assert_eq!(index.transitive_spreads(&op.selection_set).len(), 2);
    }
}
