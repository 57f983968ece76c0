//! Available facets and the subset the current search has not used yet.

use crate::codec::SearchTerm;
use crate::types::FacetChoice;
use crate::types::FacetDefinition;
use std::collections::HashSet;

/// The facets a search bar offers, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct FacetCatalog {
    definitions: Vec<FacetDefinition>,
}

impl FacetCatalog {
    /// Builds a catalog. Names are unique: a repeated name keeps the first
    /// definition.
    pub fn new(definitions: Vec<FacetDefinition>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if seen.insert(definition.name.clone()) {
                unique.push(definition);
            } else {
                tracing::warn!(facet = %definition.name, "duplicate facet name in catalog");
            }
        }
        Self {
            definitions: unique,
        }
    }

    /// Owned copies of every definition.
    pub fn choices(&self) -> Vec<FacetChoice> {
        choices_from(&self.definitions)
    }

    pub fn get(&self, name: &str) -> Option<&FacetDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Materializes menu choices. Option lists are cloned, so callers can filter
/// and relabel them freely.
pub fn choices_from(definitions: &[FacetDefinition]) -> Vec<FacetChoice> {
    definitions.to_vec()
}

/// Choices whose facet name does not appear in `current_names`.
///
/// `current_names` may hold either bare facet names or full `facet=value`
/// terms. Output keeps the order of `all`.
pub fn unused_choices<I, S>(all: &[FacetChoice], current_names: I) -> Vec<FacetChoice>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let used: HashSet<String> = current_names
        .into_iter()
        .map(|name| SearchTerm::parse(name.as_ref()).name.to_string())
        .collect();
    all.iter()
        .filter(|choice| !used.contains(&choice.name))
        .cloned()
        .collect()
}

/// Drops the facet named by `term` from `unused`. Removing a facet that is
/// already gone is a no-op.
pub fn remove_choice(term: &SearchTerm<'_>, unused: &mut Vec<FacetChoice>) {
    unused.retain(|choice| choice.name != term.name);
}
