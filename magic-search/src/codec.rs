//! Conversion between query strings, search terms and selected facets.
//!
//! A query pattern is a `&`-joined list of `facet=value` terms. No URL
//! encoding happens here; the transport owns that.

use crate::types::FacetChoice;
use crate::types::SelectedFacet;
use crate::types::TEXT_FACET_NAME;
use crate::types::VALUE_SEPARATOR;

const TERM_SEPARATOR: char = '&';

/// One `name=value` (or bare) term of a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTerm<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> SearchTerm<'a> {
    /// Splits on the first `=` only, so values may contain `=`.
    pub fn parse(term: &'a str) -> Self {
        match term.split_once(VALUE_SEPARATOR) {
            Some((name, value)) => Self {
                name,
                value: Some(value),
            },
            None => Self {
                name: term,
                value: None,
            },
        }
    }
}

/// What to do with a term that does not resolve against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedTerms {
    /// Use the whole term as free text (restoring from a URL).
    FoldIntoText,
    /// Forget the term (re-deriving after a catalog change).
    Drop,
}

/// Facets resolved from a term list, plus the free text found among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSearch {
    pub facets: Vec<SelectedFacet>,
    pub free_text: Option<String>,
}

/// Splits a query string into terms.
///
/// Accepts a bare query (`a=b&c`), a `?`-prefixed query, or a whole URL
/// (`scheme://...`). For the last two only the query component is read,
/// without any `#fragment`. A bare query is taken as is, so values may
/// contain `?` and `#`. Empty segments are discarded.
pub fn parse(query: &str) -> Vec<String> {
    query_component(query)
        .split(TERM_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn query_component(input: &str) -> &str {
    let query = if let Some(rest) = input.strip_prefix('?') {
        rest
    } else if is_url(input) {
        input.split_once('?').map_or("", |(_, rest)| rest)
    } else {
        return input;
    };
    query.split_once('#').map_or(query, |(head, _)| head)
}

/// Whether `input` starts with a URL scheme such as `https://`.
fn is_url(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|ch: char| ch.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
    })
}

/// Joins facet names in search order. The free-text entry is left out; it
/// travels separately from the query pattern.
pub fn serialize(current_search: &[SelectedFacet]) -> String {
    current_search
        .iter()
        .filter(|facet| !facet.is_text())
        .map(|facet| facet.name.as_str())
        .collect::<Vec<_>>()
        .join("&")
}

/// Resolves `terms` against `choices`.
///
/// - a known facet with options resolves when the value is one of its keys;
/// - a known free-text facet takes the value as its label;
/// - a `text=` term is free text;
/// - anything else is handled per `unmatched`.
///
/// `free_text` seeds the free-text entry; later text terms win. Each facet
/// name resolves at most once and the free-text entry appears at most once,
/// at the position of the last text term (or last, when only seeded).
pub fn to_selected_facets<S: AsRef<str>>(
    terms: &[S],
    choices: &[FacetChoice],
    free_text: Option<&str>,
    text_label: &str,
    unmatched: UnmatchedTerms,
) -> ResolvedSearch {
    let mut facets: Vec<SelectedFacet> = Vec::with_capacity(terms.len());
    let mut text = free_text.filter(|text| !text.is_empty()).map(str::to_string);
    let mut text_index: Option<usize> = None;

    for raw in terms {
        let raw = raw.as_ref();
        if raw.is_empty() {
            continue;
        }
        let term = SearchTerm::parse(raw);
        if term.name == TEXT_FACET_NAME {
            match term.value.filter(|value| !value.is_empty()) {
                Some(value) => {
                    text = Some(value.to_string());
                    text_index = Some(facets.len());
                }
                None => tracing::debug!(term = raw, "ignoring empty text term"),
            }
            continue;
        }
        if facets.iter().any(|facet| facet.facet_name() == term.name) {
            tracing::debug!(term = raw, "facet already resolved; ignoring repeat");
            continue;
        }
        match resolve_term(&term, choices) {
            Some(facet) => facets.push(facet),
            None => match unmatched {
                UnmatchedTerms::FoldIntoText => {
                    text = Some(raw.to_string());
                    text_index = Some(facets.len());
                }
                UnmatchedTerms::Drop => {
                    tracing::debug!(term = raw, "dropping term missing from catalog");
                }
            },
        }
    }

    if let Some(text) = text.as_deref() {
        let entry = SelectedFacet::text(text, text_label);
        match text_index {
            Some(index) => facets.insert(index, entry),
            None => facets.push(entry),
        }
    }

    ResolvedSearch {
        facets,
        free_text: text,
    }
}

fn resolve_term(term: &SearchTerm<'_>, choices: &[FacetChoice]) -> Option<SelectedFacet> {
    let value = term.value.filter(|value| !value.is_empty())?;
    let choice = choices.iter().find(|choice| choice.name == term.name)?;
    let facet_label = choice.label.joined();
    match &choice.options {
        Some(_) => {
            let option = choice.option(value)?;
            Some(SelectedFacet::new(
                term.name,
                &option.key,
                &facet_label,
                &option.label.joined(),
            ))
        }
        None => Some(SelectedFacet::new(term.name, value, &facet_label, value)),
    }
}
