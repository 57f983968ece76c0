//! Case-insensitive prefix filtering for facet choices and options.
//!
//! Filtering is stable: results keep the input order. Every match comes back
//! with a [`Label::Split`] of the matched prefix and the rest of the label.

use crate::types::FacetChoice;
use crate::types::FacetOption;
use crate::types::Label;

pub fn match_facets(choices: &[FacetChoice], text: &str) -> Vec<FacetChoice> {
    choices
        .iter()
        .filter_map(|choice| {
            highlight(&choice.label, text).map(|label| FacetChoice {
                label,
                ..choice.clone()
            })
        })
        .collect()
}

pub fn match_options(options: &[FacetOption], text: &str) -> Vec<FacetOption> {
    options
        .iter()
        .filter_map(|option| {
            highlight(&option.label, text).map(|label| FacetOption {
                key: option.key.clone(),
                label,
            })
        })
        .collect()
}

fn highlight(label: &Label, text: &str) -> Option<Label> {
    let joined = label.joined();
    let end = prefix_end(&joined, text)?;
    let (head, tail) = joined.split_at(end);
    Some(Label::Split(head.to_string(), tail.to_string()))
}

/// Byte offset in `haystack` where a case-insensitive `needle` prefix ends.
fn prefix_end(haystack: &str, needle: &str) -> Option<usize> {
    let mut needle_chars = needle.chars();
    for (idx, ch) in haystack.char_indices() {
        let Some(expected) = needle_chars.next() else {
            return Some(idx);
        };
        if !ch.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    match needle_chars.next() {
        Some(_) => None,
        None => Some(haystack.len()),
    }
}
