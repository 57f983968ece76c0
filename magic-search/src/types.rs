use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Facet name reserved for the free-text search term.
pub const TEXT_FACET_NAME: &str = "text";

pub(crate) const VALUE_SEPARATOR: char = '=';

/// Display label for a facet or an option.
///
/// `Split` is the `[matched, rest]` form produced while filtering, so a view
/// can emphasize the part the user has typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Split(String, String),
}

impl Label {
    pub fn joined(&self) -> String {
        match self {
            Label::Plain(text) => text.clone(),
            Label::Split(head, tail) => format!("{head}{tail}"),
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Label::Split(..))
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Plain(String::new())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Plain(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Plain(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Plain(text) => f.write_str(text),
            Label::Split(head, tail) => write!(f, "{head}{tail}"),
        }
    }
}

/// One choice of a closed-choice facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub key: String,
    pub label: Label,
}

impl FacetOption {
    pub fn new(key: impl Into<String>, label: impl Into<Label>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// A facet the user can search on.
///
/// Facets with `options` only accept one of the listed keys; facets without
/// take free-form text as their value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDefinition {
    pub name: String,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FacetOption>>,
    /// Display hint carried through for views. Selection policy does not
    /// depend on it: every facet leaves the menu once it is selected.
    #[serde(default)]
    pub singleton: bool,
}

impl FacetDefinition {
    pub fn free_text(name: impl Into<String>, label: impl Into<Label>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            options: None,
            singleton: false,
        }
    }

    pub fn with_options(
        name: impl Into<String>,
        label: impl Into<Label>,
        options: Vec<FacetOption>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            options: Some(options),
            singleton: false,
        }
    }

    #[must_use]
    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    pub fn takes_free_text(&self) -> bool {
        self.options.is_none()
    }

    pub fn option(&self, key: &str) -> Option<&FacetOption> {
        self.options
            .as_ref()
            .and_then(|options| options.iter().find(|option| option.key == key))
    }
}

/// A facet as offered in the menu. Choices are owned copies of the catalog's
/// definitions, so filtering and highlighting never touch the catalog.
pub type FacetChoice = FacetDefinition;

/// A facet that is part of the current search.
///
/// `name` is `facet=value`; `label` pairs the facet label with the label of
/// the chosen value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFacet {
    pub name: String,
    pub label: (String, String),
}

impl SelectedFacet {
    pub fn new(facet: &str, value: &str, facet_label: &str, value_label: &str) -> Self {
        Self {
            name: format!("{facet}{VALUE_SEPARATOR}{value}"),
            label: (facet_label.to_string(), value_label.to_string()),
        }
    }

    /// The free-text entry of a search.
    pub fn text(text: &str, label: &str) -> Self {
        Self::new(TEXT_FACET_NAME, text, label, text)
    }

    pub fn facet_name(&self) -> &str {
        self.name
            .split_once(VALUE_SEPARATOR)
            .map_or(self.name.as_str(), |(facet, _)| facet)
    }

    pub fn value(&self) -> Option<&str> {
        self.name
            .split_once(VALUE_SEPARATOR)
            .map(|(_, value)| value)
    }

    pub fn is_text(&self) -> bool {
        self.facet_name() == TEXT_FACET_NAME
    }
}
