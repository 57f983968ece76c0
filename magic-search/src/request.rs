use crate::types::SelectedFacet;
use serde::Deserialize;
use serde::Serialize;

/// Snapshot handed to the search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_facets: Vec<SelectedFacet>,
    pub query_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// How soon a search should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTrigger {
    /// The structured query changed; search now.
    Immediate,
    /// Free text changed; wait for typing to settle.
    Debounced,
}
