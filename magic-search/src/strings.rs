use serde::Deserialize;
use serde::Serialize;

const DEFAULT_PROMPT: &str = "Click here for filters.";
const DEFAULT_CANCEL: &str = "Cancel";
const DEFAULT_REMOVE: &str = "Remove";
const CLIENT_TEXT_LABEL: &str = "Search in current results";
const SERVER_TEXT_LABEL: &str = "Full Text Search";

/// User-visible strings of the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStrings {
    /// Shown while the search is empty.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_cancel")]
    pub cancel: String,
    #[serde(default = "default_remove")]
    pub remove: String,
    /// Facet label of the free-text entry.
    #[serde(default = "default_text_label")]
    pub text: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_cancel() -> String {
    DEFAULT_CANCEL.to_string()
}

fn default_remove() -> String {
    DEFAULT_REMOVE.to_string()
}

fn default_text_label() -> String {
    CLIENT_TEXT_LABEL.to_string()
}

impl SearchStrings {
    /// Strings for a bar whose free text is either filtered locally
    /// (`client_full_text_search`) or sent to the server.
    pub fn for_full_text_search(client_full_text_search: bool) -> Self {
        let text = if client_full_text_search {
            CLIENT_TEXT_LABEL
        } else {
            SERVER_TEXT_LABEL
        };
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

impl Default for SearchStrings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            cancel: default_cancel(),
            remove: default_remove(),
            text: default_text_label(),
        }
    }
}
