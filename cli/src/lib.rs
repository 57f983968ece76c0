pub mod parse_cmd;
pub mod replay_cmd;
pub mod script;
pub mod settings_cmd;

use anyhow::Context;
use anyhow::Result;
use searchlight_magic_search::FacetDefinition;
use std::path::Path;

/// Reads a JSON array of facet definitions.
pub fn load_catalog(path: &Path) -> Result<Vec<FacetDefinition>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse catalog {}", path.display()))
}
