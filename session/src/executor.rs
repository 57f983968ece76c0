use crate::error::ExecutorError;
use crate::settings::SearchSettings;
use async_trait::async_trait;
use searchlight_magic_search::SearchRequest;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A search request together with the settings it runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    #[serde(flatten)]
    pub request: SearchRequest,
    pub limit: usize,
    pub all_projects: bool,
    pub phrase_slop: u32,
    pub lenient: bool,
    pub analyze_wildcard: bool,
}

impl SearchQuery {
    pub fn new(request: SearchRequest, settings: &SearchSettings) -> Self {
        Self {
            request,
            limit: settings.general.limit,
            all_projects: settings.general.all_projects,
            phrase_slop: settings.full_text_search.phrase_slop,
            lenient: settings.full_text_search.lenient,
            analyze_wildcard: settings.full_text_search.analyze_wildcard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// What the session reports for one finished search. Failures are folded
/// into an outcome with no hits rather than surfaced as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl SearchOutcome {
    pub fn success(mut response: SearchResponse) -> Self {
        response.hits.iter_mut().for_each(normalize_hit);
        Self {
            hits: response.hits,
            ..Self::default()
        }
    }

    pub fn failure(err: ExecutorError) -> Self {
        Self {
            hits: Vec::new(),
            error: true,
            message: Some(err.message),
            status_code: err.status_code,
        }
    }
}

impl From<Result<SearchResponse, ExecutorError>> for SearchOutcome {
    fn from(result: Result<SearchResponse, ExecutorError>) -> Self {
        match result {
            Ok(response) => Self::success(response),
            Err(err) => Self::failure(err),
        }
    }
}

/// Runs searches on behalf of a session.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<SearchResponse, ExecutorError>;
}

/// Fills the fields that different resource types name differently:
/// `project_id` falls back to `_tenant_id` then `owner`, and `updated_at`
/// falls back to `created_at`.
pub fn normalize_hit(hit: &mut SearchHit) {
    fill_from(&mut hit.source, "project_id", &["_tenant_id", "owner"]);
    fill_from(&mut hit.source, "updated_at", &["created_at"]);
}

fn fill_from(source: &mut Map<String, Value>, field: &str, fallbacks: &[&str]) {
    if source.get(field).is_some_and(is_present) {
        return;
    }
    let replacement = fallbacks
        .iter()
        .filter_map(|name| source.get(*name))
        .find(|value| is_present(value))
        .cloned();
    if let Some(value) = replacement {
        source.insert(field.to_string(), value);
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}
