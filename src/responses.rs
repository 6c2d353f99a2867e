// src/responses.rs
// Typed views of CommonTrace API response bodies.
//
// Every field the API may omit is optional (or defaulted), and each
// formatter applies its own per-field default at the point of use. The
// formatters must stay total over a fully-empty body, so nothing here is
// required.

use serde::Deserialize;

/// `POST /traces/search` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TraceSummary>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub query: Option<String>,
}

/// One search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub retrieval_count: Option<i64>,
    /// Integer in practice, but the API may send a float
    #[serde(default)]
    pub depth_score: Option<f64>,
    #[serde(default)]
    pub context_text: Option<String>,
    #[serde(default)]
    pub solution_text: Option<String>,
    /// Staleness classification from the server: "FROZEN", "COLD", or other
    #[serde(default)]
    pub memory_temperature: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub related_traces: Vec<RelatedTrace>,
}

/// Related-trace entry nested under a search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedTrace {
    #[serde(default)]
    pub relationship_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /traces/{id}` response - full trace, text shown unabbreviated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub retrieval_count: Option<i64>,
    /// Integer in practice, but the API may send a float
    #[serde(default)]
    pub depth_score: Option<f64>,
    #[serde(default)]
    pub context_text: Option<String>,
    #[serde(default)]
    pub solution_text: Option<String>,
    #[serde(default)]
    pub memory_temperature: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

/// `POST /traces` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `POST /traces/{id}/votes` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteResult {
    #[serde(default)]
    pub vote_type: Option<String>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /tags` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListResponse {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `POST /traces/{id}/amendments` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmendmentResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub original_trace_id: Option<String>,
}
