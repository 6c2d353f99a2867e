// src/client.rs
// CommonTrace API client - one method per endpoint, circuit-breaker guarded

use crate::breaker::CircuitBreaker;
use crate::config::Settings;
use crate::error::{Result, TraceError};
use crate::http::create_client;
use crate::responses::{
    AmendmentResult, ContributionResult, SearchResponse, TagListResponse, TraceDetail, VoteResult,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

/// Payload for `POST /traces`
#[derive(Debug, Clone, Serialize)]
pub struct NewTrace {
    pub title: String,
    pub context_text: String,
    pub solution_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

/// Client for the CommonTrace HTTP API.
///
/// Reads (search/get/tags) and writes (contribute/vote/amend) use separate
/// reqwest clients so each gets its own SLA timeout. All calls pass through
/// one circuit breaker; when it is open, calls fail fast with
/// [`TraceError::CircuitOpen`] instead of hitting the network.
pub struct TraceApiClient {
    base_url: String,
    api_key: Option<String>,
    read_client: reqwest::Client,
    write_client: reqwest::Client,
    breaker: CircuitBreaker,
}

impl TraceApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            read_client: create_client(settings.read_timeout),
            write_client: create_client(settings.write_timeout),
            breaker: CircuitBreaker::new(
                settings.circuit_failure_threshold,
                settings.circuit_recovery_timeout,
            ),
        }
    }

    /// Search traces by semantic query, optionally filtered by tags.
    pub async fn search_traces(
        &self,
        query: &str,
        tags: Option<&[String]>,
        limit: Option<i64>,
    ) -> Result<SearchResponse> {
        debug!(query, "POST /traces/search");
        let mut body = json!({ "query": query });
        if let Some(tags) = tags {
            body["tags"] = json!(tags);
        }
        if let Some(limit) = limit {
            body["limit"] = json!(limit);
        }
        let req = self
            .with_auth(self.read_client.post(self.url("/traces/search")))
            .json(&body);
        self.execute(req).await
    }

    /// Fetch a single trace with full text.
    pub async fn get_trace(&self, trace_id: &str) -> Result<TraceDetail> {
        debug!(trace_id, "GET /traces/{{id}}");
        let req = self.with_auth(
            self.read_client
                .get(self.url(&format!("/traces/{}", trace_id))),
        );
        self.execute(req).await
    }

    /// Submit a new trace for community review.
    pub async fn contribute_trace(&self, trace: &NewTrace) -> Result<ContributionResult> {
        debug!(title = %trace.title, "POST /traces");
        let req = self
            .with_auth(self.write_client.post(self.url("/traces")))
            .json(trace);
        self.execute(req).await
    }

    /// Record an up/down vote on a trace.
    pub async fn vote_trace(&self, trace_id: &str, vote_type: &str) -> Result<VoteResult> {
        debug!(trace_id, vote_type, "POST /traces/{{id}}/votes");
        let req = self
            .with_auth(
                self.write_client
                    .post(self.url(&format!("/traces/{}/votes", trace_id))),
            )
            .json(&json!({ "vote_type": vote_type }));
        self.execute(req).await
    }

    /// List all known tags.
    pub async fn list_tags(&self) -> Result<TagListResponse> {
        debug!("GET /tags");
        let req = self.with_auth(self.read_client.get(self.url("/tags")));
        self.execute(req).await
    }

    /// Propose an amendment to an existing trace.
    pub async fn amend_trace(
        &self,
        trace_id: &str,
        amendment_text: &str,
        reason: Option<&str>,
    ) -> Result<AmendmentResult> {
        debug!(trace_id, "POST /traces/{{id}}/amendments");
        let mut body = json!({ "amendment_text": amendment_text });
        if let Some(reason) = reason {
            body["reason"] = json!(reason);
        }
        let req = self
            .with_auth(
                self.write_client
                    .post(self.url(&format!("/traces/{}/amendments", trace_id))),
            )
            .json(&body);
        self.execute(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    /// Send a request through the circuit breaker and decode the response.
    ///
    /// Transport errors and 5xx responses count as breaker failures; 4xx
    /// means the upstream is healthy and only produces an API error.
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        if !self.breaker.is_available() {
            return Err(TraceError::CircuitOpen);
        }

        let response = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                self.breaker.record_failure();
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            self.breaker.record_success();
            return Ok(response.json::<T>().await?);
        }

        if status.is_server_error() {
            self.breaker.record_failure();
        }

        Err(TraceError::Api {
            status: status.as_u16(),
            detail: extract_detail(status, response).await,
        })
    }
}

/// Pull the error detail out of a non-2xx response body. The API reports
/// failures as `{"detail": "..."}`; fall back to the raw body, then to the
/// canonical reason phrase.
async fn extract_detail(status: reqwest::StatusCode, response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&body)
        && let Some(detail) = parsed.get("detail").and_then(|d| d.as_str())
    {
        return detail.to_string();
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn client_with_base(base: &str) -> TraceApiClient {
        TraceApiClient::new(&Settings {
            api_base_url: base.to_string(),
            ..Settings::default()
        })
    }

    #[test]
    fn test_url_building() {
        let client = client_with_base("http://localhost:8000");
        assert_eq!(
            client.url("/traces/search"),
            "http://localhost:8000/traces/search"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = client_with_base("http://localhost:8000/");
        assert_eq!(client.url("/tags"), "http://localhost:8000/tags");
    }

    #[test]
    fn test_new_trace_skips_absent_fields() {
        let trace = NewTrace {
            title: "T".to_string(),
            context_text: "ctx".to_string(),
            solution_text: "sol".to_string(),
            tags: None,
            valid_from: None,
            valid_until: None,
        };
        let body = serde_json::to_value(&trace).unwrap();
        assert!(body.get("tags").is_none());
        assert!(body.get("valid_from").is_none());
        assert_eq!(body["title"], "T");
    }
}
