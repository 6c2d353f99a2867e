// src/mcp/tools/traces.rs
// Trace tools: search, get, contribute, vote, amend

use super::render_failure;
use crate::client::NewTrace;
use crate::formatters;
use crate::mcp::{ContributeTraceRequest, TraceServer};

/// Search traces and format the ranked results
pub async fn search_traces(
    server: &TraceServer,
    query: String,
    tags: Option<Vec<String>>,
    limit: Option<i64>,
) -> Result<String, String> {
    match server
        .client
        .search_traces(&query, tags.as_deref(), limit)
        .await
    {
        Ok(data) => Ok(formatters::format_search_results(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}

/// Fetch one trace with full text
pub async fn get_trace(server: &TraceServer, trace_id: String) -> Result<String, String> {
    match server.client.get_trace(&trace_id).await {
        Ok(data) => Ok(formatters::format_trace(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}

/// Submit a new trace
pub async fn contribute_trace(
    server: &TraceServer,
    req: ContributeTraceRequest,
) -> Result<String, String> {
    let trace = NewTrace {
        title: req.title,
        context_text: req.context_text,
        solution_text: req.solution_text,
        tags: req.tags,
        valid_from: req.valid_from,
        valid_until: req.valid_until,
    };
    match server.client.contribute_trace(&trace).await {
        Ok(data) => Ok(formatters::format_contribution_result(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}

/// Record a vote on a trace
pub async fn vote_trace(
    server: &TraceServer,
    trace_id: String,
    vote_type: String,
) -> Result<String, String> {
    match server.client.vote_trace(&trace_id, &vote_type).await {
        Ok(data) => Ok(formatters::format_vote_result(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}

/// Propose an amendment to an existing trace
pub async fn amend_trace(
    server: &TraceServer,
    trace_id: String,
    amendment_text: String,
    reason: Option<String>,
) -> Result<String, String> {
    match server
        .client
        .amend_trace(&trace_id, &amendment_text, reason.as_deref())
        .await
    {
        Ok(data) => Ok(formatters::format_amendment_result(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}
