// src/mcp/mod.rs
// MCP server implementation

pub mod http;
pub mod tools;

use crate::client::TraceApiClient;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::sync::Arc;

/// MCP server state
#[derive(Clone)]
pub struct TraceServer {
    pub client: Arc<TraceApiClient>,
    tool_router: ToolRouter<Self>,
}

impl TraceServer {
    pub fn new(client: Arc<TraceApiClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// Request types for tools with parameters

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchTracesRequest {
    #[schemars(description = "What problem are you trying to solve? Natural-language query.")]
    pub query: String,
    #[schemars(description = "Restrict results to traces carrying all of these tags")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Max results")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTraceRequest {
    #[schemars(description = "Trace ID")]
    pub trace_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ContributeTraceRequest {
    #[schemars(description = "Short title describing the problem/solution pair")]
    pub title: String,
    #[schemars(description = "The problem context: what was happening, environment, symptoms")]
    pub context_text: String,
    #[schemars(description = "The solution that worked")]
    pub solution_text: String,
    #[schemars(description = "Tags for discoverability")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "ISO date from which the solution is valid")]
    pub valid_from: Option<String>,
    #[schemars(description = "ISO date after which the solution is stale")]
    pub valid_until: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VoteTraceRequest {
    #[schemars(description = "Trace ID to vote on")]
    pub trace_id: String,
    #[schemars(description = "Vote type: up or down")]
    pub vote_type: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AmendTraceRequest {
    #[schemars(description = "Trace ID the amendment applies to")]
    pub trace_id: String,
    #[schemars(description = "The proposed correction or update")]
    pub amendment_text: String,
    #[schemars(description = "Why the original trace needs amending")]
    pub reason: Option<String>,
}

#[tool_router]
impl TraceServer {
    #[tool(
        description = "Search community traces for solutions to a problem. Returns ranked results with trust/similarity scores and snippets."
    )]
    async fn search_traces(
        &self,
        Parameters(req): Parameters<SearchTracesRequest>,
    ) -> Result<String, String> {
        tools::traces::search_traces(self, req.query, req.tags, req.limit).await
    }

    #[tool(description = "Fetch a single trace by ID with full context and solution text.")]
    async fn get_trace(
        &self,
        Parameters(req): Parameters<GetTraceRequest>,
    ) -> Result<String, String> {
        tools::traces::get_trace(self, req.trace_id).await
    }

    #[tool(
        description = "Contribute a new problem/solution trace. It enters community review before becoming searchable."
    )]
    async fn contribute_trace(
        &self,
        Parameters(req): Parameters<ContributeTraceRequest>,
    ) -> Result<String, String> {
        tools::traces::contribute_trace(self, req).await
    }

    #[tool(description = "Vote a trace up or down based on whether its solution worked for you.")]
    async fn vote_trace(
        &self,
        Parameters(req): Parameters<VoteTraceRequest>,
    ) -> Result<String, String> {
        tools::traces::vote_trace(self, req.trace_id, req.vote_type).await
    }

    #[tool(description = "List all tags in use, sorted alphabetically.")]
    async fn list_tags(&self) -> Result<String, String> {
        tools::tags::list_tags(self).await
    }

    #[tool(
        description = "Propose an amendment to an existing trace (correction or update). Reviewed by the community."
    )]
    async fn amend_trace(
        &self,
        Parameters(req): Parameters<AmendTraceRequest>,
    ) -> Result<String, String> {
        tools::traces::amend_trace(self, req.trace_id, req.amendment_text, req.reason).await
    }
}

#[tool_handler]
impl ServerHandler for TraceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "commontrace-mcp".into(),
                title: Some("CommonTrace - community problem/solution traces".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "CommonTrace lets agents search, contribute, and vote on community problem/solution traces."
                    .into(),
            ),
        }
    }
}
