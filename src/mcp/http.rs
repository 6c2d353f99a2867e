// src/mcp/http.rs
// MCP over HTTP (Streamable HTTP transport)

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::client::TraceApiClient;
use crate::mcp::TraceServer;

/// Create the MCP HTTP service
pub fn create_mcp_service(
    client: Arc<TraceApiClient>,
) -> StreamableHttpService<TraceServer, LocalSessionManager> {
    // Service factory - creates a new TraceServer for each session
    let service_factory = move || Ok(TraceServer::new(client.clone()));

    let session_manager = Arc::new(LocalSessionManager::default());

    let config = StreamableHttpServerConfig {
        sse_keep_alive: Some(std::time::Duration::from_secs(15)),
        sse_retry: None,
        stateful_mode: true,
        cancellation_token: CancellationToken::new(),
    };

    StreamableHttpService::new(service_factory, session_manager, config)
}
