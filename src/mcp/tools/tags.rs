// src/mcp/tools/tags.rs
// Tag listing tool

use super::render_failure;
use crate::formatters;
use crate::mcp::TraceServer;

/// List all tags, sorted with a count header
pub async fn list_tags(server: &TraceServer) -> Result<String, String> {
    match server.client.list_tags().await {
        Ok(data) => Ok(formatters::format_tags(&data)),
        Err(e) => Ok(render_failure(e)),
    }
}
