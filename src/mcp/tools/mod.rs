// src/mcp/tools/mod.rs
// Tool implementations, one module per API area

pub mod tags;
pub mod traces;

use crate::error::TraceError;
use crate::formatters::format_error;

/// Render any client failure as displayable text.
///
/// Tool handlers return this inside `Ok`, never `Err`: an API outage must
/// reach the agent as a readable error line, not fault the MCP session.
pub(crate) fn render_failure(err: TraceError) -> String {
    let (status, detail) = err.as_status_detail();
    format_error(status, &detail)
}
