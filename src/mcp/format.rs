//! Rendering of tool outcomes into MCP call results.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use super::handlers::ToolError;

/// Serialize a value to pretty JSON, falling back to compact formatting on error.
pub(crate) fn serialize_json<T: Serialize>(value: &T, tool: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::warn!(tool, %error, "Failed to serialize JSON prettily");
        serde_json::to_string(value).unwrap_or_else(|_| "null".into())
    })
}

/// Wrap a successful payload as a single pretty-printed text block.
pub(crate) fn tool_success<T: Serialize>(payload: &T, tool: &str) -> CallToolResult {
    CallToolResult::success(vec![Content::text(serialize_json(payload, tool))])
}

/// Wrap a failure as `Error: <message>` with the error flag set.
pub(crate) fn tool_error(error: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {error}"))])
}
