//! Handler for the `get_memory` tool.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject};
use serde::Deserialize;

use crate::{
    mcp::{GET_MEMORY_TOOL, format::tool_success},
    memory::MemoryApi,
};

use super::{ToolError, parse_arguments};

/// Request payload accepted by the `get_memory` tool.
#[derive(Debug, Deserialize)]
pub(crate) struct GetMemoryRequest {
    /// Session to fetch.
    #[serde(rename = "sessionId")]
    pub(crate) session_id: String,
}

/// Handle the `get_memory` tool; every call re-fetches from the service.
pub(crate) async fn handle_get_memory(
    memory: &Arc<dyn MemoryApi>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, ToolError> {
    let GetMemoryRequest { session_id } = parse_arguments(GET_MEMORY_TOOL, arguments)?;
    let result = memory.get_memory(&session_id).await?;
    Ok(tool_success(&result, GET_MEMORY_TOOL))
}
