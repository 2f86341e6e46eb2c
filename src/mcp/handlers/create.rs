//! Handler for the `create_memory` tool.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject};
use serde::Deserialize;

use crate::{
    mcp::{CREATE_MEMORY_TOOL, format::tool_success},
    memory::MemoryApi,
};

use super::{ToolError, parse_arguments};

/// Request payload accepted by the `create_memory` tool.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateMemoryRequest {
    /// Session the message belongs to.
    #[serde(rename = "sessionId")]
    pub(crate) session_id: String,
    /// Message text to remember.
    pub(crate) message: String,
    /// Speaker role; forwarded without local validation.
    pub(crate) role: String,
}

/// Handle the `create_memory` tool by appending one message to the session.
pub(crate) async fn handle_create_memory(
    memory: &Arc<dyn MemoryApi>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, ToolError> {
    let CreateMemoryRequest {
        session_id,
        message,
        role,
    } = parse_arguments(CREATE_MEMORY_TOOL, arguments)?;

    let outcome = memory.create_memory(&session_id, &message, &role).await?;
    Ok(tool_success(&outcome, CREATE_MEMORY_TOOL))
}
