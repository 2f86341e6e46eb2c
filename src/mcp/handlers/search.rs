//! Handler for the `search_memory` tool.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject};
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::{
    mcp::{SEARCH_MEMORY_TOOL, format::tool_success},
    memory::MemoryApi,
};

use super::{ToolError, parse_arguments};

/// Request payload accepted by the `search_memory` tool.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchMemoryRequest {
    /// Natural language query.
    pub(crate) query: String,
    /// Optional result cap; no upper bound is applied here.
    #[serde(default, deserialize_with = "whole_number")]
    pub(crate) limit: Option<usize>,
}

/// Accept any JSON number that is whole and non-negative, so `5` and `5.0` both mean 5.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(value) = number.as_u64() {
        return usize::try_from(value)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("limit {number} is out of range")));
    }
    match number.as_f64() {
        Some(value) if value >= 0.0 && value.fract() == 0.0 && value < usize::MAX as f64 => {
            Ok(Some(value as usize))
        }
        _ => Err(D::Error::custom(format!(
            "limit must be a non-negative whole number, got {number}"
        ))),
    }
}

/// Handle the `search_memory` tool, returning the ranked hits as a JSON array.
pub(crate) async fn handle_search_memory(
    memory: &Arc<dyn MemoryApi>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, ToolError> {
    let SearchMemoryRequest { query, limit } = parse_arguments(SEARCH_MEMORY_TOOL, arguments)?;
    let results = memory.search_memory(&query, limit).await?;
    Ok(tool_success(&results, SEARCH_MEMORY_TOOL))
}
