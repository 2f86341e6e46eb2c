//! Tool handlers for the MCP server.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::memory::MemoryError;

pub mod create;
pub mod get;
pub mod search;

/// Failure of a single tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    /// Arguments were missing or had the wrong type.
    #[error("Invalid arguments for {tool}: {detail}")]
    InvalidArguments {
        /// Tool whose arguments failed to decode.
        tool: &'static str,
        /// Decoder message naming the offending field.
        detail: String,
    },
    /// The memory backend rejected or failed the operation.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Decode the argument bag supplied to a tool invocation into its request type.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &'static str,
    arguments: Option<JsonObject>,
) -> Result<T, ToolError> {
    let value = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|err| ToolError::InvalidArguments {
        tool,
        detail: err.to_string(),
    })
}

/// Parse the single JSON text block of a successful tool result.
#[cfg(test)]
pub(crate) fn payload_of(result: &rmcp::model::CallToolResult) -> Value {
    assert_eq!(result.is_error, Some(false));
    let text = result.content[0]
        .raw
        .as_text()
        .map(|text| text.text.as_str())
        .expect("text content");
    serde_json::from_str(text).expect("payload is JSON")
}
