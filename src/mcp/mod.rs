//! Model Context Protocol (MCP) integration for the Zep memory adapter.
//!
//! This module binds the memory wrapper to an MCP server so agent hosts can store and recall
//! conversation turns. The surface area is three tools: `create_memory`, `get_memory`, and
//! `search_memory`.
//!
//! Every tool call answers with a single text block: pretty-printed JSON on success, or
//! `Error: <message>` with the error flag set. Failures never surface as protocol errors.

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use handlers::ToolError;
pub use server::ZepMemMcpServer;

/// Tool that appends a message to a session.
pub const CREATE_MEMORY_TOOL: &str = "create_memory";
/// Tool that fetches a session's messages and summary.
pub const GET_MEMORY_TOOL: &str = "get_memory";
/// Tool that runs a semantic search over stored messages.
pub const SEARCH_MEMORY_TOOL: &str = "search_memory";

/// Role values advertised in the `create_memory` schema.
pub(crate) const MESSAGE_ROLES: [&str; 2] = ["user", "assistant"];
