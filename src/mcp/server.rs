//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        CREATE_MEMORY_TOOL, GET_MEMORY_TOOL, SEARCH_MEMORY_TOOL,
        format::tool_error,
        handlers::{
            ToolError, create::handle_create_memory, get::handle_get_memory,
            search::handle_search_memory,
        },
        registry, schemas,
    },
    memory::MemoryApi,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, JsonObject, ListToolsResult, ServerCapabilities,
        ServerInfo, Tool, ToolAnnotations,
    },
};

/// MCP server exposing the memory tools.
///
/// Holds the single memory client built at startup; cloning shares it.
#[derive(Clone)]
pub struct ZepMemMcpServer {
    memory: Arc<dyn MemoryApi>,
    registry: Arc<registry::Registry>,
}

impl ZepMemMcpServer {
    /// Create a new MCP server forwarding to the supplied memory backend.
    pub fn new(memory: Arc<dyn MemoryApi>) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_tool(CREATE_MEMORY_TOOL, tool_create_memory);
        registry.register_tool(GET_MEMORY_TOOL, tool_get_memory);
        registry.register_tool(SEARCH_MEMORY_TOOL, tool_search_memory);

        Self {
            memory,
            registry: Arc::new(registry),
        }
    }

    /// Static descriptors returned by `tools/list`.
    pub fn describe_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed(CREATE_MEMORY_TOOL),
                title: Some("Create Memory".to_string()),
                description: Some(Cow::Borrowed(
                    "Store a message in a conversation session so it can be recalled later.",
                )),
                input_schema: Arc::new(schemas::create_memory_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Create Memory")
                        .destructive(false)
                        .idempotent(false)
                        .open_world(true),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(GET_MEMORY_TOOL),
                title: Some("Get Memory".to_string()),
                description: Some(Cow::Borrowed(
                    "Retrieve every remembered message and the running summary for a session.",
                )),
                input_schema: Arc::new(schemas::get_memory_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Get Memory")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(true),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(SEARCH_MEMORY_TOOL),
                title: Some("Search Memory".to_string()),
                description: Some(Cow::Borrowed(
                    "Find remembered messages semantically related to a query across sessions.",
                )),
                input_schema: Arc::new(schemas::search_memory_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Search Memory")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(true),
                ),
                icons: None,
            },
        ]
    }

    /// Run one tool call and render its outcome.
    ///
    /// Never fails: unknown tools, bad arguments, and backend errors all become an
    /// `Error: <message>` text block with the error flag set.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let outcome = match self.registry.get(name) {
            Some(handler) => handler(self, arguments).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        match outcome {
            Ok(result) => {
                tracing::info!(tool = name, "Tool call succeeded");
                result
            }
            Err(error) => {
                tracing::warn!(tool = name, %error, "Tool call failed");
                tool_error(&error)
            }
        }
    }
}

fn tool_create_memory(
    server: &ZepMemMcpServer,
    arguments: Option<JsonObject>,
) -> registry::ToolFuture {
    let memory = server.memory.clone();
    Box::pin(async move { handle_create_memory(&memory, arguments).await })
}

fn tool_get_memory(server: &ZepMemMcpServer, arguments: Option<JsonObject>) -> registry::ToolFuture {
    let memory = server.memory.clone();
    Box::pin(async move { handle_get_memory(&memory, arguments).await })
}

fn tool_search_memory(
    server: &ZepMemMcpServer,
    arguments: Option<JsonObject>,
) -> registry::ToolFuture {
    let memory = server.memory.clone();
    Box::pin(async move { handle_search_memory(&memory, arguments).await })
}

impl ServerHandler for ZepMemMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "zep-memory".to_string();
        implementation.title = Some("Zep Memory MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: implementation,
            instructions: Some(
                "Use create_memory to record each conversation turn under a session id, get_memory to recall a whole session, and search_memory to find related messages across sessions.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.dispatch(request.name.as_ref(), request.arguments).await) }
    }
}
