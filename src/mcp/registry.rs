use std::{collections::HashMap, future::Future, pin::Pin};

use rmcp::model::{CallToolResult, JsonObject};

use super::{handlers::ToolError, server::ZepMemMcpServer};

pub type ToolFuture = Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send>>;

pub type ToolHandler = fn(&ZepMemMcpServer, Option<JsonObject>) -> ToolFuture;

/// Registry mapping tool names to handler functions.
pub struct Registry {
    pub tools: HashMap<&'static str, ToolHandler>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register_tool(&mut self, name: &'static str, handler: ToolHandler) {
        self.tools.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<ToolHandler> {
        self.tools.get(name).copied()
    }
}
