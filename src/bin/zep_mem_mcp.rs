//! MCP server entrypoint (stdio transport).
//!
//! Launches an MCP server that exposes the memory tools over stdio for local editor and agent
//! integrations. Exits with code 1 before registering any tool when `ZEP_API_KEY` is missing.
use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{service::ServiceExt, transport::stdio};
use zepmem::{config, logging, mcp::ZepMemMcpServer, memory::MemoryService};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let config = config::init_config().context("refusing to start")?;

    let memory = MemoryService::new(config).context("failed to build memory service client")?;
    let server = ZepMemMcpServer::new(Arc::new(memory));

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
