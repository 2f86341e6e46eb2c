//! HTTP surface for the memory adapter.
//!
//! This module exposes a compact Axum router:
//!
//! - `/mcp` – Streamable HTTP MCP endpoint (JSON responses plus server-sent event streams).
//! - `GET /health` – Liveness probe with the server name and version.
//!
//! Every route sits behind a permissive CORS layer, so browser-hosted MCP clients can connect from
//! any origin. `OPTIONS` preflights are answered with `200` and an empty body.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::mcp::ZepMemMcpServer;

/// Path the MCP service is mounted under.
pub const MCP_PATH: &str = "/mcp";

/// Build the HTTP router exposing the MCP endpoint and health probe.
///
/// With `stateful` unset each request is served by a fresh, independent MCP exchange.
pub fn create_router(server: ZepMemMcpServer, stateful: bool) -> Router {
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            stateful_mode: stateful,
            ..Default::default()
        },
    );

    Router::new()
        .route("/health", get(get_health))
        .nest_service(MCP_PATH, mcp_service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    name: &'static str,
    version: &'static str,
}

async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
