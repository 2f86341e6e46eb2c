#![deny(missing_docs)]

//! Core library for the Zep memory MCP adapter.

/// HTTP routing for the streamable MCP transport.
pub mod api;
/// Environment-driven configuration and the credential gate.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// Memory wrapper forwarding tool calls to the hosted service.
pub mod memory;
/// Zep REST API client.
pub mod zep;
