use std::sync::Arc;

use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use rmcp::{
    handler::{client::ClientHandler, server::ServerHandler},
    model::{CallToolRequestParam, CallToolResult, ClientInfo, PaginatedRequestParam},
    service::{RoleClient, RoleServer, RunningService, serve_directly},
    transport::async_rw::AsyncRwTransport,
};
use serde_json::{Value, json};
use tokio::io::split;
use zepmem::{logging, mcp::ZepMemMcpServer, memory::MemoryService, zep::ZepService};

#[derive(Clone, Default)]
struct DummyClientHandler;

impl ClientHandler for DummyClientHandler {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

struct TestHarness {
    service: RunningService<RoleClient, DummyClientHandler>,
    server: RunningService<RoleServer, ZepMemMcpServer>,
}

impl TestHarness {
    async fn new(mock: &MockServer) -> Self {
        logging::init_tracing();

        let zep = ZepService::with_client(reqwest::Client::new(), &mock.base_url(), "test-key".into())
            .expect("memory service client");
        let server = ZepMemMcpServer::new(Arc::new(MemoryService::from_client(zep)));

        let (client_stream, server_stream) = tokio::io::duplex(16 * 1024);
        let (client_read, client_write) = split(client_stream);
        let (server_read, server_write) = split(server_stream);

        let client_transport = AsyncRwTransport::new_client(client_read, client_write);
        let server_transport = AsyncRwTransport::new_server(server_read, server_write);

        let server_info = ServerHandler::get_info(&server);
        let client_handler = DummyClientHandler;
        let client_info = ClientHandler::get_info(&client_handler);

        let server =
            serve_directly::<RoleServer, _, _, _, _>(server, server_transport, Some(client_info));
        let service = serve_directly::<RoleClient, _, _, _, _>(
            client_handler,
            client_transport,
            Some(server_info),
        );

        Self { service, server }
    }

    async fn call(&self, name: &'static str, arguments: Value) -> CallToolResult {
        self.service
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments: arguments.as_object().cloned(),
            })
            .await
            .expect("tool calls never fail at the protocol level")
    }

    async fn shutdown(self) {
        let Self { service, server } = self;
        let _ = service.cancel().await;
        let _ = server.cancel().await;
    }
}

fn text_of(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "exactly one content block");
    result.content[0]
        .raw
        .as_text()
        .map(|text| text.text.clone())
        .expect("text content")
}

fn json_of(result: &CallToolResult) -> Value {
    assert_eq!(result.is_error, Some(false), "unexpected error: {}", text_of(result));
    serde_json::from_str(&text_of(result)).expect("payload is JSON")
}

#[tokio::test]
async fn initialize_and_list_tools() {
    let mock = MockServer::start_async().await;
    let harness = TestHarness::new(&mock).await;
    let service = &harness.service;

    let info = service
        .peer_info()
        .expect("server info should be initialized");
    assert_eq!(info.server_info.name, "zep-memory");
    assert!(info.capabilities.tools.is_some());

    let tools = service
        .list_tools(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_tools")
        .tools;

    let required = |name: &str| {
        tools
            .iter()
            .find(|tool| tool.name == name)
            .map(|tool| tool.input_schema["required"].clone())
            .unwrap_or_else(|| panic!("{name} should be listed"))
    };
    assert_eq!(tools.len(), 3);
    assert_eq!(required("create_memory"), json!(["sessionId", "message", "role"]));
    assert_eq!(required("get_memory"), json!(["sessionId"]));
    assert_eq!(required("search_memory"), json!(["query"]));

    harness.shutdown().await;
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let mock = MockServer::start_async().await;
    let create = mock
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions/s1/memory")
                .header("authorization", "Api-Key test-key")
                .json_body(json!({
                    "messages": [{ "role": "user", "role_type": "user", "content": "hello" }]
                }));
            then.status(200).json_body(json!({ "message": "OK" }));
        })
        .await;
    let fetch = mock
        .mock_async(|when, then| {
            when.method(GET).path("/sessions/s1/memory");
            then.status(200).json_body(json!({
                "messages": [{ "role": "user", "role_type": "user", "content": "hello" }]
            }));
        })
        .await;
    let harness = TestHarness::new(&mock).await;

    let created = harness
        .call(
            "create_memory",
            json!({ "sessionId": "s1", "message": "hello", "role": "user" }),
        )
        .await;
    assert_eq!(json_of(&created), json!({ "success": true, "sessionId": "s1" }));
    create.assert_async().await;

    let first = harness
        .call("get_memory", json!({ "sessionId": "s1" }))
        .await;
    let first = json_of(&first);
    assert_eq!(first["sessionId"], "s1");
    assert_eq!(
        first["messages"],
        json!([{ "role": "user", "content": "hello" }])
    );

    let second = harness
        .call("get_memory", json!({ "sessionId": "s1" }))
        .await;
    assert_eq!(json_of(&second), first);
    assert_eq!(fetch.hits_async().await, 2);

    harness.shutdown().await;
}

#[tokio::test]
async fn unseen_session_returns_no_messages() {
    let mock = MockServer::start_async().await;
    mock.mock_async(|when, then| {
        when.method(GET).path("/sessions/fresh/memory");
        then.status(404).body("session not found");
    })
    .await;
    let harness = TestHarness::new(&mock).await;

    let result = harness
        .call("get_memory", json!({ "sessionId": "fresh" }))
        .await;
    assert_eq!(
        json_of(&result),
        json!({ "sessionId": "fresh", "messages": [] })
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn search_defaults_to_ten_results() {
    let mock = MockServer::start_async().await;
    let search = mock
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions/search")
                .query_param("limit", "10")
                .json_body(json!({ "text": "deploy window", "search_scope": "messages" }));
            then.status(200).json_body(json!({
                "results": [
                    {
                        "message": { "content": "deploys happen on friday" },
                        "score": 0.87,
                        "session_id": "ops",
                        "metadata": { "channel": "slack" }
                    },
                    { "message": { "content": "freeze starts monday" } }
                ]
            }));
        })
        .await;
    let harness = TestHarness::new(&mock).await;

    let result = harness
        .call("search_memory", json!({ "query": "deploy window" }))
        .await;
    search.assert_async().await;
    assert_eq!(
        json_of(&result),
        json!([
            {
                "content": "deploys happen on friday",
                "score": 0.87,
                "sessionId": "ops",
                "metadata": { "channel": "slack" }
            },
            { "content": "freeze starts monday", "score": 0.0 }
        ])
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn upstream_rejection_of_role_is_reported() {
    let mock = MockServer::start_async().await;
    let create = mock
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions/s1/memory")
                .json_body(json!({
                    "messages": [{ "role": "system", "role_type": "system", "content": "hi" }]
                }));
            then.status(400).body("role_type must be user or assistant");
        })
        .await;
    let harness = TestHarness::new(&mock).await;

    let result = harness
        .call(
            "create_memory",
            json!({ "sessionId": "s1", "message": "hi", "role": "system" }),
        )
        .await;
    create.assert_async().await;
    assert_eq!(result.is_error, Some(true));
    let text = text_of(&result);
    assert!(text.starts_with("Error: Failed to create memory: "));
    assert!(text.contains("role_type must be user or assistant"));

    harness.shutdown().await;
}

#[tokio::test]
async fn unknown_tool_keeps_connection_usable() {
    let mock = MockServer::start_async().await;
    let harness = TestHarness::new(&mock).await;

    let result = harness.call("forget_everything", json!({})).await;
    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("forget_everything"));

    let tools = harness
        .service
        .list_tools(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("connection still serves requests");
    assert_eq!(tools.tools.len(), 3);

    harness.shutdown().await;
}
