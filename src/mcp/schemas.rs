//! JSON schema builders for MCP tools.

use crate::{mcp::MESSAGE_ROLES, memory::DEFAULT_SEARCH_LIMIT};
use serde_json::{Map, Value};

/// Build the schema describing the `create_memory` tool input.
pub(crate) fn create_memory_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "sessionId".into(),
        string_schema("Identifier of the conversation session to append to"),
    );
    properties.insert("message".into(), string_schema("Message text to remember"));

    let mut role_schema = Map::new();
    role_schema.insert("type".into(), Value::String("string".into()));
    role_schema.insert(
        "description".into(),
        Value::String("Who said the message".into()),
    );
    role_schema.insert(
        "enum".into(),
        Value::Array(
            MESSAGE_ROLES
                .into_iter()
                .map(|role| Value::String(role.into()))
                .collect(),
        ),
    );
    properties.insert("role".into(), Value::Object(role_schema));

    finalize_object_schema(properties, &["sessionId", "message", "role"])
}

/// Build the schema describing the `get_memory` tool input.
pub(crate) fn get_memory_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "sessionId".into(),
        string_schema("Identifier of the conversation session to retrieve"),
    );
    finalize_object_schema(properties, &["sessionId"])
}

/// Build the schema describing the `search_memory` tool input.
pub(crate) fn search_memory_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "query".into(),
        string_schema("Natural language text to search stored messages with"),
    );

    let mut limit_schema = Map::new();
    limit_schema.insert("type".into(), Value::String("number".into()));
    limit_schema.insert(
        "description".into(),
        Value::String("Maximum number of results to return".into()),
    );
    limit_schema.insert("minimum".into(), Value::Number(0.into()));
    limit_schema.insert(
        "default".into(),
        Value::Number(serde_json::Number::from(DEFAULT_SEARCH_LIMIT as u64)),
    );
    properties.insert("limit".into(), Value::Object(limit_schema));

    finalize_object_schema(properties, &["query"])
}

fn string_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn finalize_object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(
                required
                    .iter()
                    .map(|&key| Value::String(key.into()))
                    .collect(),
            ),
        );
    }
    schema
}
