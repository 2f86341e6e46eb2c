//! Wire types exchanged with the Zep REST API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors returned while interacting with the memory service.
#[derive(Debug, Error)]
pub enum ZepError {
    /// Base URL failed to parse or cannot carry path segments.
    #[error("Invalid memory service URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service responded with an unexpected status code.
    #[error("Unexpected memory service response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// Body of `POST /sessions/{id}/memory`.
#[derive(Debug, Serialize)]
pub struct AddMemoryRequest<'a> {
    /// Messages appended to the session, in order.
    pub messages: Vec<MessageInput<'a>>,
}

/// One message appended to a session.
#[derive(Debug, Serialize)]
pub struct MessageInput<'a> {
    /// Display role of the speaker.
    pub role: &'a str,
    /// Role classification (`user` or `assistant`), forwarded verbatim.
    pub role_type: &'a str,
    /// Message text.
    pub content: &'a str,
}

/// Message as stored by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMessage {
    /// Display role of the speaker.
    #[serde(default)]
    pub role: Option<String>,
    /// Role classification.
    #[serde(default)]
    pub role_type: Option<String>,
    /// Message text.
    #[serde(default)]
    pub content: Option<String>,
    /// Creation timestamp, RFC3339.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Arbitrary metadata attached to the message.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Response of `GET /sessions/{id}/memory`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionMemoryPayload {
    /// Messages in session order. `null` is treated as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<WireMessage>,
    /// Running summary maintained by the service.
    #[serde(default)]
    pub summary: Option<SummaryPayload>,
}

/// Running session summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryPayload {
    /// Summary text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `POST /sessions/search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    /// Natural language query.
    pub text: &'a str,
    /// Scope of the search; always `messages`.
    pub search_scope: &'a str,
}

/// Response of `POST /sessions/search`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) results: Vec<SearchHitPayload>,
}

/// One ranked search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHitPayload {
    /// Matching message, when the hit came from a message.
    #[serde(default)]
    pub message: Option<WireMessage>,
    /// Relevance score computed by the service.
    #[serde(default)]
    pub score: Option<f64>,
    /// Session owning the matching message.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Metadata attached to the hit.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
