//! Request-scoped shapes returned by the memory wrapper.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Result cap applied when callers omit `limit`.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Errors surfaced by [`crate::memory::MemoryApi`] operations.
///
/// Only the message of the underlying failure is kept; its type is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Appending a message failed.
    #[error("Failed to create memory: {0}")]
    Create(String),
    /// Fetching a session failed.
    #[error("Failed to retrieve memory: {0}")]
    Retrieve(String),
    /// Running a search failed.
    #[error("Failed to search memory: {0}")]
    Search(String),
}

/// One remembered conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Speaker role, normally `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
    /// Creation timestamp reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Full remembered conversation for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResult {
    /// Session identifier echoed from the request.
    pub session_id: String,
    /// Messages in session order.
    pub messages: Vec<Message>,
    /// Running summary, when the service maintains one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One semantic search match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matching text.
    pub content: String,
    /// Relevance score; `0` when the service omitted it.
    pub score: f64,
    /// Session owning the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Metadata attached to the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Acknowledgement returned after a message is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryOutcome {
    /// Always `true` when returned; failures surface as [`MemoryError`].
    pub success: bool,
    /// Session the message was appended to.
    pub session_id: String,
}
