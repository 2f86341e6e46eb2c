//! Conversions from service wire payloads into wrapper types.

use crate::memory::types::{MemoryResult, Message, SearchResult};
use crate::zep::{SearchHitPayload, SessionMemoryPayload, WireMessage};

/// Map a stored message, defaulting missing fields to empty text.
pub(crate) fn map_message(message: WireMessage) -> Message {
    let WireMessage {
        role,
        role_type,
        content,
        created_at,
        ..
    } = message;
    Message {
        role: role_type.or(role).unwrap_or_default(),
        content: content.unwrap_or_default(),
        timestamp: created_at,
    }
}

/// Map a session fetch; `None` means the service has no record of the session.
pub(crate) fn map_session_memory(
    session_id: &str,
    payload: Option<SessionMemoryPayload>,
) -> MemoryResult {
    let payload = payload.unwrap_or_default();
    let summary = payload
        .summary
        .and_then(|summary| summary.content)
        .filter(|content| !content.trim().is_empty());

    MemoryResult {
        session_id: session_id.to_string(),
        messages: payload.messages.into_iter().map(map_message).collect(),
        summary,
    }
}

/// Map one search hit; score defaults to `0` and metadata falls back to the message's.
pub(crate) fn map_search_hit(hit: SearchHitPayload) -> SearchResult {
    let SearchHitPayload {
        message,
        score,
        session_id,
        metadata,
    } = hit;
    let (content, message_metadata) = match message {
        Some(message) => (message.content.unwrap_or_default(), message.metadata),
        None => (String::new(), None),
    };

    SearchResult {
        content,
        score: score.unwrap_or(0.0),
        session_id,
        metadata: metadata.or(message_metadata),
    }
}
