//! In-memory [`MemoryApi`] used by dispatcher tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::memory::{
    CreateMemoryOutcome, DEFAULT_SEARCH_LIMIT, MemoryApi, MemoryError, MemoryResult, Message,
    SearchResult,
};

/// Call observed by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedCall {
    Create {
        session_id: String,
        message: String,
        role: String,
    },
    Get {
        session_id: String,
    },
    Search {
        query: String,
        limit: Option<usize>,
    },
}

/// Stores sessions in a map and rejects roles the way the hosted service does.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    sessions: Mutex<HashMap<String, Vec<Message>>>,
    calls: Mutex<Vec<RecordedCall>>,
    outage: Option<String>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with `cause`.
    pub(crate) fn failing(cause: &str) -> Self {
        Self {
            outage: Some(cause.to_string()),
            ..Self::default()
        }
    }

    pub(crate) async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl MemoryApi for InMemoryStore {
    async fn create_memory(
        &self,
        session_id: &str,
        message: &str,
        role: &str,
    ) -> Result<CreateMemoryOutcome, MemoryError> {
        self.record(RecordedCall::Create {
            session_id: session_id.to_string(),
            message: message.to_string(),
            role: role.to_string(),
        })
        .await;
        if let Some(cause) = &self.outage {
            return Err(MemoryError::Create(cause.clone()));
        }
        if role != "user" && role != "assistant" {
            return Err(MemoryError::Create(format!(
                "Unexpected memory service response (400 Bad Request): invalid role_type '{role}'"
            )));
        }

        self.sessions
            .lock()
            .await
            .entry(session_id.to_string())
            .or_default()
            .push(Message {
                role: role.to_string(),
                content: message.to_string(),
                timestamp: None,
            });
        Ok(CreateMemoryOutcome {
            success: true,
            session_id: session_id.to_string(),
        })
    }

    async fn get_memory(&self, session_id: &str) -> Result<MemoryResult, MemoryError> {
        self.record(RecordedCall::Get {
            session_id: session_id.to_string(),
        })
        .await;
        if let Some(cause) = &self.outage {
            return Err(MemoryError::Retrieve(cause.clone()));
        }

        let messages = self
            .sessions
            .lock()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default();
        Ok(MemoryResult {
            session_id: session_id.to_string(),
            messages,
            summary: None,
        })
    }

    async fn search_memory(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, MemoryError> {
        self.record(RecordedCall::Search {
            query: query.to_string(),
            limit,
        })
        .await;
        if let Some(cause) = &self.outage {
            return Err(MemoryError::Search(cause.clone()));
        }

        let needle = query.to_lowercase();
        let sessions = self.sessions.lock().await;
        let mut results: Vec<SearchResult> = sessions
            .iter()
            .flat_map(|(session_id, messages)| {
                messages
                    .iter()
                    .filter(|message| message.content.to_lowercase().contains(&needle))
                    .map(move |message| SearchResult {
                        content: message.content.clone(),
                        score: 1.0,
                        session_id: Some(session_id.clone()),
                        metadata: None,
                    })
            })
            .collect();
        results.truncate(limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
        Ok(results)
    }
}
