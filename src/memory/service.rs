//! Memory service forwarding create/get/search calls to the hosted backend.

use crate::{
    config::Config,
    memory::{
        mappers::{map_search_hit, map_session_memory},
        types::{
            CreateMemoryOutcome, DEFAULT_SEARCH_LIMIT, MemoryError, MemoryResult, SearchResult,
        },
    },
    zep::{MessageInput, ZepError, ZepService},
};
use async_trait::async_trait;

/// Abstraction over the memory backend used by the MCP dispatcher.
///
/// Every failure is flattened into a [`MemoryError`] so callers never see a raw transport
/// error or a partial result.
#[async_trait]
pub trait MemoryApi: Send + Sync {
    /// Append one message to a session.
    async fn create_memory(
        &self,
        session_id: &str,
        message: &str,
        role: &str,
    ) -> Result<CreateMemoryOutcome, MemoryError>;

    /// Fetch the full remembered conversation for a session.
    async fn get_memory(&self, session_id: &str) -> Result<MemoryResult, MemoryError>;

    /// Run a semantic search, returning at most `limit` results (default 10).
    async fn search_memory(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, MemoryError>;
}

/// Forwards wrapper operations to the Zep REST API.
///
/// Construct once at process start and share through an `Arc`.
pub struct MemoryService {
    zep: ZepService,
}

impl MemoryService {
    /// Build the service from validated configuration.
    pub fn new(config: &Config) -> Result<Self, ZepError> {
        Ok(Self::from_client(ZepService::new(config)?))
    }

    /// Wrap an already constructed client.
    pub fn from_client(zep: ZepService) -> Self {
        Self { zep }
    }
}

#[async_trait]
impl MemoryApi for MemoryService {
    async fn create_memory(
        &self,
        session_id: &str,
        message: &str,
        role: &str,
    ) -> Result<CreateMemoryOutcome, MemoryError> {
        tracing::debug!(session_id, role, "Creating memory");
        self.zep
            .add_messages(
                session_id,
                vec![MessageInput {
                    role,
                    role_type: role,
                    content: message,
                }],
            )
            .await
            .map_err(|err| MemoryError::Create(err.to_string()))?;

        Ok(CreateMemoryOutcome {
            success: true,
            session_id: session_id.to_string(),
        })
    }

    async fn get_memory(&self, session_id: &str) -> Result<MemoryResult, MemoryError> {
        let payload = self
            .zep
            .get_session_memory(session_id)
            .await
            .map_err(|err| MemoryError::Retrieve(err.to_string()))?;
        let result = map_session_memory(session_id, payload);
        tracing::debug!(
            session_id,
            messages = result.messages.len(),
            has_summary = result.summary.is_some(),
            "Retrieved memory"
        );
        Ok(result)
    }

    async fn search_memory(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, MemoryError> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hits = self
            .zep
            .search_sessions(query, limit)
            .await
            .map_err(|err| MemoryError::Search(err.to_string()))?;

        let mut results: Vec<SearchResult> = hits.into_iter().map(map_search_hit).collect();
        results.truncate(limit);
        tracing::debug!(limit, results = results.len(), "Searched memory");
        Ok(results)
    }
}
