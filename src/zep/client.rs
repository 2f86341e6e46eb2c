//! HTTP client wrapper for the Zep session memory API.

use crate::config::Config;
use crate::zep::types::{
    AddMemoryRequest, MessageInput, SearchHitPayload, SearchRequest, SearchResponse,
    SessionMemoryPayload, ZepError,
};
use reqwest::{Client, Method, StatusCode, Url};

/// Lightweight HTTP client for the memory service.
pub struct ZepService {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
}

impl ZepService {
    /// Construct a client from validated configuration.
    pub fn new(config: &Config) -> Result<Self, ZepError> {
        let client = Client::builder()
            .user_agent(concat!("zep-memory-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let service = Self::with_client(client, &config.api_url, config.api_key.clone())?;
        tracing::debug!(url = %service.base_url, "Initialized memory service HTTP client");
        Ok(service)
    }

    /// Construct a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str, api_key: String) -> Result<Self, ZepError> {
        let base_url = normalize_base_url(base_url).map_err(ZepError::InvalidUrl)?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Append messages to a session.
    pub async fn add_messages(
        &self,
        session_id: &str,
        messages: Vec<MessageInput<'_>>,
    ) -> Result<(), ZepError> {
        let count = messages.len();
        let url = self.endpoint(&["sessions", session_id, "memory"])?;
        let response = self
            .request(Method::POST, url)
            .json(&AddMemoryRequest { messages })
            .send()
            .await?;

        self.ensure_success(response, || {
            tracing::debug!(session_id, messages = count, "Messages appended");
        })
        .await
    }

    /// Fetch a session's messages and summary.
    ///
    /// Returns `None` when the service has never seen the session.
    pub async fn get_session_memory(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionMemoryPayload>, ZepError> {
        let url = self.endpoint(&["sessions", session_id, "memory"])?;
        let response = self.request(Method::GET, url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => {
                tracing::debug!(session_id, "Session not found; treating as empty");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                let error = ZepError::UnexpectedStatus { status, body };
                tracing::error!(session_id, error = %error, "Session fetch failed");
                Err(error)
            }
        }
    }

    /// Run a semantic search over stored messages across sessions.
    pub async fn search_sessions(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<SearchHitPayload>, ZepError> {
        let url = self.endpoint(&["sessions", "search"])?;
        let response = self
            .request(Method::POST, url)
            .query(&[("limit", limit)])
            .json(&SearchRequest {
                text,
                search_scope: "messages",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = ZepError::UnexpectedStatus { status, body };
            tracing::error!(limit, error = %error, "Memory search failed");
            return Err(error);
        }

        let SearchResponse { results } = response.json().await?;
        Ok(results)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ZepError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ZepError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, format!("Api-Key {}", self.api_key))
    }

    async fn ensure_success<F>(
        &self,
        response: reqwest::Response,
        on_success: F,
    ) -> Result<(), ZepError>
    where
        F: FnOnce(),
    {
        if response.status().is_success() {
            on_success();
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = ZepError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Memory service request failed");
            Err(error)
        }
    }
}

fn normalize_base_url(url: &str) -> Result<Url, String> {
    let parsed = Url::parse(url.trim()).map_err(|err| err.to_string())?;
    if parsed.cannot_be_a_base() {
        return Err(format!("{url} cannot be used as a base URL"));
    }
    Ok(parsed)
}
