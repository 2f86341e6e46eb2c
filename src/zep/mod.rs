//! Hosted Zep memory service integration.

pub mod client;
pub mod types;

pub use client::ZepService;
pub use types::{
    AddMemoryRequest, MessageInput, SearchHitPayload, SearchRequest, SessionMemoryPayload,
    SummaryPayload, WireMessage, ZepError,
};
