//! Remote memory wrapper: forwards create/get/search to the hosted service.

mod mappers;
pub mod service;
pub mod types;

pub use service::{MemoryApi, MemoryService};
pub use types::{
    CreateMemoryOutcome, DEFAULT_SEARCH_LIMIT, MemoryError, MemoryResult, Message, SearchResult,
};

#[cfg(test)]
pub(crate) mod testing;
