//! # Adapters Layer (Hexagonal Architecture)
//!
//! Storage backends, the canonical codec and default collaborators.

pub mod cache_store;
pub mod codec;
mod governance;
mod memory_store;

pub use cache_store::{CacheStore, WriteSet};
pub use governance::StaticGovernanceAuthority;
pub use memory_store::InMemoryKVStore;
