//! Object-store capability used by the storage-backed registry service
//!
//! The registry treats its artifact store as three operations: idempotent
//! `put`, consistent `list_prefix`, and `signed_get_url`. Production
//! deployments point this trait at a real object store; the bundled
//! [`MemoryObjectStore`] backs tests and single-process setups.

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use thiserror::Error;

pub mod memory;

pub use memory::MemoryObjectStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal object-store capability.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores an object, replacing any existing object at the key.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Lists every key starting with the given prefix, in ascending
    /// lexical order.
    async fn list_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Produces a URL granting read access to one object until the TTL
    /// elapses. The object is not required to exist.
    async fn signed_get_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
}
