//! Key-value store capability for per-node static data.
//!
//! Poll triggers use this to remember where the previous tick stopped. The
//! scope is one trigger node: different nodes must be given different stores.
//!
//! Two implementations ship with the crate:
//! - [`InMemoryKvStore`] for tests and one-shot runs
//! - [`FsKvStore`] which keeps each node's data in a JSON file

mod fs;
mod memory;

pub use fs::FsKvStore;
pub use memory::InMemoryKvStore;

use async_trait::async_trait;

/// Error type for key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// Stored data could not be read back.
  #[error("corrupt store data: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Trait for node-scoped durable key-value storage.
///
/// The trait is async so networked backends can implement it.
#[async_trait]
pub trait KvStore: Send + Sync {
  /// Get a value by key.
  async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

  /// Set a value, replacing any previous one.
  async fn set(&self, key: &str, value: String) -> Result<(), KvError>;

  /// Delete a value. Deleting a missing key is not an error.
  async fn delete(&self, key: &str) -> Result<(), KvError>;
}
