use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{KvError, KvStore};

/// In-memory KV store implementation.
///
/// Data lives as long as the store. Suitable for testing.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
  data: Mutex<HashMap<String, String>>,
}

impl InMemoryKvStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
  async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
    Ok(self.data.lock().await.get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
    self.data.lock().await.insert(key.to_string(), value);
    Ok(())
  }

  async fn delete(&self, key: &str) -> Result<(), KvError> {
    self.data.lock().await.remove(key);
    Ok(())
  }
}
