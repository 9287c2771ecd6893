use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::{KvError, KvStore};

type Entries = BTreeMap<String, String>;

/// Filesystem-backed KV store.
///
/// All keys of one node live in a single JSON object stored at
/// `{base_path}/{node_id}.json`. Writes go to a temporary file that is then
/// renamed over the original, so a crash never leaves a half-written file.
pub struct FsKvStore {
  path: PathBuf,
  lock: Mutex<()>,
}

impl FsKvStore {
  /// Create a store for `node_id` under `base_path`.
  pub fn new(base_path: impl AsRef<Path>, node_id: &str) -> Self {
    let file_name = format!("{}.json", sanitize(node_id));
    Self {
      path: base_path.as_ref().join(file_name),
      lock: Mutex::new(()),
    }
  }

  /// Path of the backing file.
  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn load(&self) -> Result<Entries, KvError> {
    match fs::read_to_string(&self.path).await {
      Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
      Ok(content) => Ok(serde_json::from_str(&content)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
      Err(e) => Err(KvError::Io(e)),
    }
  }

  async fn save(&self, entries: &Entries) -> Result<(), KvError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).await?;
    }

    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
    fs::rename(&tmp, &self.path).await?;
    Ok(())
  }
}

/// Keep node ids usable as file names.
fn sanitize(node_id: &str) -> String {
  node_id
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
        c
      } else {
        '_'
      }
    })
    .collect()
}

#[async_trait]
impl KvStore for FsKvStore {
  async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
    let _guard = self.lock.lock().await;
    Ok(self.load().await?.remove(key))
  }

  async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
    let _guard = self.lock.lock().await;
    let mut entries = self.load().await?;
    entries.insert(key.to_string(), value);
    self.save(&entries).await
  }

  async fn delete(&self, key: &str) -> Result<(), KvError> {
    let _guard = self.lock.lock().await;
    let mut entries = self.load().await?;
    if entries.remove(key).is_some() {
      self.save(&entries).await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_fs_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsKvStore::new(dir.path(), "trigger-1");

    assert_eq!(store.get("cursor").await.unwrap(), None);

    store.set("cursor", "a".to_string()).await.unwrap();
    store.set("other", "b".to_string()).await.unwrap();
    assert_eq!(store.get("cursor").await.unwrap(), Some("a".to_string()));

    store.delete("cursor").await.unwrap();
    assert_eq!(store.get("cursor").await.unwrap(), None);
    assert_eq!(store.get("other").await.unwrap(), Some("b".to_string()));
  }

  #[tokio::test]
  async fn test_fs_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let store = FsKvStore::new(dir.path(), "trigger-1");
    store.set("cursor", "2026-01-01T00:00:00.000Z".to_string()).await.unwrap();
    drop(store);

    let reopened = FsKvStore::new(dir.path(), "trigger-1");
    assert_eq!(
      reopened.get("cursor").await.unwrap(),
      Some("2026-01-01T00:00:00.000Z".to_string())
    );
  }

  #[tokio::test]
  async fn test_fs_store_nodes_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let a = FsKvStore::new(dir.path(), "node-a");
    let b = FsKvStore::new(dir.path(), "node-b");

    a.set("cursor", "1".to_string()).await.unwrap();
    assert_eq!(b.get("cursor").await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_fs_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsKvStore::new(dir.path(), "node");
    std::fs::write(store.path(), "not json").unwrap();

    let err = store.get("cursor").await.unwrap_err();
    assert!(matches!(err, KvError::Serde(_)));
  }

  #[test]
  fn test_sanitize_node_id() {
    assert_eq!(sanitize("my node/../x"), "my_node____x");
    assert_eq!(sanitize("poll-new_contacts"), "poll-new_contacts");
  }
}
