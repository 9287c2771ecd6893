//! Poll cursor persistence.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use tracing::warn;
use wacr_config::TriggerOn;
use wacr_host_kv::{KvError, KvStore};

/// How far back the first tick looks when no cursor is stored, in seconds.
pub const CURSOR_LOOKBACK_SECS: i64 = 60;

/// Store key for a trigger kind. Kinds are tracked independently.
pub fn cursor_key(trigger_on: TriggerOn) -> String {
  format!("last_check:{trigger_on}")
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn format_cursor(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads and writes cursors in a node's key-value store.
#[derive(Clone)]
pub struct CursorStore {
  kv: Arc<dyn KvStore>,
}

impl CursorStore {
  pub fn new(kv: Arc<dyn KvStore>) -> Self {
    Self { kv }
  }

  /// The stored cursor, or `now - 60s` when none is stored.
  ///
  /// A stored value that is not a valid timestamp is ignored.
  pub async fn read(&self, trigger_on: TriggerOn, now: DateTime<Utc>) -> Result<String, KvError> {
    let key = cursor_key(trigger_on);
    if let Some(stored) = self.kv.get(&key).await? {
      if DateTime::parse_from_rfc3339(&stored).is_ok() {
        return Ok(stored);
      }
      warn!(key = %key, value = %stored, "ignoring invalid poll cursor");
    }
    Ok(format_cursor(now - TimeDelta::seconds(CURSOR_LOOKBACK_SECS)))
  }

  pub async fn write(&self, trigger_on: TriggerOn, at: DateTime<Utc>) -> Result<(), KvError> {
    self.kv.set(&cursor_key(trigger_on), format_cursor(at)).await
  }
}
