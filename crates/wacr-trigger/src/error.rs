use thiserror::Error;
use wacr_client::ApiError;
use wacr_host_kv::KvError;

/// Errors raised by a poll tick.
#[derive(Debug, Error)]
pub enum TriggerError {
  /// The fetch failed. The cursor has already been advanced.
  #[error("poll request failed: {0}")]
  Api(#[from] ApiError),

  /// The cursor could not be read or written.
  #[error("cursor store error: {0}")]
  Store(#[from] KvError),
}
