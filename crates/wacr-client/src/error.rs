use thiserror::Error;
use wacr_host_http::{HttpError, Method};

/// A failed API call, tagged with the node that made it.
///
/// Covers transport failures and non-2xx answers alike; the underlying
/// [`HttpError`] is kept as the source.
#[derive(Debug, Error)]
#[error("WAcr API request {method} {path} failed on node '{node_id}': {source}")]
pub struct ApiError {
  pub node_id: String,
  pub method: Method,
  pub path: String,
  #[source]
  pub source: HttpError,
}

impl ApiError {
  /// HTTP status of the failed call, if the server answered.
  pub fn status(&self) -> Option<u16> {
    self.source.status_code()
  }
}
