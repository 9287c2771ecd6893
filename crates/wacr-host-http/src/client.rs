use async_trait::async_trait;

use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse};

/// Host capability for issuing HTTP requests.
///
/// Implementations must return a response for every status code the server
/// produces. Only failures to obtain a response at all (DNS, TLS, timeouts,
/// malformed URLs) are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
  /// Send a request and wait for the full response body.
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
