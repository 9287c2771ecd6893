use thiserror::Error;

/// Errors produced while performing an HTTP exchange.
#[derive(Debug, Error)]
pub enum HttpError {
  /// The request never produced a response.
  #[error("http transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The request URL could not be parsed.
  #[error("invalid url '{url}': {message}")]
  InvalidUrl { url: String, message: String },

  /// The server answered with a non-2xx status.
  #[error("request failed with status {status}: {message}")]
  Status {
    status: u16,
    message: String,
    body: serde_json::Value,
  },
}

impl HttpError {
  /// Build a status error from a response body.
  ///
  /// APIs usually put a human readable reason under `message` or `error`;
  /// that is preferred over the raw body for the display text.
  pub fn status(status: u16, body: serde_json::Value) -> Self {
    let message = body
      .get("message")
      .or_else(|| body.get("error"))
      .and_then(|m| m.as_str())
      .map(str::to_string)
      .unwrap_or_else(|| match &body {
        serde_json::Value::Null => "empty response".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
      });

    Self::Status {
      status,
      message,
      body,
    }
  }

  /// HTTP status code, if the server answered at all.
  pub fn status_code(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(e) => e.status().map(|s| s.as_u16()),
      Self::InvalidUrl { .. } => None,
    }
  }
}
