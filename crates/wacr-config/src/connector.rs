use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base URL of the WAcr v2 REST API.
pub const DEFAULT_BASE_URL: &str = "https://app.wa.cr/api/v2";

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
  30_000
}

fn default_user_agent() -> String {
  format!("wacr/{}", env!("CARGO_PKG_VERSION"))
}

/// How the connector reaches the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Per-request timeout.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,

  #[serde(default = "default_user_agent")]
  pub user_agent: String,

  /// File holding the API token, used when no token is passed directly.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub api_token_file: Option<PathBuf>,

  /// Directory for trigger cursors. Defaults to `~/.wacr/state`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state_dir: Option<PathBuf>,
}

impl Default for ConnectorConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      timeout_ms: default_timeout_ms(),
      user_agent: default_user_agent(),
      api_token_file: None,
      state_dir: None,
    }
  }
}

impl ConnectorConfig {
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }
}
