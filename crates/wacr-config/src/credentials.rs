use std::fmt;

use crate::error::ConfigError;

/// Path requested to check that a token is accepted.
pub const CREDENTIAL_TEST_PATH: &str = "/account";

/// A WAcr API token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
  pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
    let token = token.into().trim().to_string();
    if token.is_empty() {
      return Err(ConfigError::MissingApiToken);
    }
    Ok(Self(token))
  }

  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for ApiToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ApiToken(***)")
  }
}

/// Credentials attached to every API request.
#[derive(Debug, Clone)]
pub struct Credentials {
  api_token: ApiToken,
}

impl Credentials {
  pub fn new(api_token: ApiToken) -> Self {
    Self { api_token }
  }

  /// Value of the `Authorization` header.
  pub fn authorization(&self) -> String {
    format!("Bearer {}", self.api_token.expose())
  }
}
