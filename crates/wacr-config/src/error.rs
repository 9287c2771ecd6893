use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// No API token was supplied, or it was blank.
  #[error("missing API token")]
  MissingApiToken,

  /// A definition could not be parsed.
  #[error("invalid configuration: {0}")]
  Parse(#[from] serde_json::Error),
}

/// Errors raised while reading a node parameter for one input item.
#[derive(Debug, Error)]
pub enum ParameterError {
  /// A required parameter is absent.
  #[error("missing required parameter '{name}'")]
  Missing { name: String, item_index: usize },

  /// The parameter is present but has the wrong shape.
  #[error("parameter '{name}' expected {expected}, got {found}")]
  InvalidType {
    name: String,
    item_index: usize,
    expected: &'static str,
    found: String,
  },

  /// A template inside the parameter failed to render.
  #[error("failed to resolve parameter '{name}': {message}")]
  Render {
    name: String,
    item_index: usize,
    message: String,
  },
}

impl ParameterError {
  /// Index of the input item the parameter was read for.
  pub fn item_index(&self) -> usize {
    match self {
      Self::Missing { item_index, .. }
      | Self::InvalidType { item_index, .. }
      | Self::Render { item_index, .. } => *item_index,
    }
  }
}
