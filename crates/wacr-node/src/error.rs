use thiserror::Error;
use wacr_client::ApiError;
use wacr_config::ParameterError;

/// Errors raised by the action node.
#[derive(Debug, Error)]
pub enum NodeError {
  /// The API call for an item failed.
  #[error("{source}")]
  Api {
    item_index: usize,
    #[source]
    source: ApiError,
  },

  /// An item's parameters failed local validation. Raised before any
  /// request is sent for that item.
  #[error("{message} [node '{node_id}', item {item_index}]")]
  Validation {
    node_id: String,
    item_index: usize,
    message: String,
  },

  /// A parameter could not be read for an item.
  #[error("{source} [node '{node_id}', item {}]", .source.item_index())]
  Parameter {
    node_id: String,
    #[source]
    source: ParameterError,
  },

  /// The node names a resource or operation that does not exist.
  #[error("unsupported operation '{operation}' for resource '{resource}'")]
  UnsupportedOperation { resource: String, operation: String },
}

impl NodeError {
  /// Index of the input item that failed, for item-scoped errors.
  pub fn item_index(&self) -> Option<usize> {
    match self {
      Self::Api { item_index, .. } | Self::Validation { item_index, .. } => Some(*item_index),
      Self::Parameter { source, .. } => Some(source.item_index()),
      Self::UnsupportedOperation { .. } => None,
    }
  }
}
