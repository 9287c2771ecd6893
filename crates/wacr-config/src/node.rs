use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::DataObject;

/// Definition of an action node.
///
/// `resource` and `operation` pick the API call; `parameters` holds the
/// operation's fields. String parameters may be templates that are rendered
/// against each input item, e.g. `{"phone": "={{ phone }}"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  pub node_id: String,
  pub resource: String,
  pub operation: String,
  #[serde(default)]
  pub parameters: DataObject,
  /// Record per-item failures on the output instead of aborting the batch.
  #[serde(default)]
  pub continue_on_fail: bool,
}

impl NodeDef {
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }
}
