use serde::{Deserialize, Serialize};

use crate::enums::{ContactType, MessageType, TriggerOn};
use crate::error::ConfigError;

/// Filters applied to the new-contact trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFilters {
  /// Only contacts of this type. `None` matches any type.
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub contact_type: Option<ContactType>,

  /// Only contacts from this source. `0` matches any source.
  #[serde(default)]
  pub source_id: u64,
}

/// Definition of a poll trigger node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDef {
  pub node_id: String,
  pub trigger_on: TriggerOn,
  /// Used by [`TriggerOn::NewContact`] only.
  #[serde(default)]
  pub contact_filters: ContactFilters,
  /// Used by the message kinds only. `None` matches any message type.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message_type_filter: Option<MessageType>,
}

impl TriggerDef {
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  pub fn new(node_id: impl Into<String>, trigger_on: TriggerOn) -> Self {
    Self {
      node_id: node_id.into(),
      trigger_on,
      contact_filters: ContactFilters::default(),
      message_type_filter: None,
    }
  }
}
