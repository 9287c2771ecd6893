use serde::Serialize;
use serde_json::Value;

use crate::NodeError;

/// What a handler produced for one input item.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
  /// One output record.
  Single(Value),
  /// One output record per element.
  Many(Vec<Value>),
}

impl OperationOutput {
  /// The response's `data` when present and non-null, else the raw response.
  pub fn unwrap_data(response: Value) -> Self {
    match response {
      Value::Object(mut map) if map.get("data").is_some_and(|data| !data.is_null()) => {
        Self::Single(map.remove("data").unwrap_or_default())
      }
      other => Self::Single(other),
    }
  }

  /// The raw response as a single record.
  pub fn raw(response: Value) -> Self {
    Self::Single(response)
  }

  pub(crate) fn into_output_items(self, paired_item: usize) -> Vec<OutputItem> {
    match self {
      Self::Single(json) => vec![OutputItem::new(json, paired_item)],
      Self::Many(values) => values
        .into_iter()
        .map(|json| OutputItem::new(json, paired_item))
        .collect(),
    }
  }
}

/// One record in the node's output, paired with the input item it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputItem {
  pub json: Value,
  pub paired_item: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl OutputItem {
  pub fn new(json: Value, paired_item: usize) -> Self {
    Self {
      json,
      paired_item,
      error: None,
    }
  }

  /// Record for an item that failed while the node continues on failure.
  pub fn failed(item: Value, paired_item: usize, error: &NodeError) -> Self {
    Self {
      json: item,
      paired_item,
      error: Some(error.to_string()),
    }
  }
}
