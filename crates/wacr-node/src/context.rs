use std::sync::Arc;

use serde_json::Value;
use wacr_client::{ApiRequest, WacrClient};
use wacr_config::{DataObject, ItemParameters, ParameterError};

use crate::NodeError;
use crate::transform;

/// Everything a handler needs to run one operation for one input item.
pub struct OperationContext {
  client: Arc<WacrClient>,
  params: ItemParameters,
}

impl OperationContext {
  pub fn new(client: Arc<WacrClient>, params: ItemParameters) -> Self {
    Self { client, params }
  }

  pub fn item_index(&self) -> usize {
    self.params.item_index()
  }

  pub fn node_id(&self) -> &str {
    self.client.node_id()
  }

  pub fn string(&self, name: &str) -> Result<String, NodeError> {
    self.params.string(name).map_err(|e| self.parameter(e))
  }

  /// A required id that goes into the request path. Blank ids are rejected
  /// so a request never targets the collection instead of one record.
  pub fn path_id(&self, name: &str) -> Result<String, NodeError> {
    let id = self.string(name)?;
    let trimmed = id.trim();
    if trimmed.is_empty() {
      return Err(self.validation(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
  }

  pub fn string_or(&self, name: &str, default: &str) -> Result<String, NodeError> {
    self.params.string_or(name, default).map_err(|e| self.parameter(e))
  }

  pub fn integer(&self, name: &str) -> Result<i64, NodeError> {
    self.params.integer(name).map_err(|e| self.parameter(e))
  }

  pub fn integer_or(&self, name: &str, default: i64) -> Result<i64, NodeError> {
    self.params.integer_or(name, default).map_err(|e| self.parameter(e))
  }

  pub fn boolean_or(&self, name: &str, default: bool) -> Result<bool, NodeError> {
    self.params.boolean_or(name, default).map_err(|e| self.parameter(e))
  }

  /// A collection parameter, `{}` when absent.
  pub fn object(&self, name: &str) -> Result<DataObject, NodeError> {
    self.params.object(name).map_err(|e| self.parameter(e))
  }

  pub fn string_list(&self, name: &str) -> Result<Vec<String>, NodeError> {
    self.params.string_list(name).map_err(|e| self.parameter(e))
  }

  /// A required parameter holding a JSON array, given either as JSON text or
  /// as an array value. Malformed input is a validation error.
  pub fn json_array(&self, name: &str, label: &str) -> Result<Vec<Value>, NodeError> {
    let value = self
      .params
      .get(name)
      .map_err(|e| self.parameter(e))?
      .ok_or_else(|| {
        self.parameter(ParameterError::Missing {
          name: name.to_string(),
          item_index: self.item_index(),
        })
      })?;

    let parsed = match value {
      Value::String(text) => serde_json::from_str(&text)
        .map_err(|e| self.validation(format!("{label} must be a valid JSON array: {e}")))?,
      other => other,
    };

    match parsed {
      Value::Array(values) => Ok(values),
      _ => Err(self.validation(format!("{label} must be a valid JSON array"))),
    }
  }

  /// A required comma-separated list of integer ids.
  pub fn id_list(&self, name: &str, label: &str) -> Result<Vec<i64>, NodeError> {
    let value = self
      .params
      .get(name)
      .map_err(|e| self.parameter(e))?
      .ok_or_else(|| {
        self.parameter(ParameterError::Missing {
          name: name.to_string(),
          item_index: self.item_index(),
        })
      })?;
    self.parse_ids(&value, label)
  }

  /// Parse an id list that arrived inside a collection, e.g. `groups`.
  pub fn parse_ids(&self, value: &Value, label: &str) -> Result<Vec<i64>, NodeError> {
    transform::id_list(value).map_err(|e| {
      self.validation(format!(
        "{label} must be a comma-separated list of integers: {e}"
      ))
    })
  }

  pub fn validation(&self, message: impl Into<String>) -> NodeError {
    NodeError::Validation {
      node_id: self.node_id().to_string(),
      item_index: self.item_index(),
      message: message.into(),
    }
  }

  fn parameter(&self, source: ParameterError) -> NodeError {
    NodeError::Parameter {
      node_id: self.node_id().to_string(),
      source,
    }
  }

  /// Issue a single request.
  pub async fn request(&self, request: ApiRequest) -> Result<Value, NodeError> {
    self
      .client
      .request(request)
      .await
      .map_err(|source| NodeError::Api {
        item_index: self.item_index(),
        source,
      })
  }

  /// Walk every page of a listing.
  pub async fn request_all_items(&self, request: ApiRequest) -> Result<Vec<Value>, NodeError> {
    self
      .client
      .request_all_items(request)
      .await
      .map_err(|source| NodeError::Api {
        item_index: self.item_index(),
        source,
      })
  }
}
