use serde_json::Value;
use wacr_config::DataObject;
use wacr_host_http::Method;

/// One API call: method, path relative to the base URL, body and query.
///
/// An empty `body` or `query` is left off the wire entirely; several
/// endpoints reject a present-but-empty JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub path: String,
  pub body: DataObject,
  pub query: DataObject,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      body: DataObject::new(),
      query: DataObject::new(),
    }
  }

  pub fn get(path: impl Into<String>) -> Self {
    Self::new(Method::GET, path)
  }

  pub fn post(path: impl Into<String>) -> Self {
    Self::new(Method::POST, path)
  }

  pub fn patch(path: impl Into<String>) -> Self {
    Self::new(Method::PATCH, path)
  }

  pub fn delete(path: impl Into<String>) -> Self {
    Self::new(Method::DELETE, path)
  }

  pub fn with_body(mut self, body: DataObject) -> Self {
    self.body = body;
    self
  }

  pub fn with_query(mut self, query: DataObject) -> Self {
    self.query = query;
    self
  }

  /// Query parameters in wire form. Null values are dropped.
  pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
    self
      .query
      .iter()
      .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
      .collect()
  }

  /// Body in wire form, `None` when there is nothing to send.
  pub(crate) fn body_value(&self) -> Option<Value> {
    if self.body.is_empty() {
      None
    } else {
      Some(Value::Object(self.body.clone()))
    }
  }
}

fn query_value(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Array(items) => Some(
      items
        .iter()
        .filter_map(query_value)
        .collect::<Vec<_>>()
        .join(","),
    ),
    Value::Object(_) => Some(value.to_string()),
  }
}
