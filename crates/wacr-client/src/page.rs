use serde_json::Value;

/// A list response: `{ data: T[] | T, meta: { pagination: { has_more } } }`.
///
/// Parsing is lenient. A missing `meta` means there are no more pages, and a
/// response that is not an object has no data.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
  pub data: Option<Value>,
  pub has_more: bool,
}

impl PageEnvelope {
  pub fn from_response(response: Value) -> Self {
    let has_more = response.pointer("/meta/pagination/has_more") == Some(&Value::Bool(true));
    let data = match response {
      Value::Object(mut map) => map.remove("data").filter(|d| !d.is_null()),
      _ => None,
    };

    Self { data, has_more }
  }

  /// Records on this page. A bare object counts as a single record.
  pub fn into_items(self) -> Vec<Value> {
    match self.data {
      Some(Value::Array(items)) => items,
      Some(item) => vec![item],
      None => Vec::new(),
    }
  }
}
