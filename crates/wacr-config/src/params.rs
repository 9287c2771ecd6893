//! Per-item parameter access.
//!
//! An action node's parameters are a JSON object shared by every input item.
//! A string value that starts with `=` is an expression: the rest is a
//! minijinja template rendered against the item being processed, so one node
//! definition can send a message to each contact:
//!
//! ```json
//! { "phone": "={{ phone }}", "message": "=Hello {{ name | title }}!" }
//! ```
//!
//! Every other string is sent as written, braces included. Expressions render
//! strictly: a variable the item does not have is an error, not an empty
//! string.
//!
//! After rendering, typed getters coerce strings into the expected type, so
//! `"={{ count }}"` can feed an integer parameter.

use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;

use crate::error::ParameterError;

/// A JSON object, the shape of request bodies, query maps and collections.
pub type DataObject = serde_json::Map<String, Value>;

/// The raw parameters of one node, shared across its input items.
pub struct NodeParameters {
  values: DataObject,
  env: Environment<'static>,
}

impl NodeParameters {
  pub fn new(values: DataObject) -> Self {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    Self { values, env }
  }

  /// Bind the parameters to one input item.
  pub fn for_item(self: &Arc<Self>, item_index: usize, item: Value) -> ItemParameters {
    ItemParameters {
      params: Arc::clone(self),
      item_index,
      item,
    }
  }
}

/// Parameters as seen while processing a single input item.
pub struct ItemParameters {
  params: Arc<NodeParameters>,
  item_index: usize,
  item: Value,
}

impl ItemParameters {
  pub fn item_index(&self) -> usize {
    self.item_index
  }

  /// The input item the templates render against.
  pub fn item(&self) -> &Value {
    &self.item
  }

  /// Rendered value of a parameter, or `None` when it is not set.
  pub fn get(&self, name: &str) -> Result<Option<Value>, ParameterError> {
    match self.params.values.get(name) {
      Some(Value::Null) | None => Ok(None),
      Some(value) => self.render(name, value).map(Some),
    }
  }

  /// A required string parameter.
  pub fn string(&self, name: &str) -> Result<String, ParameterError> {
    let value = self.get(name)?.ok_or_else(|| self.missing(name))?;
    self.coerce_string(name, value)
  }

  pub fn string_or(&self, name: &str, default: &str) -> Result<String, ParameterError> {
    match self.get(name)? {
      Some(value) => self.coerce_string(name, value),
      None => Ok(default.to_string()),
    }
  }

  /// A required integer parameter.
  pub fn integer(&self, name: &str) -> Result<i64, ParameterError> {
    let value = self.get(name)?.ok_or_else(|| self.missing(name))?;
    self.coerce_integer(name, value)
  }

  pub fn integer_or(&self, name: &str, default: i64) -> Result<i64, ParameterError> {
    match self.get(name)? {
      Some(value) => self.coerce_integer(name, value),
      None => Ok(default),
    }
  }

  pub fn boolean_or(&self, name: &str, default: bool) -> Result<bool, ParameterError> {
    match self.get(name)? {
      Some(Value::Bool(b)) => Ok(b),
      Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(self.invalid(name, "boolean", &Value::String(s))),
      },
      Some(other) => Err(self.invalid(name, "boolean", &other)),
      None => Ok(default),
    }
  }

  /// A collection parameter. Unset collections are empty.
  ///
  /// A string is accepted when it holds a JSON object, which is what a
  /// template producing a whole object renders to.
  pub fn object(&self, name: &str) -> Result<DataObject, ParameterError> {
    match self.get(name)? {
      Some(Value::Object(map)) => Ok(map),
      Some(Value::String(s)) if s.trim().is_empty() => Ok(DataObject::new()),
      Some(Value::String(s)) => match serde_json::from_str::<Value>(&s) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(self.invalid(name, "object", &Value::String(s))),
      },
      Some(other) => Err(self.invalid(name, "object", &other)),
      None => Ok(DataObject::new()),
    }
  }

  /// A multi-option parameter. Accepts an array or a comma-separated string.
  pub fn string_list(&self, name: &str) -> Result<Vec<String>, ParameterError> {
    match self.get(name)? {
      Some(Value::Array(items)) => items
        .into_iter()
        .map(|item| self.coerce_string(name, item))
        .collect(),
      Some(Value::String(s)) => Ok(
        s.split(',')
          .map(str::trim)
          .filter(|part| !part.is_empty())
          .map(str::to_string)
          .collect(),
      ),
      Some(other) => Err(self.invalid(name, "list", &other)),
      None => Ok(Vec::new()),
    }
  }

  fn render(&self, name: &str, value: &Value) -> Result<Value, ParameterError> {
    match value {
      Value::String(s) => match expression(s) {
        Some(template) => self
          .params
          .env
          .render_str(template, &self.item)
          .map(Value::String)
          .map_err(|e| ParameterError::Render {
            name: name.to_string(),
            item_index: self.item_index,
            message: e.to_string(),
          }),
        None => Ok(value.clone()),
      },
      Value::Array(items) => items
        .iter()
        .map(|item| self.render(name, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array),
      Value::Object(map) => map
        .iter()
        .map(|(k, v)| self.render(name, v).map(|rendered| (k.clone(), rendered)))
        .collect::<Result<DataObject, _>>()
        .map(Value::Object),
      other => Ok(other.clone()),
    }
  }

  fn coerce_string(&self, name: &str, value: Value) -> Result<String, ParameterError> {
    match value {
      Value::String(s) => Ok(s),
      Value::Number(n) => Ok(n.to_string()),
      Value::Bool(b) => Ok(b.to_string()),
      other => Err(self.invalid(name, "string", &other)),
    }
  }

  fn coerce_integer(&self, name: &str, value: Value) -> Result<i64, ParameterError> {
    let parsed = match &value {
      Value::Number(n) => n
        .as_i64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };
    parsed.ok_or_else(|| self.invalid(name, "integer", &value))
  }

  fn missing(&self, name: &str) -> ParameterError {
    ParameterError::Missing {
      name: name.to_string(),
      item_index: self.item_index,
    }
  }

  fn invalid(&self, name: &str, expected: &'static str, found: &Value) -> ParameterError {
    ParameterError::InvalidType {
      name: name.to_string(),
      item_index: self.item_index,
      expected,
      found: describe(found),
    }
  }
}

fn expression(s: &str) -> Option<&str> {
  s.strip_prefix('=')
}

fn describe(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(b) => format!("boolean {}", b),
    Value::Number(n) => format!("number {}", n),
    Value::String(s) => format!("string '{}'", s),
    Value::Array(_) => "array".to_string(),
    Value::Object(_) => "object".to_string(),
  }
}
