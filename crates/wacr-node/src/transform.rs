//! Local transforms applied to parameters before a request is built.

use serde_json::Value;
use wacr_config::DataObject;

/// JavaScript-style truthiness used to decide whether a filter is sent.
/// Empty strings, zero, `false` and null are omitted.
pub(crate) fn is_set(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Copy `source[field]` into `target[key]` when it is set.
pub(crate) fn copy_if_set(source: &DataObject, field: &str, target: &mut DataObject, key: &str) {
  if let Some(value) = source.get(field)
    && is_set(value)
  {
    target.insert(key.to_string(), value.clone());
  }
}

/// Copy the listed fields of a filter collection into `filter[<field>]` keys.
pub(crate) fn copy_filters(source: &DataObject, fields: &[&str], target: &mut DataObject) {
  for field in fields {
    copy_if_set(source, field, target, &format!("filter[{field}]"));
  }
}

/// Shallow merge, later keys win.
pub(crate) fn merge(target: &mut DataObject, extra: DataObject) {
  for (key, value) in extra {
    target.insert(key, value);
  }
}

/// Join a list-like value with `,`. Returns `None` for empty lists and
/// empty strings.
pub(crate) fn join_list(value: &Value) -> Option<String> {
  match value {
    Value::Array(values) if !values.is_empty() => Some(
      values
        .iter()
        .map(|value| match value {
          Value::String(text) => text.clone(),
          other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(","),
    ),
    Value::String(text) if !text.is_empty() => Some(text.clone()),
    _ => None,
  }
}

/// Parse a comma-separated list of integers, e.g. `"1, 2,3"`.
///
/// Every piece is trimmed and must be a base-10 integer; the error names the
/// first piece that is not.
pub(crate) fn parse_id_list(raw: &str) -> Result<Vec<i64>, String> {
  raw
    .split(',')
    .map(str::trim)
    .map(|piece| {
      piece
        .parse::<i64>()
        .map_err(|_| format!("'{piece}' is not an integer"))
    })
    .collect()
}

/// Accept an id list given as CSV text, a single number or a JSON array.
pub(crate) fn id_list(value: &Value) -> Result<Vec<i64>, String> {
  match value {
    Value::String(raw) => parse_id_list(raw),
    Value::Number(number) => number
      .as_i64()
      .map(|id| vec![id])
      .ok_or_else(|| format!("'{number}' is not an integer")),
    Value::Array(values) => values.iter().map(single_id).collect(),
    other => Err(format!("expected a comma-separated list, got {other}")),
  }
}

fn single_id(value: &Value) -> Result<i64, String> {
  match value {
    Value::Number(number) => number
      .as_i64()
      .ok_or_else(|| format!("'{number}' is not an integer")),
    Value::String(text) => text
      .trim()
      .parse()
      .map_err(|_| format!("'{text}' is not an integer")),
    other => Err(format!("'{other}' is not an integer")),
  }
}
