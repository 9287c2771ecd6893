use reqwest::Method;

/// A fully described outgoing request.
///
/// `query` and `body` are only put on the wire when present; an empty
/// `query` means no query string and `None` means no body at all.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
  pub method: Method,
  pub url: String,
  pub headers: Vec<(String, String)>,
  pub query: Vec<(String, String)>,
  pub body: Option<serde_json::Value>,
}

impl HttpRequest {
  pub fn new(method: Method, url: impl Into<String>) -> Self {
    Self {
      method,
      url: url.into(),
      headers: Vec::new(),
      query: Vec::new(),
      body: None,
    }
  }

  /// Look up a header by case-insensitive name.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v.as_str())
  }

  /// Look up a query parameter by exact name.
  pub fn query_param(&self, name: &str) -> Option<&str> {
    self
      .query
      .iter()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.as_str())
  }
}

/// A response with its body fully read.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: String,
}

impl HttpResponse {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  /// Build a response whose body is the serialized JSON value.
  pub fn json(status: u16, body: &serde_json::Value) -> Self {
    Self::new(status, body.to_string())
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Interpret the body as JSON.
  ///
  /// An empty body is `null`; a body that is not JSON is returned as a string.
  pub fn body_value(&self) -> serde_json::Value {
    if self.body.trim().is_empty() {
      return serde_json::Value::Null;
    }

    serde_json::from_str(&self.body)
      .unwrap_or_else(|_| serde_json::Value::String(self.body.clone()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_body_value_json() {
    let response = HttpResponse::new(200, r#"{"data": [1, 2]}"#);
    assert_eq!(response.body_value(), json!({"data": [1, 2]}));
  }

  #[test]
  fn test_body_value_empty() {
    let response = HttpResponse::new(204, "");
    assert_eq!(response.body_value(), serde_json::Value::Null);
  }

  #[test]
  fn test_body_value_text() {
    let response = HttpResponse::new(200, "OK");
    assert_eq!(response.body_value(), json!("OK"));
  }

  #[test]
  fn test_is_success() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(302, "").is_success());
    assert!(!HttpResponse::new(404, "").is_success());
  }

  #[test]
  fn test_header_lookup_is_case_insensitive() {
    let mut request = HttpRequest::new(Method::GET, "https://example.com");
    request
      .headers
      .push(("Authorization".to_string(), "Bearer abc".to_string()));

    assert_eq!(request.header("authorization"), Some("Bearer abc"));
    assert_eq!(request.header("accept"), None);
  }
}
