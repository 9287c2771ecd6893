//! Tests for the request executor and pagination walker against a fake backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use wacr_client::{ApiRequest, Method, WacrClient};
use wacr_config::{ApiToken, ConnectorConfig, Credentials, DataObject};
use wacr_host_http::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Fake backend that records requests and replays canned responses.
struct FakeBackend {
  responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
  requests: Mutex<Vec<HttpRequest>>,
}

impl FakeBackend {
  fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
    Arc::new(Self {
      responses: Mutex::new(responses.into()),
      requests: Mutex::new(Vec::new()),
    })
  }

  fn json(bodies: Vec<Value>) -> Arc<Self> {
    Self::new(
      bodies
        .iter()
        .map(|b| Ok(HttpResponse::json(200, b)))
        .collect(),
    )
  }

  fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl HttpClient for FakeBackend {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
    self.requests.lock().unwrap().push(request);
    self
      .responses
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Ok(HttpResponse::json(200, &json!({}))))
  }
}

fn client(backend: Arc<FakeBackend>) -> WacrClient {
  let credentials = Credentials::new(ApiToken::new("test-token").unwrap());
  WacrClient::new(backend, &ConnectorConfig::default(), credentials, "wacr-node")
}

fn page(ids: std::ops::Range<u64>, has_more: bool) -> Value {
  let data: Vec<Value> = ids.map(|id| json!({"id": id})).collect();
  json!({"data": data, "meta": {"pagination": {"has_more": has_more}}})
}

fn object(value: Value) -> DataObject {
  match value {
    Value::Object(map) => map,
    _ => panic!("expected object"),
  }
}

#[tokio::test]
async fn test_request_attaches_auth_and_json_headers() {
  let backend = FakeBackend::json(vec![json!({"name": "Acme"})]);
  let client = client(backend.clone());

  let response = client.request(ApiRequest::get("/account")).await.unwrap();
  assert_eq!(response["name"], "Acme");

  let requests = backend.requests();
  assert_eq!(requests.len(), 1);
  let sent = &requests[0];
  assert_eq!(sent.method, Method::GET);
  assert_eq!(sent.url, "https://app.wa.cr/api/v2/account");
  assert_eq!(sent.header("Authorization"), Some("Bearer test-token"));
  assert_eq!(sent.header("Content-Type"), Some("application/json"));
  assert_eq!(sent.header("Accept"), Some("application/json"));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
  let backend = FakeBackend::json(vec![json!({})]);
  let config = ConnectorConfig {
    base_url: "http://localhost:8080/api/v2/".to_string(),
    ..Default::default()
  };
  let credentials = Credentials::new(ApiToken::new("test-token").unwrap());
  let client = WacrClient::new(backend.clone(), &config, credentials, "wacr-node");

  client.request(ApiRequest::get("/contacts")).await.unwrap();

  assert_eq!(backend.requests()[0].url, "http://localhost:8080/api/v2/contacts");
}

#[tokio::test]
async fn test_empty_body_and_query_are_omitted() {
  let backend = FakeBackend::json(vec![json!({})]);
  let client = client(backend.clone());

  let request = ApiRequest::post("/templates/sync")
    .with_body(DataObject::new())
    .with_query(DataObject::new());
  client.request(request).await.unwrap();

  let sent = &backend.requests()[0];
  assert_eq!(sent.body, None);
  assert!(sent.query.is_empty());
}

#[tokio::test]
async fn test_body_and_query_are_sent_when_present() {
  let backend = FakeBackend::json(vec![json!({"data": {"id": 1}})]);
  let client = client(backend.clone());

  let request = ApiRequest::patch("/groups/5")
    .with_body(object(json!({"name": "VIP"})))
    .with_query(object(json!({"include": "contacts"})));
  client.request(request).await.unwrap();

  let sent = &backend.requests()[0];
  assert_eq!(sent.method, Method::PATCH);
  assert_eq!(sent.body, Some(json!({"name": "VIP"})));
  assert_eq!(sent.query_param("include"), Some("contacts"));
}

#[tokio::test]
async fn test_non_success_status_is_wrapped() {
  let backend = FakeBackend::new(vec![Ok(HttpResponse::json(
    404,
    &json!({"message": "Contact not found"}),
  ))]);
  let client = client(backend.clone());

  let err = client
    .request(ApiRequest::get("/contacts/99"))
    .await
    .unwrap_err();

  assert_eq!(err.status(), Some(404));
  assert_eq!(err.node_id, "wacr-node");
  assert_eq!(err.path, "/contacts/99");
  assert_eq!(
    err.to_string(),
    "WAcr API request GET /contacts/99 failed on node 'wacr-node': request failed with status 404: Contact not found"
  );
  assert!(matches!(err.source, HttpError::Status { .. }));
}

#[tokio::test]
async fn test_transport_error_is_wrapped() {
  let backend = FakeBackend::new(vec![Err(HttpError::InvalidUrl {
    url: "x".to_string(),
    message: "bad".to_string(),
  })]);
  let client = client(backend);

  let err = client.request(ApiRequest::get("/account")).await.unwrap_err();
  assert_eq!(err.status(), None);
  assert!(matches!(err.source, HttpError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
  let backend = FakeBackend::new(vec![Ok(HttpResponse::new(204, ""))]);
  let client = client(backend);

  let response = client.request(ApiRequest::delete("/groups/1")).await.unwrap();
  assert_eq!(response, Value::Null);
}

#[tokio::test]
async fn test_walker_collects_all_pages_in_order() {
  let backend = FakeBackend::json(vec![
    page(0..100, true),
    page(100..200, true),
    page(200..237, false),
  ]);
  let client = client(backend.clone());

  let request = ApiRequest::get("/contacts").with_query(object(json!({"search": "ann"})));
  let items = client.request_all_items(request).await.unwrap();

  assert_eq!(items.len(), 237);
  for (i, item) in items.iter().enumerate() {
    assert_eq!(item["id"], i as u64);
  }

  let requests = backend.requests();
  assert_eq!(requests.len(), 3);
  for (i, sent) in requests.iter().enumerate() {
    assert_eq!(sent.query_param("page"), Some((i + 1).to_string().as_str()));
    assert_eq!(sent.query_param("per_page"), Some("100"));
    assert_eq!(sent.query_param("search"), Some("ann"));
  }
}

#[tokio::test]
async fn test_walker_accepts_bare_object_data() {
  let backend = FakeBackend::json(vec![
    json!({"data": {"id": "only"}, "meta": {"pagination": {"has_more": true}}}),
    page(0..2, false),
  ]);
  let client = client(backend);

  let items = client
    .request_all_items(ApiRequest::get("/sources"))
    .await
    .unwrap();

  assert_eq!(items, vec![json!({"id": "only"}), json!({"id": 0}), json!({"id": 1})]);
}

#[tokio::test]
async fn test_walker_stops_without_pagination_meta() {
  let backend = FakeBackend::json(vec![json!({"data": [{"id": 1}]}), page(0..5, false)]);
  let client = client(backend.clone());

  let items = client
    .request_all_items(ApiRequest::get("/groups"))
    .await
    .unwrap();

  assert_eq!(items.len(), 1);
  assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_walker_propagates_page_failure() {
  let backend = FakeBackend::new(vec![
    Ok(HttpResponse::json(200, &page(0..100, true))),
    Ok(HttpResponse::json(500, &json!({"message": "boom"}))),
  ]);
  let client = client(backend.clone());

  let err = client
    .request_all_items(ApiRequest::get("/messages"))
    .await
    .unwrap_err();

  assert_eq!(err.status(), Some(500));
  assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn test_credentials_check_requests_account() {
  let backend = FakeBackend::json(vec![json!({"id": 1})]);
  let client = client(backend.clone());

  client.test_credentials().await.unwrap();

  let sent = &backend.requests()[0];
  assert_eq!(sent.method, Method::GET);
  assert!(sent.url.ends_with("/account"));
}
