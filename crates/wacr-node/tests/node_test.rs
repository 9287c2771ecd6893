//! Action node tests against a fake backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use wacr_client::WacrClient;
use wacr_config::{ApiToken, ConnectorConfig, Credentials, NodeDef};
use wacr_host_http::{HttpClient, HttpError, HttpRequest, HttpResponse, Method};
use wacr_node::{ActionNode, NodeError};

struct FakeBackend {
  responses: Mutex<VecDeque<HttpResponse>>,
  requests: Mutex<Vec<HttpRequest>>,
}

impl FakeBackend {
  fn new(bodies: Vec<(u16, Value)>) -> Arc<Self> {
    Arc::new(Self {
      responses: Mutex::new(
        bodies
          .iter()
          .map(|(status, body)| HttpResponse::json(*status, body))
          .collect(),
      ),
      requests: Mutex::new(Vec::new()),
    })
  }

  fn ok(bodies: Vec<Value>) -> Arc<Self> {
    Self::new(bodies.into_iter().map(|body| (200, body)).collect())
  }

  fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl HttpClient for FakeBackend {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
    self.requests.lock().unwrap().push(request);
    Ok(
      self
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| HttpResponse::json(200, &json!({}))),
    )
  }
}

fn node(backend: Arc<FakeBackend>, def: Value) -> ActionNode {
  let credentials = Credentials::new(ApiToken::new("test-token").unwrap());
  let client = WacrClient::new(backend, &ConnectorConfig::default(), credentials, "crm");
  let def: NodeDef = serde_json::from_value(def).unwrap();
  ActionNode::new(def, Arc::new(client)).unwrap()
}

fn def(resource: &str, operation: &str, parameters: Value) -> Value {
  json!({
    "node_id": "crm",
    "resource": resource,
    "operation": operation,
    "parameters": parameters,
  })
}

#[tokio::test]
async fn test_batch_create_without_options() {
  let backend = FakeBackend::ok(vec![json!({"created": 2})]);
  let node = node(
    backend.clone(),
    def(
      "contact",
      "batchCreate",
      json!({"contacts": "[{\"phone\":\"1\"},{\"phone\":\"2\"}]"}),
    ),
  );

  let output = node.execute(vec![json!({})]).await.unwrap();
  assert_eq!(output.len(), 1);
  assert_eq!(output[0].json, json!({"created": 2}));

  let requests = backend.requests();
  assert_eq!(requests[0].method, Method::POST);
  assert!(requests[0].url.ends_with("/contacts/batch"));
  assert_eq!(
    requests[0].body,
    Some(json!({"contacts": [{"phone": "1"}, {"phone": "2"}]}))
  );
}

#[tokio::test]
async fn test_batch_create_with_options() {
  let backend = FakeBackend::ok(vec![json!({})]);
  let node = node(
    backend.clone(),
    def(
      "contact",
      "batchCreate",
      json!({"contacts": "[]", "batchOptions": {"update_existing": true}}),
    ),
  );

  node.execute(vec![json!({})]).await.unwrap();
  assert_eq!(
    backend.requests()[0].body,
    Some(json!({"contacts": [], "options": {"update_existing": true}}))
  );
}

#[tokio::test]
async fn test_create_contact_parses_groups() {
  let backend = FakeBackend::ok(vec![json!({"data": {"id": 99}})]);
  let node = node(
    backend.clone(),
    def(
      "contact",
      "create",
      json!({
        "firstname": "Ada",
        "lastname": "Lovelace",
        "phone": "={{ phone }}",
        "type": "lead",
        "source_id": 3,
        "status_id": "4",
        "additionalFields": {"groups": "1, 2,3", "email": "ada@example.com"},
      }),
    ),
  );

  let output = node
    .execute(vec![json!({"phone": "919876543210"})])
    .await
    .unwrap();
  assert_eq!(output[0].json, json!({"id": 99}));
  assert_eq!(output[0].paired_item, 0);

  let body = backend.requests()[0].body.clone().unwrap();
  assert_eq!(body["phone"], "919876543210");
  assert_eq!(body["groups"], json!([1, 2, 3]));
  assert_eq!(body["status_id"], 4);
  assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_malformed_buttons_fail_before_request() {
  let backend = FakeBackend::ok(vec![json!({"data": {}}), json!({"data": {}})]);
  let node = node(
    backend.clone(),
    def(
      "message",
      "sendInteractive",
      json!({
        "phone": "={{ phone }}",
        "interactiveType": "button",
        "body_text": "Pick one",
        "buttons": "={{ buttons }}",
      }),
    ),
  );

  let items = vec![
    json!({"phone": "1", "buttons": "[{\"id\":\"yes\",\"title\":\"Yes\"}]"}),
    json!({"phone": "2", "buttons": "[not json"}),
  ];
  let err = node.execute(items).await.unwrap_err();

  assert!(matches!(err, NodeError::Validation { .. }));
  assert_eq!(err.item_index(), Some(1));
  assert!(err.to_string().contains("Buttons must be a valid JSON array"));
  // Only item 0 reached the backend.
  assert_eq!(backend.requests().len(), 1);
  assert_eq!(
    backend.requests()[0].body.clone().unwrap()["buttons"],
    json!([{"id": "yes", "title": "Yes"}])
  );
}

#[tokio::test]
async fn test_continue_on_fail_records_error() {
  let backend = FakeBackend::new(vec![
    (404, json!({"message": "Contact not found"})),
    (200, json!({"success": true})),
  ]);
  let mut definition = def("contact", "delete", json!({"contactId": "={{ id }}"}));
  definition["continue_on_fail"] = json!(true);
  let node = node(backend.clone(), definition);

  let output = node
    .execute(vec![json!({"id": 1}), json!({"id": 2})])
    .await
    .unwrap();

  assert_eq!(output.len(), 2);
  assert_eq!(output[0].json, json!({"id": 1}));
  assert_eq!(output[0].paired_item, 0);
  assert!(output[0].error.as_deref().unwrap().contains("Contact not found"));
  assert_eq!(output[1].json, json!({"success": true}));
  assert_eq!(output[1].error, None);

  let requests = backend.requests();
  assert!(requests[0].url.ends_with("/contacts/1"));
  assert!(requests[1].url.ends_with("/contacts/2"));
}

#[tokio::test]
async fn test_missing_item_field_fails_before_request() {
  let backend = FakeBackend::ok(vec![json!({"success": true})]);
  let node = node(
    backend.clone(),
    def("contact", "delete", json!({"contactId": "={{ id }}"})),
  );

  let err = node.execute(vec![json!({"name": "x"})]).await.unwrap_err();
  assert!(matches!(err, NodeError::Parameter { .. }));
  assert_eq!(err.item_index(), Some(0));
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_blank_path_id_fails_before_request() {
  let backend = FakeBackend::ok(vec![json!({"success": true})]);
  let contacts = node(
    backend.clone(),
    def("contact", "delete", json!({"contactId": "={{ id }}"})),
  );

  let err = contacts.execute(vec![json!({"id": "  "})]).await.unwrap_err();
  assert!(matches!(err, NodeError::Validation { item_index: 0, .. }));
  assert!(err.to_string().contains("contactId must not be empty"));

  let groups = node(backend.clone(), def("group", "get", json!({"groupId": ""})));
  let err = groups.execute(vec![json!({})]).await.unwrap_err();
  assert!(matches!(err, NodeError::Validation { .. }));
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_message_text_braces_sent_unchanged() {
  let backend = FakeBackend::ok(vec![json!({"data": {"id": 7}})]);
  let node = node(
    backend.clone(),
    def(
      "message",
      "sendText",
      json!({"phone": "919876543210", "message": "Your code is {{1}} and {{ code }}"}),
    ),
  );

  node.execute(vec![json!({"code": "A1"})]).await.unwrap();

  let body = backend.requests()[0].body.clone().unwrap();
  assert_eq!(body["message"], "Your code is {{1}} and {{ code }}");
}

#[tokio::test]
async fn test_failure_aborts_batch_by_default() {
  let backend = FakeBackend::new(vec![(500, json!({"error": "boom"}))]);
  let node = node(backend.clone(), def("group", "get", json!({"groupId": "5"})));

  let err = node
    .execute(vec![json!({}), json!({})])
    .await
    .unwrap_err();
  assert!(matches!(err, NodeError::Api { item_index: 0, .. }));
  assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_get_all_with_limit_lists_one_page() {
  let backend = FakeBackend::ok(vec![json!({
    "data": [{"id": 1}, {"id": 2}],
    "meta": {"pagination": {"has_more": true}},
  })]);
  let node = node(
    backend.clone(),
    def(
      "contact",
      "getAll",
      json!({
        "limit": 2,
        "filters": {"type": "lead", "status_id": 0, "include": ["groups", "source"]},
      }),
    ),
  );

  let output = node.execute(vec![json!({})]).await.unwrap();
  assert_eq!(output.len(), 2);

  let sent = &backend.requests()[0];
  assert_eq!(sent.query_param("per_page"), Some("2"));
  assert_eq!(sent.query_param("filter[type]"), Some("lead"));
  assert_eq!(sent.query_param("filter[status_id]"), None);
  assert_eq!(sent.query_param("include"), Some("groups,source"));
}

#[tokio::test]
async fn test_get_all_return_all_walks_pages() {
  let backend = FakeBackend::ok(vec![
    json!({"data": [{"id": 1}], "meta": {"pagination": {"has_more": true}}}),
    json!({"data": [{"id": 2}], "meta": {"pagination": {"has_more": false}}}),
  ]);
  let node = node(
    backend.clone(),
    def("message", "getAll", json!({"returnAll": true, "filters": {"direction": "inbound"}})),
  );

  let output = node.execute(vec![json!({})]).await.unwrap();
  let ids: Vec<_> = output.iter().map(|item| item.json["id"].clone()).collect();
  assert_eq!(ids, vec![json!(1), json!(2)]);

  let requests = backend.requests();
  assert_eq!(requests.len(), 2);
  assert_eq!(requests[1].query_param("page"), Some("2"));
  assert_eq!(requests[1].query_param("sort"), Some("-created_at"));
  assert_eq!(requests[1].query_param("filter[direction]"), Some("inbound"));
}

#[tokio::test]
async fn test_group_add_contacts_rejects_bad_ids() {
  let backend = FakeBackend::ok(vec![]);
  let node = node(
    backend.clone(),
    def("group", "addContacts", json!({"groupId": "7", "contact_ids": "1,two"})),
  );

  let err = node.execute(vec![json!({})]).await.unwrap_err();
  assert!(matches!(err, NodeError::Validation { item_index: 0, .. }));
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_status_color_only_when_set() {
  let backend = FakeBackend::ok(vec![json!({"data": {"id": 1}}), json!({"data": {"id": 2}})]);
  let node = node(
    backend.clone(),
    def("status", "create", json!({"name": "={{ name }}", "color": "={{ color }}"})),
  );

  node
    .execute(vec![
      json!({"name": "Hot", "color": "#ff0000"}),
      json!({"name": "Cold", "color": ""}),
    ])
    .await
    .unwrap();

  let requests = backend.requests();
  assert_eq!(
    requests[0].body,
    Some(json!({"name": "Hot", "color": "#ff0000"}))
  );
  assert_eq!(requests[1].body, Some(json!({"name": "Cold"})));
}

#[tokio::test]
async fn test_otp_verify_defaults_purpose() {
  let backend = FakeBackend::ok(vec![json!({"data": {"verified": true}})]);
  let node = node(
    backend.clone(),
    def("otp", "verify", json!({"phone": "1", "code": "123456"})),
  );

  let output = node.execute(vec![json!({})]).await.unwrap();
  assert_eq!(output[0].json, json!({"verified": true}));
  assert_eq!(
    backend.requests()[0].body.clone().unwrap()["purpose"],
    "authentication"
  );
}

#[tokio::test]
async fn test_account_get_returns_raw_response() {
  let backend = FakeBackend::ok(vec![json!({"data": {"plan": "pro"}, "success": true})]);
  let node = node(backend.clone(), def("account", "get", json!({})));

  let output = node.execute(vec![json!({})]).await.unwrap();
  assert_eq!(output[0].json, json!({"data": {"plan": "pro"}, "success": true}));
}

#[test]
fn test_unknown_operation_is_rejected() {
  let credentials = Credentials::new(ApiToken::new("t").unwrap());
  let client = WacrClient::new(
    FakeBackend::ok(vec![]),
    &ConnectorConfig::default(),
    credentials,
    "crm",
  );
  let def: NodeDef = serde_json::from_value(def("contact", "explode", json!({}))).unwrap();

  let err = ActionNode::new(def, Arc::new(client)).err().unwrap();
  assert!(matches!(err, NodeError::UnsupportedOperation { .. }));
  assert_eq!(err.item_index(), None);
}
