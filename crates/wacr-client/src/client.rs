use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, instrument};
use wacr_config::{CREDENTIAL_TEST_PATH, ConnectorConfig, Credentials};
use wacr_host_http::{HttpClient, HttpError, HttpRequest};

use crate::error::ApiError;
use crate::page::PageEnvelope;
use crate::request::ApiRequest;

/// Page size used when walking a collection.
pub const PAGE_SIZE: u64 = 100;

/// Authenticated access to the WAcr API on behalf of one node.
pub struct WacrClient {
  http: Arc<dyn HttpClient>,
  base_url: String,
  credentials: Credentials,
  node_id: String,
}

impl WacrClient {
  pub fn new(
    http: Arc<dyn HttpClient>,
    config: &ConnectorConfig,
    credentials: Credentials,
    node_id: impl Into<String>,
  ) -> Self {
    Self {
      http,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      credentials,
      node_id: node_id.into(),
    }
  }

  pub fn node_id(&self) -> &str {
    &self.node_id
  }

  /// Perform one API call and return the decoded JSON body.
  ///
  /// Transport failures and non-2xx answers become an [`ApiError`]. Nothing
  /// is retried.
  #[instrument(
    name = "wacr_request",
    skip(self, request),
    fields(
      node_id = %self.node_id,
      method = %request.method,
      path = %request.path,
    )
  )]
  pub async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
    let response = self
      .http
      .send(self.build(&request))
      .await
      .map_err(|e| self.api_error(&request, e))?;

    let body = response.body_value();

    if !response.is_success() {
      let err = self.api_error(&request, HttpError::status(response.status, body));
      error!(status = response.status, error = %err, "request failed");
      return Err(err);
    }

    debug!(status = response.status, "request completed");
    Ok(body)
  }

  /// Fetch every page of a collection, in order.
  ///
  /// Pages are requested with `page = 1, 2, ...` and `per_page = 100` until a
  /// response does not report `meta.pagination.has_more == true`. There is no
  /// page cap: a backend that always reports more pages is followed forever.
  #[instrument(
    name = "wacr_request_all",
    skip(self, request),
    fields(
      node_id = %self.node_id,
      method = %request.method,
      path = %request.path,
    )
  )]
  pub async fn request_all_items(&self, request: ApiRequest) -> Result<Vec<Value>, ApiError> {
    let mut items = Vec::new();
    let mut page: u64 = 1;

    loop {
      let mut query = request.query.clone();
      query.insert("page".to_string(), page.into());
      query.insert("per_page".to_string(), PAGE_SIZE.into());

      let response = self
        .request(request.clone().with_query(query))
        .await?;

      let envelope = PageEnvelope::from_response(response);
      let has_more = envelope.has_more;
      let page_items = envelope.into_items();

      debug!(page, count = page_items.len(), has_more, "page fetched");
      items.extend(page_items);

      if !has_more {
        break;
      }
      page += 1;
    }

    Ok(items)
  }

  /// Check that the credentials are accepted by requesting the account.
  pub async fn test_credentials(&self) -> Result<Value, ApiError> {
    self.request(ApiRequest::get(CREDENTIAL_TEST_PATH)).await
  }

  fn build(&self, request: &ApiRequest) -> HttpRequest {
    let mut http_request = HttpRequest::new(
      request.method.clone(),
      format!("{}{}", self.base_url, request.path),
    );

    http_request.headers = vec![
      ("Authorization".to_string(), self.credentials.authorization()),
      ("Content-Type".to_string(), "application/json".to_string()),
      ("Accept".to_string(), "application/json".to_string()),
    ];
    http_request.query = request.query_pairs();
    http_request.body = request.body_value();

    http_request
  }

  fn api_error(&self, request: &ApiRequest, source: HttpError) -> ApiError {
    ApiError {
      node_id: self.node_id.clone(),
      method: request.method.clone(),
      path: request.path.clone(),
      source,
    }
  }
}
