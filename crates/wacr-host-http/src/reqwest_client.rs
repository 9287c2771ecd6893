use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse};

/// [`HttpClient`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
  client: Client,
}

impl ReqwestClient {
  /// Create a client with the given request timeout and user agent.
  pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(user_agent)
      .build()?;

    Ok(Self { client })
  }
}

#[async_trait]
impl HttpClient for ReqwestClient {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
    let url = Url::parse(&request.url).map_err(|e| HttpError::InvalidUrl {
      url: request.url.clone(),
      message: e.to_string(),
    })?;

    let mut builder = self.client.request(request.method.clone(), url);

    for (key, value) in &request.headers {
      builder = builder.header(key, value);
    }

    if !request.query.is_empty() {
      builder = builder.query(&request.query);
    }

    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;

    let status = response.status().as_u16();

    let body = response.text().await?;

    debug!(
      method = %request.method,
      url = %request.url,
      status,
      bytes = body.len(),
      "http exchange completed"
    );

    Ok(HttpResponse::new(status, body))
  }
}
