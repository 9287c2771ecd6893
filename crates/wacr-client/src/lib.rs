//! WAcr Client
//!
//! The two pieces every WAcr node is built on:
//! - [`WacrClient::request`]: one authenticated JSON call
//! - [`WacrClient::request_all_items`]: walk a paginated collection to the end
//!
//! Both go through the host's [`HttpClient`](wacr_host_http::HttpClient), so
//! the client can be exercised against a fake backend.

mod client;
mod error;
mod page;
mod request;

pub use client::{PAGE_SIZE, WacrClient};
pub use error::ApiError;
pub use page::PageEnvelope;
pub use request::ApiRequest;
pub use wacr_host_http::Method;
