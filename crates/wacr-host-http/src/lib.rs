//! HTTP client host capability for the WAcr connector.
//!
//! The connector never talks to the network directly. It builds an
//! [`HttpRequest`] and hands it to an [`HttpClient`] supplied by the host:
//! - [`ReqwestClient`] for real traffic
//! - hand-written fakes in tests
//!
//! Clients report transport failures only. Interpreting the status code is
//! left to the caller.

mod client;
mod error;
mod reqwest_client;
mod types;

pub use client::HttpClient;
pub use error::HttpError;
pub use reqwest::Method;
pub use reqwest_client::ReqwestClient;
pub use types::{HttpRequest, HttpResponse};
