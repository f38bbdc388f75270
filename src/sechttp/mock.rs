//! Queued-response [`HttpClient`] for tests.
//!
//! `MockClient` hands out its responses in order, one per request, and
//! records every request it receives. Running out of responses behaves
//! like a transport failure.
//!
//! # Example
//!
//! ```
//! use cwctl::sechttp::{HttpClient, HttpRequest, MockClient, MockResponse};
//!
//! let client = MockClient::new(vec![MockResponse::ok(r#"{"version":"x"}"#)]);
//! let response = client.send(HttpRequest::get("http://pfe/api")).unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(client.calls(), 1);
//! assert!(client.is_exhausted());
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::{HttpClient, HttpRequest, HttpResponse};

/// A canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Response with an arbitrary status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// 200 with `value` serialized as JSON.
    pub fn json<T: Serialize>(value: &T) -> Self {
        Self::ok(serde_json::to_vec(value).unwrap_or_default())
    }

    /// 404 with an empty body.
    pub fn not_found() -> Self {
        Self::new(404, Vec::new())
    }
}

/// Test double returning queued responses in order.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: RefCell<VecDeque<MockResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockClient {
    /// Create a client that answers with `responses` in order.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Copies of every request received.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Whether all queued responses were used.
    pub fn is_exhausted(&self) -> bool {
        self.responses.borrow().is_empty()
    }
}

impl HttpClient for MockClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("connection refused: {}", url))?;
        Ok(HttpResponse {
            status: next.status,
            body: next.body,
        })
    }
}
