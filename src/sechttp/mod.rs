//! HTTP dispatch to platform services.
//!
//! All remote calls go through the narrow [`HttpClient`] trait so the
//! transport can be swapped for [`MockClient`] in tests. Requests are sent
//! with [`dispatch_http_request`], which attaches the connection's
//! credentials before handing the request to the client.
//!
//! - [`client`] - `reqwest` backed client
//! - [`mock`] - Queued-response test double

pub mod client;
pub mod mock;

use serde::Serialize;
use tracing::debug;

use crate::connections::Connection;
use crate::error::ApiError;

pub use client::ReqwestClient;
pub use mock::{MockClient, MockResponse};

/// Operation tag for failed dispatches.
pub const ERR_OP_SEC_REQUEST: &str = "sec_request";

/// HTTP method of a [`HttpRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A bodiless GET.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST carrying `payload` as JSON.
    pub fn post_json<T: Serialize>(url: impl Into<String>, payload: &T) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(payload)?;
        Ok(Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Set or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Transport used to send requests.
///
/// Implementations must read the whole body before returning so no
/// connection handle outlives the call.
pub trait HttpClient {
    /// Send a request and return the status and body.
    fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Send `request` on behalf of `connection`.
///
/// Credentials from the connection's security context are attached first.
/// Transport failures are reported as request errors tagged `sec_request`.
pub fn dispatch_http_request<C: HttpClient + ?Sized>(
    client: &C,
    mut request: HttpRequest,
    connection: &Connection,
) -> Result<HttpResponse, ApiError> {
    if let Some((name, value)) = connection.security.auth_header() {
        request.set_header(name, value);
    }

    debug!(
        connection = %connection.id,
        method = %request.method,
        url = %request.url,
        "Dispatching request"
    );

    let response = client
        .send(request)
        .map_err(|e| ApiError::request(ERR_OP_SEC_REQUEST, e))?;

    debug!(connection = %connection.id, status = response.status, "Received response");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::SecurityContext;

    #[test]
    fn post_json_sets_content_type_and_body() {
        let req = HttpRequest::post_json("http://x/api", &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn set_header_replaces_existing() {
        let mut req = HttpRequest::get("http://x");
        req.set_header("Authorization", "Bearer a");
        req.set_header("authorization", "Bearer b");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("Authorization"), Some("Bearer b"));
    }

    #[test]
    fn dispatch_attaches_bearer_token() {
        let client = MockClient::new(vec![MockResponse::ok("{}")]);
        let conn = Connection::new("remote1", Some("http://x".into())).with_security(
            SecurityContext::Bearer {
                token: "tok".into(),
            },
        );

        dispatch_http_request(&client, HttpRequest::get("http://x/api"), &conn).unwrap();

        let sent = client.requests();
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn dispatch_without_credentials_sends_no_auth() {
        let client = MockClient::new(vec![MockResponse::ok("{}")]);
        dispatch_http_request(&client, HttpRequest::get("http://x"), &Connection::local()).unwrap();
        assert!(client.requests()[0].header("Authorization").is_none());
    }

    #[test]
    fn transport_failure_is_request_error() {
        let client = MockClient::new(vec![]);
        let err = dispatch_http_request(&client, HttpRequest::get("http://x"), &Connection::local())
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Request);
        assert_eq!(err.op(), ERR_OP_SEC_REQUEST);
    }

    #[test]
    fn response_status_helpers() {
        assert!(HttpResponse { status: 204, body: vec![] }.is_success());
        assert!(!HttpResponse { status: 404, body: vec![] }.is_success());
        assert!(HttpResponse { status: 404, body: vec![] }.is_not_found());
    }
}
