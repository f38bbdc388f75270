//! `reqwest` backed [`HttpClient`].

use std::time::Duration;

use anyhow::{Context, Result};

use super::{HttpClient, HttpRequest, HttpResponse, Method};

/// Request timeout used when `--timeout` is not given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client used for all real requests.
///
/// # Example
///
/// ```no_run
/// use cwctl::sechttp::{HttpClient, HttpRequest, ReqwestClient};
///
/// let client = ReqwestClient::new(std::time::Duration::from_secs(10)).unwrap();
/// let response = client.send(HttpRequest::get("http://localhost:9090/api/v1/environment")).unwrap();
/// println!("{}", response.status);
/// ```
pub struct ReqwestClient {
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cwctl/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { timeout, client })
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HttpClient for ReqwestClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .with_context(|| format!("Failed to {} {}", request.method, request.url))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", request.url))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn creates_client_with_custom_timeout() {
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn get_returns_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/environment");
            then.status(200).body(r#"{"version":"0.9.0"}"#);
        });

        let client = ReqwestClient::new(Duration::from_secs(10)).unwrap();
        let response = client
            .send(HttpRequest::get(server.url("/api/v1/environment")))
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"version":"0.9.0"}"#);
    }

    #[test]
    fn non_success_status_is_not_a_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("Not Found");
        });

        let client = ReqwestClient::new(Duration::from_secs(10)).unwrap();
        let response = client.send(HttpRequest::get(server.url("/missing"))).unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn post_sends_headers_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .header("Content-Type", "application/json")
                .body(r#"{"k":"v"}"#);
            then.status(202);
        });

        let client = ReqwestClient::new(Duration::from_secs(10)).unwrap();
        let req = HttpRequest::post_json(server.url("/echo"), &serde_json::json!({"k": "v"})).unwrap();
        let response = client.send(req).unwrap();

        assert_eq!(response.status, 202);
        mock.assert();
    }

    #[test]
    fn unreachable_host_is_error() {
        let client = ReqwestClient::new(Duration::from_secs(2)).unwrap();
        let result = client.send(HttpRequest::get("http://127.0.0.1:1/api"));
        assert!(result.is_err());
    }
}
