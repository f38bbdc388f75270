//! Project network records.
//!
//! The platform keeps, per project, a map of endpoint name to
//! [`ProjectNetwork`] describing where the project can be reached. These
//! functions read and add entries through the service's REST API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connections::Connection;
use crate::error::ApiError;
use crate::sechttp::{dispatch_http_request, HttpClient, HttpRequest, HttpResponse};

/// Operation tag for failed project requests.
pub const ERR_OP_PROJ_REQUEST: &str = "proj_request";
/// Operation tag for a project or resource the service does not know.
pub const ERR_OP_PROJ_NOT_FOUND: &str = "proj_not_found";
/// Operation tag for unparseable project responses.
pub const ERR_OP_PROJ_PARSE: &str = "proj_parse";

/// Where a project is reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNetwork {
    #[serde(rename = "projectID")]
    pub project_id: String,
    pub project_name: String,
    #[serde(rename = "projectURL")]
    pub project_url: String,
    #[serde(rename = "connectionID")]
    pub connection_id: String,
    #[serde(rename = "connectionURL")]
    pub connection_url: String,
    pub env: String,
}

/// Network records keyed by endpoint name.
pub type ProjectNetworkList = HashMap<String, ProjectNetwork>;

/// `{base_url}/api/v1/projects/{project_id}/network/`
pub fn network_url(base_url: &str, project_id: &str) -> String {
    format!(
        "{}/api/v1/projects/{}/network/",
        base_url.trim_end_matches('/'),
        project_id
    )
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_not_found() {
        return Err(ApiError::not_found(ERR_OP_PROJ_NOT_FOUND));
    }
    if !response.is_success() {
        return Err(ApiError::status(ERR_OP_PROJ_REQUEST, response.status));
    }
    Ok(())
}

/// Fetch the network records of a project.
pub fn get_project_network<C: HttpClient + ?Sized>(
    client: &C,
    connection: &Connection,
    base_url: &str,
    project_id: &str,
) -> Result<ProjectNetworkList, ApiError> {
    let url = network_url(base_url, project_id);
    debug!(connection = %connection.id, project = %project_id, "Fetching project network");

    let response = dispatch_http_request(client, HttpRequest::get(url), connection)
        .map_err(|e| e.with_op(ERR_OP_PROJ_REQUEST))?;
    check_status(&response)?;

    serde_json::from_slice(&response.body).map_err(|e| ApiError::parse(ERR_OP_PROJ_PARSE, e))
}

/// Add a network record to a project.
pub fn create_project_network<C: HttpClient + ?Sized>(
    client: &C,
    connection: &Connection,
    base_url: &str,
    project_id: &str,
    record: &ProjectNetwork,
) -> Result<(), ApiError> {
    let url = network_url(base_url, project_id);
    let request =
        HttpRequest::post_json(url, record).map_err(|e| ApiError::request(ERR_OP_PROJ_REQUEST, e))?;
    debug!(connection = %connection.id, project = %project_id, "Creating project network");

    let response = dispatch_http_request(client, request, connection)
        .map_err(|e| e.with_op(ERR_OP_PROJ_REQUEST))?;
    check_status(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sechttp::{Method, MockClient, MockResponse, ReqwestClient};
    use httpmock::prelude::*;
    use std::time::Duration;

    fn record() -> ProjectNetwork {
        ProjectNetwork {
            project_id: "b1a78500-eaa5-11e9-b0c1-97c28a7e77c7".into(),
            project_name: "nodeapp".into(),
            project_url: "http://127.0.0.1:32768".into(),
            connection_id: "local".into(),
            connection_url: String::new(),
            env: "NODEAPP_URL".into(),
        }
    }

    #[test]
    fn network_url_format() {
        assert_eq!(
            network_url("http://pfe:9090/", "abc"),
            "http://pfe:9090/api/v1/projects/abc/network/"
        );
    }

    #[test]
    fn record_uses_wire_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["projectID"], "b1a78500-eaa5-11e9-b0c1-97c28a7e77c7");
        assert_eq!(value["projectName"], "nodeapp");
        assert_eq!(value["projectURL"], "http://127.0.0.1:32768");
        assert_eq!(value["connectionID"], "local");
        assert_eq!(value["connectionURL"], "");
        assert_eq!(value["env"], "NODEAPP_URL");
    }

    #[test]
    fn get_returns_records_by_endpoint() {
        let mut list = ProjectNetworkList::new();
        list.insert("backend".into(), record());
        let client = MockClient::new(vec![MockResponse::json(&list)]);

        let result =
            get_project_network(&client, &Connection::local(), "http://pfe", "abc").unwrap();

        assert_eq!(result, list);
        let sent = client.requests();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://pfe/api/v1/projects/abc/network/");
    }

    #[test]
    fn get_404_is_not_found_error() {
        let client = MockClient::new(vec![MockResponse::not_found()]);
        let err =
            get_project_network(&client, &Connection::local(), "http://pfe", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.op(), ERR_OP_PROJ_NOT_FOUND);
    }

    #[test]
    fn get_bad_body_is_parse_error() {
        let client = MockClient::new(vec![MockResponse::ok("[1, 2, 3]")]);
        let err =
            get_project_network(&client, &Connection::local(), "http://pfe", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn get_transport_failure_is_request_error() {
        let client = MockClient::new(vec![]);
        let err =
            get_project_network(&client, &Connection::local(), "http://pfe", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.op(), ERR_OP_PROJ_REQUEST);
    }

    #[test]
    fn get_server_error_is_request_error() {
        let client = MockClient::new(vec![MockResponse::new(500, "boom")]);
        let err =
            get_project_network(&client, &Connection::local(), "http://pfe", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert!(err.description().contains("500"));
    }

    #[test]
    fn create_posts_json_record() {
        let client = MockClient::new(vec![MockResponse::new(201, "")]);

        create_project_network(&client, &Connection::local(), "http://pfe", "abc", &record())
            .unwrap();

        let sent = &client.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        let body: ProjectNetwork = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, record());
    }

    #[test]
    fn create_404_is_not_found_error() {
        let client = MockClient::new(vec![MockResponse::not_found()]);
        let err = create_project_network(&client, &Connection::local(), "http://pfe", "abc", &record())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn round_trip_through_http_server() {
        let server = MockServer::start();
        let get = server.mock(|when, then| {
            when.method(GET).path("/api/v1/projects/p1/network/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"db":{"projectID":"p1","projectName":"app","projectURL":"http://db","connectionID":"local","connectionURL":"","env":"DB_URL"}}"#);
        });
        let post = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/projects/p1/network/")
                .header("Content-Type", "application/json")
                .header("Authorization", "Bearer tok");
            then.status(202);
        });

        let client = ReqwestClient::new(Duration::from_secs(10)).unwrap();
        let conn = Connection::new("remote1", Some(server.base_url())).with_security(
            crate::connections::SecurityContext::Bearer {
                token: "tok".into(),
            },
        );

        let list = get_project_network(&client, &conn, &server.base_url(), "p1").unwrap();
        assert_eq!(list["db"].env, "DB_URL");

        create_project_network(&client, &conn, &server.base_url(), "p1", &record()).unwrap();

        get.assert();
        post.assert();
    }
}
