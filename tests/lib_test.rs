//! Library integration tests.

use cwctl::apiroutes::{aggregate_all, probe_single_service, EnvResponse, Service};
use cwctl::connections::Connection;
use cwctl::docker::MockRuntime;
use cwctl::project::get_project_network;
use cwctl::sechttp::{MockClient, MockResponse};
use cwctl::{CwctlError, ErrorKind};

fn env(version: &str, build_time: &str) -> MockResponse {
    MockResponse::json(&EnvResponse::new(version, build_time))
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> cwctl::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn error_types_are_public() {
    let err = CwctlError::ConnectionNotFound { id: "x".into() };
    assert!(err.to_string().contains("x"));
}

#[test]
fn probe_result_is_version_hyphen_build_time() {
    let client = MockClient::new(vec![env("x.x.dev", "20200129-142743")]);
    let version = probe_single_service(
        &client,
        "www.pfe.com/",
        Service::Pfe.path(),
        &Connection::local(),
    )
    .unwrap();
    assert_eq!(version, "x.x.dev-20200129-142743");
}

#[test]
fn unparseable_probe_yields_parse_error() {
    let client = MockClient::new(vec![MockResponse::ok("bad res }}}")]);
    let result = probe_single_service(
        &client,
        "www.pfe.com/",
        Service::Performance.path(),
        &Connection::local(),
    );
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn local_succeeds_while_remote_fails() {
    let client = MockClient::new(vec![
        env("x.x.dev", "1"),
        env("x.x.dev", "2"),
        MockResponse::ok("bad res }}}"),
    ]);
    let connections = vec![
        Connection::new("local", Some("dummy".into())),
        Connection::new("remote1", Some("dummy".into())),
    ];

    let versions = aggregate_all(&client, &MockRuntime::default(), &connections, "latest");

    assert_eq!(versions.cwctl_version, "latest");
    assert_eq!(versions.connections.len(), 1);
    assert_eq!(versions.connections["local"].pfe, "x.x.dev-1");
    assert_eq!(versions.connections["local"].performance, "x.x.dev-2");
    assert_eq!(versions.connection_errors.len(), 1);
    assert!(versions.connection_errors.contains_key("remote1"));
    assert!(client.is_exhausted());
}

#[test]
fn every_connection_lands_in_exactly_one_map() {
    let client = MockClient::new(vec![
        env("a", "1"),
        MockResponse::new(500, ""),
        env("c", "1"),
        env("c", "2"),
        MockResponse::not_found(),
    ]);
    let connections: Vec<_> = ["one", "two", "three"]
        .iter()
        .map(|id| Connection::new(*id, Some(format!("https://{}", id))))
        .collect();

    let versions = aggregate_all(&client, &MockRuntime::default(), &connections, "1.0");

    for conn in &connections {
        let ok = versions.connections.contains_key(&conn.id);
        let failed = versions.connection_errors.contains_key(&conn.id);
        assert!(ok ^ failed, "{} must be in exactly one map", conn.id);
    }
    assert!(versions.connections.contains_key("two"));
    assert!(versions.connection_errors.contains_key("one"));
    assert!(versions.connection_errors.contains_key("three"));
}

#[test]
fn network_404_is_not_found_error() {
    let client = MockClient::new(vec![MockResponse::not_found()]);
    let err = get_project_network(&client, &Connection::local(), "http://pfe", "p1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use cwctl::cli::{Cli, Commands};

    let cli = Cli::parse_from(["cwctl", "version", "--json"]);
    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Version(_)));
}
