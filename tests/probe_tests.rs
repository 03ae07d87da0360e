// tests/probe_tests.rs
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use service_probe::config::ServiceConfig;
use service_probe::prober::{
    self, probe_api, probe_health, render_api, render_health, ProbeError, ProbeSession, Target,
};
use service_probe::responder::Responder;
use service_probe::server::listener::bind_tcp;
use service_probe::server::{RequestHandler, ServerBuilder};

const TIMEOUT: Duration = Duration::from_secs(2);

fn service_with_endpoints(endpoints: &[&str]) -> ServiceConfig {
    ServiceConfig {
        api_endpoints: endpoints.iter().map(|s| (*s).to_owned()).collect(),
        ..ServiceConfig::default()
    }
}

async fn start_responder(service: ServiceConfig) -> SocketAddr {
    let responder = Arc::new(Responder::new(service).with_instance("test-instance"));
    let handler = RequestHandler::new(responder);

    let listener = bind_tcp("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        ServerBuilder::new(addr)
            .with_handler(handler)
            .serve_on(listener)
            .await
            .unwrap();
    });

    addr
}

fn session_for(addr: SocketAddr) -> ProbeSession {
    let target = Target::resolve(&format!("http://{addr}"), prober::DEFAULT_PORT).unwrap();
    ProbeSession::connect(&target, TIMEOUT).unwrap()
}

fn session_for_url(url: &str) -> ProbeSession {
    let target = Target::resolve(url, prober::DEFAULT_PORT).unwrap();
    ProbeSession::connect(&target, TIMEOUT).unwrap()
}

#[tokio::test]
async fn round_trip_reports_every_registered_endpoint() {
    let endpoints = ["a.example.com", "b.example.com", "c.example.com"];
    let addr = start_responder(service_with_endpoints(&endpoints)).await;
    let session = session_for(addr);

    let api = probe_api(&session).await;
    let report = api.as_ref().unwrap();
    assert_eq!(report.endpoints, endpoints);
    assert_eq!(report.instance.as_deref(), Some("test-instance"));

    let entry_lines: Vec<_> = render_api(&api)
        .into_iter()
        .filter(|line| line.starts_with(" - "))
        .collect();
    assert_eq!(entry_lines.len(), endpoints.len());
}

#[tokio::test]
async fn health_probe_reports_nominal_status() {
    let addr = start_responder(ServiceConfig::default()).await;
    let session = session_for(addr);

    let health = probe_health(&session).await.unwrap();
    assert_eq!(health.health.service, "Instrumental API");
    assert!(health.health.is_nominal());
    assert_eq!(health.instance.as_deref(), Some("test-instance"));
}

#[tokio::test]
async fn degraded_status_warns_and_does_not_block_the_api_probe() {
    let service = ServiceConfig {
        status: "degraded".to_owned(),
        ..ServiceConfig::default()
    };
    let addr = start_responder(service).await;
    let session = session_for(addr);

    let health = probe_health(&session).await;
    let report = health.as_ref().unwrap();
    assert!(!report.health.is_nominal());

    let lines = render_health(&health);
    assert!(lines.iter().any(|line| line.starts_with("WARNING:")));
    assert!(lines.iter().all(|line| !line.starts_with("ERROR:")));

    // The run continues to the API probe, which still succeeds.
    let api = probe_api(&session).await.unwrap();
    assert_eq!(api.endpoints.len(), 4);
}

#[tokio::test]
async fn empty_registry_reports_a_warning_not_an_error() {
    let addr = start_responder(service_with_endpoints(&[])).await;
    let session = session_for(addr);

    let api = probe_api(&session).await;
    assert!(api.as_ref().unwrap().endpoints.is_empty());

    let lines = render_api(&api);
    assert_eq!(lines, vec!["WARNING: API endpoints list is empty".to_owned()]);
}

#[tokio::test]
async fn root_serves_liveness_probes_without_content_type() {
    let addr = start_responder(ServiceConfig::default()).await;

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "text/html"
    );
    assert_eq!(response.text().await.unwrap(), "There is nothing here");
}

#[tokio::test]
async fn json_routes_reject_requests_without_json_content_type() {
    let addr = start_responder(ServiceConfig::default()).await;
    let client = reqwest::Client::new();

    for path in ["/healthcheck", "/api"] {
        let response = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 415, "no content type on {path}");

        let response = client
            .get(format!("http://{addr}{path}"))
            .header(CONTENT_TYPE, "text/plain")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 415, "wrong content type on {path}");
    }
}

#[tokio::test]
async fn content_type_parameters_are_accepted() {
    let addr = start_responder(ServiceConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/healthcheck"))
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let addr = start_responder(ServiceConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/nope"))
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().contains("/nope"));
}

#[tokio::test]
async fn unreachable_server_fails_both_probes_without_aborting() {
    // Grab a port with no listener behind it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = session_for(addr);

    let health = probe_health(&session).await;
    assert!(matches!(
        health.as_ref().unwrap_err(),
        ProbeError::Transport { .. }
    ));
    assert_eq!(render_health(&health).len(), 1);

    // The API probe is still attempted; the first failure aborts nothing.
    let api = probe_api(&session).await;
    assert!(matches!(
        api.as_ref().unwrap_err(),
        ProbeError::Transport { .. }
    ));
    assert_eq!(render_api(&api).len(), 1);
}

#[tokio::test]
async fn unknown_scheme_is_a_fatal_configuration_error() {
    let target = Target::resolve("ftp://example.com:21", prober::DEFAULT_PORT).unwrap();
    let err = ProbeSession::connect(&target, TIMEOUT).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("unknown protocol"));
}

#[tokio::test]
async fn wrong_response_content_type_is_a_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/healthcheck")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create_async()
        .await;

    let session = session_for_url(&server.url());
    let err = probe_health(&session).await.unwrap_err();

    match &err {
        ProbeError::Protocol { status, .. } => assert_eq!(*status, 200),
        other => panic!("expected protocol error, got {other:?}"),
    }
    assert!(err.to_string().contains("status code: 200"));
}

#[tokio::test]
async fn error_status_is_a_protocol_error_with_reason() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/healthcheck")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let session = session_for_url(&server.url());
    let err = probe_health(&session).await.unwrap_err();

    let rendered = err.to_string();
    assert!(rendered.contains("status code: 500"));
    assert!(rendered.contains("Internal Server Error"));
}

#[tokio::test]
async fn unparseable_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/healthcheck")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let session = session_for_url(&server.url());
    assert!(matches!(
        probe_health(&session).await.unwrap_err(),
        ProbeError::Parse(_)
    ));
}

#[tokio::test]
async fn missing_keys_are_a_parse_error_and_do_not_block_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _health = server
        .mock("GET", "/healthcheck")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;
    let _api = server
        .mock("GET", "/api")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"api_endpoints": "one.example.com, two.example.com"}"#)
        .create_async()
        .await;

    let session = session_for_url(&server.url());

    let health = probe_health(&session).await;
    assert!(matches!(health.as_ref().unwrap_err(), ProbeError::Parse(_)));

    // The second probe still runs and succeeds independently.
    let api = probe_api(&session).await.unwrap();
    assert_eq!(api.endpoints, vec!["one.example.com", "two.example.com"]);
}
