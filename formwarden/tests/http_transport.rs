use std::time::Duration;

use formwarden::error::TransportError;
use formwarden::{Form, FormConfig, HttpTransport, MemoryHost, SubmitOutcome, Transport};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("u", "ab"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().with_base_url(server.uri());
    let body = transport.get("/check?u=ab").await.unwrap();

    assert_eq!(body, "true");
}

#[tokio::test]
async fn test_absolute_endpoint_ignores_base_url() {
    let server = MockServer::start().await;
    Mock::given(path("/check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().with_base_url("http://unused.invalid");
    let body = transport.get(&format!("{}/check?u=x", server.uri())).await.unwrap();

    assert_eq!(body, "false");
}

#[tokio::test]
async fn test_server_error_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(path("/check"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().with_base_url(server.uri());
    let err = transport.get("/check?u=ab").await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(matches!(err, TransportError::Http { ref message, .. } if message == "boom"));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(path("/check"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("true")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(100));
    let err = transport.get("/check?u=ab").await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout(t) if t == Duration::from_millis(100)));
}

#[tokio::test]
async fn test_form_verifies_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("u", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let config = FormConfig::from_json(
        r#"{
            "verification": { "username": { "ajax": ["taken", "/check?u="] } },
            "debounceMs": 20
        }"#,
    )
    .unwrap();
    let host = MemoryHost::new().with_text("username", "a b&c");
    let form = Form::builder()
        .config(config)
        .host(host)
        .transport(HttpTransport::new().with_base_url(server.uri()))
        .submit_handler(|_| {})
        .build();

    form.on_change("username", "a b&c");
    form.settle().await;

    assert!(form.verification("username", "ajax").unwrap().valid);
    assert_eq!(form.on_submit().await, SubmitOutcome::Submitted);
}
