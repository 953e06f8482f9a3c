//! Integration tests for form submission against a mock server.

use std::time::Duration;

use lume_net::{FormSubmission, HttpClient, HttpClientBuilder, HttpMethod, NetworkError};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = HttpClientBuilder::new()
        .timeout(Duration::from_secs(60))
        .no_cookies()
        .max_redirects(5)
        .user_agent("lume-tests")
        .build()
        .expect("Failed to build client");

    assert_eq!(client.settings().timeout, Some(Duration::from_secs(60)));
    assert!(!client.settings().cookies);
    assert_eq!(client.settings().max_redirects, 5);
    assert_eq!(client.settings().user_agent, "lume-tests");
}

#[tokio::test]
async fn test_post_sends_urlencoded_fields_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contact"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Ada&email=ada%40example.com&message=Hi+there"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let receipt = FormSubmission::new(format!("{}/contact", server.uri()), HttpMethod::Post)
        .field("name", "Ada")
        .field("email", "ada@example.com")
        .field("message", "Hi there")
        .send(&client)
        .await
        .unwrap();

    assert_eq!(receipt.status, 201);
    assert!(receipt.is_success());
}

#[tokio::test]
async fn test_get_sends_fields_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribe"))
        .and(query_param("email", "ada@example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let receipt = FormSubmission::new("/subscribe", HttpMethod::Get)
        .with_base(server.uri())
        .field("email", "ada@example.com")
        .send(&client)
        .await
        .unwrap();

    assert_eq!(receipt.status, 200);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let err = FormSubmission::new(format!("{}/contact", server.uri()), HttpMethod::Post)
        .field("name", "Ada")
        .send(&client)
        .await
        .unwrap_err();

    match err {
        NetworkError::Rejected { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body.as_deref(), Some("maintenance"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = HttpClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let err = FormSubmission::new(server.uri(), HttpMethod::Post)
        .send(&client)
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::Timeout));
}

#[tokio::test]
async fn test_invalid_action() {
    let client = HttpClient::new().unwrap();
    let err = FormSubmission::new("http://[broken", HttpMethod::Post)
        .send(&client)
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::InvalidAction(_)));
}
