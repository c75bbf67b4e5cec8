//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use reqwest::Method;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .endpoint_url(server.uri())
        .no_rate_limit()
        .build();
    HttpClient::with_config("keyTestApiKey", config)
}

fn server_url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{path}", server.uri())).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.endpoint_url, "https://api.airtable.com");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.rate_limit.is_some());
    assert_eq!(config.rate_limit.unwrap().requests_per_second, 5);
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .endpoint_url("https://airtable.example.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.endpoint_url, "https://airtable.example.com");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("view", "Grid view")
        .query("pageSize", "10")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"fields": {}}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert!(config
        .query
        .contains(&("view".to_string(), "Grid view".to_string())));
    assert!(config
        .query
        .contains(&("pageSize".to_string(), "10".to_string())));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY/rec1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "rec1",
            "fields": { "Name": "Alice" }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let data: serde_json::Value = client
        .get_json(&server_url(&mock_server, "/v0/appX/tblY/rec1"))
        .await
        .unwrap();

    assert_eq!(data["id"], "rec1");
    assert_eq!(data["fields"]["Name"], "Alice");
}

#[tokio::test]
async fn test_http_client_sends_bearer_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .and(header("Authorization", "Bearer keyTestApiKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let response = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_query_params_sorted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .and(query_param("view", "Grid view"))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let response = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::new()
                .query("view", "Grid view")
                .query("pageSize", "2"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let response = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_surfaces_airtable_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY/recMissing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "NOT_FOUND"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY/recMissing"),
            RequestConfig::default(),
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert!(err.to_string().contains("NOT_FOUND"));
}

#[tokio::test]
async fn test_http_client_422_surfaces_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "error": {"type": "INVALID_REQUEST", "message": "Unknown field name: \"Nmae\""}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .request(
            Method::POST,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::new().json(serde_json::json!({"fields": {"Nmae": "x"}})),
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 422, .. }));
    assert!(err.to_string().contains("Unknown field name"));
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    // First two calls return 500, third succeeds
    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .endpoint_url(mock_server.uri())
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("keyTestApiKey", config);
    let response = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_429_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("Rate limited"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .endpoint_url(mock_server.uri())
        .max_retries(2)
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("keyTestApiKey", config);
    let response = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .endpoint_url(mock_server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("keyTestApiKey", config);
    let result = client
        .request(
            Method::GET,
            &server_url(&mock_server, "/v0/appX/tblY"),
            RequestConfig::default(),
        )
        .await;

    assert!(result.is_err());
}

#[test]
fn test_calculate_backoff_constant() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("key", config);

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("key", config);

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("key", config);

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(800));
}

#[test]
fn test_calculate_backoff_respects_max() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config("key", config);

    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug_hides_api_key() {
    let client = HttpClient::new("keySecret");
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(!debug_str.contains("keySecret"));
}

#[test]
fn test_http_client_default_rate_limiter() {
    let client = HttpClient::new("key");
    assert!(client.has_rate_limiter());
}

#[tokio::test]
async fn test_rate_limiter_wait_bounded_by_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .mount(&mock_server)
        .await;

    // One token per second with a burst of one: the second request would
    // have to wait ~1s, far past the 50ms request timeout.
    let config = HttpClientConfig::builder()
        .endpoint_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .max_retries(0)
        .rate_limit(RateLimiterConfig::new(1, 1))
        .build();

    let client = HttpClient::with_config("keyTestApiKey", config);
    let url = server_url(&mock_server, "/v0/appX/tblY");

    let first = client
        .request(Method::GET, &url, RequestConfig::default())
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let err = client
        .request(Method::GET, &url, RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/appX/tblY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"records": []})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .endpoint_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config("keyTestApiKey", config);

    for _ in 0..3 {
        let response = client
            .request(
                Method::GET,
                &server_url(&mock_server, "/v0/appX/tblY"),
                RequestConfig::default(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
