//! Tests for exchanging the refresh token for an access token.
//!
//! The accounts service is stubbed with wiremock.

use serde_json::json;
use spotirs::{Credentials, Error, SpotifyAuth, basic_auth_token};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLIENT_ID: &str = "test-client-id";
const CLIENT_SECRET: &str = "test-client-secret";
const REFRESH_TOKEN: &str = "test-refresh-token";

fn auth_for(server: &MockServer) -> SpotifyAuth {
    SpotifyAuth::new(Credentials::new(CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN).unwrap())
        .with_accounts_base_url(&server.uri())
}

#[tokio::test]
async fn test_get_access_token_success() {
    let server = MockServer::start().await;
    let basic = format!("Basic {}", basic_auth_token(CLIENT_ID, CLIENT_SECRET));

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", basic.as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=test-refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "X",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "user-top-read user-read-recently-played",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let access_token = auth_for(&server).get_access_token().await.unwrap();

    assert_eq!(access_token, "X");
}

#[tokio::test]
async fn test_get_access_token_minimal_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "mock-token" })),
        )
        .mount(&server)
        .await;

    let access_token = auth_for(&server).get_access_token().await.unwrap();

    assert_eq!(access_token, "mock-token");
}

#[tokio::test]
async fn test_get_access_token_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "mock-token" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let auth = auth_for(&server);
    auth.get_access_token().await.unwrap();
    auth.get_access_token().await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_get_access_token_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;

    let err = auth_for(&server).get_access_token().await.unwrap_err();

    assert!(matches!(err, Error::AuthExchange(_)));
    assert_eq!(
        err.to_string(),
        "Failed to get access token: Token request failed: Bad Request"
    );
}

#[tokio::test]
async fn test_get_access_token_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = auth_for(&server).get_access_token().await.unwrap_err();

    assert!(err.to_string().contains("Failed to get access token"));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_get_access_token_invalid_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = auth_for(&server).get_access_token().await.unwrap_err();

    assert!(matches!(err, Error::AuthExchange(_)));
    assert!(err.to_string().starts_with("Failed to get access token: "));
}

#[tokio::test]
async fn test_get_access_token_network_error() {
    // Nothing listens on port 1, so the connection is refused
    let auth = SpotifyAuth::new(Credentials::new(CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN).unwrap())
        .with_accounts_base_url("http://127.0.0.1:1");

    let err = auth.get_access_token().await.unwrap_err();

    match &err {
        Error::AuthExchange(message) => {
            assert!(message.starts_with("error sending request for url"));
            assert!(
                message.to_lowercase().contains("connection refused"),
                "Expected the refused connection in {message:?}"
            );
        }
        other => panic!("Expected an auth exchange error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Failed to get access token: "));
}

#[tokio::test]
async fn test_concurrent_exchanges_are_independent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "mock-token" })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let auth = auth_for(&server);
    let (a, b, c) = tokio::join!(
        auth.get_access_token(),
        auth.get_access_token(),
        auth.get_access_token()
    );

    assert_eq!(a.unwrap(), "mock-token");
    assert_eq!(b.unwrap(), "mock-token");
    assert_eq!(c.unwrap(), "mock-token");
    server.verify().await;
}
