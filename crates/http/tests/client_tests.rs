//! Integration tests for the stake pool HTTP clients

use serde_json::json;
use stakepool_core::{
    AuthProvider, LogoutPlan, LogoutReason, SessionError, SignOutApi, run_forced_logout,
};
use stakepool_http::{ClientError, ProviderClient, PublicClient, TypedClientBuilder};
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_builder_trims_trailing_slash() {
    let client = TypedClientBuilder::new()
        .base_url("http://localhost:8080/api/")
        .build_public()
        .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/api");
}

#[tokio::test]
async fn test_builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_sign_out_sends_bearer_and_json_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("content-type", "application/json"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    client.authenticate("tok-123").sign_out().await.unwrap();
}

#[tokio::test]
async fn test_sign_out_failure_maps_to_session_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let direct = client.authenticate("old").sign_out().await;
    assert!(matches!(direct, Err(ClientError::AuthenticationFailed(_))));

    let via_trait = SignOutApi::sign_out(&client, "old").await;
    assert!(matches!(via_trait, Err(SessionError::SignOutFailed { .. })));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    assert!(client.health().await.is_ok());
}

#[tokio::test]
async fn test_health_check_reports_maintenance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    assert!(matches!(
        client.health().await,
        Err(ClientError::ServerError { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_empty_provider_session_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let provider = ProviderClient::new(mock_server.uri()).unwrap();
    assert_eq!(provider.session().await.unwrap(), None);
}

#[tokio::test]
async fn test_provider_session_with_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"name": "Ada", "email": "ada@example.com"},
            "expires": "2026-11-13T10:00:00.000Z",
            "accessToken": "tok-9",
            "permissions": [1]
        })))
        .mount(&mock_server)
        .await;

    let provider = ProviderClient::new(format!("{}/", mock_server.uri())).unwrap();
    let session = provider.current_session().await.unwrap().unwrap();
    assert_eq!(session.access_token(), Some("tok-9"));
    assert_eq!(session.permissions, vec![1]);
}

#[tokio::test]
async fn test_provider_outage_is_provider_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let provider = ProviderClient::new(mock_server.uri()).unwrap();
    assert!(matches!(
        provider.current_session().await,
        Err(SessionError::ProviderUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_provider_sign_out_posts_csrf_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/csrf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"csrfToken": "csrf-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signout"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("csrfToken=csrf-1"))
        .and(body_string_contains("callbackUrl=%2F"))
        .and(body_string_contains("json=true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://pool.example.com/"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = ProviderClient::new(mock_server.uri()).unwrap();
    let url = provider.request_sign_out("/").await.unwrap();
    assert_eq!(url, "https://pool.example.com/");
}

#[tokio::test]
async fn test_forced_logout_calls_backend_then_provider_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/csrf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"csrfToken": "c"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = PublicClient::new(mock_server.uri()).unwrap();
    let provider = ProviderClient::new(mock_server.uri()).unwrap();
    let plan = LogoutPlan {
        reason: LogoutReason::IdleExpired,
        bearer: Some("tok-1".to_string()),
        callback_url: "/".to_string(),
    };

    let report = run_forced_logout(&api, &provider, &plan).await;
    assert!(report.server_notified);
    assert!(report.provider_signed_out);
}

#[tokio::test]
async fn test_forced_logout_survives_backend_outage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/csrf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"csrfToken": "c"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = PublicClient::new(mock_server.uri()).unwrap();
    let provider = ProviderClient::new(mock_server.uri()).unwrap();
    let plan = LogoutPlan {
        reason: LogoutReason::UserRequested,
        bearer: Some("tok-1".to_string()),
        callback_url: "/".to_string(),
    };

    let report = run_forced_logout(&api, &provider, &plan).await;
    assert!(!report.server_notified);
    assert!(report.provider_signed_out);
}
