//! API integration tests.
//!
//! These tests verify routing, extraction, and validation behavior without a
//! real database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use std::sync::Arc;
use tower::ServiceExt;

use suggestbox_api::{middleware::AppState, router as api_router};
use suggestbox_common::Config;
use suggestbox_common::config::{AuthConfig, DatabaseConfig, PushConfig, ServerConfig};
use suggestbox_core::{AdminService, PushNotificationService, SuggestionService};
use suggestbox_db::repositories::{
    AdminRepository, PushSubscriptionRepository, SuggestionRepository,
};

/// Create a test configuration.
fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: String::new(),
            public_dir: None,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 10,
            min_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_expire_minutes: 720,
        },
        push: PushConfig::default(),
    }
}

/// Create a mock database connection.
fn create_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection()
}

/// Create test app state with mock database.
fn create_test_state() -> AppState {
    let db = Arc::new(create_mock_db());
    let config = create_test_config();

    let admin_repo = AdminRepository::new(Arc::clone(&db));
    let suggestion_repo = SuggestionRepository::new(Arc::clone(&db));
    let push_repo = PushSubscriptionRepository::new(Arc::clone(&db));

    let admin_service = AdminService::new(admin_repo, &config);
    let push_service = PushNotificationService::new(push_repo, None);
    let suggestion_service = SuggestionService::new(suggestion_repo, push_service.clone());

    AppState {
        admin_service,
        suggestion_service,
        push_service,
    }
}

/// Create the test router with the auth middleware applied.
fn create_test_router() -> Router {
    let state = create_test_state();
    api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            suggestbox_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

#[tokio::test]
async fn health_returns_ok() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn create_suggestion_requires_student_key() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"grade": 2, "title": "급식 건의", "content": "급식 메뉴를 늘려주세요"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_suggestion_rejects_short_student_key() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .method("POST")
                .header("Content-Type", "application/json")
                .header("X-Student-Key", "short")
                .body(Body::from(
                    r#"{"grade": 2, "title": "급식 건의", "content": "급식 메뉴를 늘려주세요"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_suggestion_rejects_invalid_grade() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .method("POST")
                .header("Content-Type", "application/json")
                .header("X-Student-Key", "student-key-0001")
                .body(Body::from(
                    r#"{"grade": 7, "title": "급식 건의", "content": "급식 메뉴를 늘려주세요"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_mine_requires_student_key() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/me/suggestions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_me_requires_token() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_me_rejects_garbage_token() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/me")
                .header("Authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn answer_requires_token() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/suggestions/some-id/answer")
                .method("PATCH")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"answer": "처리했습니다"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn push_subscribe_requires_student_key() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/push/subscribe")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"endpoint": "https://push.example/abc", "p256dh": "key", "auth": "secret"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn push_config_reports_disabled_without_keys() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/push/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["data"]["publicKey"], serde_json::Value::Null);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
