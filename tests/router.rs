mod common;

use axum::ServiceExt;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use shop_accounts::routes::app_router;
use sqlx::PgPool;
use std::net::SocketAddr;

const ORIGIN: &str = "https://shop.example.com";

/// Full production stack served over a real socket so the rate limiter
/// sees a peer address.
fn make_app_server(pool: PgPool, api_rate_limit: u32) -> TestServer {
    let config = common::test_config(api_rate_limit, &[ORIGIN]);
    let router = app_router(common::create_test_state(pool), &config);
    let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(router);

    TestServer::builder().http_transport().build(app).unwrap()
}

#[sqlx::test]
async fn test_trailing_slash_is_normalized(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let server = make_app_server(pool, 100);

    let response = server
        .get(&format!("/api/v1/users/{}/addresses/", user.id))
        .authorization_bearer(common::access_token(user.id))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["count"], 0);
}

#[sqlx::test]
async fn test_cors_preflight_allows_configured_origin(pool: PgPool) {
    let server = make_app_server(pool, 100);

    let response = server
        .method(Method::OPTIONS, "/api/v1/auth/login")
        .add_header("origin", ORIGIN)
        .add_header("access-control-request-method", "POST")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), ORIGIN);
}

#[sqlx::test]
async fn test_cors_rejects_unknown_origin(pool: PgPool) {
    let server = make_app_server(pool, 100);

    let response = server
        .get("/api/v1/ping")
        .add_header("origin", "https://evil.example.com")
        .await;

    assert!(response.maybe_header("access-control-allow-origin").is_none());
}

#[sqlx::test]
async fn test_rate_limit_exhausted(pool: PgPool) {
    let server = make_app_server(pool, 2);

    for _ in 0..2 {
        server
            .get("/api/v1/ping")
            .await
            .assert_status(StatusCode::ACCEPTED);
    }

    server
        .get("/api/v1/ping")
        .await
        .assert_status_too_many_requests();

    // Health sits outside the limited API router.
    server.get("/health").await.assert_status_ok();
}
