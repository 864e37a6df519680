#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use shop_accounts::api::handlers::health_handler;
use shop_accounts::api::routes::v1_routes;
use shop_accounts::application::services::{AddressService, AuthService, UserService};
use shop_accounts::config::Config;
use shop_accounts::domain::entities::{AddressDetails, NewUser, User};
use shop_accounts::domain::repositories::{
    AddressRepository, SessionRepository, UserRepository,
};
use shop_accounts::infrastructure::persistence::{
    PgAddressRepository, PgSessionRepository, PgUserRepository,
};
use shop_accounts::infrastructure::security::jwt::{JwtConfig, generate_access_token};
use shop_accounts::infrastructure::security::password::hash_password;
use shop_accounts::state::AppState;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-signing-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

pub fn test_config(api_rate_limit: u32, cors_origins: &[&str]) -> Config {
    Config {
        database_url: "postgres://localhost/unused".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_timeout_seconds: 5,
        api_rate_limit,
        behind_proxy: false,
        cors_origins: cors_origins.iter().map(|o| o.to_string()).collect(),
        jwt: jwt_config(),
        address_limit: 10,
        db_max_connections: 5,
        db_connect_timeout: 5,
        db_idle_timeout: 600,
        db_max_lifetime: 1800,
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let timeout = Duration::from_secs(5);

    let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let session_repo: Arc<dyn SessionRepository> =
        Arc::new(PgSessionRepository::new(pool.clone()));
    let address_repo: Arc<dyn AddressRepository> = Arc::new(PgAddressRepository::new(pool));

    AppState {
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            session_repo,
            jwt_config(),
            timeout,
        )),
        user_service: Arc::new(UserService::new(user_repo, timeout)),
        address_service: Arc::new(AddressService::new(address_repo, timeout, 10)),
    }
}

/// API routes as mounted in production, without rate limiting (no peer address in tests).
pub fn make_server(pool: PgPool) -> TestServer {
    let state = create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", v1_routes(state.clone()))
        .with_state(state);
    TestServer::new(app).unwrap()
}

pub async fn create_test_user(pool: &PgPool, email: &str) -> User {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        })
        .await
        .unwrap()
}

pub fn access_token(user_id: i64) -> String {
    generate_access_token(user_id, "user", &jwt_config()).unwrap()
}

pub fn details(line1: &str) -> AddressDetails {
    AddressDetails {
        address_line1: line1.to_string(),
        address_line2: "Apt 4".to_string(),
        postal_code: "10115".to_string(),
        city: "Berlin".to_string(),
        state: "Berlin".to_string(),
        country: "Germany".to_string(),
    }
}

pub async fn default_address_ids(pool: &PgPool, user_id: i64) -> Vec<i64> {
    sqlx::query_scalar("SELECT id FROM addresses WHERE user_id = $1 AND is_default ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn address_count(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
