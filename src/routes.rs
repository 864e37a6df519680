//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check (public, not rate limited)
//! - `/api/v1/*`     - REST API, see [`crate::api::routes::v1_routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from `CORS_ORIGINS`
//! - **Rate limiting** - Per-IP token bucket on `/api/v1` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting reads the client IP from `X-Forwarded-For` / `X-Real-IP`
/// instead of the peer socket address when `config.behind_proxy` is set;
/// enable that only behind a trusted reverse proxy.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let api_router = api::routes::v1_routes(state.clone());
    let api_router = if config.behind_proxy {
        api_router.layer(rate_limit::proxied_layer(config.api_rate_limit))
    } else {
        api_router.layer(rate_limit::layer(config.api_rate_limit))
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(cors::layer(&config.cors_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
