//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Interval between token replenishments for a per-minute budget.
fn replenish_interval(requests_per_minute: u32) -> Duration {
    Duration::from_millis((60_000 / u64::from(requests_per_minute.max(1))).max(1))
}

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: `requests_per_minute` tokens replenished evenly over a minute
/// - **Burst**: `requests_per_minute` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/v1", v1_routes(state.clone()))
///     .layer(rate_limit::layer(100));
/// ```
pub fn layer(
    requests_per_minute: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_interval(requests_per_minute))
            .burst_size(requests_per_minute.max(1))
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For` / `X-Real-IP` /
/// `Forwarded` with a fallback to the peer address.
///
/// Only use behind a trusted reverse proxy: clients can forge these headers.
pub fn proxied_layer(
    requests_per_minute: u32,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .period(replenish_interval(requests_per_minute))
            .burst_size(requests_per_minute.max(1))
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
