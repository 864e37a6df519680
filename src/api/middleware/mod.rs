//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, ownership checks, rate limiting, CORS and
//! observability middleware.

pub mod auth;
pub mod cors;
pub mod profile;
pub mod rate_limit;
pub mod tracing;

pub use auth::AuthUser;
