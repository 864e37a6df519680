//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Services work with domain entities; the conversion
//! to response shapes happens here.

pub mod address;
pub mod auth;
pub mod health;
pub mod message;
pub mod user;
