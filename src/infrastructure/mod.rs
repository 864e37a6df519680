//! Infrastructure layer: PostgreSQL persistence and credential primitives.
//!
//! - [`persistence`] - repository implementations backed by SQLx
//! - [`security`] - password hashing and token issuing

pub mod persistence;
pub mod security;
