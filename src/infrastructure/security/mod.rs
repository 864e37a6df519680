//! Credential primitives: password hashing, access tokens and refresh tokens.
//!
//! - [`password`] - Argon2id hashing and verification
//! - [`jwt`] - HS256 access tokens and opaque refresh tokens

pub mod jwt;
pub mod password;
