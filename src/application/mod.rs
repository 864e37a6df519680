//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce business rules and give HTTP
//! handlers a narrow API. Every public operation runs under the configured
//! database deadline.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, token refresh
//! - [`services::user_service::UserService`] - Profile and password management
//! - [`services::address_service::AddressService`] - Owner-scoped address book

pub mod services;
