//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime-checked queries with bound parameters.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgAddressRepository`] - Shipping addresses and the default swap
//! - [`PgSessionRepository`] - Refresh-token sessions

pub mod pg_address_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_address_repository::PgAddressRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
