//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for service tests.
//!
//! - [`UserRepository`] - account records
//! - [`AddressRepository`] - owner-scoped shipping addresses
//! - [`SessionRepository`] - refresh-token sessions
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod address_repository;
pub mod session_repository;
pub mod user_repository;

pub use address_repository::AddressRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
