//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Emails are compared case-insensitively.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replaces name, email and phone. Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email belongs to another user.
    async fn update_profile(&self, id: i64, profile: UserProfile)
    -> Result<Option<User>, AppError>;

    /// Stores a new password hash. Returns `false` if the user does not exist.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError>;

    /// Hard-deletes a user together with their addresses and sessions.
    /// Returns `false` if the user does not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists all users, newest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
