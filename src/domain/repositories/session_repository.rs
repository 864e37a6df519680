//! Repository trait for refresh-token sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for refresh sessions.
///
/// Tokens are looked up by their digest; plaintext tokens never reach storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Finds a session that is neither revoked nor expired.
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Revokes one session. Returns `false` if it was already revoked.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;

    /// Revokes every active session of a user and returns how many were revoked.
    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, AppError>;

    /// Deletes expired and revoked sessions and returns how many were removed.
    async fn purge_inactive(&self) -> Result<u64, AppError>;

    /// Counts sessions that are still usable.
    async fn count_active(&self) -> Result<i64, AppError>;
}
