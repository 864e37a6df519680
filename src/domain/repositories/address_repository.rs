//! Repository trait for shipping addresses.

use crate::domain::entities::{Address, AddressDetails, NewAddress};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for addresses.
///
/// Every lookup and mutation is filtered by the owning user id: an address
/// that exists under another user behaves exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAddressRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Inserts a new, non-default address unless the owner already has
    /// `limit` addresses.
    ///
    /// The count and the insert run in one transaction holding a lock on the
    /// owner, so concurrent creates cannot overshoot the limit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the owner already has `limit` addresses.
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_within_limit(
        &self,
        new_address: NewAddress,
        limit: i64,
    ) -> Result<Address, AppError>;

    /// Lists a user's addresses ordered by id.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Address>, AppError>;

    /// Finds an address by id within the owner's scope.
    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Address>, AppError>;

    /// Replaces the postal fields of an owned address.
    ///
    /// Returns `None` if no address with this id belongs to the user.
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        details: AddressDetails,
    ) -> Result<Option<Address>, AppError>;

    /// Makes `id` the user's only default address.
    ///
    /// Clears the flag on all of the user's addresses and sets it on the
    /// target inside one transaction. Calling it twice yields the same state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (after rolling back) if the target does
    /// not belong to the user.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_default(&self, id: i64, user_id: i64) -> Result<(), AppError>;

    /// Deletes an owned address. Returns `false` if nothing was deleted.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}
