//! Shipping address management service.

use crate::application::services::with_timeout;
use crate::domain::entities::{Address, AddressDetails, NewAddress};
use crate::domain::repositories::AddressRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Default cap on addresses per user.
pub const DEFAULT_ADDRESS_LIMIT: i64 = 10;

/// Service for a user's address book.
///
/// Enforces:
/// - At most `address_limit` addresses per user
/// - Owner scoping: an address owned by someone else is reported as not found
/// - A single default address per user, swapped transactionally
pub struct AddressService<R: AddressRepository + ?Sized = dyn AddressRepository> {
    repository: Arc<R>,
    timeout: Duration,
    address_limit: i64,
}

impl<R: AddressRepository + ?Sized> AddressService<R> {
    /// Creates a new address service.
    pub fn new(repository: Arc<R>, timeout: Duration, address_limit: i64) -> Self {
        Self {
            repository,
            timeout,
            address_limit,
        }
    }

    /// Adds an address for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user already has the maximum
    /// number of addresses.
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    /// Returns [`AppError::Internal`] on database errors or timeout.
    pub async fn create_address(
        &self,
        user_id: i64,
        details: AddressDetails,
    ) -> Result<Address, AppError> {
        with_timeout(self.timeout, async {
            let address = self
                .repository
                .create_within_limit(NewAddress { user_id, details }, self.address_limit)
                .await
                .inspect_err(|e| {
                    if matches!(e, AppError::Validation { .. }) {
                        tracing::warn!(user_id, limit = self.address_limit, "Address limit reached");
                    }
                })?;

            tracing::info!(user_id, address_id = address.id, "Address created");
            Ok(address)
        })
        .await
    }

    /// Lists all addresses of a user, ordered by id.
    pub async fn list_addresses(&self, user_id: i64) -> Result<Vec<Address>, AppError> {
        with_timeout(self.timeout, self.repository.list_by_user(user_id)).await
    }

    /// Retrieves one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the address does not exist or belongs
    /// to another user.
    pub async fn get_address(&self, id: i64, user_id: i64) -> Result<Address, AppError> {
        with_timeout(self.timeout, async {
            self.repository
                .find_by_id(id, user_id)
                .await?
                .ok_or_else(|| address_not_found(id))
        })
        .await
    }

    /// Replaces the postal fields of one of the user's addresses.
    ///
    /// The default flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the address is not owned by the user.
    pub async fn update_address(
        &self,
        id: i64,
        user_id: i64,
        details: AddressDetails,
    ) -> Result<Address, AppError> {
        with_timeout(self.timeout, async {
            let address = self
                .repository
                .update(id, user_id, details)
                .await?
                .ok_or_else(|| address_not_found(id))?;

            tracing::info!(user_id, address_id = id, "Address updated");
            Ok(address)
        })
        .await
    }

    /// Marks an address as the user's only default address.
    ///
    /// Idempotent: repeating the call leaves the same end state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the address is not owned by the user.
    /// Returns [`AppError::Internal`] if the transaction fails.
    pub async fn set_default_address(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        with_timeout(self.timeout, async {
            if self.repository.find_by_id(id, user_id).await?.is_none() {
                return Err(address_not_found(id));
            }

            self.repository.set_default(id, user_id).await?;

            tracing::info!(user_id, address_id = id, "Default address changed");
            Ok(())
        })
        .await
    }

    /// Deletes one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the address is not owned by the user.
    pub async fn delete_address(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        with_timeout(self.timeout, async {
            if !self.repository.delete(id, user_id).await? {
                return Err(address_not_found(id));
            }

            tracing::info!(user_id, address_id = id, "Address deleted");
            Ok(())
        })
        .await
    }
}

fn address_not_found(id: i64) -> AppError {
    AppError::not_found("Address not found", json!({ "id": id }))
}
