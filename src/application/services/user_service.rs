//! Profile management service.

use crate::application::services::with_timeout;
use crate::domain::entities::{User, UserProfile};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::password::{hash_password, verify_password};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Service for reading and editing a user's own account.
pub struct UserService<R: UserRepository + ?Sized = dyn UserRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        with_timeout(self.timeout, async {
            self.repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id))
        })
        .await
    }

    /// Replaces a user's name, email and phone.
    ///
    /// The email is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email belongs to another account.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn update_user(&self, id: i64, mut profile: UserProfile) -> Result<User, AppError> {
        profile.email = normalize_email(&profile.email);

        with_timeout(self.timeout, async {
            if let Some(owner) = self.repository.find_by_email(&profile.email).await?
                && owner.id != id
            {
                return Err(AppError::conflict(
                    "Email already registered",
                    json!({ "email": profile.email }),
                ));
            }

            let user = self
                .repository
                .update_profile(id, profile)
                .await?
                .ok_or_else(|| user_not_found(id))?;

            tracing::info!(user_id = id, "Profile updated");
            Ok(user)
        })
        .await
    }

    /// Changes a user's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `current_password` is wrong.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn change_password(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        with_timeout(self.timeout, async {
            let user = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id))?;

            let matches = verify_password(current_password, &user.password_hash)
                .map_err(|e| password_error("verify", e))?;
            if !matches {
                tracing::warn!(user_id = id, "Password change rejected");
                return Err(AppError::unauthorized(
                    "Current password is incorrect",
                    json!({}),
                ));
            }

            let new_hash = hash_password(new_password).map_err(|e| password_error("hash", e))?;

            if !self.repository.update_password(id, &new_hash).await? {
                return Err(user_not_found(id));
            }

            tracing::info!(user_id = id, "Password changed");
            Ok(())
        })
        .await
    }

    /// Deletes a user account along with its addresses and sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        with_timeout(self.timeout, async {
            if !self.repository.delete(id).await? {
                return Err(user_not_found(id));
            }

            tracing::info!(user_id = id, "User deleted");
            Ok(())
        })
        .await
    }

    /// Checks that the user store is reachable. Used by the health check.
    pub async fn check_database(&self) -> Result<(), AppError> {
        with_timeout(self.timeout, self.repository.ping()).await
    }
}

/// Lowercases and trims an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

pub(crate) fn password_error(op: &str, e: argon2::password_hash::Error) -> AppError {
    tracing::error!(error = %e, op, "Password hashing failure");
    AppError::internal("Password processing failed", json!({}))
}
