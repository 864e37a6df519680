//! Authentication service: registration, login and token lifecycle.

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::user_service::{normalize_email, password_error};
use crate::application::services::with_timeout;
use crate::domain::entities::{NewSession, NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::security::jwt::{
    Claims, JwtConfig, generate_access_token, generate_refresh_token, hash_refresh_token,
    validate_access_token,
};
use crate::infrastructure::security::password::{hash_password, verify_password};

/// Registration input with a plaintext password.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Tokens handed out by login and refresh.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// Service for account registration and token-based authentication.
///
/// Access tokens are short-lived HS256 JWTs. Refresh tokens are opaque and
/// single-use: each refresh revokes the presented session and issues a new one.
pub struct AuthService<U = dyn UserRepository, S = dyn SessionRepository>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    users: Arc<U>,
    sessions: Arc<S>,
    jwt: JwtConfig,
    timeout: Duration,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    /// Creates a new authentication service.
    pub fn new(users: Arc<U>, sessions: Arc<S>, jwt: JwtConfig, timeout: Duration) -> Self {
        Self {
            users,
            sessions,
            jwt,
            timeout,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let email = normalize_email(&registration.email);

        with_timeout(self.timeout, async {
            if self.users.find_by_email(&email).await?.is_some() {
                return Err(AppError::conflict(
                    "Email already registered",
                    json!({ "email": email }),
                ));
            }

            let password_hash =
                hash_password(&registration.password).map_err(|e| password_error("hash", e))?;

            let user = self
                .users
                .create(NewUser {
                    name: registration.name,
                    email: email.clone(),
                    phone: registration.phone,
                    password_hash,
                })
                .await?;

            tracing::info!(user_id = user.id, "User registered");
            Ok(user)
        })
        .await
    }

    /// Authenticates with email and password and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or wrong password;
    /// the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let email = normalize_email(email);

        with_timeout(self.timeout, async {
            let Some(user) = self.users.find_by_email(&email).await? else {
                tracing::warn!("Login failed: unknown email");
                return Err(invalid_credentials());
            };

            let valid = verify_password(password, &user.password_hash)
                .map_err(|e| password_error("verify", e))?;
            if !valid {
                tracing::warn!(user_id = user.id, "Login failed: wrong password");
                return Err(invalid_credentials());
            }

            let tokens = self.issue_tokens(user).await?;
            tracing::info!(user_id = tokens.user.id, "User logged in");
            Ok(tokens)
        })
        .await
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// The presented session is revoked before the new one is issued, so a
    /// refresh token works once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired,
    /// revoked, or its user no longer exists.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let token_hash = hash_refresh_token(refresh_token, &self.jwt);

        with_timeout(self.timeout, async {
            let session = self
                .sessions
                .find_active_by_hash(&token_hash)
                .await?
                .ok_or_else(invalid_refresh_token)?;

            // Lost a race with a concurrent refresh of the same token.
            if !self.sessions.revoke(session.id).await? {
                return Err(invalid_refresh_token());
            }

            let user = self
                .users
                .find_by_id(session.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized("User no longer exists", json!({}))
                })?;

            let tokens = self.issue_tokens(user).await?;
            tracing::info!(user_id = tokens.user.id, "Tokens refreshed");
            Ok(tokens)
        })
        .await
    }

    /// Revokes every session of a user.
    pub async fn logout(&self, user_id: i64) -> Result<u64, AppError> {
        with_timeout(self.timeout, async {
            let revoked = self.sessions.revoke_all_for_user(user_id).await?;
            tracing::info!(user_id, revoked, "User logged out");
            Ok(revoked)
        })
        .await
    }

    /// Validates an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        validate_access_token(token, &self.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })
    }

    async fn issue_tokens(&self, user: User) -> Result<AuthTokens, AppError> {
        let access_token =
            generate_access_token(user.id, user.role.as_str(), &self.jwt).map_err(|e| {
                tracing::error!(error = %e, "Token generation failed");
                AppError::internal("Token generation failed", json!({}))
            })?;

        let (refresh_token, refresh_token_hash) = generate_refresh_token(&self.jwt);

        self.sessions
            .create(NewSession {
                user_id: user.id,
                refresh_token_hash,
                expires_at: Utc::now() + ChronoDuration::days(self.jwt.refresh_token_expiry_days),
            })
            .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in: self.jwt.access_token_ttl_secs(),
            user,
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password", json!({}))
}

fn invalid_refresh_token() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid or expired refresh token" }),
    )
}
