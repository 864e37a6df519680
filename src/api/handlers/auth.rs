//! Handlers for registration and token endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse};
use crate::api::dto::user::UserResponse;
use crate::api::extract::ApiJson;
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Request Body
///
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com", "phone": "+441234567", "password": "..." }
/// ```
///
/// # Errors
///
/// Returns 400 if validation fails.
/// Returns 409 if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state.auth_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for an access/refresh token pair.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOi...",
///   "refresh_token": "q3V9...",
///   "token_type": "Bearer",
///   "expires_in": 900,
///   "user": { "id": 1, "name": "Ada Lovelace", ... }
/// }
/// ```
///
/// # Errors
///
/// Returns 401 for an unknown email or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(tokens.into()))
}

/// Rotates a refresh token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/refresh-token`
///
/// The presented refresh token is revoked; use the returned one next time.
///
/// # Errors
///
/// Returns 401 if the token is unknown, expired or already used.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let tokens = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(tokens.into()))
}

/// Revokes every refresh session of the caller.
///
/// # Endpoint
///
/// `POST /api/v1/auth/logout` (Bearer)
///
/// Access tokens already issued stay valid until they expire.
pub async fn logout_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
