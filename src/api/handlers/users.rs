//! Handlers for profile endpoints.
//!
//! All routes here sit behind the auth and ownership middleware, so the
//! `{user_id}` path segment is already known to be the caller.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::message::MessageResponse;
use crate::api::dto::user::{ResetPasswordRequest, UpdateUserRequest, UserResponse};
use crate::api::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/v1/users/{user_id}`
pub async fn get_user_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(user.into()))
}

/// Replaces name, email and phone.
///
/// # Endpoint
///
/// `PUT /api/v1/users/{user_id}/update`
///
/// # Errors
///
/// Returns 400 if validation fails.
/// Returns 409 if the email belongs to another account.
pub async fn update_user_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .update_user(user_id, payload.into())
        .await?;

    Ok(Json(user.into()))
}

/// Changes the password.
///
/// # Endpoint
///
/// `PUT /api/v1/users/{user_id}/reset-password`
///
/// # Errors
///
/// Returns 401 if `current_password` is wrong.
pub async fn reset_password_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .user_service
        .change_password(user_id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::ok("Password updated.")))
}

/// Deletes the account together with its addresses and sessions.
///
/// # Endpoint
///
/// `DELETE /api/v1/users/{user_id}/delete`
pub async fn delete_user_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
