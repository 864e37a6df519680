//! Ownership check for `/users/{user_id}/...` routes.

use axum::{
    extract::{RawPathParams, Request},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::api::middleware::AuthUser;
use crate::error::AppError;

/// Rejects requests whose `{user_id}` path segment is not the token subject.
///
/// Must run after [`crate::api::middleware::auth::layer`]; the caller is
/// read from the cached [`AuthUser`].
///
/// # Errors
///
/// - `400 Bad Request` if `{user_id}` is missing or not an integer
/// - `401 Unauthorized` if the token belongs to a different user
pub async fn layer(
    auth: AuthUser,
    params: RawPathParams,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw = params
        .iter()
        .find_map(|(key, value)| (key == "user_id").then_some(value))
        .ok_or_else(|| AppError::bad_request("Missing user id", json!({})))?;

    let user_id: i64 = raw
        .parse()
        .map_err(|_| AppError::bad_request("Invalid user id", json!({ "user_id": raw })))?;

    if user_id != auth.user_id {
        tracing::warn!(
            token_user = auth.user_id,
            path_user = user_id,
            "Ownership check failed"
        );
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Token does not belong to this user" }),
        ));
    }

    Ok(next.run(req).await)
}
