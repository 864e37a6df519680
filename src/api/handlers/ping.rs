//! Liveness endpoint.

use axum::{Json, http::StatusCode};

use crate::api::dto::message::MessageResponse;

/// `GET /api/v1/ping`
///
/// Always answers `202 Accepted` without touching the database.
pub async fn ping_handler() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::ACCEPTED,
        Json(MessageResponse::ok("Server up and running.")),
    )
}
