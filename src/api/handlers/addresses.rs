//! Handlers for address book endpoints.
//!
//! Every route is scoped by `{user_id}`, which the ownership middleware has
//! already matched against the access token.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::address::{AddressListResponse, AddressRequest, AddressResponse};
use crate::api::dto::message::MessageResponse;
use crate::api::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the user's addresses.
///
/// # Endpoint
///
/// `GET /api/v1/users/{user_id}/addresses`
///
/// # Response
///
/// ```json
/// { "count": 1, "addresses": [ { "id": 7, "is_default": true, ... } ] }
/// ```
pub async fn list_addresses_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<AddressListResponse>, AppError> {
    let addresses = state.address_service.list_addresses(user_id).await?;
    Ok(Json(addresses.into()))
}

/// Adds an address.
///
/// # Endpoint
///
/// `POST /api/v1/users/{user_id}/addresses/create`
///
/// # Errors
///
/// Returns 400 if validation fails or the user already has the maximum
/// number of addresses.
pub async fn create_address_handler(
    ApiPath(user_id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AddressRequest>,
) -> Result<(StatusCode, Json<AddressResponse>), AppError> {
    payload.validate()?;

    let address = state
        .address_service
        .create_address(user_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(address.into())))
}

/// `GET /api/v1/users/{user_id}/addresses/{address_id}`
///
/// Returns 404 if the address does not belong to the user.
pub async fn get_address_handler(
    ApiPath((user_id, address_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<AddressResponse>, AppError> {
    let address = state
        .address_service
        .get_address(address_id, user_id)
        .await?;

    Ok(Json(address.into()))
}

/// Replaces the postal fields of an address. The default flag is unchanged.
///
/// # Endpoint
///
/// `PUT /api/v1/users/{user_id}/addresses/{address_id}/update`
pub async fn update_address_handler(
    ApiPath((user_id, address_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AddressRequest>,
) -> Result<Json<AddressResponse>, AppError> {
    payload.validate()?;

    let address = state
        .address_service
        .update_address(address_id, user_id, payload.into())
        .await?;

    Ok(Json(address.into()))
}

/// Makes an address the user's only default.
///
/// # Endpoint
///
/// `PUT /api/v1/users/{user_id}/addresses/{address_id}/set-default`
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Address(7) set as the default address." }
/// ```
pub async fn set_default_address_handler(
    ApiPath((user_id, address_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .address_service
        .set_default_address(address_id, user_id)
        .await?;

    Ok(Json(MessageResponse::ok(format!(
        "Address({address_id}) set as the default address."
    ))))
}

/// `DELETE /api/v1/users/{user_id}/addresses/{address_id}/delete`
pub async fn delete_address_handler(
    ApiPath((user_id, address_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .address_service
        .delete_address(address_id, user_id)
        .await?;

    Ok(Json(MessageResponse::ok(format!(
        "Address({address_id}) deleted."
    ))))
}
