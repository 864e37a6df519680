//! Versioned API route configuration.

use crate::api::handlers::{
    create_address_handler, delete_address_handler, delete_user_handler, get_address_handler,
    get_user_handler, list_addresses_handler, login_handler, logout_handler, ping_handler,
    refresh_token_handler, register_handler, reset_password_handler,
    set_default_address_handler, update_address_handler, update_user_handler,
};
use crate::api::middleware::{auth, profile};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

/// All `/api/v1` routes.
///
/// # Endpoints
///
/// Public:
/// - `GET    /ping`
/// - `POST   /auth/register`
/// - `POST   /auth/login`
/// - `POST   /auth/refresh-token`
///
/// Bearer token:
/// - `POST   /auth/logout`
///
/// Bearer token, `{user_id}` must be the token subject:
/// - `GET    /users/{user_id}`
/// - `PUT    /users/{user_id}/update`
/// - `PUT    /users/{user_id}/reset-password`
/// - `DELETE /users/{user_id}/delete`
/// - `GET    /users/{user_id}/addresses`
/// - `POST   /users/{user_id}/addresses/create`
/// - `GET    /users/{user_id}/addresses/{address_id}`
/// - `PUT    /users/{user_id}/addresses/{address_id}/update`
/// - `PUT    /users/{user_id}/addresses/{address_id}/set-default`
/// - `DELETE /users/{user_id}/addresses/{address_id}/delete`
pub fn v1_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/ping", get(ping_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh-token", post(refresh_token_handler));

    let authenticated = Router::new()
        .route("/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    // Layers run outermost-last: auth, then the ownership check.
    let user_scoped = Router::new()
        .route("/users/{user_id}", get(get_user_handler))
        .route("/users/{user_id}/update", put(update_user_handler))
        .route("/users/{user_id}/reset-password", put(reset_password_handler))
        .route("/users/{user_id}/delete", delete(delete_user_handler))
        .route("/users/{user_id}/addresses", get(list_addresses_handler))
        .route(
            "/users/{user_id}/addresses/create",
            post(create_address_handler),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}",
            get(get_address_handler),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}/update",
            put(update_address_handler),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}/set-default",
            put(set_default_address_handler),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}/delete",
            delete(delete_address_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            profile::layer,
        ))
        .route_layer(middleware::from_fn_with_state(state, auth::layer));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(user_scoped)
}
