//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod addresses;
pub mod auth;
pub mod health;
pub mod ping;
pub mod users;

pub use addresses::{
    create_address_handler, delete_address_handler, get_address_handler, list_addresses_handler,
    set_default_address_handler, update_address_handler,
};
pub use auth::{login_handler, logout_handler, refresh_token_handler, register_handler};
pub use health::health_handler;
pub use ping::ping_handler;
pub use users::{delete_user_handler, get_user_handler, reset_password_handler, update_user_handler};
