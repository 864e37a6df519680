//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AddressService, AuthService, UserService};

/// Services behind trait-object repositories, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub address_service: Arc<AddressService>,
}
