//! DTOs for profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::api::dto::auth::PHONE_REGEX;
use crate::domain::entities::{User, UserProfile};

/// Public view of a user. The password hash never leaves the service layer.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role.to_string(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Full replacement of the editable profile fields.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Empty string clears the phone number.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 7, max = 20))]
    #[validate(regex(path = "*PHONE_REGEX"))]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UserProfile {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
        }
    }
}

/// Password change. The current password must be supplied.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}
