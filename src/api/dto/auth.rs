//! DTOs for registration and token endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::user::UserResponse;
use crate::application::services::{AuthTokens, Registration};

/// Digits with an optional leading `+` and common separators.
pub(crate) static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]*$").unwrap());

#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 7, max = 20))]
    #[validate(regex(path = "*PHONE_REGEX"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            password: r.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

impl From<AuthTokens> for TokenResponse {
    fn from(t: AuthTokens) -> Self {
        Self {
            access_token: t.access_token,
            refresh_token: t.refresh_token,
            token_type: "Bearer",
            expires_in: t.expires_in,
            user: t.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let valid = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            password: "long-enough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        let errors = short_password.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_rejects_bad_phone() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("call me maybe".to_string()),
            password: "long-enough".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_empty_phone_is_none() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","phone":"","password":"long-enough"}"#,
        )
        .unwrap();

        assert_eq!(request.phone, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_phone_is_none() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","password":"long-enough"}"#,
        )
        .unwrap();

        assert_eq!(request.phone, None);
    }

    #[test]
    fn test_login_requires_password() {
        let request = LoginRequest {
            email: "ada@example.com".to_string(),
            password: String::new(),
        };

        assert!(request.validate().is_err());
    }
}
