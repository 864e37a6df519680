//! Business logic services for the application layer.

pub mod address_service;
pub mod auth_service;
pub mod user_service;

pub use address_service::AddressService;
pub use auth_service::{AuthService, AuthTokens, Registration};
pub use user_service::UserService;

use crate::error::AppError;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

/// Runs a service operation under a deadline.
///
/// All repository calls made by `operation` share the same budget; when it
/// runs out the in-flight query is dropped and an internal error is returned.
pub(crate) async fn with_timeout<T, F>(timeout: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(timeout_ms = timeout.as_millis() as u64, "Operation timed out");
            Err(AppError::internal(
                "Database operation timed out",
                json!({ "timeout_seconds": timeout.as_secs_f64() }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, AppError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_with_timeout_passes_error_through() {
        let result = with_timeout(Duration::from_secs(1), async {
            Err::<(), _>(AppError::not_found("gone", json!({})))
        })
        .await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, AppError>(())
        })
        .await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
