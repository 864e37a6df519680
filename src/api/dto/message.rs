//! Generic acknowledgement payload.

use serde::Serialize;

/// `{"success": true, "message": "..."}` body for operations with no resource to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
