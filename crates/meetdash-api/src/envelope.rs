//! The response envelope used by every service endpoint.
//!
//! All endpoints answer `{ success: bool, message?: string, data?: {...} }`.
//! A `success: false` envelope is an application-level failure carrying the
//! server's message; it is surfaced to the user, never retried.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// The `{ success, message?, data? }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Server-provided message, usually present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload, present on success for data-bearing endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload of a data-bearing endpoint.
    ///
    /// `success: false` becomes an application error with the server's
    /// message; a success without data is an invalid response.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::application(
                self.message
                    .unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::invalid_response("success envelope carried no data"))
    }

    /// Checks a non-data-bearing endpoint (e.g. register) for success.
    pub fn into_ok(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::application(
                self.message
                    .unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }
}
