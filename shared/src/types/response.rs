//! Operation result wrapper returned by application services.
//!
//! Every application-service operation returns an [`OperationResult`]:
//! exactly one of success-with-data or failure-with-code-and-message.
//! Business failures never cross the service boundary as errors.

use serde::{Deserialize, Serialize};

/// Result wrapper returned by application services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Operation payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Stable error code for programmatic handling (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Human-readable error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_code: None,
            message: None,
        }
    }

    /// Create a failed result with an error code and message
    pub fn failure(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_code: Some(error_code.into()),
            message: Some(message.into()),
        }
    }

    /// Check if the result is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extract the payload, consuming the result
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the payload to a different type
    pub fn map<U, F>(self, f: F) -> OperationResult<U>
    where
        F: FnOnce(T) -> U,
    {
        OperationResult {
            success: self.success,
            data: self.data.map(f),
            error_code: self.error_code,
            message: self.message,
        }
    }
}
