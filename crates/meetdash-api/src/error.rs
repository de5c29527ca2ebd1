//! Error types for remote meeting service operations.

use std::fmt;
use thiserror::Error;

/// The category of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// Network error: connection failed, DNS resolution, broken transport.
    Network,
    /// The request timed out.
    Timeout,
    /// The service answered `success: false` with an application message.
    Application,
    /// The response body could not be decoded as the expected envelope.
    InvalidResponse,
    /// Decoded data is malformed (e.g. an unparseable meeting date).
    InvalidData,
    /// Authentication failed or the session token is invalid/expired.
    Authentication,
    /// The service returned a 5xx status.
    Server,
    /// Input failed client-side validation; no request was sent.
    Validation,
}

impl ApiErrorCode {
    /// Returns true if the operation may be retried by the user.
    ///
    /// Nothing retries automatically; this only informs the message shown.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::Server)
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Application => "application",
            Self::InvalidResponse => "invalid_response",
            Self::InvalidData => "invalid_data",
            Self::Authentication => "authentication",
            Self::Server => "server",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from the remote meeting service client.
#[derive(Debug, Error)]
pub struct ApiError {
    code: ApiErrorCode,
    message: String,
    /// The endpoint path involved, when known.
    endpoint: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            endpoint: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Network, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Timeout, message)
    }

    /// Creates an application-level error from a `success: false` envelope.
    pub fn application(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Application, message)
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidResponse, message)
    }

    /// Creates an invalid-data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidData, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Authentication, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Server, message)
    }

    /// Creates a validation error (rejected before any network call).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Validation, message)
    }

    /// Sets the endpoint path for this error.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the endpoint path, if set.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns true if the user may retry the operation.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref endpoint) = self.endpoint {
            write!(f, "[{}] ", endpoint)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_retryable() {
        assert!(ApiErrorCode::Network.is_retryable());
        assert!(ApiErrorCode::Timeout.is_retryable());
        assert!(ApiErrorCode::Server.is_retryable());
        assert!(!ApiErrorCode::Application.is_retryable());
        assert!(!ApiErrorCode::InvalidData.is_retryable());
        assert!(!ApiErrorCode::Validation.is_retryable());
    }

    #[test]
    fn error_creation() {
        let err = ApiError::application("meeting limit reached");
        assert_eq!(err.code(), ApiErrorCode::Application);
        assert_eq!(err.message(), "meeting limit reached");
        assert!(err.endpoint().is_none());
    }

    #[test]
    fn display_includes_endpoint() {
        let err = ApiError::network("connection refused").with_endpoint("/meetings");
        let display = format!("{}", err);
        assert!(display.contains("[/meetings]"));
        assert!(display.contains("network"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn source_chain() {
        use std::error::Error;
        let parse = "not-a-date".parse::<i32>().unwrap_err();
        let err = ApiError::invalid_data("bad meeting date").with_source(parse);
        assert!(err.source().is_some());
    }
}
