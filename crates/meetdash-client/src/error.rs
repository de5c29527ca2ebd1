//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Remote meeting service error.
    Api(meetdash_api::ApiError),
    /// IO error.
    Io(std::io::Error),
    /// Session store error (missing, unreadable, or not logged in).
    Session(String),
    /// User input rejected before any network call.
    Input(String),
    /// Action failed (open, copy, render).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Api(err) => write!(f, "service error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Session(msg) => write!(f, "session error: {}", msg),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<meetdash_api::ApiError> for ClientError {
    fn from(err: meetdash_api::ApiError) -> Self {
        Self::Api(err)
    }
}
