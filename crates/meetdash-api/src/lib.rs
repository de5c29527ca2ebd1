//! HTTP client for the remote meeting service

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{
    CreateMeeting, Credentials, DEFAULT_BASE_URL, LoginSession, MIN_PASSWORD_LEN, MeetingService,
    Registration,
};
pub use envelope::ApiEnvelope;
pub use error::{ApiError, ApiErrorCode, ApiResult};
