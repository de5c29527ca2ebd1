//! HTTP client for the remote meeting service.
//!
//! Wraps the service's REST endpoints: listing and creating meetings,
//! country/state reference data, login, and registration. Responses use the
//! `{ success, message?, data? }` envelope; wire records are normalized into
//! core types at the boundary, with strict date validation so malformed
//! upstream data surfaces as a typed error instead of a guessed date.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use meetdash_core::{Country, Meeting, User};

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult};

/// Default origin of the remote meeting service.
pub const DEFAULT_BASE_URL: &str = "https://api.xautrademeeting.com";

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest meeting the service accepts, in minutes (24 hours).
const MAX_DURATION_MINUTES: u32 = 1440;

/// Client for the remote meeting service.
#[derive(Debug, Clone)]
pub struct MeetingService {
    http: reqwest::Client,
    base_url: Url,
}

impl MeetingService {
    /// Creates a client against the given origin.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::validation(format!("invalid base URL {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network("failed to build HTTP client").with_source(e))?;
        Ok(Self { http, base_url })
    }

    /// Lists all meetings.
    ///
    /// Any meeting whose `start_time` fails to parse fails the whole call
    /// with an invalid-data error naming the meeting; nothing is silently
    /// coerced or dropped.
    pub async fn list_meetings(&self) -> ApiResult<Vec<Meeting>> {
        let envelope: ApiEnvelope<MeetingsData> = self.get_envelope("/meetings").await?;
        let data = envelope.into_data()?;
        data.meetings
            .into_iter()
            .map(WireMeeting::into_meeting)
            .collect()
    }

    /// Creates a meeting and returns the created record.
    ///
    /// A failed call leaves no client state to roll back; the caller simply
    /// surfaces the error and may retry.
    pub async fn create_meeting(&self, request: &CreateMeeting) -> ApiResult<Meeting> {
        request.validate()?;
        let body = CreateMeetingRequest {
            topic: &request.topic,
            start_time: request.start_time.to_rfc3339(),
            duration: request.duration_minutes,
        };
        let envelope: ApiEnvelope<WireMeeting> =
            self.post_envelope("/create-meeting/", &body).await?;
        envelope.into_data()?.into_meeting()
    }

    /// Fetches the country/state reference data.
    pub async fn countries_with_states(&self) -> ApiResult<Vec<Country>> {
        let envelope: ApiEnvelope<CountriesData> =
            self.get_envelope("/countries-with-states").await?;
        Ok(envelope.into_data()?.countries)
    }

    /// Authenticates and returns the session token plus the user record.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginSession> {
        // The service validates the full account schema even on login, so
        // the unused fields are sent blank.
        let body = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
            first_name: "",
            last_name: "",
            mobile_number: "",
            country_id: credentials.country_id,
            state_id: credentials.state_id,
        };
        let envelope: ApiEnvelope<LoginData> = self.post_envelope("/login", &body).await?;
        let data = envelope.into_data()?;
        Ok(LoginSession {
            access_token: data.access_token,
            user: data.user,
        })
    }

    /// Registers a new account.
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        registration.validate()?;
        let envelope: ApiEnvelope<serde_json::Value> =
            self.post_envelope("/register", registration).await?;
        envelope.into_ok()
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiEnvelope<T>> {
        let url = self.join(path)?;
        let request_id = uuid::Uuid::new_v4();
        debug!(%request_id, path, "GET");
        let response = self
            .http
            .get(url)
            .header("X-Request-Id", request_id.to_string())
            .send()
            .await
            .map_err(|e| transport_error(e).with_endpoint(path))?;
        Self::read_envelope(response, path).await
    }

    async fn post_envelope<B, T>(&self, path: &str, body: &B) -> ApiResult<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.join(path)?;
        let request_id = uuid::Uuid::new_v4();
        debug!(%request_id, path, "POST");
        let response = self
            .http
            .post(url)
            .header("X-Request-Id", request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(e).with_endpoint(path))?;
        Self::read_envelope(response, path).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> ApiResult<ApiEnvelope<T>> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(
                ApiError::authentication("session token expired or invalid").with_endpoint(path)
            );
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network("failed to read response").with_source(e))?;

        // Application failures can arrive with a non-2xx status but still
        // carry the envelope, so the body is parsed before the status is
        // consulted.
        match serde_json::from_str(&body) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_server_error() => Err(ApiError::server(format!(
                "service error ({status}): {}",
                snippet(&body)
            ))
            .with_source(e)
            .with_endpoint(path)),
            Err(e) => Err(ApiError::invalid_response(format!(
                "undecodable response ({status}): {}",
                snippet(&body)
            ))
            .with_source(e)
            .with_endpoint(path)),
        }
    }

    fn join(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::validation(format!("invalid endpoint path {path:?}: {e}")))
    }
}

/// Classifies a reqwest transport failure.
fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::timeout("request timed out").with_source(e)
    } else if e.is_connect() {
        ApiError::network("connection failed").with_source(e)
    } else {
        ApiError::network("request failed").with_source(e)
    }
}

/// First 200 characters of a response body, for error messages.
fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map_or(body.len(), |(idx, _)| idx);
    body[..end].trim_end()
}

/// Login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
}

/// The authenticated session returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// The authenticated user record.
    pub user: User,
}

/// A new-account registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    pub country_id: i64,
    pub state_id: i64,
}

impl Registration {
    /// Validates the registration before any network call.
    pub fn validate(&self) -> ApiResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ApiError::validation("first and last name are required"));
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation(format!(
                "{:?} is not a valid email address",
                self.email
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// A meeting creation request.
#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl CreateMeeting {
    /// Validates the request before any network call.
    pub fn validate(&self) -> ApiResult<()> {
        if self.topic.trim().is_empty() {
            return Err(ApiError::validation("meeting topic is required"));
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ApiError::validation(format!(
                "duration must be between 1 and {MAX_DURATION_MINUTES} minutes"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    mobile_number: &'a str,
    country_id: Option<i64>,
    state_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateMeetingRequest<'a> {
    topic: &'a str,
    start_time: String,
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct MeetingsData {
    #[serde(default)]
    meetings: Vec<WireMeeting>,
}

#[derive(Debug, Deserialize)]
struct CountriesData {
    #[serde(default)]
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    access_token: String,
    user: User,
}

/// A meeting as the service sends it.
#[derive(Debug, Deserialize)]
struct WireMeeting {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    topic: String,
    start_time: String,
    duration: u32,
    join_url: String,
    #[serde(default)]
    start_url: Option<String>,
    #[serde(default)]
    formatted_info: Option<WireFormattedInfo>,
}

#[derive(Debug, Deserialize)]
struct WireFormattedInfo {
    #[serde(default)]
    host_url: Option<String>,
}

impl WireMeeting {
    /// Normalizes the wire record into a core [`Meeting`].
    ///
    /// The host URL comes from `formatted_info.host_url` with `start_url`
    /// as the fallback. An unparseable `start_time` is an upstream defect
    /// and is propagated, not corrected.
    fn into_meeting(self) -> ApiResult<Meeting> {
        let start = DateTime::parse_from_rfc3339(&self.start_time)
            .map_err(|e| {
                ApiError::invalid_data(format!(
                    "meeting {}: unparseable start_time {:?}",
                    self.id, self.start_time
                ))
                .with_source(e)
            })?
            .with_timezone(&Utc);

        let host_url = self
            .formatted_info
            .and_then(|info| info.host_url)
            .or(self.start_url);

        let mut meeting = Meeting::new(self.id, self.topic, start, self.duration, self.join_url);
        if let Some(host) = host_url {
            meeting = meeting.with_host_url(host);
        }
        Ok(meeting)
    }
}

/// Deserializes an id that may arrive as a JSON string or number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumber;

    impl de::Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorCode;
    use chrono::TimeZone;

    #[test]
    fn client_rejects_invalid_base_url() {
        let result = MeetingService::new("not a url", Duration::from_secs(5));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), ApiErrorCode::Validation);
    }

    mod wire_meeting {
        use super::*;

        #[test]
        fn parse_and_normalize() {
            let json = r#"{
                "id": 81002,
                "topic": "Weekly Review",
                "start_time": "2024-03-15T10:00:00Z",
                "duration": 45,
                "join_url": "https://example.com/j/81002",
                "start_url": "https://example.com/s/81002",
                "formatted_info": {"host_url": "https://example.com/h/81002"}
            }"#;

            let wire: WireMeeting = serde_json::from_str(json).unwrap();
            let meeting = wire.into_meeting().unwrap();

            assert_eq!(meeting.id, "81002");
            assert_eq!(meeting.topic, "Weekly Review");
            assert_eq!(
                meeting.start_time,
                Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
            );
            assert_eq!(meeting.duration_minutes, 45);
            // formatted_info.host_url wins over start_url.
            assert_eq!(
                meeting.host_url.as_deref(),
                Some("https://example.com/h/81002")
            );
        }

        #[test]
        fn start_url_fallback() {
            let json = r#"{
                "id": "abc",
                "topic": "Planning",
                "start_time": "2024-03-15T10:00:00+02:00",
                "duration": 30,
                "join_url": "https://example.com/j/abc",
                "start_url": "https://example.com/s/abc"
            }"#;

            let meeting: Meeting = serde_json::from_str::<WireMeeting>(json)
                .unwrap()
                .into_meeting()
                .unwrap();
            assert_eq!(meeting.host_url.as_deref(), Some("https://example.com/s/abc"));
            // Offset times are normalized to UTC.
            assert_eq!(
                meeting.start_time,
                Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
            );
        }

        #[test]
        fn missing_host_links() {
            let json = r#"{
                "id": "abc",
                "topic": "Planning",
                "start_time": "2024-03-15T10:00:00Z",
                "duration": 30,
                "join_url": "https://example.com/j/abc"
            }"#;

            let meeting: Meeting = serde_json::from_str::<WireMeeting>(json)
                .unwrap()
                .into_meeting()
                .unwrap();
            assert!(meeting.host_url.is_none());
        }

        #[test]
        fn unparseable_start_time_is_propagated() {
            let json = r#"{
                "id": "bad",
                "topic": "Broken",
                "start_time": "yesterday at noon",
                "duration": 30,
                "join_url": "https://example.com/j/bad"
            }"#;

            let err = serde_json::from_str::<WireMeeting>(json)
                .unwrap()
                .into_meeting()
                .unwrap_err();
            assert_eq!(err.code(), ApiErrorCode::InvalidData);
            assert!(err.message().contains("bad"));
            assert!(err.message().contains("yesterday at noon"));
        }

        #[test]
        fn meetings_list_parse() {
            let json = r#"{
                "success": true,
                "data": {
                    "meetings": [
                        {
                            "id": 1,
                            "topic": "A",
                            "start_time": "2024-03-15T10:00:00Z",
                            "duration": 30,
                            "join_url": "https://example.com/j/1"
                        },
                        {
                            "id": 2,
                            "topic": "B",
                            "start_time": "2024-03-15T11:00:00Z",
                            "duration": 30,
                            "join_url": "https://example.com/j/2"
                        }
                    ]
                }
            }"#;

            let envelope: ApiEnvelope<MeetingsData> = serde_json::from_str(json).unwrap();
            let data = envelope.into_data().unwrap();
            assert_eq!(data.meetings.len(), 2);
        }

        #[test]
        fn empty_meetings_list_defaults() {
            let json = r#"{"success": true, "data": {}}"#;
            let envelope: ApiEnvelope<MeetingsData> = serde_json::from_str(json).unwrap();
            assert!(envelope.into_data().unwrap().meetings.is_empty());
        }
    }

    mod countries {
        use super::*;

        #[test]
        fn parse_reference_data() {
            let json = r#"{
                "success": true,
                "data": {
                    "countries": [
                        {
                            "id": 1,
                            "name": "United States",
                            "states": [{"id": 10, "name": "California"}]
                        },
                        {"id": 2, "name": "France"}
                    ]
                }
            }"#;

            let envelope: ApiEnvelope<CountriesData> = serde_json::from_str(json).unwrap();
            let countries = envelope.into_data().unwrap().countries;
            assert_eq!(countries.len(), 2);
            assert_eq!(countries[0].states.len(), 1);
            assert!(countries[1].states.is_empty());
        }
    }

    mod requests {
        use super::*;

        #[test]
        fn login_request_carries_full_schema() {
            let body = LoginRequest {
                email: "jane@example.com",
                password: "hunter2hunter2",
                first_name: "",
                last_name: "",
                mobile_number: "",
                country_id: Some(1),
                state_id: Some(10),
            };
            let json = serde_json::to_string(&body).unwrap();
            assert!(json.contains(r#""first_name":"""#));
            assert!(json.contains(r#""country_id":1"#));
        }

        #[test]
        fn create_request_uses_rfc3339() {
            let body = CreateMeetingRequest {
                topic: "Weekly Review",
                start_time: Utc
                    .with_ymd_and_hms(2024, 3, 15, 10, 0, 0)
                    .unwrap()
                    .to_rfc3339(),
                duration: 45,
            };
            let json = serde_json::to_string(&body).unwrap();
            assert!(json.contains("2024-03-15T10:00:00+00:00"));
            assert!(json.contains(r#""duration":45"#));
        }

        #[test]
        fn registration_validation() {
            let valid = Registration {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                mobile_number: "555-0100".to_string(),
                password: "longenough".to_string(),
                country_id: 1,
                state_id: 10,
            };
            assert!(valid.validate().is_ok());

            let short_password = Registration {
                password: "short".to_string(),
                ..valid.clone()
            };
            let err = short_password.validate().unwrap_err();
            assert_eq!(err.code(), ApiErrorCode::Validation);
            assert!(err.message().contains("at least 8"));

            let bad_email = Registration {
                email: "not-an-email".to_string(),
                ..valid.clone()
            };
            assert!(bad_email.validate().is_err());

            let blank_name = Registration {
                first_name: "  ".to_string(),
                ..valid
            };
            assert!(blank_name.validate().is_err());
        }

        #[test]
        fn create_meeting_validation() {
            let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
            let valid = CreateMeeting {
                topic: "Review".to_string(),
                start_time: start,
                duration_minutes: 60,
            };
            assert!(valid.validate().is_ok());

            let blank_topic = CreateMeeting {
                topic: " ".to_string(),
                ..valid.clone()
            };
            assert!(blank_topic.validate().is_err());

            let zero_duration = CreateMeeting {
                duration_minutes: 0,
                ..valid.clone()
            };
            assert!(zero_duration.validate().is_err());

            let too_long = CreateMeeting {
                duration_minutes: 1441,
                ..valid
            };
            assert!(too_long.validate().is_err());
        }
    }

    mod helpers {
        use super::*;

        #[test]
        fn snippet_truncates_long_bodies() {
            let long = "x".repeat(500);
            assert_eq!(snippet(&long).len(), 200);
            assert_eq!(snippet("short"), "short");
        }

        #[test]
        fn id_accepts_string_and_number() {
            #[derive(Deserialize)]
            struct Row {
                #[serde(deserialize_with = "string_or_number")]
                id: String,
            }

            let from_number: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
            assert_eq!(from_number.id, "42");

            let from_string: Row = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
            assert_eq!(from_string.id, "42");
        }
    }
}
