//! Meeting and reference records.
//!
//! This module provides the records cached from the remote meeting service:
//! - [`Meeting`]: a scheduled meeting with its join/host links
//! - [`Actionability`]: time-gated availability of the join/host actions
//! - [`User`], [`Country`], [`State`]: read-only reference records

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled meeting as cached from the remote service.
///
/// Meetings are owned by the service; the client holds a read-only copy that
/// is replaced wholesale on each fetch, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Service-assigned meeting identifier.
    pub id: String,
    /// The meeting topic/title.
    pub topic: String,
    /// When the meeting starts (stored in UTC).
    pub start_time: DateTime<Utc>,
    /// Scheduled duration in minutes.
    pub duration_minutes: u32,
    /// Link for attendees to join the meeting.
    pub join_url: String,
    /// Privileged link for the host, when the service exposes one.
    pub host_url: Option<String>,
}

impl Meeting {
    /// Creates a new meeting with the required fields.
    pub fn new(
        id: impl Into<String>,
        topic: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_minutes: u32,
        join_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            start_time,
            duration_minutes,
            join_url: join_url.into(),
            host_url: None,
        }
    }

    /// Builder method to set the host URL.
    pub fn with_host_url(mut self, url: impl Into<String>) -> Self {
        self.host_url = Some(url.into());
        self
    }

    /// Returns the scheduled end of the meeting.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Returns true iff the meeting's start lies strictly before `now`.
    ///
    /// Classification is a pure function of `start_time` and `now` and must
    /// be recomputed at every evaluation; it flips exactly when `now` reaches
    /// `start_time`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.start_time < now
    }

    /// Time-gated availability of the join/host actions at `now`.
    ///
    /// A past meeting disables both actions but stays visible in views.
    pub fn actionability(&self, now: DateTime<Utc>) -> Actionability {
        let enabled = !self.is_past(now);
        Actionability {
            join_enabled: enabled,
            host_enabled: enabled,
        }
    }
}

/// Whether the join/host actions are currently available for a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actionability {
    /// The join link may be opened.
    pub join_enabled: bool,
    /// The host link may be opened.
    pub host_enabled: bool,
}

/// The logged-in user record, cached in the session store across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Service-assigned user identifier.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Mobile number, when provided at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    /// Reference to a [`Country`] record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    /// Reference to a [`State`] record within the country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<i64>,
}

impl User {
    /// Returns "First Last" for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the user's initials, e.g. "JD" for Jane Doe.
    pub fn initials(&self) -> String {
        let mut out = String::new();
        if let Some(c) = self.first_name.chars().next() {
            out.extend(c.to_uppercase());
        }
        if let Some(c) = self.last_name.chars().next() {
            out.extend(c.to_uppercase());
        }
        out
    }

    /// Resolves the user's country and state against the reference data.
    pub fn location<'a>(&self, countries: &'a [Country]) -> UserLocation<'a> {
        let country = self
            .country_id
            .and_then(|id| countries.iter().find(|c| c.id == id));
        let state = country
            .zip(self.state_id)
            .and_then(|(c, id)| c.states.iter().find(|s| s.id == id));
        UserLocation { country, state }
    }
}

/// The country/state pair resolved for a user, either side possibly missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserLocation<'a> {
    pub country: Option<&'a Country>,
    pub state: Option<&'a State>,
}

/// A country with its states, fetched once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub states: Vec<State>,
}

/// A state/province within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub name: String,
}
