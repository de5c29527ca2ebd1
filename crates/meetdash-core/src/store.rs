//! Application state container.
//!
//! A single [`AppState`] owns everything the source kept in ambient
//! globals: the logged-in user, the cached meeting collection, and the
//! country reference data. It is constructed by the caller and passed by
//! reference; there are no statics. The lifecycle is explicit: populated on
//! login, cleared on logout.
//!
//! Meeting installs are guarded by a monotonic fetch generation: every
//! fetch takes a [`FetchToken`] and a response is applied only if its token
//! is still the latest issued. A slow response that loses the race is
//! dropped instead of overwriting fresher data.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::meeting::{Country, Meeting, User};

/// Token identifying one issued meeting fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Holds session and cache state for one run of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    user: Option<User>,
    meetings: Vec<Meeting>,
    countries: Vec<Country>,
    last_refreshed: Option<DateTime<Utc>>,
    issued_generation: u64,
    applied_generation: Option<u64>,
}

impl AppState {
    /// Creates an empty, logged-out state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the logged-in user.
    pub fn login(&mut self, user: User) {
        debug!(user = %user.email, "session established");
        self.user = Some(user);
    }

    /// Clears the session: user, caches, and generations.
    pub fn logout(&mut self) {
        debug!("session cleared");
        *self = Self::default();
    }

    /// Returns the logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns true if a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Issues a token for a new meeting fetch.
    ///
    /// Any token issued earlier becomes stale from this point on.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.issued_generation += 1;
        debug!(generation = self.issued_generation, "meeting fetch issued");
        FetchToken(self.issued_generation)
    }

    /// Installs a fetched meeting collection if its token is still current.
    ///
    /// Returns true when the data was applied, false when the response was
    /// stale and dropped.
    pub fn apply_meetings(
        &mut self,
        token: FetchToken,
        meetings: Vec<Meeting>,
        fetched_at: DateTime<Utc>,
    ) -> bool {
        if token.0 != self.issued_generation {
            debug!(
                stale = token.0,
                current = self.issued_generation,
                "dropping stale meeting response"
            );
            return false;
        }
        self.meetings = meetings;
        self.last_refreshed = Some(fetched_at);
        self.applied_generation = Some(token.0);
        debug!(
            generation = token.0,
            count = self.meetings.len(),
            "meeting cache replaced"
        );
        true
    }

    /// The cached meeting collection (read-only, replaced wholesale).
    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// When the cache was last replaced.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Installs the country reference data (fetched once per session).
    pub fn set_countries(&mut self, countries: Vec<Country>) {
        debug!(count = countries.len(), "country reference data installed");
        self.countries = countries;
    }

    /// The cached country reference data.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Returns true if the country reference data has been fetched.
    pub fn has_countries(&self) -> bool {
        !self.countries.is_empty()
    }
}
