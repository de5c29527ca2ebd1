//! Share and redirect transient state.
//!
//! This module models the share dialog the engine drives: the single active
//! [`PendingShare`], the self-clearing [`CopiedNotice`], and the pure
//! [`RedirectCountdown`]. Rendering technology lives behind the
//! [`ArtifactRenderer`] capability trait; the engine only hands over a URL
//! and receives an artifact or a failure.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long the "copied" indicator stays visible.
pub const COPIED_NOTICE_TTL_SECS: i64 = 2;

/// Default redirect delay before a share URL is opened.
pub const REDIRECT_DELAY_SECS: u32 = 5;

/// Which link of a meeting a share request points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareKind {
    /// The attendee join link.
    Join,
    /// The privileged host link.
    Host,
    /// A link back into the dashboard itself.
    Dashboard,
}

impl ShareKind {
    /// Returns a human-readable name for this share kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Join => "join link",
            Self::Host => "host link",
            Self::Dashboard => "dashboard link",
        }
    }
}

/// The single active request to present a meeting link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingShare {
    /// The URL being shared.
    pub url: String,
    /// Which link of the meeting this is.
    pub kind: ShareKind,
    /// The meeting the link belongs to.
    pub meeting_id: String,
}

impl PendingShare {
    /// Creates a new pending share.
    pub fn new(url: impl Into<String>, kind: ShareKind, meeting_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            meeting_id: meeting_id.into(),
        }
    }
}

/// The transient "copied to clipboard" indicator.
///
/// Self-clears once its TTL elapses; triggering a new copy replaces the
/// previous notice outright, there is no queueing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedNotice {
    expires_at: DateTime<Utc>,
}

impl CopiedNotice {
    /// Creates a notice shown at `now` with the default TTL.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            expires_at: now + Duration::seconds(COPIED_NOTICE_TTL_SECS),
        }
    }

    /// Returns whether the notice is still visible at `now`.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Holds the at-most-one pending share and the copied indicator.
///
/// Opening a new share replaces the old; dismissal clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareState {
    pending: Option<PendingShare>,
    copied: Option<CopiedNotice>,
}

impl ShareState {
    /// Creates an empty share state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a share request, replacing any active one.
    pub fn open(&mut self, share: PendingShare) {
        self.pending = Some(share);
    }

    /// Dismisses the active share request, if any.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Returns the active share request.
    pub fn pending(&self) -> Option<&PendingShare> {
        self.pending.as_ref()
    }

    /// Records that the active URL was copied at `now`.
    pub fn mark_copied(&mut self, now: DateTime<Utc>) {
        self.copied = Some(CopiedNotice::new(now));
    }

    /// Returns whether the copied indicator should render at `now`.
    pub fn copied_visible(&self, now: DateTime<Utc>) -> bool {
        self.copied.is_some_and(|notice| notice.is_visible(now))
    }
}

/// A pure countdown toward a navigation side effect.
///
/// The driver (a UI timer) calls [`tick`](Self::tick) once per second and
/// performs the navigation when the countdown reports done. Cancellation is
/// simply dropping the countdown with ticks remaining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectCountdown {
    url: String,
    remaining_secs: u32,
}

impl RedirectCountdown {
    /// Creates a countdown toward opening `url` with the default delay.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_delay(url, REDIRECT_DELAY_SECS)
    }

    /// Creates a countdown with an explicit delay in seconds.
    pub fn with_delay(url: impl Into<String>, secs: u32) -> Self {
        Self {
            url: url.into(),
            remaining_secs: secs,
        }
    }

    /// The URL the countdown navigates to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Seconds left before navigation.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Advances the countdown by one second, returning the new remainder.
    pub fn tick(&mut self) -> u32 {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.remaining_secs
    }

    /// Returns whether the countdown has reached zero.
    pub fn is_done(&self) -> bool {
        self.remaining_secs == 0
    }
}

/// A rendered shareable form of a meeting link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareArtifact {
    /// An SVG document, e.g. a QR code for embedding or download.
    Svg(String),
    /// Text suitable for direct terminal output, e.g. a unicode QR grid.
    Text(String),
    /// The plain URL, for platforms with no richer capability.
    Url(String),
}

impl ShareArtifact {
    /// The artifact payload as a string slice, whatever its form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Svg(s) | Self::Text(s) | Self::Url(s) => s,
        }
    }
}

/// Failure to produce a share artifact.
#[derive(Debug, Error)]
#[error("artifact rendering failed: {0}")]
pub struct ArtifactError(pub String);

/// Capability to turn a URL into a shareable artifact.
///
/// The view-state engine depends only on this trait; how the artifact is
/// produced (QR encoder, clipboard, plain text) is an adapter concern.
pub trait ArtifactRenderer {
    /// Renders the given URL into a shareable artifact.
    fn render(&self, url: &str) -> Result<ShareArtifact, ArtifactError>;
}
