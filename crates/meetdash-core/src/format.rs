//! Output formatting for the grouped meeting view.
//!
//! Two formats are supported:
//! - **TTY**: the day-accordion as text, honoring [`ExpansionState`]
//! - **JSON**: machine-readable output of the same derivation

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::Meeting;
use crate::view::{ExpansionState, GroupedMeetings, Scope};

/// The output format for the meeting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for view formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for meeting topics (truncated with ellipsis).
    pub max_topic_length: Option<usize>,
    /// Whether to print join/host URLs under each row.
    pub show_urls: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_topic_length: None,
            show_urls: true,
        }
    }
}

/// Formats a grouped meeting view for display.
#[derive(Debug, Clone, Default)]
pub struct ViewFormatter {
    options: FormatOptions,
}

impl ViewFormatter {
    /// Creates a formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Renders the day-accordion as terminal text.
    ///
    /// Collapsed days show only their header and count; expanded days list
    /// their meetings. Past meetings stay visible but are tagged and their
    /// action URLs withheld. An empty grouping renders the scope's
    /// empty-state message instead of an error.
    pub fn format_tty(
        &self,
        grouped: &GroupedMeetings,
        expansion: &ExpansionState,
        scope: Scope,
        now: DateTime<Utc>,
    ) -> String {
        if grouped.is_empty() {
            return scope.empty_text().to_string();
        }

        let mut out = String::new();
        for group in grouped.iter() {
            let expanded = expansion.is_expanded(&group.label);
            let marker = if expanded { "▾" } else { "▸" };
            out.push_str(&format!(
                "{} {} ({})\n",
                marker,
                group.label,
                group.meetings.len()
            ));
            if !expanded {
                continue;
            }
            for meeting in &group.meetings {
                out.push_str(&self.meeting_row(meeting, now));
            }
        }
        out
    }

    fn meeting_row(&self, meeting: &Meeting, now: DateTime<Utc>) -> String {
        let topic = match self.options.max_topic_length {
            Some(max) => ellipsis(&meeting.topic, max),
            None => Cow::Borrowed(meeting.topic.as_str()),
        };

        let past = meeting.is_past(now);
        let tag = if past { "  [past]" } else { "" };
        let mut row = format!(
            "    {} UTC  {:>3} min  {}{}\n",
            meeting.start_time.format("%H:%M"),
            meeting.duration_minutes,
            topic,
            tag
        );

        // Action URLs are withheld once the meeting is past.
        if self.options.show_urls && !past {
            row.push_str(&format!("           join: {}\n", meeting.join_url));
            if let Some(ref host) = meeting.host_url {
                row.push_str(&format!("           host: {}\n", host));
            }
        }
        row
    }

    /// Renders the grouped view as JSON.
    pub fn format_json(
        &self,
        grouped: &GroupedMeetings,
        now: DateTime<Utc>,
    ) -> serde_json::Result<String> {
        let days: Vec<JsonDay> = grouped
            .iter()
            .map(|group| JsonDay {
                label: group.label.clone(),
                meetings: group
                    .meetings
                    .iter()
                    .map(|m| JsonMeeting::from_meeting(m, now))
                    .collect(),
            })
            .collect();

        serde_json::to_string_pretty(&JsonView {
            generated_at: now,
            days,
        })
    }
}

/// Top-level JSON output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonView {
    /// The instant the view was derived at.
    pub generated_at: DateTime<Utc>,
    /// Day groups in display order.
    pub days: Vec<JsonDay>,
}

/// One day group in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDay {
    pub label: String,
    pub meetings: Vec<JsonMeeting>,
}

/// One meeting row in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMeeting {
    pub id: String,
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub join_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_url: Option<String>,
    pub past: bool,
    pub join_enabled: bool,
    pub host_enabled: bool,
}

impl JsonMeeting {
    fn from_meeting(meeting: &Meeting, now: DateTime<Utc>) -> Self {
        let actions = meeting.actionability(now);
        Self {
            id: meeting.id.clone(),
            topic: meeting.topic.clone(),
            start_time: meeting.start_time,
            duration_minutes: meeting.duration_minutes,
            join_url: meeting.join_url.clone(),
            host_url: meeting.host_url.clone(),
            past: meeting.is_past(now),
            join_enabled: actions.join_enabled,
            host_enabled: actions.host_enabled,
        }
    }
}

/// Truncates text to `max` characters, appending an ellipsis when cut.
pub fn ellipsis(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    let truncated: String = text.chars().take(max.saturating_sub(1)).collect();
    Cow::Owned(format!("{truncated}…"))
}
