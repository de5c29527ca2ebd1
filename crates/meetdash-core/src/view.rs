//! The meeting view-state engine.
//!
//! This module turns a flat meeting collection plus user-selected filter
//! state into the grouped, ordered structure the UI renders:
//! - [`ViewFilter`] / [`Scope`]: the user's display horizon
//! - [`filter_meetings`]: scope and past filtering
//! - [`group_by_day`] / [`GroupedMeetings`]: day-label grouping
//! - [`ExpansionState`]: per-day expand/collapse toggles
//!
//! Everything here is a pure derivation over immutable snapshots, re-run on
//! every state change (fetch complete, filter change, clock tick). There is
//! no incremental computation and no cached past/future classification.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::Meeting;
use crate::time::{TimeWindow, day_label};

/// The horizon of meetings to display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Meetings whose start falls on today's calendar day.
    Today,
    /// Meetings from the start of today onward, unbounded future.
    #[default]
    Upcoming,
    /// Meetings within the current Sunday-based calendar week.
    Week,
    /// Meetings that have already started.
    Past,
}

impl Scope {
    /// Returns the empty-state message for this scope.
    pub fn empty_text(&self) -> &'static str {
        match self {
            Self::Today => "No meetings scheduled for today.",
            Self::Upcoming => "No upcoming meetings scheduled.",
            Self::Week => "No meetings scheduled for this week.",
            Self::Past => "No past meetings found.",
        }
    }
}

/// User-selected view filter state.
///
/// Transient UI state, mutated only by user interaction and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    /// The display horizon.
    pub scope: Scope,
    /// Drop meetings whose start has already passed.
    pub hide_past: bool,
}

impl ViewFilter {
    /// Creates a filter with the given scope and `hide_past` off.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            hide_past: false,
        }
    }

    /// Builder: set hide_past.
    pub fn hide_past(mut self, hide: bool) -> Self {
        self.hide_past = hide;
        self
    }
}

/// Applies the view filter to a meeting collection.
///
/// Day boundaries are computed in `tz`. The output preserves the input
/// order; the source collection is assumed to arrive chronologically from
/// the remote service and no sort is performed. `hide_past` is applied
/// after the scope filter.
pub fn filter_meetings<Tz: TimeZone>(
    meetings: &[Meeting],
    view: &ViewFilter,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<Meeting> {
    let in_scope: Box<dyn Fn(&Meeting) -> bool> = match view.scope {
        Scope::Today => {
            let window = TimeWindow::for_day(now, tz);
            Box::new(move |m| window.contains(m.start_time))
        }
        Scope::Upcoming => {
            let day_start = TimeWindow::for_day(now, tz).start;
            Box::new(move |m| m.start_time >= day_start)
        }
        Scope::Week => {
            let window = TimeWindow::for_week(now, tz);
            Box::new(move |m| window.contains(m.start_time))
        }
        Scope::Past => Box::new(move |m| m.is_past(now)),
    };

    meetings
        .iter()
        .filter(|m| in_scope(m))
        .filter(|m| !view.hide_past || !m.is_past(now))
        .cloned()
        .collect()
}

/// One calendar day of meetings, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    /// The long-form day label, e.g. `"Monday, January 1, 2024"`.
    pub label: String,
    /// The meetings of that day, in the order they appeared in the input.
    pub meetings: Vec<Meeting>,
}

/// Meetings grouped by calendar-day label.
///
/// Group order is the first-seen order of day labels; within a group the
/// source order is preserved. The structure is rebuilt on every derivation,
/// never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedMeetings {
    groups: Vec<DayGroup>,
}

impl GroupedMeetings {
    /// Returns the number of day groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the total number of meetings across all groups.
    pub fn meeting_count(&self) -> usize {
        self.groups.iter().map(|g| g.meetings.len()).sum()
    }

    /// Returns the group for a day label, if present.
    pub fn get(&self, label: &str) -> Option<&DayGroup> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Iterates groups in first-seen label order.
    pub fn iter(&self) -> impl Iterator<Item = &DayGroup> {
        self.groups.iter()
    }

    fn push(&mut self, label: String, meeting: Meeting) {
        match self.groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.meetings.push(meeting),
            None => self.groups.push(DayGroup {
                label,
                meetings: vec![meeting],
            }),
        }
    }
}

/// Groups a filtered meeting list by calendar-day label in `tz`.
///
/// A day label is created lazily on the first meeting encountered for that
/// day. An empty input yields an empty grouping.
pub fn group_by_day<Tz: TimeZone>(meetings: &[Meeting], tz: &Tz) -> GroupedMeetings
where
    Tz::Offset: std::fmt::Display,
{
    let mut grouped = GroupedMeetings::default();
    for meeting in meetings {
        grouped.push(day_label(meeting.start_time, tz), meeting.clone());
    }
    grouped
}

/// Per-day expand/collapse state.
///
/// Keys accumulate for the session lifetime and are never pruned; a label
/// that was never toggled is implicitly collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<String, bool>,
}

impl ExpansionState {
    /// Creates a fresh state with every label collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the given day label is expanded (default collapsed).
    pub fn is_expanded(&self, label: &str) -> bool {
        self.expanded.get(label).copied().unwrap_or(false)
    }

    /// Flips the state for one day label, leaving all other keys unchanged.
    pub fn toggle(&mut self, label: &str) {
        let entry = self.expanded.entry(label.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Returns the number of labels that have ever been toggled.
    pub fn tracked_labels(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn meeting(id: &str, start: DateTime<Utc>) -> Meeting {
        Meeting::new(id, format!("Topic {id}"), start, 30, format!("https://example.com/j/{id}"))
    }

    /// Jan 1 2024 (Mon): one past, one future meeting; plus Jan 2 and Dec 31.
    fn fixture() -> Vec<Meeting> {
        vec![
            meeting("dec31", utc(2023, 12, 31, 10, 0, 0)),
            meeting("jan1-morning", utc(2024, 1, 1, 9, 0, 0)),
            meeting("jan1-night", utc(2024, 1, 1, 23, 0, 0)),
            meeting("jan2", utc(2024, 1, 2, 8, 0, 0)),
        ]
    }

    fn ids(meetings: &[Meeting]) -> Vec<&str> {
        meetings.iter().map(|m| m.id.as_str()).collect()
    }

    /// Noon on Monday, January 1, 2024.
    fn test_now() -> DateTime<Utc> {
        utc(2024, 1, 1, 12, 0, 0)
    }

    mod filtering {
        use super::*;

        #[test]
        fn today_keeps_only_todays_calendar_day() {
            let filtered =
                filter_meetings(&fixture(), &ViewFilter::new(Scope::Today), test_now(), &Utc);
            assert_eq!(ids(&filtered), vec!["jan1-morning", "jan1-night"]);
        }

        #[test]
        fn today_excludes_other_days_regardless_of_hide_past() {
            let view = ViewFilter::new(Scope::Today).hide_past(true);
            let filtered = filter_meetings(&fixture(), &view, test_now(), &Utc);
            assert!(filtered.iter().all(|m| m.start_time.date_naive()
                == test_now().date_naive()));
        }

        #[test]
        fn upcoming_starts_at_todays_midnight() {
            let filtered =
                filter_meetings(&fixture(), &ViewFilter::new(Scope::Upcoming), test_now(), &Utc);
            // Today's 09:00 meeting is past `now` but still upcoming-scoped.
            assert_eq!(ids(&filtered), vec!["jan1-morning", "jan1-night", "jan2"]);
        }

        #[test]
        fn upcoming_never_drops_future_meetings() {
            let far_future = meeting("far", utc(2030, 6, 1, 0, 0, 0));
            let mut meetings = fixture();
            meetings.push(far_future);
            let filtered =
                filter_meetings(&meetings, &ViewFilter::new(Scope::Upcoming), test_now(), &Utc);
            assert!(filtered.iter().any(|m| m.id == "far"));
        }

        #[test]
        fn week_covers_sunday_through_saturday() {
            // Week of Dec 31 (Sun) .. Jan 6 (Sat).
            let filtered =
                filter_meetings(&fixture(), &ViewFilter::new(Scope::Week), test_now(), &Utc);
            assert_eq!(
                ids(&filtered),
                vec!["dec31", "jan1-morning", "jan1-night", "jan2"]
            );
        }

        #[test]
        fn past_keeps_only_started_meetings() {
            let filtered =
                filter_meetings(&fixture(), &ViewFilter::new(Scope::Past), test_now(), &Utc);
            assert_eq!(ids(&filtered), vec!["dec31", "jan1-morning"]);
        }

        #[test]
        fn hide_past_is_a_monotonic_subset() {
            for scope in [Scope::Today, Scope::Upcoming, Scope::Week, Scope::Past] {
                let shown =
                    filter_meetings(&fixture(), &ViewFilter::new(scope), test_now(), &Utc);
                let hidden = filter_meetings(
                    &fixture(),
                    &ViewFilter::new(scope).hide_past(true),
                    test_now(),
                    &Utc,
                );
                assert!(hidden.len() <= shown.len());
                for m in &hidden {
                    assert!(shown.contains(m), "hide_past must never add meetings");
                }
            }
        }

        #[test]
        fn today_hide_past_scenario() {
            // meetings = [today 09:00 (past), today 23:00 (future)], now = 12:00
            let meetings = vec![
                meeting("m1", utc(2024, 1, 1, 9, 0, 0)),
                meeting("m2", utc(2024, 1, 1, 23, 0, 0)),
            ];
            let view = ViewFilter::new(Scope::Today).hide_past(true);
            let filtered = filter_meetings(&meetings, &view, test_now(), &Utc);
            assert_eq!(ids(&filtered), vec!["m2"]);
        }

        #[test]
        fn preserves_input_order_without_sorting() {
            // Deliberately out of chronological order.
            let meetings = vec![
                meeting("late", utc(2024, 1, 1, 20, 0, 0)),
                meeting("early", utc(2024, 1, 1, 13, 0, 0)),
            ];
            let filtered =
                filter_meetings(&meetings, &ViewFilter::new(Scope::Today), test_now(), &Utc);
            assert_eq!(ids(&filtered), vec!["late", "early"]);
        }

        #[test]
        fn empty_input_yields_empty_output() {
            for scope in [Scope::Today, Scope::Upcoming, Scope::Week, Scope::Past] {
                let filtered = filter_meetings(&[], &ViewFilter::new(scope), test_now(), &Utc);
                assert!(filtered.is_empty());
            }
        }
    }

    mod grouping {
        use super::*;

        #[test]
        fn partitions_without_loss_or_duplication() {
            let filtered =
                filter_meetings(&fixture(), &ViewFilter::new(Scope::Upcoming), test_now(), &Utc);
            let grouped = group_by_day(&filtered, &Utc);

            // Keys pairwise distinct.
            let labels: Vec<_> = grouped.iter().map(|g| g.label.clone()).collect();
            let mut deduped = labels.clone();
            deduped.dedup();
            assert_eq!(labels, deduped);

            // Concatenation in key-first-seen order equals the filtered input.
            let concatenated: Vec<Meeting> = grouped
                .iter()
                .flat_map(|g| g.meetings.iter().cloned())
                .collect();
            assert_eq!(concatenated, filtered);
        }

        #[test]
        fn labels_in_first_seen_order() {
            let grouped = group_by_day(&fixture(), &Utc);
            let labels: Vec<_> = grouped.iter().map(|g| g.label.as_str()).collect();
            assert_eq!(
                labels,
                vec![
                    "Sunday, December 31, 2023",
                    "Monday, January 1, 2024",
                    "Tuesday, January 2, 2024",
                ]
            );
            assert_eq!(grouped.meeting_count(), 4);
        }

        #[test]
        fn same_day_meetings_share_a_group() {
            let grouped = group_by_day(&fixture(), &Utc);
            let group = grouped.get("Monday, January 1, 2024").unwrap();
            assert_eq!(ids(&group.meetings), vec!["jan1-morning", "jan1-night"]);
        }

        #[test]
        fn empty_input_yields_empty_grouping() {
            let grouped = group_by_day(&[], &Utc);
            assert!(grouped.is_empty());
            assert_eq!(grouped.len(), 0);
            assert_eq!(grouped.meeting_count(), 0);
        }

        #[test]
        fn idempotent_under_fixed_now() {
            let view = ViewFilter::new(Scope::Today).hide_past(true);
            let once = group_by_day(&filter_meetings(&fixture(), &view, test_now(), &Utc), &Utc);
            let twice = group_by_day(&filter_meetings(&fixture(), &view, test_now(), &Utc), &Utc);
            assert_eq!(once, twice);
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn default_collapsed() {
            let state = ExpansionState::new();
            assert!(!state.is_expanded("Monday, January 1, 2024"));
            assert_eq!(state.tracked_labels(), 0);
        }

        #[test]
        fn double_toggle_returns_to_collapsed() {
            let mut state = ExpansionState::new();
            let label = "Monday, January 1, 2024";

            state.toggle(label);
            assert!(state.is_expanded(label));
            state.toggle(label);
            assert!(!state.is_expanded(label));
        }

        #[test]
        fn toggling_unseen_label_expands_it() {
            let mut state = ExpansionState::new();
            state.toggle("Friday, March 15, 2024");
            assert!(state.is_expanded("Friday, March 15, 2024"));
        }

        #[test]
        fn toggle_leaves_other_labels_alone() {
            let mut state = ExpansionState::new();
            state.toggle("a");
            state.toggle("b");
            state.toggle("a");

            assert!(!state.is_expanded("a"));
            assert!(state.is_expanded("b"));
            // Keys accumulate; collapsing does not prune.
            assert_eq!(state.tracked_labels(), 2);
        }
    }
}
