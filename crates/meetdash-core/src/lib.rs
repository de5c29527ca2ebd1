//! Core types: meetings, time windows, view filters, grouping, share state

pub mod format;
pub mod meeting;
pub mod share;
pub mod store;
pub mod time;
pub mod tracing;
pub mod view;

pub use format::{FormatOptions, JsonDay, JsonMeeting, JsonView, OutputFormat, ViewFormatter, ellipsis};
pub use meeting::{Actionability, Country, Meeting, State, User, UserLocation};
pub use share::{
    ArtifactError, ArtifactRenderer, CopiedNotice, PendingShare, RedirectCountdown, ShareArtifact,
    ShareKind, ShareState,
};
pub use store::{AppState, FetchToken};
pub use time::{TimeWindow, day_label};
pub use tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
pub use view::{
    DayGroup, ExpansionState, GroupedMeetings, Scope, ViewFilter, filter_meetings, group_by_day,
};
