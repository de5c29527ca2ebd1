//! Meeting list and creation commands.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

use meetdash_api::{CreateMeeting, MeetingService};
use meetdash_core::{
    AppState, ExpansionState, FormatOptions, OutputFormat, ViewFilter, ViewFormatter,
    filter_meetings, group_by_day,
};

use crate::error::{ClientError, ClientResult};

/// Options for the meeting list view.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub view: ViewFilter,
    pub format: OutputFormat,
    pub expand: Vec<String>,
    pub expand_all: bool,
    pub max_topic_length: Option<usize>,
    pub show_urls: bool,
}

/// Fetches meetings and prints the grouped view.
pub async fn list(service: &MeetingService, options: &ListOptions) -> ClientResult<()> {
    let mut state = AppState::new();
    let token = state.begin_fetch();
    let meetings = service.list_meetings().await?;

    let now = Utc::now();
    state.apply_meetings(token, meetings, now);

    let filtered = filter_meetings(state.meetings(), &options.view, now, &Local);
    let grouped = group_by_day(&filtered, &Local);

    let mut expansion = ExpansionState::new();
    if options.expand_all {
        for group in grouped.iter() {
            if !expansion.is_expanded(&group.label) {
                expansion.toggle(&group.label);
            }
        }
    }
    for label in &options.expand {
        if !expansion.is_expanded(label) {
            expansion.toggle(label);
        }
    }

    let formatter = ViewFormatter::new(FormatOptions {
        max_topic_length: options.max_topic_length,
        show_urls: options.show_urls,
    });
    match options.format {
        OutputFormat::Tty => {
            print!(
                "{}",
                ensure_trailing_newline(formatter.format_tty(
                    &grouped,
                    &expansion,
                    options.view.scope,
                    now
                ))
            );
        }
        OutputFormat::Json => {
            let json = formatter
                .format_json(&grouped, now)
                .map_err(|e| ClientError::Action(format!("failed to encode view: {}", e)))?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Schedules a new meeting.
///
/// The date and time are parsed and rejected client-side; an invalid input
/// never reaches the service.
pub async fn create(
    service: &MeetingService,
    topic: String,
    date: String,
    time: String,
    duration: u32,
) -> ClientResult<()> {
    let start_time = parse_start(&date, &time)?;
    let request = CreateMeeting {
        topic,
        start_time,
        duration_minutes: duration,
    };
    let meeting = service.create_meeting(&request).await?;

    println!(
        "Scheduled \"{}\" for {} UTC ({} min).",
        meeting.topic,
        meeting.start_time.format("%Y-%m-%d %H:%M"),
        meeting.duration_minutes
    );
    println!("Join: {}", meeting.join_url);
    if let Some(ref host) = meeting.host_url {
        println!("Host: {}", host);
    }
    Ok(())
}

/// Parses the creation form's date and time into a UTC instant.
fn parse_start(date: &str, time: &str) -> ClientResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
        ClientError::Input(format!("invalid date {date:?} (expected YYYY-MM-DD): {e}"))
    })?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| ClientError::Input(format!("invalid time {time:?} (expected HH:MM): {e}")))?;
    // Meeting times are entered and stored in UTC, as the service expects.
    Ok(date.and_time(time).and_utc())
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_valid_start() {
        let start = parse_start("2024-03-15", "10:30").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn reject_impossible_date() {
        let err = parse_start("2024-02-30", "10:30").unwrap_err();
        assert!(matches!(err, ClientError::Input(_)));
    }

    #[test]
    fn reject_impossible_time() {
        assert!(parse_start("2024-03-15", "25:00").is_err());
        assert!(parse_start("2024-03-15", "10:61").is_err());
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_start("next tuesday", "10:30").is_err());
        assert!(parse_start("2024-03-15", "noonish").is_err());
        assert!(parse_start("", "").is_err());
    }

    #[test]
    fn trailing_newline_helper() {
        assert_eq!(ensure_trailing_newline("x".to_string()), "x\n");
        assert_eq!(ensure_trailing_newline("x\n".to_string()), "x\n");
    }
}
