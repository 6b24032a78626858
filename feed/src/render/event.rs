//! Event renderer
//!
//! Turns event records into HTML fragments for the container.

use crate::domain::{EventAction, EventRecord};

use super::timestamp::format_timestamp;

pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const UNKNOWN_BRANCH: &str = "N/A";
pub const UNKNOWN_ACTION: &str = "Unknown";

/// Shown once, before the first poll cycle completes
pub const LOADING_PLACEHOLDER: &str = r#"<p class="loading">Loading events...</p>"#;

/// Shown when the server returns no events
pub const EMPTY_PLACEHOLDER: &str = r#"<p class="loading">No repository events found.</p>"#;

/// Shown when a poll cycle fails
pub const ERROR_PLACEHOLDER: &str =
    r#"<p class="error">Error loading events. Please check the logs for details.</p>"#;

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn strong(text: &str) -> String {
    format!("<strong>{}</strong>", escape_html(text))
}

/// Render the message for one event, without the surrounding element
pub fn render_message(event: &EventRecord) -> String {
    let author = event.author.as_deref().unwrap_or(UNKNOWN_AUTHOR);
    let to_branch = event.to_branch.as_deref().unwrap_or(UNKNOWN_BRANCH);
    let from_branch = event.from_branch.as_deref().unwrap_or(UNKNOWN_BRANCH);
    let when = escape_html(&format_timestamp(event.timestamp.as_deref()));

    if event.is_malformed() {
        return render_unknown(event, author, &when);
    }

    match &event.action {
        Some(EventAction::Push) => format!(
            "{} pushed to {} on {}",
            strong(author),
            strong(to_branch),
            when
        ),
        Some(EventAction::PullRequest) => format!(
            "{} submitted a pull request from {} to {} on {}",
            strong(author),
            strong(from_branch),
            strong(to_branch),
            when
        ),
        Some(EventAction::Merge) => format!(
            "{} merged branch {} to {} on {}",
            strong(author),
            strong(from_branch),
            strong(to_branch),
            when
        ),
        _ => render_unknown(event, author, &when),
    }
}

/// Diagnostic message for unknown actions and records that could not be read
fn render_unknown(event: &EventRecord, author: &str, when: &str) -> String {
    let action = event
        .action
        .as_ref()
        .map(EventAction::as_str)
        .unwrap_or(UNKNOWN_ACTION);
    format!(
        "An unknown event occurred: Action '{}' by {} on {}. Raw data: {}",
        escape_html(action),
        strong(author),
        when,
        escape_html(&event.raw_json())
    )
}

/// Render one event as a container fragment
pub fn render_event(event: &EventRecord) -> String {
    format!(r#"<div class="event">{}</div>"#, render_message(event))
}
