//! Assistant-facing tool functions.
//!
//! Every tool returns a status envelope rather than an error: successes wrap
//! the listing payload, failures (including empty listings) carry a message
//! the assistant can relay to the user.

use crate::components::gmail::NormalizedEmail;
use crate::components::google_calendar::models::CalendarEvent;
use crate::components::google_calendar::time::TimeBound;
use crate::components::{GmailHandle, GoogleCalendarHandle};
use serde::Serialize;

/// Outcome of a calendar listing
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalendarToolResponse {
    Success { events: Vec<CalendarEvent> },
    Error { message: String },
}

/// Outcome of an email listing
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EmailToolResponse {
    Success { messages: Vec<NormalizedEmail> },
    Error { message: String },
}

/// Fetch calendar events within a specified time window.
///
/// Either bound may be an ISO timestamp or a relative-time phrase such as
/// "last week start"; missing bounds default to the past seven days.
pub async fn get_calendar_events(
    handle: &GoogleCalendarHandle,
    time_min: Option<String>,
    time_max: Option<String>,
    max_items: Option<u32>,
) -> CalendarToolResponse {
    let time_min = TimeBound::from_input(time_min.as_deref());
    let time_max = TimeBound::from_input(time_max.as_deref());

    match handle.list_events(time_min, time_max, max_items).await {
        Ok(events) if events.is_empty() => CalendarToolResponse::Error {
            message: "No upcoming events found.".to_string(),
        },
        Ok(events) => CalendarToolResponse::Success { events },
        Err(e) => CalendarToolResponse::Error {
            message: format!("An error occurred: {}.", e),
        },
    }
}

/// Fetch the most recent emails, flattened for display
pub async fn get_emails(handle: &GmailHandle, max_items: Option<u32>) -> EmailToolResponse {
    match handle.list_messages(max_items).await {
        Ok(messages) if messages.is_empty() => EmailToolResponse::Error {
            message: "No messages found.".to_string(),
        },
        Ok(messages) => EmailToolResponse::Success { messages },
        Err(e) => EmailToolResponse::Error {
            message: format!("An error occurred: {}.", e),
        },
    }
}
