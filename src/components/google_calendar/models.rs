use serde_json::Value;

/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

impl CalendarEvent {
    /// Build an event from one item of an `events.list` response
    pub fn from_item(item: &Value) -> Self {
        CalendarEvent {
            id: item
                .get("id")
                .and_then(|id| id.as_str())
                .unwrap_or("")
                .to_string(),
            summary: string_field(item, "summary"),
            description: string_field(item, "description"),
            created: string_field(item, "created"),
            start_date_time: nested_string_field(item, "start", "dateTime"),
            start_date: nested_string_field(item, "start", "date"),
            end_date_time: nested_string_field(item, "end", "dateTime"),
            end_date: nested_string_field(item, "end", "date"),
        }
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// All-day events carry a `date` under `start`/`end`, timed events a `dateTime`
fn nested_string_field(item: &Value, outer: &str, inner: &str) -> Option<String> {
    item.get(outer)
        .and_then(|v| v.get(inner))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
