use katsaus::components::google_calendar::models::CalendarEvent;
use katsaus::components::google_calendar::time::{normalize_window, TimeBound, TimeWindow};
use katsaus::error::AgentResult;
use chrono::{TimeZone, Utc};

/// Mock implementation of the Google Calendar handle for testing
#[derive(Debug, Clone, Default)]
pub struct MockGoogleCalendarHandle {
    events: Vec<CalendarEvent>,
}

impl MockGoogleCalendarHandle {
    /// Create a new mock handle with predefined events
    pub fn new() -> Self {
        let events = vec![
            CalendarEvent {
                id: "event1".to_string(),
                summary: Some("Test Event 1".to_string()),
                description: Some("Test Description 1".to_string()),
                created: Some("2025-03-01T00:00:00Z".to_string()),
                start_date_time: Some("2025-03-10T10:00:00Z".to_string()),
                end_date_time: Some("2025-03-10T11:00:00Z".to_string()),
                ..Default::default()
            },
            CalendarEvent {
                id: "event2".to_string(),
                summary: Some("Test Event 2".to_string()),
                description: Some("Test Description 2".to_string()),
                created: Some("2025-03-02T00:00:00Z".to_string()),
                start_date_time: Some("2025-03-11T10:00:00Z".to_string()),
                end_date_time: Some("2025-03-11T11:00:00Z".to_string()),
                ..Default::default()
            },
        ];

        Self { events }
    }

    /// List events whose start falls inside the given window
    pub async fn list_events(&self, window: &TimeWindow) -> AgentResult<Vec<CalendarEvent>> {
        let events = self
            .events
            .iter()
            .filter(|event| {
                event
                    .start_date_time
                    .as_deref()
                    .and_then(|start| {
                        chrono::DateTime::parse_from_rfc3339(start)
                            .ok()
                            .map(|start| start.with_timezone(&Utc))
                    })
                    .is_some_and(|start| {
                        start >= window.start
                            && window.end.map(|end| start < end).unwrap_or(true)
                    })
            })
            .cloned()
            .collect();
        Ok(events)
    }
}

/// Test that demonstrates how to use the mock
#[tokio::test]
async fn test_google_calendar_mock() {
    let now = Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 45).unwrap();
    let mock_handle = MockGoogleCalendarHandle::new();

    // The default window (past seven days) covers both events
    let window = normalize_window(&TimeBound::Absent, &TimeBound::Absent, now);
    let events = mock_handle.list_events(&window).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "event1");
    assert_eq!(events[1].id, "event2");
}

/// Windows resolved from phrases bound which events are listed
#[tokio::test]
async fn test_window_bounds_filter_events() {
    let now = Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 45).unwrap();
    let mock_handle = MockGoogleCalendarHandle::new();

    // Explicit bounds cover only the first event
    let window = normalize_window(
        &TimeBound::Expr("2025-03-10T00:00:00Z".to_string()),
        &TimeBound::Expr("2025-03-11T00:00:00Z".to_string()),
        now,
    );
    let events = mock_handle.list_events(&window).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "event1");

    // An unresolvable upper bound opens the window and both events return
    let window = normalize_window(
        &TimeBound::Expr("2025-03-10T00:00:00Z".to_string()),
        &TimeBound::Expr("not-a-real-phrase".to_string()),
        now,
    );
    let events = mock_handle.list_events(&window).await.unwrap();
    assert_eq!(events.len(), 2);

    // An unresolvable lower bound falls back to now, past both events
    let window = normalize_window(
        &TimeBound::Expr("not-a-real-phrase".to_string()),
        &TimeBound::Absent,
        now,
    );
    let events = mock_handle.list_events(&window).await.unwrap();
    assert!(events.is_empty());
}
