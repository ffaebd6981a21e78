use crate::error::{AgentResult, Error};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc};

/// A listing bound as supplied by the caller: missing, already absolute, or
/// a free-form expression (relative-time phrase or ISO-8601 timestamp).
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBound {
    Absent,
    Instant(DateTime<Utc>),
    Expr(String),
}

impl TimeBound {
    /// Build a bound from an optional caller-supplied string
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            Some(expr) => TimeBound::Expr(expr.to_string()),
            None => TimeBound::Absent,
        }
    }

    /// Resolve the bound to an absolute instant, `None` for an absent bound.
    /// Already-absolute bounds resolve to themselves.
    pub fn resolve(&self, now: DateTime<Utc>) -> AgentResult<Option<DateTime<Utc>>> {
        match self {
            TimeBound::Absent => Ok(None),
            TimeBound::Instant(instant) => Ok(Some(*instant)),
            TimeBound::Expr(expr) => resolve_time_expr(expr, now).map(Some),
        }
    }
}

/// A resolved listing window. `end` is `None` when the window is open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Lower bound formatted as a Calendar API time filter
    pub fn time_min_param(&self) -> String {
        format_bound(self.start)
    }

    /// Upper bound formatted as a Calendar API time filter, `None` when the
    /// window is open-ended and the filter should be omitted
    pub fn time_max_param(&self) -> Option<String> {
        self.end.map(format_bound)
    }
}

fn format_bound(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

type Resolution = fn(DateTime<Utc>) -> DateTime<Utc>;

/// Relative-time vocabulary: lowercase phrase to an offset of the instant it
/// is resolved against. Weeks run Monday through Sunday; the time of day is
/// carried over from the reference instant, never truncated. "Month"
/// arithmetic is a fixed 30-day shift, and the current-week end phrases
/// count backwards from the reference instant.
pub const MAGIC_WORDS: &[(&str, Resolution)] = &[
    ("now", |now| now),
    ("week start", start_of_week),
    ("this week start", start_of_week),
    ("current week start", start_of_week),
    ("week end", backwards_week_end),
    ("this week end", backwards_week_end),
    ("current week end", backwards_week_end),
    ("next week start", |now| start_of_week(now + Duration::days(7))),
    ("next week end", |now| {
        let ahead = now + Duration::days(7);
        ahead + Duration::days(6 - weekday_index(ahead))
    }),
    ("last week start", |now| start_of_week(now - Duration::days(7))),
    ("last week end", |now| {
        let ago = now - Duration::days(7);
        ago + Duration::days(6 - weekday_index(ago))
    }),
    ("last month start", |now| {
        let ago = now - Duration::days(30);
        ago - Duration::days(i64::from(ago.day()) - 1)
    }),
    ("last month end", |now| {
        let ago = now - Duration::days(30);
        ago + Duration::days(30 - i64::from(ago.day()))
    }),
    ("2 weeks ago start", |now| start_of_week(now - Duration::days(14))),
    ("2 weeks ago end", |now| {
        let ago = now - Duration::days(14);
        ago + Duration::days(13 - weekday_index(ago))
    }),
];

/// Days since Monday, 0..=6
fn weekday_index(instant: DateTime<Utc>) -> i64 {
    i64::from(instant.weekday().num_days_from_monday())
}

fn start_of_week(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant - Duration::days(weekday_index(instant))
}

fn backwards_week_end(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant - Duration::days(6 - weekday_index(instant))
}

/// Resolve a caller-supplied time expression against `now`.
///
/// Accepts the relative-time vocabulary (case-insensitive) or a strict
/// `YYYY-MM-DDTHH:MM:SS` timestamp with an optional trailing `Z`, always
/// read as UTC.
pub fn resolve_time_expr(expr: &str, now: DateTime<Utc>) -> AgentResult<DateTime<Utc>> {
    let lowered = expr.to_lowercase();
    if let Some((_, resolution)) = MAGIC_WORDS.iter().find(|(word, _)| *word == lowered) {
        return Ok(resolution(now));
    }

    let stripped = expr.strip_suffix('Z').unwrap_or(expr);
    NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.and_utc())
        .map_err(|_| Error::UnrecognizedTimeExpr(expr.to_string()))
}

/// Turn loose listing bounds into a concrete window.
///
/// A missing lower bound defaults to seven days before `now`, a missing
/// upper bound to `now`. An unresolvable lower bound falls back to `now`
/// while an unresolvable upper bound leaves the window open-ended. If the
/// bounds come out inverted the upper bound is dropped, not swapped.
pub fn normalize_window(
    time_min: &TimeBound,
    time_max: &TimeBound,
    now: DateTime<Utc>,
) -> TimeWindow {
    let start = match time_min.resolve(now) {
        Ok(Some(instant)) => instant,
        Ok(None) => now - Duration::days(7),
        Err(_) => now,
    };

    let end = match time_max.resolve(now) {
        Ok(Some(instant)) => Some(instant),
        Ok(None) => Some(now),
        Err(_) => None,
    };

    let end = end.filter(|instant| start < *instant);

    TimeWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Wednesday 2025-03-12, weekday index 2, day of month 12
    fn frozen_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 45).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        // All phrase resolutions keep the time of day from the reference
        Utc.with_ymd_and_hms(y, m, d, 15, 30, 45).unwrap()
    }

    fn resolve(expr: &str) -> DateTime<Utc> {
        resolve_time_expr(expr, frozen_now()).unwrap()
    }

    #[test]
    fn test_now_phrase() {
        assert_eq!(resolve("now"), frozen_now());
    }

    #[test]
    fn test_week_start_phrases() {
        // Monday of the current week
        for phrase in ["week start", "this week start", "current week start"] {
            assert_eq!(resolve(phrase), at(2025, 3, 10), "phrase: {}", phrase);
        }
    }

    #[test]
    fn test_week_end_phrases() {
        // The current-week end counts backwards: Wednesday minus 4 days
        // lands on the previous Saturday
        for phrase in ["week end", "this week end", "current week end"] {
            assert_eq!(resolve(phrase), at(2025, 3, 8), "phrase: {}", phrase);
        }
    }

    #[test]
    fn test_next_week_phrases() {
        assert_eq!(resolve("next week start"), at(2025, 3, 17));
        assert_eq!(resolve("next week end"), at(2025, 3, 23));
    }

    #[test]
    fn test_last_week_phrases() {
        assert_eq!(resolve("last week start"), at(2025, 3, 3));
        assert_eq!(resolve("last week end"), at(2025, 3, 9));
    }

    #[test]
    fn test_last_month_phrases() {
        // Fixed 30-day month approximation: 30 days before 2025-03-12 is
        // 2025-02-10, so the "month" runs from Feb 1...
        assert_eq!(resolve("last month start"), at(2025, 2, 1));
        // ...to 20 days later, which overshoots short February into March
        assert_eq!(resolve("last month end"), at(2025, 3, 2));
    }

    #[test]
    fn test_two_weeks_ago_phrases() {
        assert_eq!(resolve("2 weeks ago start"), at(2025, 2, 24));
        // End offset is 13 days past the shifted Monday, not 6
        assert_eq!(resolve("2 weeks ago end"), at(2025, 3, 9));
    }

    #[test]
    fn test_phrases_match_case_insensitively() {
        for (phrase, resolution) in MAGIC_WORDS {
            let shouted = phrase.to_uppercase();
            assert_eq!(
                resolve_time_expr(&shouted, frozen_now()).unwrap(),
                resolution(frozen_now()),
                "phrase: {}",
                phrase
            );
        }
    }

    #[test]
    fn test_iso_timestamp_parsing() {
        let expected = Utc.with_ymd_and_hms(2025, 2, 20, 10, 0, 0).unwrap();
        assert_eq!(resolve("2025-02-20T10:00:00Z"), expected);
        assert_eq!(resolve("2025-02-20T10:00:00"), expected);
    }

    #[test]
    fn test_unrecognized_expressions() {
        for expr in ["yesterday", "2025-02-20", "not-a-real-phrase", ""] {
            assert!(matches!(
                resolve_time_expr(expr, frozen_now()),
                Err(Error::UnrecognizedTimeExpr(_))
            ));
        }
    }

    #[test]
    fn test_instant_resolution_is_idempotent() {
        let once = resolve("2025-02-20T10:00:00Z");
        let twice = TimeBound::Instant(once).resolve(frozen_now()).unwrap();
        assert_eq!(twice, Some(once));
    }

    #[test]
    fn test_normalize_window_defaults() {
        let now = frozen_now();
        let window = normalize_window(&TimeBound::Absent, &TimeBound::Absent, now);
        assert_eq!(window.start, now - Duration::days(7));
        assert_eq!(window.end, Some(now));
    }

    #[test]
    fn test_normalize_window_drops_inverted_end() {
        let now = frozen_now();
        let min = TimeBound::Expr("2025-03-01T00:00:00Z".to_string());
        let max = TimeBound::Expr("2025-02-01T00:00:00Z".to_string());
        let window = normalize_window(&min, &max, now);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, None);

        // Equal bounds collapse too
        let window = normalize_window(&min, &min, now);
        assert_eq!(window.end, None);
    }

    #[test]
    fn test_normalize_window_fallbacks_are_asymmetric() {
        let now = frozen_now();

        // Bad lower bound falls back to now; the upper bound still resolves
        let window = normalize_window(
            &TimeBound::Expr("not-a-real-phrase".to_string()),
            &TimeBound::Expr("week end".to_string()),
            now,
        );
        assert_eq!(window.start, now);
        // "week end" resolves behind now, so the collapse rule drops it
        assert_eq!(window.end, None);

        // Same fallback with an upper bound ahead of now keeps the bound
        let window = normalize_window(
            &TimeBound::Expr("not-a-real-phrase".to_string()),
            &TimeBound::Expr("next week end".to_string()),
            now,
        );
        assert_eq!(window.start, now);
        assert_eq!(window.end, Some(at(2025, 3, 23)));

        // Bad upper bound leaves the window open-ended, not clamped to now
        let window = normalize_window(
            &TimeBound::Expr("last week start".to_string()),
            &TimeBound::Expr("not-a-real-phrase".to_string()),
            now,
        );
        assert_eq!(window.start, at(2025, 3, 3));
        assert_eq!(window.end, None);
    }

    #[test]
    fn test_normalize_window_keeps_ordered_bounds() {
        let now = frozen_now();
        let window = normalize_window(
            &TimeBound::Expr("last week start".to_string()),
            &TimeBound::Expr("now".to_string()),
            now,
        );
        assert_eq!(window.start, at(2025, 3, 3));
        assert_eq!(window.end, Some(now));
    }

    #[test]
    fn test_window_params_format() {
        let window = TimeWindow {
            start: Utc.with_ymd_and_hms(2025, 3, 3, 15, 30, 45).unwrap(),
            end: Some(Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 45).unwrap()),
        };
        assert_eq!(window.time_min_param(), "2025-03-03T15:30:45Z");
        assert_eq!(window.time_max_param().as_deref(), Some("2025-03-12T15:30:45Z"));

        let open = TimeWindow { start: window.start, end: None };
        assert_eq!(open.time_max_param(), None);
    }
}
