//! Search window for availability queries.

use chrono::{Duration, NaiveDateTime};

use crate::error::{AllocatorResult, check_interval};

/// How far back and forward an unbounded query looks from "now".
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Minute-precision date-time format used on the command line and in output.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A resolved `[from, to)` window. Missing bounds fall back to
/// ±DEFAULT_WINDOW_DAYS around a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl SearchWindow {
    /// Default window: ±DEFAULT_WINDOW_DAYS from `now`
    pub fn around(now: NaiveDateTime) -> Self {
        SearchWindow {
            from: now - Duration::days(DEFAULT_WINDOW_DAYS),
            to: now + Duration::days(DEFAULT_WINDOW_DAYS),
        }
    }

    /// Fill in missing bounds from the default window around `now`.
    ///
    /// Two explicit bounds must form a non-empty window, otherwise this fails
    /// with `InvalidInterval`. When a defaulted bound leaves the window empty
    /// or reversed there is nothing to search, and `None` is returned.
    pub fn resolve(
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> AllocatorResult<Option<Self>> {
        if let (Some(from), Some(to)) = (from, to) {
            check_interval(from, to)?;
            return Ok(Some(SearchWindow { from, to }));
        }

        let default = Self::around(now);
        let window = SearchWindow {
            from: from.unwrap_or(default.from),
            to: to.unwrap_or(default.to),
        };
        Ok((window.from < window.to).then_some(window))
    }
}

/// Parse "YYYY-MM-DD HH:MM" into a naive local date-time.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .map_err(|_| format!("Invalid date-time '{}'. Expected YYYY-MM-DD HH:MM", s))
}
