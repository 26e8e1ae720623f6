//! Calendar-day aggregation for the activity heatmap.
//!
//! Sessions are bucketed by local calendar date and projected onto a
//! contiguous trailing window ending at "today": every day in range appears
//! exactly once, zero-count days included.

use chrono::{Duration, NaiveDate, TimeZone};
use std::collections::HashMap;

use crate::model::PracticeSession;

/// Longest accepted trailing window, in days (about ten years).
///
/// Window length drives both the output allocation and the date arithmetic,
/// so it has to be bounded before either happens.
pub const MAX_WINDOW_DAYS: usize = 3_660;

/// Aggregated session count for one calendar day. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub sessions: u32,
}

/// Local calendar dates of the given sessions.
///
/// Records whose timestamp has not resolved yet are skipped; time-of-day is
/// discarded after conversion into `tz`.
pub fn session_dates<'a, Tz: TimeZone>(
    sessions: impl IntoIterator<Item = &'a PracticeSession>,
    tz: &Tz,
) -> Vec<NaiveDate> {
    sessions
        .into_iter()
        .filter_map(PracticeSession::created_at)
        .map(|at| at.with_timezone(tz).date_naive())
        .collect()
}

/// Bucket dates into a trailing window of `window_days` days ending at
/// `today`.
///
/// The result has exactly `window_days` entries in ascending date order;
/// days with no sessions carry a zero count and dates outside the window are
/// ignored. An empty input yields a full-length all-zero window. Windows
/// longer than `MAX_WINDOW_DAYS` are rejected and yield an empty result.
#[must_use]
pub fn daily_buckets(
    dates: impl IntoIterator<Item = NaiveDate>,
    today: NaiveDate,
    window_days: usize,
) -> Vec<DailyBucket> {
    let span = match i64::try_from(window_days) {
        Ok(span) if window_days <= MAX_WINDOW_DAYS => span,
        _ => return Vec::new(),
    };

    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for date in dates {
        *counts.entry(date).or_insert(0) += 1;
    }

    (0..span)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DailyBucket {
                date,
                sessions: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// All-zero window of `window_days` days ending at `today`.
///
/// Used when a history fetch fails and the view should show "no data"
/// instead of a gap.
#[must_use]
pub fn empty_window(today: NaiveDate, window_days: usize) -> Vec<DailyBucket> {
    daily_buckets(std::iter::empty(), today, window_days)
}
