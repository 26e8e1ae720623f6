use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeZone};
use mantra_core::Clock;
use mantra_core::activity::{DailyBucket, daily_buckets, empty_window, session_dates};
use mantra_core::model::UserId;
use storage::repository::SessionRepository;

/// Upper bound on how many records one aggregation fetch pulls.
pub const SESSION_FETCH_LIMIT: u32 = 1_000;

/// Trailing-window lengths for the two activity views.
///
/// The source history used both 182 and 3 days in different revisions, so
/// both are carried and configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindows {
    pub heatmap_days: usize,
    pub recent_days: usize,
}

impl Default for ActivityWindows {
    fn default() -> Self {
        Self {
            heatmap_days: 182,
            recent_days: 3,
        }
    }
}

/// Derives day-activity series from a user's session history.
///
/// Failures never propagate: a fetch error degrades to a full-length
/// all-zero window, which the views render as "no data".
#[derive(Clone)]
pub struct ActivityService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    windows: ActivityWindows,
}

impl ActivityService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>, windows: ActivityWindows) -> Self {
        Self {
            clock,
            sessions,
            windows,
        }
    }

    #[must_use]
    pub fn windows(&self) -> ActivityWindows {
        self.windows
    }

    /// Heatmap series: the trailing `heatmap_days` window ending today.
    pub async fn heatmap(&self, user_id: &UserId) -> Vec<DailyBucket> {
        let today = self.today_local();
        self.buckets_in(user_id, &Local, today, self.windows.heatmap_days)
            .await
    }

    /// Short strip for the counter page: the trailing `recent_days` window.
    pub async fn recent_strip(&self, user_id: &UserId) -> Vec<DailyBucket> {
        let today = self.today_local();
        self.buckets_in(user_id, &Local, today, self.windows.recent_days)
            .await
    }

    /// Aggregate into a window ending at `today` as seen in `tz`.
    ///
    /// `today` must be the current calendar date in `tz`; the split exists so
    /// tests can pin both.
    pub async fn buckets_in<Tz: TimeZone>(
        &self,
        user_id: &UserId,
        tz: &Tz,
        today: NaiveDate,
        window_days: usize,
    ) -> Vec<DailyBucket> {
        match self
            .sessions
            .list_recent_sessions(user_id, SESSION_FETCH_LIMIT)
            .await
        {
            Ok(sessions) => daily_buckets(session_dates(&sessions, tz), today, window_days),
            Err(err) => {
                tracing::debug!(user = %user_id, error = %err, "history fetch failed");
                empty_window(today, window_days)
            }
        }
    }

    fn today_local(&self) -> NaiveDate {
        self.clock.now().with_timezone(&Local).date_naive()
    }
}
