use std::sync::Arc;

use mantra_core::Clock;
use mantra_core::model::{Counter, PracticeSession, SessionId, UserId, Word};
use storage::repository::SessionRepository;

use crate::error::SessionServiceError;

/// Saves completed practice rounds and lists a user's recent sessions.
///
/// Saves are fire-and-forget: overlapping saves are not coordinated against
/// each other and each write independently succeeds or fails.
#[derive(Clone)]
pub struct SessionService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { clock, sessions }
    }

    /// Persist the current counter as a session record.
    ///
    /// A zero count is a no-op: nothing is written and `None` is returned.
    /// The lost-focus tally is stored only when it is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` when the append fails.
    pub async fn save_session(
        &self,
        user_id: &UserId,
        counter: Counter,
        word: Option<Word>,
    ) -> Result<Option<SessionId>, SessionServiceError> {
        if counter.is_empty() {
            tracing::debug!(user = %user_id, "skipping save of empty counter");
            return Ok(None);
        }

        let lost_focus = (counter.lost_focus() > 0).then(|| counter.lost_focus());
        let session = PracticeSession::new(
            SessionId::generate(),
            user_id.clone(),
            counter.count(),
            word,
            lost_focus,
            self.clock.now(),
        )?;

        self.sessions.append_session(&session).await?;
        Ok(Some(session.id()))
    }

    /// The user's sessions, most recent first, limited to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` when the query fails.
    pub async fn list_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PracticeSession>, SessionServiceError> {
        Ok(self.sessions.list_recent_sessions(user_id, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantra_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service() -> (SessionService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let service = SessionService::new(fixed_clock(), repo.clone());
        (service, repo)
    }

    fn counted(n: u32) -> Counter {
        let mut counter = Counter::new();
        for _ in 0..n {
            counter.increment();
        }
        counter
    }

    #[tokio::test]
    async fn zero_count_save_is_a_no_op() {
        let (service, repo) = service();
        let user = UserId::new("alice").unwrap();

        let saved = service
            .save_session(&user, Counter::new(), None)
            .await
            .unwrap();
        assert_eq!(saved, None);

        let sessions = repo.list_recent_sessions(&user, 10).await.unwrap();
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn save_records_count_word_and_clock_timestamp() {
        let (service, _) = service();
        let user = UserId::new("alice").unwrap();

        let saved = service
            .save_session(&user, counted(11), Some(Word::new("peace").unwrap()))
            .await
            .unwrap();
        assert!(saved.is_some());

        let sessions = service.list_recent(&user, 10).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].count(), 11);
        assert_eq!(sessions[0].word().map(|w| w.as_str()), Some("peace"));
        assert_eq!(sessions[0].created_at(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn zero_lost_focus_is_stored_as_absent() {
        let (service, _) = service();
        let user = UserId::new("alice").unwrap();

        let mut counter = counted(3);
        service
            .save_session(&user, counter, None)
            .await
            .unwrap();

        counter.record_lost_focus();
        service
            .save_session(&user, counter, None)
            .await
            .unwrap();

        let sessions = service.list_recent(&user, 10).await.unwrap();
        let tallies: Vec<Option<u32>> = sessions
            .iter()
            .map(mantra_core::model::PracticeSession::lost_focus_count)
            .collect();
        assert!(tallies.contains(&None));
        assert!(tallies.contains(&Some(1)));
    }

    #[tokio::test]
    async fn overlapping_saves_both_land() {
        let (service, _) = service();
        let user = UserId::new("alice").unwrap();

        let first = service.save_session(&user, counted(1), None);
        let second = service.save_session(&user, counted(2), None);
        let (a, b) = tokio::join!(first, second);
        assert!(a.unwrap().is_some());
        assert!(b.unwrap().is_some());

        let sessions = service.list_recent(&user, 10).await.unwrap();
        assert_eq!(sessions.len(), 2);
    }
}
